use utoipa::openapi::path::{Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBody;
use utoipa::openapi::{Content, Required};

use crate::field::Field;
use crate::model::Model;
use crate::schema;

pub(crate) const JSON: &str = "application/json";

/// Name of the page size query parameter.
pub const PAGE_SIZE: &str = "pageSize";
/// Name of the page index query parameter.
pub const PAGE_INDEX: &str = "p";

/// How an operation receives its input model.
#[derive(Debug, Clone)]
pub enum Request {
    /// Every field becomes a query parameter.
    Plain(Model),
    /// Like [`Request::Plain`], followed by the `pageSize` and `p` parameters.
    Page(Model),
    /// The model is the JSON request body.
    Body(Model),
}

impl Request {
    /// The underlying model.
    pub fn model(&self) -> &Model {
        match self {
            Self::Plain(model) | Self::Page(model) | Self::Body(model) => model,
        }
    }

    /// Query parameters, in field order. Empty for a body request.
    pub fn to_parameters(&self) -> Vec<Parameter> {
        match self {
            Self::Plain(model) => model.fields().iter().map(query_parameter).collect(),
            Self::Page(model) => model
                .fields()
                .iter()
                .map(query_parameter)
                .chain(page_parameters())
                .collect(),
            Self::Body(_) => vec![],
        }
    }

    /// The JSON request body, only for a body request.
    pub fn to_request_body(&self) -> Option<RequestBody> {
        let Self::Body(model) = self else {
            return None;
        };
        let content = Content::builder().schema(Some(model.to_schema())).build();
        let body = RequestBody::builder()
            .content(JSON, content)
            .required(Some(Required::False))
            .build();
        Some(body)
    }
}

fn query_parameter(field: &Field) -> Parameter {
    let required = if field.nullable() {
        Required::False
    } else {
        Required::True
    };
    ParameterBuilder::new()
        .name(field.name())
        .parameter_in(ParameterIn::Query)
        .required(required)
        .description(field.remark())
        .schema(Some(field.to_schema()))
        .build()
}

fn page_parameters() -> [Parameter; 2] {
    let page_parameter = |name: &str, description: &str| {
        ParameterBuilder::new()
            .name(name)
            .parameter_in(ParameterIn::Query)
            .required(Required::True)
            .description(Some(description))
            .schema(Some(schema::object(schema::int32().build())))
            .build()
    };
    [
        page_parameter(PAGE_SIZE, "Number of items per page"),
        page_parameter(PAGE_INDEX, "Page index"),
    ]
}
