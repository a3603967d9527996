use std::rc::Rc;

use utoipa::openapi::ResponseBuilder;
use utoipa::openapi::path::{Operation as OpenApiOperation, PathItem};

use crate::model::Model;
use crate::request::{JSON, Request};
use crate::response::Response;

/// Supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Method {
    #[display("get")]
    Get,
    #[display("post")]
    Post,
    #[display("put")]
    Put,
    #[display("delete")]
    Delete,
}

impl Method {
    /// Whether the request model travels as a JSON body.
    pub fn is_body_based(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// The slot of this method in a path item.
    pub(crate) fn slot(self, item: &mut PathItem) -> &mut Option<OpenApiOperation> {
        match self {
            Self::Get => &mut item.get,
            Self::Post => &mut item.post,
            Self::Put => &mut item.put,
            Self::Delete => &mut item.delete,
        }
    }
}

/// An HTTP operation on a sub-path of a [`PathDefinition`](crate::PathDefinition).
#[derive(Debug, Clone)]
pub struct Operation {
    method: Method,
    sub_path: String,
    description: String,
    request: Option<Request>,
    response: Option<Response>,
}

impl Operation {
    pub fn method(&self) -> Method {
        self.method
    }

    /// The path suffix appended to the node path, possibly empty.
    pub fn sub_path(&self) -> &str {
        &self.sub_path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Projects this operation, tagged with its node display name, and returns
    /// it with its path item key.
    ///
    /// Query-based methods always carry a (possibly empty) parameter list.
    /// Body-based methods omit an empty list and take their body from a
    /// [`Request::Body`]. The `200` response is always declared; its content
    /// is present only when a response model is set.
    pub fn build_operation(&self, tag: &str) -> (Method, OpenApiOperation) {
        let parameters = self
            .request
            .as_ref()
            .map(Request::to_parameters)
            .unwrap_or_default();

        let builder = OpenApiOperation::builder()
            .tags(Some([tag]))
            .description(Some(self.description.as_str()).filter(|text| !text.is_empty()));

        let builder = if self.method.is_body_based() {
            let body = self.request.as_ref().and_then(Request::to_request_body);
            let parameters = Some(parameters).filter(|parameters| !parameters.is_empty());
            builder.parameters(parameters).request_body(body)
        } else {
            builder.parameters(Some(parameters))
        };

        let mut response = ResponseBuilder::new().description(&self.description);
        if let Some(payload) = &self.response {
            response = response.content(JSON, payload.to_content());
        }

        let operation = builder.response("200", response.build()).build();
        (self.method, operation)
    }
}

/// Declares an [`Operation`] inside a path definition.
///
/// ```rust
/// use apitree_core::{ModelDefinition, PathDefinition};
///
/// # fn example() -> Result<(), apitree_core::SpecError> {
/// let root = PathDefinition::define("/api/v1/book", "Book", |p| {
///     let book = p.model("Book", |m| {
///         m.id();
///         m.string("name").required();
///     })?;
///     let id = ModelDefinition::dynamic(|m| {
///         m.id();
///     })?;
///
///     p.get("", |op| {
///         op.description("Book detail").req(&id).wrapped_resp(&book);
///     });
///     p.post("", |op| {
///         op.description("Create a book").req_body(&book).wrapped_resp(&id);
///     });
///     Ok(())
/// })?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OperationBuilder {
    operation: Operation,
}

impl OperationBuilder {
    pub(crate) fn new(method: Method, sub_path: impl Into<String>) -> Self {
        Self {
            operation: Operation {
                method,
                sub_path: sub_path.into(),
                description: String::new(),
                request: None,
                response: None,
            },
        }
    }

    pub(crate) fn build(self) -> Operation {
        self.operation
    }

    /// Describes the operation and its `200` response.
    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.operation.description = description.into();
        self
    }

    /// Model fields as query parameters.
    pub fn req(&mut self, model: &Model) -> &mut Self {
        self.operation.request = Some(Request::Plain(Rc::clone(model)));
        self
    }

    /// Model fields as query parameters, then the paging parameters.
    pub fn page_req(&mut self, model: &Model) -> &mut Self {
        self.operation.request = Some(Request::Page(Rc::clone(model)));
        self
    }

    /// Model as JSON request body.
    pub fn req_body(&mut self, model: &Model) -> &mut Self {
        self.operation.request = Some(Request::Body(Rc::clone(model)));
        self
    }

    pub fn resp(&mut self, model: &Model) -> &mut Self {
        self.operation.response = Some(Response::Plain(Rc::clone(model)));
        self
    }

    pub fn wrapped_resp(&mut self, model: &Model) -> &mut Self {
        self.operation.response = Some(Response::Wrapped(Rc::clone(model)));
        self
    }

    pub fn page_resp(&mut self, model: &Model) -> &mut Self {
        self.operation.response = Some(Response::Paged(Rc::clone(model)));
        self
    }
}
