//! Response variants and their envelopes.
//!
//! Wrapped and paged responses share the `{code, message, data}` envelope:
//!
//! ```json
//! {
//!   "type": "object",
//!   "title": "Book",
//!   "properties": {
//!     "code": {"type": "integer", "format": "int32"},
//!     "message": {"type": "string"},
//!     "data": {"$ref": "#/components/schemas/me.books.Book"}
//!   }
//! }
//! ```

use utoipa::openapi::{Content, ObjectBuilder, RefOr, Schema, Type};

use crate::model::Model;
use crate::schema;

/// How an operation returns its output model.
#[derive(Debug, Clone)]
pub enum Response {
    /// The model schema, unwrapped.
    Plain(Model),
    /// The model as `data` of the `{code, message, data}` envelope.
    Wrapped(Model),
    /// A page of models as `data` of the envelope.
    Paged(Model),
}

impl Response {
    /// The underlying model.
    pub fn model(&self) -> &Model {
        match self {
            Self::Plain(model) | Self::Wrapped(model) | Self::Paged(model) => model,
        }
    }

    /// The response payload schema.
    ///
    /// Models are resolved at call time, so registered models appear as references.
    pub fn to_schema(&self) -> RefOr<Schema> {
        match self {
            Self::Plain(model) => model.to_schema(),
            Self::Wrapped(model) => {
                let title = Some(model.name()).filter(|name| !name.is_empty());
                schema::object(envelope(model.to_schema()).title(title).build())
            }
            Self::Paged(model) => {
                let page = ObjectBuilder::new()
                    .schema_type(Type::Object)
                    .property("totalCount", int32())
                    .property("totalPage", int32())
                    .property("pageSize", int32())
                    .property(
                        "list",
                        schema::array(schema::array_of(model.to_schema()).build()),
                    )
                    .build();
                schema::object(envelope(schema::object(page)).build())
            }
        }
    }

    /// The `application/json` media type of the response.
    pub fn to_content(&self) -> Content {
        Content::builder().schema(Some(self.to_schema())).build()
    }
}

fn envelope(data: RefOr<Schema>) -> ObjectBuilder {
    ObjectBuilder::new()
        .schema_type(Type::Object)
        .property("code", int32())
        .property("message", schema::object(schema::string().build()))
        .property("data", data)
}

fn int32() -> RefOr<Schema> {
    schema::object(schema::int32().build())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use utoipa::openapi::Components;

    use super::*;
    use crate::{FlatModel, ModelDefinition};

    fn book() -> Model {
        ModelDefinition::build("Book", |m| {
            m.id();
        })
        .expect("valid model")
    }

    fn to_json(response: &Response) -> serde_json::Value {
        serde_json::to_value(response.to_schema()).expect("serialize")
    }

    #[test]
    fn should_return_plain_model_schema() {
        let model = book();
        let mut components = Components::new();
        model.register_components(&mut components, "lib");

        assert_eq!(
            to_json(&Response::Plain(model)),
            json!({"$ref": "#/components/schemas/lib.Book"})
        );
    }

    #[test]
    fn should_wrap_model_in_envelope() {
        let model = book();
        let mut components = Components::new();
        model.register_components(&mut components, "lib");

        assert_eq!(
            to_json(&Response::Wrapped(model)),
            json!({
                "type": "object",
                "title": "Book",
                "properties": {
                    "code": {"type": "integer", "format": "int32"},
                    "message": {"type": "string"},
                    "data": {"$ref": "#/components/schemas/lib.Book"}
                }
            })
        );
    }

    #[test]
    fn should_omit_envelope_title_for_anonymous_payload() {
        let value = to_json(&Response::Wrapped(FlatModel::int_list()));

        assert!(value.get("title").is_none());
        assert_eq!(
            value["properties"]["data"],
            json!({"type": "array", "items": {"type": "integer"}})
        );
    }

    #[test]
    fn should_page_model_in_envelope() {
        let model = book();
        let mut components = Components::new();
        model.register_components(&mut components, "lib");

        assert_eq!(
            to_json(&Response::Paged(model)),
            json!({
                "type": "object",
                "properties": {
                    "code": {"type": "integer", "format": "int32"},
                    "message": {"type": "string"},
                    "data": {
                        "type": "object",
                        "properties": {
                            "totalCount": {"type": "integer", "format": "int32"},
                            "totalPage": {"type": "integer", "format": "int32"},
                            "pageSize": {"type": "integer", "format": "int32"},
                            "list": {
                                "type": "array",
                                "items": {"$ref": "#/components/schemas/lib.Book"}
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn should_keep_envelope_property_order() {
        let RefOr::T(Schema::Object(object)) = Response::Wrapped(book()).to_schema() else {
            panic!("expected an inline envelope");
        };

        let names = object.properties.keys().cloned().collect::<Vec<_>>();
        assert_eq!(names, ["code", "message", "data"]);
    }
}
