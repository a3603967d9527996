//! Anonymous payload-only models.
//!
//! Some responses carry a bare value rather than an object, e.g. a wrapped
//! list of ids. Flat models cover those payloads; they are dynamic and never
//! enter the component table.

use utoipa::openapi::{ObjectBuilder, RefOr, Schema, Type};

use crate::model::{Model, ModelDefinition};
use crate::schema;

/// Primitive payload types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatType {
    /// `{"type": "string"}`
    String,
    /// `{"type": "integer"}`
    Int,
    /// `{"type": "boolean"}`
    Boolean,
    /// `{"type": "number"}`
    Float,
}

impl FlatType {
    fn to_schema(self) -> RefOr<Schema> {
        let schema_type = match self {
            Self::String => Type::String,
            Self::Int => Type::Integer,
            Self::Boolean => Type::Boolean,
            Self::Float => Type::Number,
        };
        schema::object(ObjectBuilder::new().schema_type(schema_type).build())
    }
}

/// The shape of a flat payload.
#[derive(Debug)]
pub enum FlatShape {
    /// A single primitive value.
    Primitive(FlatType),
    /// A list of primitive values.
    PrimitiveList(FlatType),
    /// A list of model instances.
    ObjectList(Model),
}

impl FlatShape {
    pub(crate) fn to_schema(&self) -> RefOr<Schema> {
        match self {
            Self::Primitive(flat_type) => flat_type.to_schema(),
            Self::PrimitiveList(flat_type) => {
                schema::array(schema::array_of(flat_type.to_schema()).build())
            }
            Self::ObjectList(model) => schema::array(schema::array_of(model.to_schema()).build()),
        }
    }
}

/// Constructors for flat payload models.
///
/// ```rust
/// use apitree_core::FlatModel;
///
/// let ids = FlatModel::int_list();
/// assert!(ids.is_dynamic());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlatModel;

impl FlatModel {
    pub fn string() -> Model {
        ModelDefinition::flat(FlatShape::Primitive(FlatType::String))
    }

    pub fn int() -> Model {
        ModelDefinition::flat(FlatShape::Primitive(FlatType::Int))
    }

    pub fn boolean() -> Model {
        ModelDefinition::flat(FlatShape::Primitive(FlatType::Boolean))
    }

    pub fn float() -> Model {
        ModelDefinition::flat(FlatShape::Primitive(FlatType::Float))
    }

    pub fn string_list() -> Model {
        ModelDefinition::flat(FlatShape::PrimitiveList(FlatType::String))
    }

    pub fn int_list() -> Model {
        ModelDefinition::flat(FlatShape::PrimitiveList(FlatType::Int))
    }

    pub fn boolean_list() -> Model {
        ModelDefinition::flat(FlatShape::PrimitiveList(FlatType::Boolean))
    }

    pub fn float_list() -> Model {
        ModelDefinition::flat(FlatShape::PrimitiveList(FlatType::Float))
    }

    /// A list of `model` items, referenced once the model is registered.
    pub fn obj_list(model: &Model) -> Model {
        ModelDefinition::flat(FlatShape::ObjectList(Model::clone(model)))
    }
}
