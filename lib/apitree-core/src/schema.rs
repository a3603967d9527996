//! Primitive schema fragments shared by fields, models and envelopes.

use utoipa::openapi::{
    Array, ArrayBuilder, KnownFormat, Object, ObjectBuilder, RefOr, Schema, SchemaFormat, Type,
};

/// Prefix of every component reference.
pub const COMPONENTS_SCHEMAS: &str = "#/components/schemas/";

pub(crate) fn string() -> ObjectBuilder {
    ObjectBuilder::new().schema_type(Type::String)
}

pub(crate) fn int32() -> ObjectBuilder {
    ObjectBuilder::new()
        .schema_type(Type::Integer)
        .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int32)))
}

pub(crate) fn int64() -> ObjectBuilder {
    ObjectBuilder::new()
        .schema_type(Type::Integer)
        .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int64)))
}

pub(crate) fn array_of(items: RefOr<Schema>) -> ArrayBuilder {
    ArrayBuilder::new().items(items)
}

pub(crate) fn object(object: Object) -> RefOr<Schema> {
    RefOr::T(Schema::Object(object))
}

pub(crate) fn array(array: Array) -> RefOr<Schema> {
    RefOr::T(Schema::Array(array))
}
