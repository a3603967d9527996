use serde::Serialize;
use utoipa::openapi::security::SecurityRequirement;
use utoipa::openapi::{Components, Info, Paths, Tag};

/// The OpenAPI version emitted by [`Document`].
pub const OPENAPI_VERSION: &str = "3.0.3";

/// An assembled OpenAPI v3 document.
///
/// Produced by [`DocumentAssembler::assemble`](crate::DocumentAssembler::assemble).
/// Serialize it with any serde format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Always [`OPENAPI_VERSION`].
    pub openapi: String,
    pub info: Info,
    /// Global requirements, applied to every operation.
    pub security: Vec<SecurityRequirement>,
    /// One tag per tree node, in walk order.
    pub tags: Vec<Tag>,
    pub paths: Paths,
    pub components: Components,
}

impl Document {
    pub(crate) fn new(info: Info) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            security: vec![],
            tags: vec![],
            paths: Paths::new(),
            components: Components::new(),
        }
    }
}
