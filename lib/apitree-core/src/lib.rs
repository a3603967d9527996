//! # Apitree Core
//!
//! Describe an HTTP API as a tree, get an OpenAPI v3 document.
//!
//! An API is declared as a tree of [`PathDefinition`]s. Each node carries a path
//! segment, a package, a display name, the models it owns, its operations and
//! its children. [`DocumentAssembler`] walks the tree and produces a
//! [`Document`]: models become reusable components, operations become path
//! items, nodes become tags.
//!
//! ## Quick Start
//!
//! ```rust
//! use apitree_core::{DocumentAssembler, ModelDefinition, PathDefinition};
//!
//! # fn main() -> Result<(), apitree_core::SpecError> {
//! let root = PathDefinition::define("/api/v1/book", "Book", |p| {
//!     p.package("me.books");
//!     let book = p.model("Book", |m| {
//!         m.id();
//!         m.string("isbn").required();
//!         m.string("name").required().length(1..=10);
//!     })?;
//!     let by_id = ModelDefinition::dynamic(|m| {
//!         m.id();
//!     })?;
//!
//!     p.get("", |op| {
//!         op.description("Book detail").req(&by_id).wrapped_resp(&book);
//!     });
//!     Ok(())
//! })?;
//!
//! let document = DocumentAssembler::builder().build().assemble(&[root])?;
//!
//! assert_eq!(document.openapi, "3.0.3");
//! assert!(document.paths.paths.contains_key("/api/v1/book"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Models
//!
//! A model declared on a node is registered under the node namespace, e.g.
//! `me.books.Book`, and referenced with `$ref` from then on. Dynamic models
//! ([`ModelDefinition::dynamic`], [`FlatModel`]) are always inlined.
//!
//! ## Requests and responses
//!
//! | Builder | Projection |
//! |---|---|
//! | `req` | one query parameter per field |
//! | `page_req` | the query parameters, then `pageSize` and `p` |
//! | `req_body` | the JSON request body |
//! | `resp` | the model schema |
//! | `wrapped_resp` | `{code, message, data: <model>}` |
//! | `page_resp` | `{code, message, data: {totalCount, totalPage, pageSize, list}}` |

mod assembler;
mod document;
mod error;
mod field;
mod flat;
mod model;
mod operation;
mod path;
mod request;
mod response;
mod schema;
mod security;

pub use self::assembler::{DocumentAssembler, DocumentAssemblerBuilder};
pub use self::document::{Document, OPENAPI_VERSION};
pub use self::error::SpecError;
pub use self::field::{Field, FieldBuilder, FieldKind};
pub use self::flat::{FlatModel, FlatShape, FlatType};
pub use self::model::{Model, ModelBuilder, ModelDefinition, ModelKind, ModelShape, ModelState};
pub use self::operation::{Method, Operation, OperationBuilder};
pub use self::path::{PathBuilder, PathDefinition};
pub use self::request::{PAGE_INDEX, PAGE_SIZE, Request};
pub use self::response::Response;
pub use self::schema::COMPONENTS_SCHEMAS;
pub use self::security::{ApiKeyLocation, JWT, SecurityScheme};

/// Result type of the crate.
pub type Result<T, E = SpecError> = std::result::Result<T, E>;
