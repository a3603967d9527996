use indexmap::IndexMap;
use tracing::{debug, trace};
use utoipa::openapi::{Info, Tag};

mod builder;
pub use self::builder::DocumentAssemblerBuilder;

use crate::document::Document;
use crate::operation::Operation;
use crate::path::PathDefinition;
use crate::security::SecurityScheme;
use crate::{Result, SpecError};

const DEFAULT_VERSION: &str = "1.0";

/// Walks API trees into a [`Document`].
///
/// # Walk
///
/// Roots are walked in order, depth first, parent before children. At each node:
///
/// 1. the node models are registered under the node namespace (the parent
///    namespace and the node package joined by a dot),
/// 2. a tag `{name: display name, description: node path}` is recorded,
/// 3. the node operations are mounted under the node path (the parent path and
///    the node segment concatenated) followed by their sub-path,
/// 4. the children are walked.
///
/// Models are therefore registered before any operation of the node or of its
/// descendants is projected, and those operations reference them.
///
/// # Example
///
/// ```rust
/// use apitree_core::{DocumentAssembler, PathDefinition};
///
/// # fn example() -> Result<(), apitree_core::SpecError> {
/// let root = PathDefinition::define("/api/v1/book", "Book", |p| {
///     p.package("me.books");
///     let book = p.model("Book", |m| {
///         m.id();
///         m.string("name").required();
///     })?;
///     p.get("", |op| {
///         op.description("Book detail").wrapped_resp(&book);
///     });
///     Ok(())
/// })?;
///
/// let document = DocumentAssembler::builder()
///     .with_info_simple("Library", "1.0.0")
///     .build()
///     .assemble(&[root])?;
///
/// assert!(document.components.schemas.contains_key("me.books.Book"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    info: Option<Info>,
    description: Option<String>,
    security_scheme: SecurityScheme,
}

impl DocumentAssembler {
    pub fn builder() -> DocumentAssemblerBuilder {
        DocumentAssemblerBuilder::default()
    }

    /// Assembles the document of the given roots.
    ///
    /// Registration mutates the models: a model registered by one call stays
    /// referenced in later calls.
    ///
    /// # Errors
    ///
    /// Fails with [`SpecError::DuplicatePathMethod`] when two operations share a
    /// method on the same concrete path.
    pub fn assemble(&self, roots: &[PathDefinition]) -> Result<Document> {
        let mut document = Document::new(self.info(roots));

        let scheme = &self.security_scheme;
        document
            .components
            .security_schemes
            .insert(scheme.name().to_string(), scheme.to_utoipa());
        document.security.push(scheme.requirement());

        for root in roots {
            walk(root, None, "", &mut document)?;
        }

        debug!(
            paths = document.paths.paths.len(),
            schemas = document.components.schemas.len(),
            tags = document.tags.len(),
            "document assembled"
        );
        Ok(document)
    }

    fn info(&self, roots: &[PathDefinition]) -> Info {
        let mut info = self.info.clone().unwrap_or_else(|| {
            let title = roots
                .first()
                .map(PathDefinition::display_name)
                .unwrap_or_default();
            Info::new(title, DEFAULT_VERSION)
        });
        if let Some(description) = &self.description {
            info.description = Some(description.clone());
        }
        info
    }
}

fn walk(
    node: &PathDefinition,
    parent_namespace: Option<&str>,
    parent_path: &str,
    document: &mut Document,
) -> Result<()> {
    let namespace = match parent_namespace {
        Some(parent) => format!("{parent}.{}", node.package()),
        None => node.package().to_string(),
    };
    let path = format!("{parent_path}{}", node.segment());
    debug!(%namespace, %path, "walk path definition");

    for model in node.models() {
        model.register_components(&mut document.components, &namespace);
    }

    let mut tag = Tag::new(node.display_name());
    tag.description = Some(path.clone());
    document.tags.push(tag);

    let mut by_sub_path = IndexMap::<&str, Vec<&Operation>>::new();
    for operation in node.operations() {
        by_sub_path
            .entry(operation.sub_path())
            .or_default()
            .push(operation);
    }

    for (sub_path, operations) in by_sub_path {
        let full_path = format!("{path}{sub_path}");
        let item = document.paths.paths.entry(full_path.clone()).or_default();
        for operation in operations {
            let (method, built) = operation.build_operation(node.display_name());
            let slot = method.slot(item);
            if slot.is_some() {
                return Err(SpecError::DuplicatePathMethod {
                    path: full_path,
                    method,
                });
            }
            trace!(path = %full_path, %method, "add operation");
            *slot = Some(built);
        }
    }

    for child in node.children() {
        walk(child, Some(&namespace), &path, document)?;
    }

    Ok(())
}
