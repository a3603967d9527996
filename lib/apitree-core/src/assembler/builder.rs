use utoipa::openapi::Info;

use super::DocumentAssembler;
use crate::security::SecurityScheme;

/// Builder for [`DocumentAssembler`].
///
/// # Default Configuration
///
/// - **Title**: the display name of the first root
/// - **Version**: `1.0`
/// - **Security**: the `jwt` API-key scheme, required globally
///
/// # Example
///
/// ```rust
/// use apitree_core::DocumentAssembler;
/// use utoipa::openapi::InfoBuilder;
///
/// let assembler = DocumentAssembler::builder()
///     .with_info(
///         InfoBuilder::new()
///             .title("Library API")
///             .version("2.1.0")
///             .build(),
///     )
///     .with_description("Books and authors")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentAssemblerBuilder {
    info: Option<Info>,
    description: Option<String>,
    security_scheme: Option<SecurityScheme>,
}

impl DocumentAssemblerBuilder {
    pub fn build(self) -> DocumentAssembler {
        let Self {
            info,
            description,
            security_scheme,
        } = self;

        DocumentAssembler {
            info,
            description,
            security_scheme: security_scheme.unwrap_or_default(),
        }
    }

    /// Sets the info object of the document.
    ///
    /// The last call wins.
    pub fn with_info(mut self, info: Info) -> Self {
        self.info = Some(info);
        self
    }

    /// Sets the info object from a title and a version.
    pub fn with_info_simple(self, title: impl Into<String>, version: impl Into<String>) -> Self {
        self.with_info(Info::new(title.into(), version.into()))
    }

    /// Sets the info description, overriding the one of [`with_info`](Self::with_info).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the default `jwt` scheme.
    pub fn with_security_scheme(mut self, scheme: SecurityScheme) -> Self {
        self.security_scheme = Some(scheme);
        self
    }
}
