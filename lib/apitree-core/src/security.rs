//! Security scheme of the generated document.
//!
//! Every document declares one API-key scheme and requires it globally. The
//! default is the `jwt` scheme, read from the `Authorization` header:
//!
//! ```yaml
//! components:
//!   securitySchemes:
//!     jwt:
//!       type: apiKey
//!       name: Authorization
//!       in: header
//! security:
//!   - jwt: []
//! ```

use utoipa::openapi::security::{
    ApiKey as UtoipaApiKey, ApiKeyValue, SecurityRequirement,
    SecurityScheme as UtoipaSecurityScheme,
};

/// Name of the default scheme.
pub const JWT: &str = "jwt";

/// Location where an API key is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKeyLocation {
    /// API key in HTTP header
    Header,
    /// API key in query parameter
    Query,
    /// API key in cookie
    Cookie,
}

/// A named API-key security scheme.
///
/// # Example
///
/// ```rust
/// use apitree_core::{ApiKeyLocation, SecurityScheme};
///
/// let default = SecurityScheme::jwt();
/// assert_eq!(default.name(), "jwt");
///
/// let custom = SecurityScheme::api_key("apiKey", "X-API-Key", ApiKeyLocation::Header)
///     .with_description("Key issued by the back office");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityScheme {
    name: String,
    key: String,
    location: ApiKeyLocation,
    description: Option<String>,
}

impl SecurityScheme {
    /// The `jwt` scheme: an API key in the `Authorization` header.
    pub fn jwt() -> Self {
        Self::api_key(JWT, "Authorization", ApiKeyLocation::Header)
    }

    /// Creates an API-key scheme.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the scheme in `components.securitySchemes`
    /// * `key` - Name of the header, query parameter, or cookie
    /// * `location` - Where the API key is passed
    pub fn api_key(name: impl Into<String>, key: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            location,
            description: None,
        }
    }

    /// Adds a description to the security scheme.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The scheme name, as referenced by the security requirement.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts this security scheme to a utoipa SecurityScheme.
    pub(crate) fn to_utoipa(&self) -> UtoipaSecurityScheme {
        let value = match &self.description {
            Some(description) => ApiKeyValue::with_description(&self.key, description),
            None => ApiKeyValue::new(&self.key),
        };
        let api_key = match self.location {
            ApiKeyLocation::Header => UtoipaApiKey::Header(value),
            ApiKeyLocation::Query => UtoipaApiKey::Query(value),
            ApiKeyLocation::Cookie => UtoipaApiKey::Cookie(value),
        };
        UtoipaSecurityScheme::ApiKey(api_key)
    }

    /// The global requirement on this scheme, without scopes.
    pub(crate) fn requirement(&self) -> SecurityRequirement {
        SecurityRequirement::new(&self.name, Vec::<String>::new())
    }
}

impl Default for SecurityScheme {
    fn default() -> Self {
        Self::jwt()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_jwt_scheme_creation() {
        let scheme = SecurityScheme::jwt();

        assert_eq!(scheme.name(), "jwt");
        assert_eq!(scheme, SecurityScheme::default());
    }

    #[test]
    fn test_jwt_to_utoipa() {
        let value = serde_json::to_value(SecurityScheme::jwt().to_utoipa()).expect("serialize");

        assert_eq!(
            value,
            json!({"type": "apiKey", "name": "Authorization", "in": "header"})
        );
    }

    #[test]
    fn test_api_key_with_description_to_utoipa() {
        let scheme = SecurityScheme::api_key("apiKey", "api_key", ApiKeyLocation::Query)
            .with_description("Issued key");

        let value = serde_json::to_value(scheme.to_utoipa()).expect("serialize");
        assert_eq!(
            value,
            json!({"type": "apiKey", "name": "api_key", "in": "query", "description": "Issued key"})
        );
    }

    #[test]
    fn test_security_requirement_to_utoipa() {
        let requirement = SecurityScheme::jwt().requirement();

        let value = serde_json::to_value(requirement).expect("serialize");
        assert_eq!(value, json!({"jwt": []}));
    }
}
