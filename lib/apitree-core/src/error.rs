use crate::operation::Method;

/// Errors raised while declaring an API tree or assembling its document.
///
/// Model-level variants are reported when a model is built, so a malformed
/// declaration never reaches the document walk. [`SpecError::DuplicatePathMethod`]
/// is the only walk-time failure.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum SpecError {
    /// The same HTTP method was declared twice for one literal path.
    ///
    /// Two nodes may contribute operations to the same path as long as their
    /// methods differ; a repeated method is never silently overwritten.
    #[display("Duplicate operation '{method}' for path '{path}'")]
    DuplicatePathMethod {
        /// The concrete path (prefix + sub-path).
        path: String,
        /// The repeated method.
        method: Method,
    },

    /// A string length range with `min > max`.
    #[display("Invalid length range for field '{field}': {min} > {max}")]
    InvalidLength {
        /// Name of the offending field.
        field: String,
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// A numeric range with `min > max`.
    #[display("Invalid numeric range for field '{field}': {min} > {max}")]
    InvalidRange {
        /// Name of the offending field.
        field: String,
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
    },

    /// A validation pattern that does not compile.
    #[display("Invalid pattern for field '{field}': {error}")]
    InvalidPattern {
        /// Name of the offending field.
        field: String,
        /// The regex compilation error.
        error: regex::Error,
    },

    /// A constraint applied to a field kind that does not support it,
    /// e.g. a length range on an integer field.
    #[display("Constraint '{constraint}' does not apply to {kind} field '{field}'")]
    ConstraintMismatch {
        /// Name of the offending field.
        field: String,
        /// Kind of the field (`string`, `integer`, ...).
        kind: &'static str,
        /// The rejected constraint.
        constraint: &'static str,
    },

    /// Two fields with the same name in one model.
    #[display("Duplicate field '{field}' in model '{model}'")]
    DuplicateField {
        /// Model name (empty for anonymous models).
        model: String,
        /// The repeated field name.
        field: String,
    },
}
