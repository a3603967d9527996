//! Fields: the smallest schema-bearing unit of a model.

use std::ops::RangeInclusive;

use utoipa::openapi::{RefOr, Schema};

use crate::SpecError;
use crate::model::Model;
use crate::schema;

/// A named, typed member of a [`ModelDefinition`](crate::ModelDefinition).
///
/// Fields are declared through a [`ModelBuilder`](crate::ModelBuilder) and are
/// immutable once their model is built.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    remark: Option<String>,
    nullable: bool,
    kind: FieldKind,
}

/// The closed set of field kinds, with their kind-specific constraints.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A string, with an optional length range and validation pattern.
    String {
        /// Inclusive `minLength..=maxLength`.
        length: Option<RangeInclusive<usize>>,
        /// A regular expression the value must match.
        pattern: Option<String>,
    },
    /// A 32-bit integer, with an optional inclusive range.
    Integer {
        /// Inclusive `minimum..=maximum`.
        range: Option<RangeInclusive<i32>>,
    },
    /// A timestamp, as epoch milliseconds.
    Date,
    /// A list of 32-bit integers.
    IntList,
    /// A list of strings.
    StringList,
    /// A nested model.
    Model(Model),
    /// A list of nested models.
    ModelList(Model),
}

impl FieldKind {
    fn label(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Integer { .. } => "integer",
            Self::Date => "date",
            Self::IntList => "int list",
            Self::StringList => "string list",
            Self::Model(_) => "model",
            Self::ModelList(_) => "model list",
        }
    }
}

impl Field {
    pub(crate) fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            remark: None,
            nullable: true,
            kind,
        }
    }

    /// The field name, unique within its model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human description, if any.
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// `true` unless the field was marked as required.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// The field kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Projects this field to a schema fragment.
    ///
    /// Unset constraints are omitted. The remark becomes the schema `title`,
    /// except for nested models which are represented by the model itself.
    pub fn to_schema(&self) -> RefOr<Schema> {
        let title = self.remark.as_deref();
        match &self.kind {
            FieldKind::String { length, pattern } => {
                let (min, max) = length
                    .as_ref()
                    .map(|range| (*range.start(), *range.end()))
                    .unzip();
                schema::object(
                    schema::string()
                        .title(title)
                        .min_length(min)
                        .max_length(max)
                        .pattern(pattern.clone())
                        .build(),
                )
            }
            FieldKind::Integer { range } => {
                let (min, max) = range
                    .as_ref()
                    .map(|range| (*range.start(), *range.end()))
                    .unzip();
                schema::object(
                    schema::int32()
                        .title(title)
                        .minimum(min)
                        .maximum(max)
                        .build(),
                )
            }
            FieldKind::Date => schema::object(schema::int64().title(title).build()),
            FieldKind::IntList => schema::array(
                schema::array_of(schema::object(schema::int32().build()))
                    .title(title)
                    .build(),
            ),
            FieldKind::StringList => schema::array(
                schema::array_of(schema::object(schema::string().build()))
                    .title(title)
                    .build(),
            ),
            FieldKind::Model(model) => model.to_schema(),
            FieldKind::ModelList(model) => {
                schema::array(schema::array_of(model.to_schema()).title(title).build())
            }
        }
    }
}

/// Configures a freshly declared field.
///
/// Constraint errors are collected by the owning builder and reported when the
/// model is built.
///
/// # Example
///
/// ```rust
/// use apitree_core::ModelDefinition;
///
/// # fn example() -> Result<(), apitree_core::SpecError> {
/// let book = ModelDefinition::build("Book", |m| {
///     m.id();
///     m.string("name")
///         .remark("Title")
///         .required()
///         .length(1..=10)
///         .pattern(r"^\w{1,10}$");
/// })?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FieldBuilder<'a> {
    field: &'a mut Field,
    errors: &'a mut Vec<SpecError>,
}

impl<'a> FieldBuilder<'a> {
    pub(crate) fn new(field: &'a mut Field, errors: &'a mut Vec<SpecError>) -> Self {
        Self { field, errors }
    }

    /// Sets the human description.
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.field.remark = Some(remark.into());
        self
    }

    /// Marks the field as non-nullable, listing it in the model's `required`.
    pub fn required(mut self) -> Self {
        self.field.nullable = false;
        self
    }

    /// Sets the inclusive length range of a string field.
    pub fn length(mut self, range: RangeInclusive<usize>) -> Self {
        let field = &self.field.name;
        if let FieldKind::String { length, .. } = &mut self.field.kind {
            if range.start() > range.end() {
                self.errors.push(SpecError::InvalidLength {
                    field: field.clone(),
                    min: *range.start(),
                    max: *range.end(),
                });
            } else {
                *length = Some(range);
            }
        } else {
            self.mismatch("length");
        }
        self
    }

    /// Sets the validation pattern of a string field.
    pub fn pattern(mut self, regex: impl Into<String>) -> Self {
        let regex = regex.into();
        let field = &self.field.name;
        if let FieldKind::String { pattern, .. } = &mut self.field.kind {
            match regex::Regex::new(&regex) {
                Ok(_) => *pattern = Some(regex),
                Err(error) => self.errors.push(SpecError::InvalidPattern {
                    field: field.clone(),
                    error,
                }),
            }
        } else {
            self.mismatch("pattern");
        }
        self
    }

    /// Sets the inclusive numeric range of an integer field.
    pub fn range(mut self, bounds: RangeInclusive<i32>) -> Self {
        let field = &self.field.name;
        if let FieldKind::Integer { range } = &mut self.field.kind {
            if bounds.start() > bounds.end() {
                self.errors.push(SpecError::InvalidRange {
                    field: field.clone(),
                    min: *bounds.start(),
                    max: *bounds.end(),
                });
            } else {
                *range = Some(bounds);
            }
        } else {
            self.mismatch("range");
        }
        self
    }

    fn mismatch(&mut self, constraint: &'static str) {
        self.errors.push(SpecError::ConstraintMismatch {
            field: self.field.name.clone(),
            kind: self.field.kind.label(),
            constraint,
        });
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn configure(kind: FieldKind, f: impl FnOnce(FieldBuilder<'_>)) -> (Field, Vec<SpecError>) {
        let mut field = Field::new("value", kind);
        let mut errors = vec![];
        f(FieldBuilder::new(&mut field, &mut errors));
        (field, errors)
    }

    fn string_kind() -> FieldKind {
        FieldKind::String {
            length: None,
            pattern: None,
        }
    }

    fn to_json(field: &Field) -> serde_json::Value {
        serde_json::to_value(field.to_schema()).expect("serialize")
    }

    #[test]
    fn should_be_nullable_by_default() {
        let field = Field::new("name", FieldKind::Date);

        assert!(field.nullable());
        assert_eq!(field.remark(), None);
    }

    #[test]
    fn should_project_plain_string_without_constraints() {
        let (field, errors) = configure(string_kind(), |_| {});

        assert!(errors.is_empty());
        assert_eq!(to_json(&field), json!({"type": "string"}));
    }

    #[test]
    fn should_project_constrained_string() {
        let (field, errors) = configure(string_kind(), |f| {
            let _ = f.remark("Name").length(1..=10).pattern(r"^\w{1,10}$");
        });

        assert!(errors.is_empty());
        assert_eq!(
            to_json(&field),
            json!({
                "type": "string",
                "title": "Name",
                "minLength": 1,
                "maxLength": 10,
                "pattern": r"^\w{1,10}$"
            })
        );
    }

    #[test]
    fn should_project_integer_with_range() {
        let (field, errors) = configure(FieldKind::Integer { range: None }, |f| {
            let _ = f.range(0..=120);
        });

        assert!(errors.is_empty());
        assert_eq!(
            to_json(&field),
            json!({"type": "integer", "format": "int32", "minimum": 0, "maximum": 120})
        );
    }

    #[test]
    fn should_project_date_as_int64() {
        let field = Field::new("publishDate", FieldKind::Date);

        assert_eq!(to_json(&field), json!({"type": "integer", "format": "int64"}));
    }

    #[test]
    fn should_project_lists() {
        let ints = Field::new("ids", FieldKind::IntList);
        let strings = Field::new("words", FieldKind::StringList);

        assert_eq!(
            to_json(&ints),
            json!({"type": "array", "items": {"type": "integer", "format": "int32"}})
        );
        assert_eq!(
            to_json(&strings),
            json!({"type": "array", "items": {"type": "string"}})
        );
    }

    #[test]
    fn should_reject_inverted_length() {
        #[allow(clippy::reversed_empty_ranges)]
        let (field, errors) = configure(string_kind(), |f| {
            let _ = f.length(10..=1);
        });

        assert!(matches!(
            errors.as_slice(),
            [SpecError::InvalidLength { min: 10, max: 1, .. }]
        ));
        assert_eq!(to_json(&field), json!({"type": "string"}));
    }

    #[test]
    fn should_reject_inverted_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let (_, errors) = configure(FieldKind::Integer { range: None }, |f| {
            let _ = f.range(5..=-5);
        });

        assert!(matches!(
            errors.as_slice(),
            [SpecError::InvalidRange { min: 5, max: -5, .. }]
        ));
    }

    #[test]
    fn should_reject_invalid_pattern() {
        let (_, errors) = configure(string_kind(), |f| {
            let _ = f.pattern("(unclosed");
        });

        assert!(matches!(
            errors.as_slice(),
            [SpecError::InvalidPattern { field, .. }] if field == "value"
        ));
    }

    #[test]
    fn should_reject_constraint_on_wrong_kind() {
        let (_, errors) = configure(FieldKind::Integer { range: None }, |f| {
            let _ = f.length(1..=2);
        });

        assert!(matches!(
            errors.as_slice(),
            [SpecError::ConstraintMismatch {
                kind: "integer",
                constraint: "length",
                ..
            }]
        ));
    }
}
