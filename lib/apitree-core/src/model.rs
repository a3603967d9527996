//! Model definitions and their registration into the component table.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, warn};
use utoipa::openapi::{Components, ObjectBuilder, Ref, RefOr, Schema, Type};

use crate::field::{Field, FieldBuilder, FieldKind};
use crate::flat::FlatShape;
use crate::{Result, SpecError, schema};

/// A shared handle on a model definition.
///
/// Fields, requests and responses all point at the same instance, so a model
/// registered once is referenced everywhere afterwards.
pub type Model = Rc<ModelDefinition>;

/// Marker describing how a model was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// A plain data model.
    Model,
    /// A model flagged as a persistent entity. Same projection as [`ModelKind::Model`].
    Entity,
    /// An anonymous model declared at the call site. Never registered.
    Dynamic,
}

/// The structure a model projects to.
#[derive(Debug)]
pub enum ModelShape {
    /// An object with ordered fields.
    Object(Vec<Field>),
    /// A bare primitive or list payload.
    Flat(FlatShape),
}

/// Registration phase of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelState {
    /// Not part of any component table: projected inline.
    Declared,
    /// Registered under the given component id: projected as a `$ref`.
    Registered(String),
}

/// An ordered, named collection of fields.
///
/// # Lifecycle
///
/// A model starts [`ModelState::Declared`] and is rendered inline. The document walk
/// registers it once into `components.schemas`; from then on
/// [`to_schema`](Self::to_schema) always returns a reference. Registration is
/// idempotent: the first namespace wins.
///
/// # Example
///
/// ```rust
/// use apitree_core::ModelDefinition;
/// use utoipa::openapi::Components;
///
/// # fn example() -> Result<(), apitree_core::SpecError> {
/// let author = ModelDefinition::build("Author", |m| {
///     m.id();
///     m.string("name").remark("Full name");
/// })?;
///
/// let mut components = Components::new();
/// author.register_components(&mut components, "me.books");
///
/// assert_eq!(author.component_id().as_deref(), Some("me.books.Author"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ModelDefinition {
    name: String,
    kind: ModelKind,
    shape: ModelShape,
    state: RefCell<ModelState>,
}

// Create
impl ModelDefinition {
    /// Builds a named model from a field declaration closure.
    ///
    /// An empty name yields a dynamic (always inline) model.
    ///
    /// # Errors
    ///
    /// Fails on malformed field constraints or duplicate field names.
    pub fn build(name: impl Into<String>, fields: impl FnOnce(&mut ModelBuilder)) -> Result<Model> {
        let name = name.into();
        let kind = if name.is_empty() {
            ModelKind::Dynamic
        } else {
            ModelKind::Model
        };
        ModelBuilder::declare(name, kind, fields)
    }

    /// Builds a named model flagged as an entity.
    ///
    /// # Errors
    ///
    /// Fails on malformed field constraints or duplicate field names.
    pub fn entity(
        name: impl Into<String>,
        fields: impl FnOnce(&mut ModelBuilder),
    ) -> Result<Model> {
        ModelBuilder::declare(name.into(), ModelKind::Entity, fields)
    }

    /// Builds an anonymous model, always projected inline.
    ///
    /// Used for one-off request shapes such as `{id}`.
    ///
    /// # Errors
    ///
    /// Fails on malformed field constraints or duplicate field names.
    pub fn dynamic(fields: impl FnOnce(&mut ModelBuilder)) -> Result<Model> {
        ModelBuilder::declare(String::new(), ModelKind::Dynamic, fields)
    }

    pub(crate) fn flat(shape: FlatShape) -> Model {
        Rc::new(Self {
            name: String::new(),
            kind: ModelKind::Dynamic,
            shape: ModelShape::Flat(shape),
            state: RefCell::new(ModelState::Declared),
        })
    }
}

// Accessors
impl ModelDefinition {
    /// The model name, empty for anonymous models.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the model was declared.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// The ordered fields; empty for flat payloads.
    pub fn fields(&self) -> &[Field] {
        match &self.shape {
            ModelShape::Object(fields) => fields,
            ModelShape::Flat(_) => &[],
        }
    }

    /// The current registration phase.
    pub fn state(&self) -> ModelState {
        self.state.borrow().clone()
    }

    /// The component id, once registered.
    pub fn component_id(&self) -> Option<String> {
        match &*self.state.borrow() {
            ModelState::Declared => None,
            ModelState::Registered(id) => Some(id.clone()),
        }
    }

    /// Anonymous models never enter the component table.
    pub fn is_dynamic(&self) -> bool {
        self.kind == ModelKind::Dynamic || self.name.is_empty()
    }
}

// Projection
impl ModelDefinition {
    /// The schema of this model as seen from a usage site.
    ///
    /// Registered models return `{"$ref": "#/components/schemas/<id>"}`,
    /// others their inline body.
    pub fn to_schema(&self) -> RefOr<Schema> {
        if let ModelState::Registered(id) = &*self.state.borrow() {
            return RefOr::Ref(Ref::from_schema_name(id));
        }
        self.inline_schema()
    }

    /// The inline body: an object with ordered properties, `title` set to the
    /// model name and `required` listing every non-nullable field.
    pub fn inline_schema(&self) -> RefOr<Schema> {
        match &self.shape {
            ModelShape::Object(fields) => {
                let title = Some(self.name.as_str()).filter(|name| !name.is_empty());
                let mut builder = ObjectBuilder::new().schema_type(Type::Object).title(title);
                for field in fields {
                    builder = builder.property(field.name(), field.to_schema());
                    if !field.nullable() {
                        builder = builder.required(field.name());
                    }
                }
                schema::object(builder.build())
            }
            ModelShape::Flat(shape) => shape.to_schema(),
        }
    }

    /// Registers this model under `{namespace}.{name}`.
    ///
    /// Returns `true` when the component table was written. Dynamic models are
    /// left untouched. A registered model keeps its first id: it is written
    /// again only into a table that lacks it, e.g. when a tree is assembled twice.
    pub fn register_components(&self, components: &mut Components, namespace: &str) -> bool {
        if self.is_dynamic() {
            return false;
        }
        if let Some(id) = self.component_id() {
            if components.schemas.contains_key(&id) {
                debug!(component_id = %id, %namespace, "model already registered, ignored");
                return false;
            }
            debug!(component_id = %id, "registered model added to a new component table");
            components.schemas.insert(id, self.inline_schema());
            return true;
        }

        let id = format!("{namespace}.{}", self.name);
        let written = if components.schemas.contains_key(&id) {
            warn!(component_id = %id, "component id already taken by another model");
            false
        } else {
            components.schemas.insert(id.clone(), self.inline_schema());
            true
        };
        debug!(component_id = %id, "model registered");
        self.state.replace(ModelState::Registered(id));
        written
    }
}

/// Collects the fields of a model under construction.
///
/// Each declaration returns a [`FieldBuilder`] to refine the field. Constraint
/// errors are kept until the model is built.
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<Field>,
    errors: Vec<SpecError>,
}

impl ModelBuilder {
    fn declare(
        name: String,
        kind: ModelKind,
        declare_fields: impl FnOnce(&mut ModelBuilder),
    ) -> Result<Model> {
        let mut builder = Self {
            name,
            fields: vec![],
            errors: vec![],
        };
        declare_fields(&mut builder);
        builder.finish(kind)
    }

    fn finish(self, kind: ModelKind) -> Result<Model> {
        let Self {
            name,
            fields,
            errors,
        } = self;

        if let Some(error) = errors.into_iter().next() {
            return Err(error);
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(SpecError::DuplicateField {
                    model: name,
                    field: field.name().to_string(),
                });
            }
        }

        Ok(Rc::new(ModelDefinition {
            name,
            kind,
            shape: ModelShape::Object(fields),
            state: RefCell::new(ModelState::Declared),
        }))
    }

    fn push(&mut self, field: Field) -> FieldBuilder<'_> {
        let index = self.fields.len();
        self.fields.push(field);
        FieldBuilder::new(&mut self.fields[index], &mut self.errors)
    }

    /// Declares the required integer `id` field.
    pub fn id(&mut self) -> FieldBuilder<'_> {
        self.int("id").required()
    }

    /// Declares a string field.
    pub fn string(&mut self, name: impl Into<String>) -> FieldBuilder<'_> {
        self.push(Field::new(
            name,
            FieldKind::String {
                length: None,
                pattern: None,
            },
        ))
    }

    /// Declares a 32-bit integer field.
    pub fn int(&mut self, name: impl Into<String>) -> FieldBuilder<'_> {
        self.push(Field::new(name, FieldKind::Integer { range: None }))
    }

    /// Declares a date field (epoch milliseconds).
    pub fn date(&mut self, name: impl Into<String>) -> FieldBuilder<'_> {
        self.push(Field::new(name, FieldKind::Date))
    }

    /// Declares a list of integers.
    pub fn int_list(&mut self, name: impl Into<String>) -> FieldBuilder<'_> {
        self.push(Field::new(name, FieldKind::IntList))
    }

    /// Declares a list of strings.
    pub fn string_list(&mut self, name: impl Into<String>) -> FieldBuilder<'_> {
        self.push(Field::new(name, FieldKind::StringList))
    }

    /// Declares a nested model field.
    pub fn obj(&mut self, name: impl Into<String>, model: &Model) -> FieldBuilder<'_> {
        self.push(Field::new(name, FieldKind::Model(Rc::clone(model))))
    }

    /// Declares a list of nested models.
    pub fn obj_list(&mut self, name: impl Into<String>, model: &Model) -> FieldBuilder<'_> {
        self.push(Field::new(name, FieldKind::ModelList(Rc::clone(model))))
    }

    /// The name of the model being declared.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn book() -> Model {
        ModelDefinition::entity("Book", |m| {
            m.id();
            m.string("isbn").required();
            m.string("name").required().length(1..=10);
            m.date("publishDate");
        })
        .expect("valid model")
    }

    fn to_json(schema: &RefOr<Schema>) -> serde_json::Value {
        serde_json::to_value(schema).expect("serialize")
    }

    #[test]
    fn should_build_inline_object_schema() {
        let model = book();

        assert_eq!(model.state(), ModelState::Declared);
        assert_eq!(
            to_json(&model.to_schema()),
            json!({
                "type": "object",
                "title": "Book",
                "properties": {
                    "id": {"type": "integer", "format": "int32"},
                    "isbn": {"type": "string"},
                    "name": {"type": "string", "minLength": 1, "maxLength": 10},
                    "publishDate": {"type": "integer", "format": "int64"}
                },
                "required": ["id", "isbn", "name"]
            })
        );
    }

    #[test]
    fn should_keep_field_order_in_properties() {
        let model = book();

        let RefOr::T(Schema::Object(object)) = model.to_schema() else {
            panic!("expected an inline object");
        };
        let names = object.properties.keys().cloned().collect::<Vec<_>>();
        assert_eq!(names, ["id", "isbn", "name", "publishDate"]);
    }

    #[test]
    fn should_omit_required_when_all_fields_are_nullable() {
        let model = ModelDefinition::build("Search", |m| {
            m.string("name");
        })
        .expect("valid model");

        let value = to_json(&model.to_schema());
        assert!(value.get("required").is_none());
    }

    #[test]
    fn should_reference_after_registration() {
        let model = book();
        let mut components = Components::new();

        let written = model.register_components(&mut components, "me.books");

        assert!(written);
        assert_eq!(
            model.state(),
            ModelState::Registered("me.books.Book".to_string())
        );
        assert_eq!(
            to_json(&model.to_schema()),
            json!({"$ref": "#/components/schemas/me.books.Book"})
        );
        assert_eq!(
            components.schemas.get("me.books.Book").map(to_json),
            Some(to_json(&model.inline_schema()))
        );
    }

    #[test]
    fn should_register_only_once() {
        let model = book();
        let mut components = Components::new();

        assert!(model.register_components(&mut components, "me.books"));
        let snapshot = components.clone();

        assert!(!model.register_components(&mut components, "me.books"));
        assert!(!model.register_components(&mut components, "me.other"));

        assert_eq!(components, snapshot);
        assert_eq!(model.component_id().as_deref(), Some("me.books.Book"));
    }

    #[test]
    fn should_write_registered_model_into_a_new_table_under_its_first_id() {
        let model = book();
        let mut first = Components::new();
        let mut second = Components::new();

        model.register_components(&mut first, "me.books");
        let written = model.register_components(&mut second, "me.other");

        assert!(written);
        assert_eq!(first, second);
        assert!(second.schemas.contains_key("me.books.Book"));
    }

    #[test]
    fn should_never_register_dynamic_models() {
        let model = ModelDefinition::dynamic(|m| {
            m.id();
        })
        .expect("valid model");
        let mut components = Components::new();

        assert!(!model.register_components(&mut components, "me.books"));
        assert!(components.schemas.is_empty());
        assert_eq!(
            to_json(&model.to_schema()),
            json!({
                "type": "object",
                "properties": {"id": {"type": "integer", "format": "int32"}},
                "required": ["id"]
            })
        );
    }

    #[test]
    fn should_treat_empty_name_as_dynamic() {
        let model = ModelDefinition::build("", |m| {
            m.string("q");
        })
        .expect("valid model");

        assert_eq!(model.kind(), ModelKind::Dynamic);
        assert!(model.is_dynamic());
    }

    #[test]
    fn should_reference_nested_model_once_registered() {
        let author = ModelDefinition::build("Author", |m| {
            m.id();
        })
        .expect("valid model");
        let book = ModelDefinition::build("Book", |m| {
            m.obj("author", &author);
            m.obj_list("coAuthors", &author).remark("Co-authors");
        })
        .expect("valid model");
        let mut components = Components::new();

        author.register_components(&mut components, "lib");
        book.register_components(&mut components, "lib");

        let stored = components.schemas.get("lib.Book").map(to_json);
        assert_eq!(
            stored,
            Some(json!({
                "type": "object",
                "title": "Book",
                "properties": {
                    "author": {"$ref": "#/components/schemas/lib.Author"},
                    "coAuthors": {
                        "type": "array",
                        "title": "Co-authors",
                        "items": {"$ref": "#/components/schemas/lib.Author"}
                    }
                }
            }))
        );
    }

    #[test]
    fn should_keep_first_component_on_id_clash() {
        let first = ModelDefinition::build("Item", |m| {
            m.id();
        })
        .expect("valid model");
        let second = ModelDefinition::build("Item", |m| {
            m.string("label");
        })
        .expect("valid model");
        let mut components = Components::new();

        assert!(first.register_components(&mut components, "shop"));
        assert!(!second.register_components(&mut components, "shop"));

        assert_eq!(
            components.schemas.get("shop.Item").map(to_json),
            Some(to_json(&first.inline_schema()))
        );
        assert_eq!(second.component_id().as_deref(), Some("shop.Item"));
    }

    #[test]
    fn should_reject_duplicate_field_names() {
        let result = ModelDefinition::build("Book", |m| {
            m.string("name");
            m.int("name");
        });

        assert!(matches!(
            result,
            Err(SpecError::DuplicateField { model, field }) if model == "Book" && field == "name"
        ));
    }

    #[test]
    fn should_fail_fast_on_malformed_constraints() {
        #[allow(clippy::reversed_empty_ranges)]
        let result = ModelDefinition::build("Book", |m| {
            m.string("name").length(10..=1);
        });

        assert!(matches!(result, Err(SpecError::InvalidLength { .. })));
    }
}
