use std::rc::Rc;

use crate::Result;
use crate::model::{Model, ModelBuilder, ModelDefinition};
use crate::operation::{Method, Operation, OperationBuilder};

/// A node of the API tree.
///
/// A node owns its operations, the models it declares and its children. The
/// document walk registers the models under the node namespace, tags the node
/// operations with the display name and mounts them under the node path.
#[derive(Debug, Clone)]
pub struct PathDefinition {
    segment: String,
    package: String,
    display_name: String,
    operations: Vec<Operation>,
    models: Vec<Model>,
    children: Vec<PathDefinition>,
}

impl PathDefinition {
    /// Declares a node.
    ///
    /// `segment` is appended as is to the parent path, and is also the default
    /// package. `display_name` becomes the tag of every operation of the node.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the declaration closure, typically from a
    /// malformed model.
    pub fn define(
        segment: impl Into<String>,
        display_name: impl Into<String>,
        declare: impl FnOnce(&mut PathBuilder) -> Result<()>,
    ) -> Result<Self> {
        let segment = segment.into();
        let mut builder = PathBuilder {
            definition: Self {
                package: segment.clone(),
                segment,
                display_name: display_name.into(),
                operations: vec![],
                models: vec![],
                children: vec![],
            },
        };
        declare(&mut builder)?;
        Ok(builder.definition)
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// The namespace component of this node.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Operations, in declaration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Models registered by this node, in declaration order.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn children(&self) -> &[PathDefinition] {
        &self.children
    }
}

/// Declares the content of a [`PathDefinition`].
#[derive(Debug)]
pub struct PathBuilder {
    definition: PathDefinition,
}

impl PathBuilder {
    /// Overrides the package, which defaults to the segment.
    pub fn package(&mut self, package: impl Into<String>) -> &mut Self {
        self.definition.package = package.into();
        self
    }

    /// Declares a model owned by this node.
    ///
    /// # Errors
    ///
    /// Fails if the model declaration is malformed.
    pub fn model(
        &mut self,
        name: impl Into<String>,
        fields: impl FnOnce(&mut ModelBuilder),
    ) -> Result<Model> {
        let model = ModelDefinition::build(name, fields)?;
        self.definition.models.push(Rc::clone(&model));
        Ok(model)
    }

    /// Declares an entity owned by this node.
    ///
    /// # Errors
    ///
    /// Fails if the model declaration is malformed.
    pub fn entity(
        &mut self,
        name: impl Into<String>,
        fields: impl FnOnce(&mut ModelBuilder),
    ) -> Result<Model> {
        let model = ModelDefinition::entity(name, fields)?;
        self.definition.models.push(Rc::clone(&model));
        Ok(model)
    }

    /// Attaches a model declared elsewhere, to register it under this node namespace.
    pub fn add_model(&mut self, model: &Model) -> &mut Self {
        self.definition.models.push(Rc::clone(model));
        self
    }

    pub fn get(
        &mut self,
        sub_path: impl Into<String>,
        declare: impl FnOnce(&mut OperationBuilder),
    ) -> &mut Self {
        self.operation(Method::Get, sub_path, declare)
    }

    pub fn post(
        &mut self,
        sub_path: impl Into<String>,
        declare: impl FnOnce(&mut OperationBuilder),
    ) -> &mut Self {
        self.operation(Method::Post, sub_path, declare)
    }

    pub fn put(
        &mut self,
        sub_path: impl Into<String>,
        declare: impl FnOnce(&mut OperationBuilder),
    ) -> &mut Self {
        self.operation(Method::Put, sub_path, declare)
    }

    pub fn delete(
        &mut self,
        sub_path: impl Into<String>,
        declare: impl FnOnce(&mut OperationBuilder),
    ) -> &mut Self {
        self.operation(Method::Delete, sub_path, declare)
    }

    fn operation(
        &mut self,
        method: Method,
        sub_path: impl Into<String>,
        declare: impl FnOnce(&mut OperationBuilder),
    ) -> &mut Self {
        let mut builder = OperationBuilder::new(method, sub_path);
        declare(&mut builder);
        self.definition.operations.push(builder.build());
        self
    }

    /// Appends child nodes, walked after this node.
    pub fn sub_paths(&mut self, children: impl IntoIterator<Item = PathDefinition>) -> &mut Self {
        self.definition.children.extend(children);
        self
    }
}
