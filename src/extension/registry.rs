//! Explicit, ordered extension registry.
//!
//! Extensions are registered once at startup into priority-ordered lists.
//! The priority determines the property-panel layout order on the client,
//! so registration keeps the lists sorted and stable: extensions with equal
//! priority stay in registration order.

use serde_json::Value;

use crate::model::{BpmnModel, ElementKind, NodeId};

use super::dataobject::DataObjectExtension;
use super::definitions::DefinitionsExtension;
use super::validator::ModelValidatorExtension;
use super::{EventAclExtension, EventExtension, MailExtension, RuleExtension, TaskAclExtension, TaskExtension};

/// An extension contributing behavior to individual BPMN elements.
pub trait ElementExtension {
    /// Panel ordering priority; lower values come first.
    fn priority(&self) -> i32;

    /// Display label of the extension group.
    fn label(&self) -> &'static str {
        "Imixs-Workflow"
    }

    /// Whether this extension can be applied to elements of the given kind.
    fn handles_kind(&self, kind: ElementKind) -> bool;

    /// Whether this extension applies to the concrete element.
    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool;

    /// Seed default attributes and items when the extension profile is
    /// first applied to an element.
    fn add_defaults(&self, model: &mut BpmnModel, element: NodeId) {
        let _ = (model, element);
    }

    /// Apply edited property-panel data to the element.
    ///
    /// Returns true when the change requires the client to rebuild the
    /// element view.
    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool;
}

/// An extension hooking into the model lifecycle.
pub trait ModelExtension {
    fn priority(&self) -> i32;

    /// Called after a document was loaded.
    fn on_load(&self, model: &mut BpmnModel);

    /// Called before a document is persisted.
    fn on_save(&self, model: &mut BpmnModel);
}

/// Registry holding all extensions in priority order.
pub struct ExtensionRegistry {
    element_extensions: Vec<Box<dyn ElementExtension>>,
    model_extensions: Vec<Box<dyn ModelExtension>>,
}

impl ExtensionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            element_extensions: Vec::new(),
            model_extensions: Vec::new(),
        }
    }

    /// Register an element extension, keeping priority order.
    pub fn register_element(&mut self, extension: Box<dyn ElementExtension>) {
        let index = self
            .element_extensions
            .iter()
            .position(|e| e.priority() > extension.priority())
            .unwrap_or(self.element_extensions.len());
        self.element_extensions.insert(index, extension);
    }

    /// Register a model extension, keeping priority order.
    pub fn register_model(&mut self, extension: Box<dyn ModelExtension>) {
        let index = self
            .model_extensions
            .iter()
            .position(|e| e.priority() > extension.priority())
            .unwrap_or(self.model_extensions.len());
        self.model_extensions.insert(index, extension);
    }

    pub fn element_extensions(&self) -> &[Box<dyn ElementExtension>] {
        &self.element_extensions
    }

    pub fn model_extensions(&self) -> &[Box<dyn ModelExtension>] {
        &self.model_extensions
    }

    /// All element extensions applying to the given element, in priority
    /// order.
    pub fn extensions_for(&self, model: &BpmnModel, element: NodeId) -> Vec<&dyn ElementExtension> {
        self.element_extensions
            .iter()
            .filter(|e| e.handles(model, element))
            .map(Box::as_ref)
            .collect()
    }

    /// Apply the extension profile to an element: every extension that can
    /// handle the element kind seeds its defaults.
    pub fn add_extension(&self, model: &mut BpmnModel, element: NodeId) {
        let kind = model.kind(element);
        for extension in &self.element_extensions {
            if extension.handles_kind(kind) {
                extension.add_defaults(model, element);
            }
        }
    }

    /// Route edited panel data to every applicable extension. Returns true
    /// when any extension requests a view rebuild.
    pub fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool {
        let mut rebuild = false;
        for index in 0..self.element_extensions.len() {
            if self.element_extensions[index].handles(model, element) {
                rebuild |= self.element_extensions[index].update_properties(model, element, data);
            }
        }
        rebuild
    }

    /// Run all model extensions for a freshly loaded document.
    pub fn on_load(&self, model: &mut BpmnModel) {
        for extension in &self.model_extensions {
            extension.on_load(model);
        }
    }

    /// Run all model extensions before persisting a document.
    pub fn on_save(&self, model: &mut BpmnModel) {
        for extension in &self.model_extensions {
            extension.on_save(model);
        }
    }
}

impl Default for ExtensionRegistry {
    /// The stock Imixs extension set.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register_element(Box::new(DefinitionsExtension));
        registry.register_element(Box::new(TaskExtension));
        registry.register_element(Box::new(TaskAclExtension));
        registry.register_element(Box::new(EventExtension));
        registry.register_element(Box::new(EventAclExtension));
        registry.register_element(Box::new(MailExtension));
        registry.register_element(Box::new(RuleExtension));
        registry.register_element(Box::new(DataObjectExtension));
        registry.register_model(Box::new(ModelValidatorExtension::new()));
        registry
    }
}
