//! # imixs-bpmn
//!
//! Imixs-Workflow extension model for BPMN 2.0 diagrams: named, typed
//! extension items embedded under the `imixs` namespace, label/value field
//! mappings, referential validation of cross-references and data-object
//! type classification.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! extension → item store, mapper, validator, classifier, registry
//!   ↓
//! model     → BPMN element tree, element kinds, XML boundary codec
//! ```
//!
//! ## Usage
//!
//! ```
//! use imixs_bpmn::extension::{items, ExtensionRegistry};
//! use imixs_bpmn::{BpmnModel, Ns};
//!
//! let mut model = BpmnModel::new();
//! let process = model.create_element(Ns::Bpmn2, "process");
//! let definitions = model.definitions();
//! model.append_child(definitions, process);
//! let task = model.create_element(Ns::Bpmn2, "task");
//! model.append_child(process, task);
//!
//! items::set_item_value(&mut model, task, "txttype", "xs:string", "workitem");
//! assert_eq!(items::get_item_value(&model, task, "txttype", ""), "workitem");
//!
//! // run the stock extension set over a loaded document
//! let registry = ExtensionRegistry::default();
//! registry.on_load(&mut model);
//! ```

/// The Imixs extension model: item store, field mappings, validation,
/// classification and the extension registry.
pub mod extension;

/// BPMN element tree: node arena, element kinds, XML boundary codec.
pub mod model;

// Re-export foundation types
pub use model::{
    BpmnModel, ElementKind, ElementNode, ModelError, ModelNotification, NodeId, Ns, Severity,
    XmlNode,
};
