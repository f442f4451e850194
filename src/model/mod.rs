//! In-memory BPMN element tree.
//!
//! This module provides the document surface the extension model needs:
//! namespaced child lookup and creation, CDATA sections, attribute access
//! and the element collections the validator scans. It deliberately covers
//! only that surface — layouting, diagram interchange and the full BPMN
//! semantics stay with the host.
//!
//! ```text
//! BpmnModel
//! ├── nodes: IndexMap<NodeId, XmlNode>   (arena, document order)
//! ├── root: NodeId                       (bpmn2:definitions)
//! ├── namespaces: prefix → URI
//! ├── dirty flag
//! └── notifications
//! ```

mod error;
pub mod kind;
pub mod node;
pub mod xml;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

pub use error::ModelError;
pub use kind::ElementKind;
pub use node::{ElementNode, NodeId, Ns, XmlNode};

/// Severity of a model notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A user-facing notification attached to the model, e.g. after an
/// auto-repair on load.
#[derive(Clone, Debug, Serialize)]
pub struct ModelNotification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// The mutable BPMN document tree.
///
/// All extension operations mutate the tree in place through this handle.
/// Single-threaded by design: the host guarantees exclusive, sequential
/// access per open document.
#[derive(Clone, Debug)]
pub struct BpmnModel {
    nodes: IndexMap<NodeId, XmlNode>,
    next_id: u32,
    root: NodeId,
    namespaces: IndexMap<String, String>,
    source_path: Option<PathBuf>,
    dirty: bool,
    notifications: Vec<ModelNotification>,
}

const NO_CHILDREN: &[NodeId] = &[];

impl BpmnModel {
    /// Create a new model with an empty `bpmn2:definitions` root and the
    /// `bpmn2` and `imixs` namespaces declared.
    pub fn new() -> Self {
        let mut model = Self::bare();
        model.declare_namespace(Ns::Bpmn2.prefix(), Ns::Bpmn2.uri());
        model.declare_namespace(Ns::Imixs.prefix(), Ns::Imixs.uri());
        let root = model.create_element(Ns::Bpmn2, "definitions");
        let id = format!("definitions_{}", Uuid::new_v4().simple());
        model.set_attribute(root, "id", &id);
        model.root = root;
        model
    }

    pub(crate) fn bare() -> Self {
        Self {
            nodes: IndexMap::new(),
            next_id: 0,
            root: NodeId(0),
            namespaces: IndexMap::new(),
            source_path: None,
            dirty: false,
            notifications: Vec::new(),
        }
    }

    // ── Node creation ───────────────────────────────────────────────

    fn alloc(&mut self, node: XmlNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Create a detached namespaced element. The namespace is declared on
    /// the document if it is not yet present.
    pub fn create_element(&mut self, ns: Ns, local: &str) -> NodeId {
        self.declare_namespace(ns.prefix(), ns.uri());
        self.alloc(XmlNode::Element(ElementNode::new(Some(ns.prefix()), local)))
    }

    pub(crate) fn create_raw_element(&mut self, prefix: Option<&str>, local: &str) -> NodeId {
        self.alloc(XmlNode::Element(ElementNode::new(prefix, local)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(XmlNode::Text(text.to_string()))
    }

    /// Create a detached CDATA section.
    pub fn create_cdata(&mut self, text: &str) -> NodeId {
        self.alloc(XmlNode::CData(text.to_string()))
    }

    // ── Tree access ─────────────────────────────────────────────────

    /// The `bpmn2:definitions` root element.
    pub fn definitions(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(&id)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        match self.nodes.get(&id) {
            Some(XmlNode::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        match self.nodes.get_mut(&id) {
            Some(XmlNode::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// The element kind, or `Other` for missing or non-element nodes.
    pub fn kind(&self, id: NodeId) -> ElementKind {
        self.element(id).map_or(ElementKind::Other, ElementNode::kind)
    }

    /// Child node ids in document order; empty for non-elements.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map_or(NO_CHILDREN, |el| &el.children)
    }

    /// Child ids that are elements.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.element(c).is_some())
    }

    /// Find the first child element with the given namespace and local name.
    pub fn find_child(&self, parent: NodeId, ns: Ns, local: &str) -> Option<NodeId> {
        self.child_elements(parent).find(|&c| {
            self.element(c)
                .is_some_and(|el| el.prefix() == Some(ns.prefix()) && el.local_name() == local)
        })
    }

    /// Concatenated text of all descendant text and CDATA nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.nodes.get(&id) {
            Some(XmlNode::Text(text)) | Some(XmlNode::CData(text)) => out.push_str(text),
            Some(XmlNode::Element(el)) => {
                for child in el.children.clone() {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }

    // ── Tree mutation ───────────────────────────────────────────────

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(el) = self.element_mut(parent) {
            el.children.push(child);
        }
    }

    /// Insert `child` as the *first* child of `parent`.
    pub fn insert_first(&mut self, parent: NodeId, child: NodeId) {
        if let Some(el) = self.element_mut(parent) {
            el.children.insert(0, child);
        }
    }

    /// Detach `child` from `parent` and free its subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let detached = match self.element_mut(parent) {
            Some(el) => {
                let before = el.children.len();
                el.children.retain(|&c| c != child);
                el.children.len() != before
            }
            None => false,
        };
        if detached {
            self.free_subtree(child);
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = self
            .element(id)
            .map(|el| el.children.clone())
            .unwrap_or_default();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes.shift_remove(&id);
    }

    // ── Attributes ──────────────────────────────────────────────────

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attribute(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_attribute(name);
        }
    }

    // ── Extension attributes ────────────────────────────────────────
    //
    // Namespaced attributes directly on an element, e.g. imixs:processid.

    pub fn extension_attribute(&self, id: NodeId, ns: Ns, name: &str) -> Option<&str> {
        self.attribute(id, &format!("{}:{name}", ns.prefix()))
    }

    pub fn has_extension_attribute(&self, id: NodeId, ns: Ns, name: &str) -> bool {
        self.extension_attribute(id, ns, name).is_some()
    }

    pub fn set_extension_attribute(&mut self, id: NodeId, ns: Ns, name: &str, value: &str) {
        self.declare_namespace(ns.prefix(), ns.uri());
        self.set_attribute(id, &format!("{}:{name}", ns.prefix()), value);
    }

    pub fn remove_extension_attribute(&mut self, id: NodeId, ns: Ns, name: &str) {
        self.remove_attribute(id, &format!("{}:{name}", ns.prefix()));
    }

    // ── Namespaces ──────────────────────────────────────────────────

    pub fn declare_namespace(&mut self, prefix: &str, uri: &str) {
        self.namespaces
            .entry(prefix.to_string())
            .or_insert_with(|| uri.to_string());
    }

    /// Whether the document declares the given namespace prefix.
    pub fn has_namespace(&self, ns: Ns) -> bool {
        self.namespaces.contains_key(ns.prefix())
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ── Element collections ─────────────────────────────────────────

    fn collect_kinds(&self, filter: fn(ElementKind) -> bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if filter(self.kind(id)) {
                out.push(id);
            }
            let children = self.children(id);
            for &child in children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// All task-like elements in document order.
    pub fn find_all_activities(&self) -> Vec<NodeId> {
        self.collect_kinds(|k| k.is_activity())
    }

    /// All event elements in document order.
    pub fn find_all_events(&self) -> Vec<NodeId> {
        self.collect_kinds(|k| k.is_event())
    }

    /// All data-object-like elements in document order.
    pub fn find_data_objects(&self) -> Vec<NodeId> {
        self.collect_kinds(|k| k.is_data_object())
    }

    // ── Documentation ───────────────────────────────────────────────

    /// The `bpmn2:documentation` child element, if present.
    pub fn documentation_element(&self, id: NodeId) -> Option<NodeId> {
        self.find_child(id, Ns::Bpmn2, "documentation")
    }

    /// The text content of the documentation child, or an empty string.
    pub fn documentation(&self, id: NodeId) -> String {
        self.documentation_element(id)
            .map(|doc| self.text_content(doc))
            .unwrap_or_default()
    }

    // ── Dirty state and notifications ───────────────────────────────

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn add_notification(&mut self, severity: Severity, title: &str, message: &str) {
        self.notifications.push(ModelNotification {
            severity,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    pub fn notifications(&self) -> &[ModelNotification] {
        &self.notifications
    }

    /// Drain accumulated notifications, e.g. after delivering them to the
    /// client.
    pub fn take_notifications(&mut self) -> Vec<ModelNotification> {
        std::mem::take(&mut self.notifications)
    }

    // ── Source path ─────────────────────────────────────────────────

    /// The file this model was read from, used to resolve relative file
    /// links.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source_path = Some(path.into());
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }
}

impl Default for BpmnModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_model_has_definitions_root() {
        let model = BpmnModel::new();
        let root = model.definitions();
        assert_eq!(model.kind(root), ElementKind::Definitions);
        assert!(model.has_namespace(Ns::Imixs));
    }

    #[test]
    fn insert_first_orders_children() {
        let mut model = BpmnModel::new();
        let root = model.definitions();
        let process = model.create_element(Ns::Bpmn2, "process");
        model.append_child(root, process);
        let ext = model.create_element(Ns::Bpmn2, "extensionElements");
        model.insert_first(root, ext);
        assert_eq!(model.children(root), &[ext, process]);
    }

    #[test]
    fn remove_child_frees_subtree() {
        let mut model = BpmnModel::new();
        let root = model.definitions();
        let process = model.create_element(Ns::Bpmn2, "process");
        let task = model.create_element(Ns::Bpmn2, "task");
        model.append_child(root, process);
        model.append_child(process, task);
        model.remove_child(root, process);
        assert!(model.element(process).is_none());
        assert!(model.element(task).is_none());
    }

    #[test]
    fn text_content_spans_cdata_and_text() {
        let mut model = BpmnModel::new();
        let doc = model.create_element(Ns::Bpmn2, "documentation");
        let text = model.create_text("hello ");
        let cdata = model.create_cdata("world");
        model.append_child(doc, text);
        model.append_child(doc, cdata);
        assert_eq!(model.text_content(doc), "hello world");
    }
}
