//! Node primitives for the BPMN element tree.
//!
//! The tree is stored as an arena of [`XmlNode`]s owned by
//! [`BpmnModel`](super::BpmnModel); nodes reference each other through
//! [`NodeId`] handles. Only the handful of node types the extension model
//! touches are represented: elements, text and CDATA sections.

use indexmap::IndexMap;

use super::kind::ElementKind;

/// Handle to a node in the model arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The XML namespaces of the BPMN dialect.
///
/// The closed set replaces string-typed prefix/URI pairs: every operation
/// that creates or looks up a namespaced element names its namespace through
/// this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ns {
    /// BPMN 2.0 model namespace.
    Bpmn2,
    /// The Imixs-Workflow extension namespace.
    Imixs,
    /// Open-BPMN tooling namespace (file links).
    OpenBpmn,
}

impl Ns {
    /// The canonical prefix used in documents.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Bpmn2 => "bpmn2",
            Self::Imixs => "imixs",
            Self::OpenBpmn => "open-bpmn",
        }
    }

    /// The namespace URI.
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Bpmn2 => "http://www.omg.org/spec/BPMN/20100524/MODEL",
            Self::Imixs => "http://www.imixs.org/bpmn2",
            Self::OpenBpmn => "http://open-bpmn.org/XMLSchema",
        }
    }
}

/// A node in the document tree.
#[derive(Clone, Debug)]
pub enum XmlNode {
    Element(ElementNode),
    Text(String),
    CData(String),
}

/// An XML element: prefixed tag, ordered attributes, ordered children.
#[derive(Clone, Debug)]
pub struct ElementNode {
    pub(crate) prefix: Option<String>,
    pub(crate) local: String,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) children: Vec<NodeId>,
}

impl ElementNode {
    pub(crate) fn new(prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local: local.to_string(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// The namespace prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The local tag name without prefix.
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// The full tag name as written in a document, e.g. `bpmn2:task`.
    pub fn tag_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }

    /// The element kind derived from the local tag name.
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_local(&self.local)
    }

    /// Attribute lookup by qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.shift_remove(name);
    }

    /// Iterate over attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
