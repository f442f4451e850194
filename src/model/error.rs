//! Error types for the model boundary.

use thiserror::Error;

/// Errors raised by the XML boundary codec.
///
/// Extension operations themselves never fail; anomalies there degrade to
/// defaults and are logged instead (see the `extension` module docs).
#[derive(Debug, Error)]
pub enum ModelError {
    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// The document is not a BPMN definitions document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl ModelError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing element error.
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "element",
            name: name.into(),
        }
    }
}
