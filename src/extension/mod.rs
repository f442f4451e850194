//! The Imixs-Workflow extension model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! registry    → explicit, priority-ordered extension registration
//!   ↓
//! validator   → referential validation of ACL/mail cross-references
//! dataobject  → data-object type classification
//!   ↓
//! mapper      → Label|value field-mapping resolution
//!   ↓
//! items       → extension item store (imixs:item / imixs:value)
//! ```
//!
//! ## Error policy
//!
//! Nothing in this module raises: malformed input degrades to an empty or
//! default value, stale cross-references are auto-repaired and logged, and
//! misuse is logged as an error while the component continues with empty
//! state. The only user-visible failure behavior is the aggregated
//! "settings were auto-corrected" notification after load.

pub mod dataobject;
pub mod items;
pub mod mapper;
pub mod registry;
pub mod validator;

mod acl;
mod definitions;
mod event;
mod mail;
mod rule;
mod task;

pub use acl::{EventAclExtension, TaskAclExtension};
pub use dataobject::{DataObjectExtension, DataObjectType, FileLinkReader, FsFileLinkReader};
pub use definitions::{DefinitionsExtension, DEFAULT_MODEL_VERSION};
pub use event::EventExtension;
pub use mail::MailExtension;
pub use mapper::{FieldMapping, ItemNameMapper};
pub use registry::{ElementExtension, ExtensionRegistry, ModelExtension};
pub use rule::RuleExtension;
pub use task::TaskExtension;
pub use validator::{InvalidReference, ModelValidatorExtension, ValidationOutcome};

/// Default item type tag.
pub const XS_STRING: &str = "xs:string";

// ── Panel payload helpers ───────────────────────────────────────────
//
// Property panels deliver edits as JSON objects; these helpers read them
// with the same defaulting behavior the panels rely on.

pub(crate) fn json_string(data: &serde_json::Value, key: &str, default: &str) -> String {
    data.get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or(default)
        .to_string()
}

pub(crate) fn json_string_list(data: &serde_json::Value, key: &str) -> Vec<String> {
    data.get(key)
        .and_then(serde_json::Value::as_array)
        .map(|array| {
            array
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Split a multiline panel field into one entry per line. A blank field
/// yields no entries, which removes the backing item on write.
pub(crate) fn json_lines(data: &serde_json::Value, key: &str) -> Vec<String> {
    let text = json_string(data, key, "");
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.lines().map(str::to_string).collect()
}
