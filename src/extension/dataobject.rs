//! Data-object type classification.
//!
//! The documentation content of a data object decides which logical data
//! type the object represents: an embedded form definition or an AI prompt
//! definition. The derived tag is cached as the `imixs:datatype` extension
//! attribute so the client can render the matching symbol without touching
//! the content again.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::extension::items::FILE_LINK_PREFIX;
use crate::model::{BpmnModel, NodeId, Ns};

use super::registry::ElementExtension;

/// Extension attribute caching the derived data type.
pub const DATATYPE_ATTRIBUTE: &str = "datatype";

/// Marker identifying embedded form definitions.
pub const MARKER_FORM: &str = "<imixs-form";

/// Marker identifying AI prompt definitions.
pub const MARKER_PROMPT: &str = "<PromptDefinition";

/// The closed set of data-object type tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataObjectType {
    FormData,
    PromptData,
}

impl DataObjectType {
    /// The tag value stored in the `imixs:datatype` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FormData => "form-data",
            Self::PromptData => "prompt-data",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "form-data" => Some(Self::FormData),
            "prompt-data" => Some(Self::PromptData),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify free-text documentation content by its embedded markers.
///
/// Pure function of the content; the prompt marker wins when both markers
/// are present.
pub fn classify(content: &str) -> Option<DataObjectType> {
    let mut data_type = None;
    if content.contains(MARKER_FORM) {
        data_type = Some(DataObjectType::FormData);
    }
    if content.contains(MARKER_PROMPT) {
        data_type = Some(DataObjectType::PromptData);
    }
    data_type
}

/// Re-classify an element and cache the result as its `imixs:datatype`
/// extension attribute. Unclassified content clears a previously cached
/// tag. Returns true when the cached tag changed, which signals the client
/// to rebuild the element view.
pub fn update_data_type(model: &mut BpmnModel, element: NodeId, content: &str) -> bool {
    let old_data_type = model
        .extension_attribute(element, Ns::Imixs, DATATYPE_ATTRIBUTE)
        .unwrap_or("")
        .to_string();
    let data_type = classify(content).map(|t| t.as_str()).unwrap_or("");

    if data_type.is_empty() {
        model.remove_extension_attribute(element, Ns::Imixs, DATATYPE_ATTRIBUTE);
    } else {
        model.set_extension_attribute(element, Ns::Imixs, DATATYPE_ATTRIBUTE, data_type);
    }
    data_type != old_data_type
}

/// Host collaborator resolving externally linked documentation content.
pub trait FileLinkReader {
    /// Read the content behind a documentation element's file link.
    /// `Ok(None)` when the element carries no link.
    fn read_content(&self, model: &BpmnModel, documentation: NodeId) -> io::Result<Option<String>>;
}

/// Filesystem-backed file-link reader resolving `file://` links relative to
/// the model source path.
#[derive(Debug, Default)]
pub struct FsFileLinkReader;

impl FileLinkReader for FsFileLinkReader {
    fn read_content(&self, model: &BpmnModel, documentation: NodeId) -> io::Result<Option<String>> {
        let Some(link) = model.extension_attribute(documentation, Ns::OpenBpmn, "file-link") else {
            return Ok(None);
        };
        let relative = link.strip_prefix(FILE_LINK_PREFIX).unwrap_or(link);
        let path = match model.source_path().and_then(Path::parent) {
            Some(base) => base.join(relative),
            None => PathBuf::from(relative),
        };
        std::fs::read_to_string(path).map(Some)
    }
}

/// Classify all data objects that do not yet carry a cached type tag.
///
/// Linked file content takes precedence over inline documentation. Returns
/// false when any tag was updated. Unreadable linked content is logged and
/// skipped.
pub fn validate_data_objects(model: &mut BpmnModel, file_links: &dyn FileLinkReader) -> bool {
    // only documents carrying the imixs profile are touched
    if !model.has_namespace(Ns::Imixs) {
        return true;
    }
    let mut valid = true;
    for data_object in model.find_data_objects() {
        if model.has_extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE) {
            continue;
        }
        let Some(documentation) = model.documentation_element(data_object) else {
            continue;
        };
        let content = match file_links.read_content(model, documentation) {
            Ok(Some(content)) => content,
            Ok(None) => model.text_content(documentation),
            Err(e) => {
                debug!("Failed to read linked file data: {e}");
                continue;
            }
        };
        if content.is_empty() {
            continue;
        }
        if update_data_type(model, data_object, &content) {
            valid = false;
        }
    }
    valid
}

/// Property-panel extension for data objects.
pub struct DataObjectExtension;

impl ElementExtension for DataObjectExtension {
    fn priority(&self) -> i32 {
        1101
    }

    fn handles_kind(&self, kind: crate::model::ElementKind) -> bool {
        kind.is_data_object()
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element).is_data_object() && model.has_namespace(Ns::Imixs)
    }

    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, _data: &serde_json::Value) -> bool {
        let content = model.documentation(element);
        update_data_type(model, element, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_marker() {
        assert_eq!(
            classify("<imixs-form><imixs-form-section/></imixs-form>"),
            Some(DataObjectType::FormData)
        );
        assert_eq!(
            classify("<PromptDefinition><prompt/></PromptDefinition>"),
            Some(DataObjectType::PromptData)
        );
        assert_eq!(classify("plain documentation"), None);
    }

    #[test]
    fn prompt_marker_wins_over_form_marker() {
        let content = "<imixs-form/> and <PromptDefinition/>";
        assert_eq!(classify(content), Some(DataObjectType::PromptData));
    }
}
