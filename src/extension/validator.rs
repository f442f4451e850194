//! Referential validation of ACL and mail cross-references.
//!
//! Every cross-referencing property on tasks and events must only contain
//! values present in the current actor field mapping. Stale values are
//! evidence of an edited mapping, not a hard error: the validator detects
//! them, logs a warning and repairs the property in place.
//!
//! Detection and repair are separately callable so each can be tested on
//! its own; [`validate`] composes both.

use rustc_hash::FxHashSet;
use tracing::warn;

use crate::extension::dataobject::{self, FileLinkReader, FsFileLinkReader};
use crate::extension::items;
use crate::extension::mapper::{FieldMapping, ItemNameMapper};
use crate::extension::XS_STRING;
use crate::model::{BpmnModel, NodeId, Severity};

use super::registry::ModelExtension;

/// The cross-referencing properties subject to validation.
pub const ACL_PROPERTIES: [&str; 6] = [
    "keyownershipfields",
    "keyaddreadfields",
    "keyaddwritefields",
    "keymailreceiverfields",
    "keymailreceiverfieldscc",
    "keymailreceiverfieldsbcc",
];

/// One stale cross-reference found during detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidReference {
    pub element: NodeId,
    pub property: &'static str,
    pub value: String,
}

/// Result of a validation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every cross-reference was inside the valid domain.
    Valid,
    /// One or more properties were rewritten.
    Repaired,
}

/// Scan all events and activities for cross-reference values outside the
/// current actor field mapping. Pure read; mutates nothing.
pub fn detect(model: &BpmnModel) -> Vec<InvalidReference> {
    let mapper = ItemNameMapper::for_mapping(model, FieldMapping::Actor);
    let domain: FxHashSet<&str> = mapper.values().iter().map(String::as_str).collect();

    // union of events and activities, de-duplicated
    let mut elements = model.find_all_events();
    for activity in model.find_all_activities() {
        if !elements.contains(&activity) {
            elements.push(activity);
        }
    }

    let mut findings = Vec::new();
    for &element in &elements {
        for property in ACL_PROPERTIES {
            for value in items::get_item_value_list(model, element, property) {
                if !domain.contains(value.as_str()) {
                    findings.push(InvalidReference {
                        element,
                        property,
                        value,
                    });
                }
            }
        }
    }
    findings
}

/// Rewrite every property named in `findings` with the valid domain as
/// reference list, dropping the stale values. Logs one warning per finding.
pub fn repair(model: &mut BpmnModel, findings: &[InvalidReference]) {
    if findings.is_empty() {
        return;
    }
    let domain = ItemNameMapper::for_mapping(model, FieldMapping::Actor)
        .values()
        .to_vec();

    for finding in findings {
        warn!(
            property = finding.property,
            value = %finding.value,
            element = %finding.element,
            "invalid cross reference - value will be automatically removed"
        );
    }

    let mut rewritten: Vec<(NodeId, &str)> = Vec::new();
    for finding in findings {
        if rewritten
            .iter()
            .any(|&(element, property)| element == finding.element && property == finding.property)
        {
            continue;
        }
        rewritten.push((finding.element, finding.property));
        let current = items::get_item_value_list(model, finding.element, finding.property);
        items::set_item_value_list(
            model,
            finding.element,
            finding.property,
            XS_STRING,
            &current,
            Some(&domain),
        );
    }
}

/// Detect and repair in one pass.
pub fn validate(model: &mut BpmnModel) -> ValidationOutcome {
    let findings = detect(model);
    if findings.is_empty() {
        ValidationOutcome::Valid
    } else {
        repair(model, &findings);
        ValidationOutcome::Repaired
    }
}

/// Model lifecycle extension running the validator on load and save.
///
/// On load a repair marks the document dirty and appends a single
/// aggregated warning notification; on save the repair runs silently as a
/// final consistency guarantee.
pub struct ModelValidatorExtension {
    file_links: Box<dyn FileLinkReader>,
}

impl ModelValidatorExtension {
    pub fn new() -> Self {
        Self {
            file_links: Box::new(FsFileLinkReader),
        }
    }

    /// Use a custom file-link reader for data-object classification.
    pub fn with_file_link_reader(file_links: Box<dyn FileLinkReader>) -> Self {
        Self { file_links }
    }
}

impl Default for ModelValidatorExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelExtension for ModelValidatorExtension {
    fn priority(&self) -> i32 {
        102
    }

    fn on_load(&self, model: &mut BpmnModel) {
        if validate(model) == ValidationOutcome::Repaired {
            model.set_dirty(true);
            model.add_notification(
                Severity::Warning,
                "ACL Settings updated!",
                "Invalid ACL Settings found - fixed automatically!",
            );
        }

        if !dataobject::validate_data_objects(model, self.file_links.as_ref()) {
            model.set_dirty(true);
            model.add_notification(Severity::Warning, "Data Objects updated!", "Data Objects updated.");
        }
    }

    fn on_save(&self, model: &mut BpmnModel) {
        let _ = validate(model);
    }
}
