//! Workflow profile on the definitions element.
//!
//! Seeds the default model version, plugin list and actor field mapping
//! when the imixs profile is first applied, and writes edited
//! definitions-panel data back to the model-level items.

use serde_json::Value;

use crate::extension::{items, json_string, XS_STRING};
use crate::model::{BpmnModel, ElementKind, NodeId, Ns};

use super::registry::ElementExtension;

pub const DEFAULT_MODEL_VERSION: &str = "default-en-1.0";

const DEFAULT_PLUGINS: [&str; 9] = [
    "org.imixs.workflow.engine.plugins.RulePlugin",
    "org.imixs.workflow.engine.plugins.SplitAndJoinPlugin",
    "org.imixs.workflow.engine.plugins.OwnerPlugin",
    "org.imixs.workflow.engine.plugins.ApproverPlugin",
    "org.imixs.workflow.engine.plugins.HistoryPlugin",
    "org.imixs.workflow.engine.plugins.ApplicationPlugin",
    "org.imixs.workflow.engine.plugins.IntervalPlugin",
    "org.imixs.workflow.engine.plugins.MailPlugin",
    "org.imixs.workflow.engine.plugins.ResultPlugin",
];

const DEFAULT_FIELD_MAPPING: [&str; 3] = ["Creator|$creator", "Owner|$owner", "Editor|$editor"];

/// Workflow definitions panel.
pub struct DefinitionsExtension;

impl ElementExtension for DefinitionsExtension {
    fn priority(&self) -> i32 {
        1101
    }

    fn handles_kind(&self, kind: ElementKind) -> bool {
        kind == ElementKind::Definitions
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element) == ElementKind::Definitions && model.has_namespace(Ns::Imixs)
    }

    /// Seed the default workflow setup if the model does not yet carry one.
    fn add_defaults(&self, model: &mut BpmnModel, element: NodeId) {
        if items::get_item_value(model, element, "txtworkflowmodelversion", "").is_empty() {
            items::set_item_value(
                model,
                element,
                "txtworkflowmodelversion",
                XS_STRING,
                DEFAULT_MODEL_VERSION,
            );
        }

        if items::get_item_value_list(model, element, "txtplugins").is_empty() {
            let plugins: Vec<String> = DEFAULT_PLUGINS.iter().map(|s| s.to_string()).collect();
            items::set_item_value_list(model, element, "txtplugins", XS_STRING, &plugins, None);
        }

        if items::get_item_value_list(model, element, "txtfieldmapping").is_empty() {
            let mappings: Vec<String> = DEFAULT_FIELD_MAPPING.iter().map(|s| s.to_string()).collect();
            items::set_item_value_list(model, element, "txtfieldmapping", XS_STRING, &mappings, None);
        }
    }

    /// Update model version, date objects, actors and plugins. Returns true
    /// when a mapping list changed, since dependent selection panels must
    /// then be rebuilt.
    fn update_properties(&self, model: &mut BpmnModel, _element: NodeId, data: &Value) -> bool {
        let definitions = model.definitions();
        let mut mappings_changed = false;

        items::set_item_value(
            model,
            definitions,
            "txtworkflowmodelversion",
            XS_STRING,
            &json_string(data, "txtworkflowmodelversion", ""),
        );

        let old_dates = items::get_item_value_list(model, definitions, "txttimefieldmapping");
        let new_dates = mapping_definitions(data, "dateobjects", "date", "item");
        if old_dates != new_dates {
            items::set_item_value_list(
                model,
                definitions,
                "txttimefieldmapping",
                XS_STRING,
                &new_dates,
                None,
            );
            mappings_changed = true;
        }

        let old_actors = items::get_item_value_list(model, definitions, "txtfieldmapping");
        let new_actors = mapping_definitions(data, "actors", "actor", "item");
        if old_actors != new_actors {
            items::set_item_value_list(
                model,
                definitions,
                "txtfieldmapping",
                XS_STRING,
                &new_actors,
                None,
            );
            mappings_changed = true;
        }

        let old_plugins = items::get_item_value_list(model, definitions, "txtplugins");
        let new_plugins: Vec<String> = data
            .get("plugins")
            .and_then(Value::as_array)
            .map(|array| {
                array
                    .iter()
                    .filter_map(|entry| entry.get("classname").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if old_plugins != new_plugins {
            items::set_item_value_list(model, definitions, "txtplugins", XS_STRING, &new_plugins, None);
        }

        mappings_changed
    }
}

/// Collect `Label|value` definition strings from an array of panel rows.
/// Rows without a value are skipped; rows without a label store the bare
/// value.
fn mapping_definitions(data: &Value, key: &str, label_key: &str, value_key: &str) -> Vec<String> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|array| {
            array
                .iter()
                .filter_map(|entry| {
                    let label = entry.get(label_key).and_then(Value::as_str).unwrap_or("");
                    let value = entry.get(value_key).and_then(Value::as_str).unwrap_or("");
                    if value.is_empty() {
                        None
                    } else if label.is_empty() {
                        Some(value.to_string())
                    } else {
                        Some(format!("{label}|{value}"))
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}
