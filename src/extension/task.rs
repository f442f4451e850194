//! Workflow properties of task elements.

use serde_json::Value;

use crate::extension::{items, json_string, XS_STRING};
use crate::model::{BpmnModel, ElementKind, NodeId, Ns};

use super::registry::ElementExtension;

/// Workflow panel for task elements carrying an `imixs:processid`.
pub struct TaskExtension;

impl ElementExtension for TaskExtension {
    fn priority(&self) -> i32 {
        1101
    }

    fn handles_kind(&self, kind: ElementKind) -> bool {
        kind == ElementKind::Task
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element) == ElementKind::Task
            && model.has_extension_attribute(element, Ns::Imixs, "processid")
    }

    fn add_defaults(&self, model: &mut BpmnModel, element: NodeId) {
        model.set_extension_attribute(element, Ns::Imixs, "processid", "100");
    }

    /// Write workflow properties. A changed process id requires the client
    /// to update the task label, which is signalled as a rebuild.
    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool {
        let old_process_id = model
            .extension_attribute(element, Ns::Imixs, "processid")
            .unwrap_or("")
            .to_string();
        let new_process_id = json_string(data, "processid", "0");
        let mut rebuild = false;
        if new_process_id != old_process_id {
            model.set_extension_attribute(element, Ns::Imixs, "processid", &new_process_id);
            rebuild = true;
        }

        items::set_item_value(model, element, "txttype", XS_STRING, &json_string(data, "txttype", ""));
        items::set_item_value(
            model,
            element,
            "txtimageurl",
            XS_STRING,
            &json_string(data, "txtimageurl", ""),
        );
        items::set_item_value(
            model,
            element,
            "txtworkflowsummary",
            XS_STRING,
            &json_string(data, "txtworkflowsummary", ""),
        );
        items::set_item_value(
            model,
            element,
            "txtworkflowabstract",
            XS_STRING,
            &json_string(data, "txtworkflowabstract", ""),
        );
        items::set_item_value(
            model,
            element,
            "txteditorid",
            XS_STRING,
            &json_string(data, "txteditorid", ""),
        );
        items::set_item_value(
            model,
            element,
            "form.definition",
            XS_STRING,
            &json_string(data, "form_definition", ""),
        );

        rebuild
    }
}
