//! Workflow properties of catch events.

use serde_json::Value;

use crate::extension::mapper::{FieldMapping, ItemNameMapper};
use crate::extension::{items, json_lines, json_string, json_string_list, XS_STRING};
use crate::model::{BpmnModel, ElementKind, NodeId, Ns};

use super::registry::ElementExtension;

/// Workflow panel for catch events carrying an `imixs:activityid`.
pub struct EventExtension;

impl ElementExtension for EventExtension {
    fn priority(&self) -> i32 {
        1110
    }

    fn handles_kind(&self, kind: ElementKind) -> bool {
        kind == ElementKind::CatchEvent
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element) == ElementKind::CatchEvent
            && model.has_extension_attribute(element, Ns::Imixs, "activityid")
    }

    fn add_defaults(&self, model: &mut BpmnModel, element: NodeId) {
        model.set_extension_attribute(element, Ns::Imixs, "activityid", "10");
    }

    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool {
        let actor_mapper = ItemNameMapper::for_mapping(model, FieldMapping::Actor);

        model.set_extension_attribute(
            element,
            Ns::Imixs,
            "activityid",
            &json_string(data, "activityid", "0"),
        );
        items::set_item_value(
            model,
            element,
            "txtactivityresult",
            XS_STRING,
            &json_string(data, "txtactivityresult", ""),
        );
        items::set_item_value(
            model,
            element,
            "keypublicresult",
            XS_STRING,
            &json_string(data, "keypublicresult", "1"),
        );

        // restricted visibility references actor mapping entries
        let visibility = json_string_list(data, "keyrestrictedvisibility");
        items::set_item_value_list(
            model,
            element,
            "keyrestrictedvisibility",
            XS_STRING,
            &visibility,
            Some(actor_mapper.values()),
        );

        // a blank $readaccess removes the item entirely
        let read_access = json_string(data, "$readaccess", "");
        if read_access.trim().is_empty() {
            items::remove_item(model, element, "$readaccess");
        } else {
            let lines = json_lines(data, "$readaccess");
            items::set_item_value_list(model, element, "$readaccess", XS_STRING, &lines, None);
        }

        false
    }
}
