//! Business rule properties of catch events.

use serde_json::Value;

use crate::extension::{items, json_string, XS_STRING};
use crate::model::{BpmnModel, ElementKind, NodeId, Ns};

use super::registry::ElementExtension;

/// Business rule panel for catch events.
pub struct RuleExtension;

impl ElementExtension for RuleExtension {
    fn priority(&self) -> i32 {
        105
    }

    fn handles_kind(&self, kind: ElementKind) -> bool {
        kind == ElementKind::CatchEvent
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element) == ElementKind::CatchEvent
            && model.has_extension_attribute(element, Ns::Imixs, "activityid")
    }

    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool {
        items::set_item_value(
            model,
            element,
            "txtbusinessruleengine",
            XS_STRING,
            &json_string(data, "txtbusinessruleengine", ""),
        );
        items::set_item_value(
            model,
            element,
            "txtbusinessrule",
            XS_STRING,
            &json_string(data, "txtbusinessrule", ""),
        );
        false
    }
}
