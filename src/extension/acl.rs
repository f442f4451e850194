//! ACL property glue shared by task and event panels.
//!
//! The `key*fields` lists reference entries of the actor field mapping;
//! they are written unfiltered here and kept consistent by the referential
//! validator. The `nam*` lists hold free user/group names, one per line.

use serde_json::Value;

use crate::extension::{items, json_lines, json_string, json_string_list, XS_STRING};
use crate::model::{BpmnModel, ElementKind, NodeId, Ns};

use super::registry::ElementExtension;

pub(crate) const KEY_PROPERTIES: [&str; 3] =
    ["keyownershipfields", "keyaddreadfields", "keyaddwritefields"];

pub(crate) const NAME_PROPERTIES: [&str; 3] =
    ["namownershipnames", "namaddreadaccess", "namaddwriteaccess"];

/// Write edited ACL panel data back to the element.
pub(crate) fn update_acl_properties(model: &mut BpmnModel, element: NodeId, data: &Value) {
    items::set_item_value(
        model,
        element,
        "keyupdateacl",
        XS_STRING,
        &json_string(data, "keyupdateacl", "false"),
    );

    for property in KEY_PROPERTIES {
        let values = json_string_list(data, property);
        items::set_item_value_list(model, element, property, XS_STRING, &values, None);
    }

    for property in NAME_PROPERTIES {
        let lines = json_lines(data, property);
        items::set_item_value_list(model, element, property, XS_STRING, &lines, None);
    }
}

/// ACL panel for task elements.
pub struct TaskAclExtension;

impl ElementExtension for TaskAclExtension {
    fn priority(&self) -> i32 {
        1102
    }

    fn handles_kind(&self, kind: ElementKind) -> bool {
        kind == ElementKind::Task
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element) == ElementKind::Task
            && model.has_extension_attribute(element, Ns::Imixs, "processid")
    }

    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool {
        update_acl_properties(model, element, data);
        false
    }
}

/// ACL panel for catch events.
pub struct EventAclExtension;

impl ElementExtension for EventAclExtension {
    fn priority(&self) -> i32 {
        103
    }

    fn handles_kind(&self, kind: ElementKind) -> bool {
        kind == ElementKind::CatchEvent
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element) == ElementKind::CatchEvent
            && model.has_extension_attribute(element, Ns::Imixs, "activityid")
    }

    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool {
        update_acl_properties(model, element, data);
        false
    }
}
