//! Mail message properties of catch events.

use serde_json::Value;

use crate::extension::mapper::{FieldMapping, ItemNameMapper};
use crate::extension::{items, json_lines, json_string, json_string_list, XS_STRING};
use crate::model::{BpmnModel, ElementKind, NodeId, Ns};

use super::registry::ElementExtension;

const KEY_RECEIVER_PROPERTIES: [&str; 3] = [
    "keymailreceiverfields",
    "keymailreceiverfieldscc",
    "keymailreceiverfieldsbcc",
];

const NAME_RECEIVER_PROPERTIES: [&str; 3] =
    ["nammailreceiver", "nammailreceivercc", "nammailreceiverbcc"];

/// Mail panel for catch events.
pub struct MailExtension;

impl ElementExtension for MailExtension {
    fn priority(&self) -> i32 {
        1140
    }

    fn handles_kind(&self, kind: ElementKind) -> bool {
        kind == ElementKind::CatchEvent
    }

    fn handles(&self, model: &BpmnModel, element: NodeId) -> bool {
        model.kind(element) == ElementKind::CatchEvent
            && model.has_extension_attribute(element, Ns::Imixs, "activityid")
    }

    fn update_properties(&self, model: &mut BpmnModel, element: NodeId, data: &Value) -> bool {
        let actor_mapper = ItemNameMapper::for_mapping(model, FieldMapping::Actor);

        items::set_item_value(
            model,
            element,
            "txtmailsubject",
            XS_STRING,
            &json_string(data, "txtmailsubject", ""),
        );
        items::set_item_value(
            model,
            element,
            "rtfmailbody",
            XS_STRING,
            &json_string(data, "rtfmailbody", ""),
        );

        // recipient field selectors reference actor mapping entries
        for property in KEY_RECEIVER_PROPERTIES {
            let values = json_string_list(data, property);
            items::set_item_value_list(
                model,
                element,
                property,
                XS_STRING,
                &values,
                Some(actor_mapper.values()),
            );
        }

        // free recipient addresses, one per line
        for property in NAME_RECEIVER_PROPERTIES {
            let lines = json_lines(data, property);
            items::set_item_value_list(model, element, property, XS_STRING, &lines, None);
        }

        false
    }
}
