//! Extension item store.
//!
//! Reads, writes and removes `imixs:item` extension elements on a BPMN
//! element. All items of one element live inside a single
//! `bpmn2:extensionElements` container which is created lazily on the first
//! real write and inserted as the element's *first* child:
//!
//! ```text
//! <bpmn2:task id="Task_2" imixs:processid="1900" name="Approve">
//!   <bpmn2:extensionElements>
//!     <imixs:item name="user.name" type="xs:string">
//!       <imixs:value><![CDATA[John]]></imixs:value>
//!     </imixs:item>
//!   </bpmn2:extensionElements>
//!   ...
//! </bpmn2:task>
//! ```
//!
//! No operation here fails: a missing container, item or value always
//! degrades to an empty or default result.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::model::{BpmnModel, NodeId, Ns, XmlNode};

/// Prefix marking a value as an external file link.
pub const FILE_LINK_PREFIX: &str = "file://";

/// Marker attribute carried by file-link values.
const FILE_LINK_ATTRIBUTE: &str = "file-link";

/// Write or replace a single-value item.
///
/// An empty or blank `value` removes the item. If the value is a `file://`
/// reference the value element carries the `open-bpmn:file-link` marker,
/// otherwise the marker is cleared.
pub fn set_item_value(
    model: &mut BpmnModel,
    element: NodeId,
    item_name: &str,
    item_type: &str,
    value: &str,
) {
    if value.trim().is_empty() {
        remove_item(model, element, item_name);
        return;
    }
    let item = ensure_item(model, element, item_name, item_type);
    clear_item_values(model, item);
    let value_element = append_value(model, item, value);
    if value.starts_with(FILE_LINK_PREFIX) {
        model.set_extension_attribute(value_element, Ns::OpenBpmn, FILE_LINK_ATTRIBUTE, value);
    } else {
        model.remove_extension_attribute(value_element, Ns::OpenBpmn, FILE_LINK_ATTRIBUTE);
    }
}

/// Write or replace a multi-value item, one `imixs:value` per entry.
///
/// If a `reference_list` is given, entries not present in it are never
/// written. This avoids resurfacing stale field mappings. Writing an empty
/// (filtered) list removes the item.
pub fn set_item_value_list(
    model: &mut BpmnModel,
    element: NodeId,
    item_name: &str,
    item_type: &str,
    values: &[String],
    reference_list: Option<&[String]>,
) {
    let filtered: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|value| match reference_list {
            Some(reference) => {
                let keep = reference.iter().any(|r| r == value);
                if !keep {
                    debug!(item = item_name, value, "value not in reference list - not written");
                }
                keep
            }
            None => true,
        })
        .collect();

    if filtered.is_empty() {
        remove_item(model, element, item_name);
        return;
    }

    let item = ensure_item(model, element, item_name, item_type);
    clear_item_values(model, item);
    for value in filtered {
        append_value(model, item, value);
    }
}

/// The first de-duplicated value of an item, or `default_value` if the item
/// is absent or empty.
pub fn get_item_value(
    model: &BpmnModel,
    element: NodeId,
    item_name: &str,
    default_value: &str,
) -> String {
    get_item_value_list(model, element, item_name)
        .into_iter()
        .next()
        .unwrap_or_else(|| default_value.to_string())
}

/// Parse an item value as boolean; an absent item defaults to `true`.
pub fn get_item_value_boolean(model: &BpmnModel, element: NodeId, item_name: &str) -> bool {
    get_item_value(model, element, item_name, "true").eq_ignore_ascii_case("true")
}

/// All values of an item, de-duplicated, in document order.
pub fn get_item_value_list(model: &BpmnModel, element: NodeId, item_name: &str) -> Vec<String> {
    get_item_value_list_filtered(model, element, item_name, None)
}

/// All values of an item, de-duplicated and filtered through an optional
/// reference list.
///
/// De-duplication compares the *value part* of each entry (the text after
/// the last `|`, trimmed), so `Owner|$owner` and a bare `$owner` count as
/// the same logical value; the first occurrence wins and keeps its original
/// form. Values not present in the reference list are dropped and logged.
pub fn get_item_value_list_filtered(
    model: &BpmnModel,
    element: NodeId,
    item_name: &str,
    reference_list: Option<&[String]>,
) -> Vec<String> {
    let mut result = Vec::new();
    let Some(container) = extension_container(model, element) else {
        return result;
    };
    let Some(item) = find_item(model, container, item_name) else {
        return result;
    };

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let value_elements: Vec<NodeId> = model
        .child_elements(item)
        .filter(|&child| is_imixs(model, child, "value"))
        .collect();

    for value_element in value_elements {
        let value = read_value(model, value_element);
        if !seen.insert(value_part(&value)) {
            continue;
        }

        if let Some(reference) = reference_list {
            if !reference.iter().any(|r| r == &value) {
                debug!(item = item_name, value = %value, "stale value not in reference list - dropped");
                continue;
            }
        }
        result.push(value);
    }
    result
}

/// Delete an item if present; no-op otherwise.
pub fn remove_item(model: &mut BpmnModel, element: NodeId, item_name: &str) {
    let Some(container) = extension_container(model, element) else {
        return;
    };
    if let Some(item) = find_item(model, container, item_name) {
        model.remove_child(container, item);
    }
}

/// A value list stored on the model definitions element. Such lists can
/// contain `Label|value` pairs; with `strip_labels` only the value part of
/// each entry is returned.
pub fn definitions_value_list(
    model: &BpmnModel,
    item_name: &str,
    strip_labels: bool,
) -> Vec<String> {
    let values = get_item_value_list(model, model.definitions(), item_name);
    if !strip_labels {
        return values;
    }
    values
        .into_iter()
        .map(|value| match value.split_once('|') {
            Some((_, part)) => part.trim().to_string(),
            None => value,
        })
        .collect()
}

// ── Internals ───────────────────────────────────────────────────────

fn extension_container(model: &BpmnModel, element: NodeId) -> Option<NodeId> {
    model.find_child(element, Ns::Bpmn2, "extensionElements")
}

fn is_imixs(model: &BpmnModel, id: NodeId, local: &str) -> bool {
    model
        .element(id)
        .is_some_and(|el| el.prefix() == Some(Ns::Imixs.prefix()) && el.local_name() == local)
}

fn find_item(model: &BpmnModel, container: NodeId, item_name: &str) -> Option<NodeId> {
    model
        .child_elements(container)
        .find(|&child| is_imixs(model, child, "item") && model.attribute(child, "name") == Some(item_name))
}

/// Find or create the item, creating the extension container on demand.
/// The container is inserted as the first child of its owning element.
fn ensure_item(model: &mut BpmnModel, element: NodeId, item_name: &str, item_type: &str) -> NodeId {
    let container = match extension_container(model, element) {
        Some(container) => container,
        None => {
            let container = model.create_element(Ns::Bpmn2, "extensionElements");
            model.insert_first(element, container);
            container
        }
    };
    let item = match find_item(model, container, item_name) {
        Some(item) => item,
        None => {
            let item = model.create_element(Ns::Imixs, "item");
            model.append_child(container, item);
            item
        }
    };
    model.set_attribute(item, "name", item_name);
    model.set_attribute(item, "type", item_type);
    item
}

fn clear_item_values(model: &mut BpmnModel, item: NodeId) {
    for child in model.children(item).to_vec() {
        model.remove_child(item, child);
    }
}

fn append_value(model: &mut BpmnModel, item: NodeId, value: &str) -> NodeId {
    let value_element = model.create_element(Ns::Imixs, "value");
    let cdata = model.create_cdata(value);
    model.append_child(value_element, cdata);
    model.append_child(item, value_element);
    value_element
}

/// A CDATA child is preferred; plain text content is tolerated for
/// externally authored documents.
fn read_value(model: &BpmnModel, value_element: NodeId) -> String {
    for &child in model.children(value_element) {
        if let Some(XmlNode::CData(text)) = model.node(child) {
            return text.clone();
        }
    }
    model.text_content(value_element)
}

/// The logical value part used for de-duplication: text after the last `|`,
/// trimmed. Entries without a delimiter compare as-is.
fn value_part(value: &str) -> String {
    match value.rfind('|') {
        Some(index) => value[index + 1..].trim().to_string(),
        None => value.to_string(),
    }
}
