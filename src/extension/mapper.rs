//! Label/value mapping over the model field-mapping definitions.
//!
//! The workflow definitions element stores field mappings as ordered
//! `Label|value` definition strings, e.g. `Owner|$owner`. The mapper parses
//! one of these lists into parallel label/value lists and resolves between
//! them. It is the sole source of the valid cross-reference domain used by
//! the validator and by write filtering in the item store.

use tracing::error;

use crate::extension::items;
use crate::model::BpmnModel;

/// The closed set of supported field-mapping items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMapping {
    /// Actor field mapping (`txtfieldmapping`).
    Actor,
    /// Time/date field mapping (`txttimefieldmapping`).
    Time,
}

impl FieldMapping {
    /// The item name under which this mapping is stored.
    pub fn item_name(&self) -> &'static str {
        match self {
            Self::Actor => "txtfieldmapping",
            Self::Time => "txttimefieldmapping",
        }
    }

    pub fn from_item_name(name: &str) -> Option<Self> {
        match name {
            "txtfieldmapping" => Some(Self::Actor),
            "txttimefieldmapping" => Some(Self::Time),
            _ => None,
        }
    }
}

/// Parsed `Label|value` definitions of one field mapping.
///
/// The mapper is a snapshot: it captures no live link back to the document
/// and must be rebuilt after the underlying mapping item changes.
#[derive(Clone, Debug, Default)]
pub struct ItemNameMapper {
    labels: Vec<String>,
    values: Vec<String>,
    definitions: Vec<String>,
}

impl ItemNameMapper {
    /// Build a mapper from a field-mapping item stored on the definitions
    /// element.
    ///
    /// An unsupported `field_mapping` name is a misuse: it is logged as an
    /// error and the mapper degrades to empty lists.
    pub fn new(model: &BpmnModel, field_mapping: &str) -> Self {
        if FieldMapping::from_item_name(field_mapping).is_none() {
            error!("Unsupported field mapping - '{field_mapping}'");
            return Self::default();
        }

        let definitions = items::get_item_value_list(model, model.definitions(), field_mapping);
        let mut labels = Vec::with_capacity(definitions.len());
        let mut values = Vec::with_capacity(definitions.len());
        for definition in &definitions {
            match definition.split_once('|') {
                Some((label, value)) => {
                    labels.push(label.trim().to_string());
                    values.push(value.trim().to_string());
                }
                None => {
                    labels.push(definition.trim().to_string());
                    values.push(definition.trim().to_string());
                }
            }
        }
        Self {
            labels,
            values,
            definitions,
        }
    }

    /// Build a mapper for one of the supported mappings.
    pub fn for_mapping(model: &BpmnModel, mapping: FieldMapping) -> Self {
        Self::new(model, mapping.item_name())
    }

    /// The label list, parallel to [`values`](Self::values).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The value list - the valid cross-reference domain.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The raw `Label|value` definition strings.
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// Resolve the label for a value; empty string when not found.
    /// First match by list position wins.
    pub fn resolve_label(&self, value: &str) -> &str {
        match self.values.iter().position(|v| v == value) {
            Some(index) => &self.labels[index],
            None => "",
        }
    }

    /// Resolve the value for a label; empty string when not found.
    pub fn resolve_value(&self, label: &str) -> &str {
        match self.labels.iter().position(|l| l == label) {
            Some(index) => &self.values[index],
            None => "",
        }
    }
}
