//! XML boundary codec for the element tree.
//!
//! Reads a BPMN definitions document into the node arena and writes it
//! back. Item values written by the extension item store appear as CDATA
//! sections; plain text content is accepted on read for documents authored
//! by other tools.

use std::io::Cursor;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{BpmnModel, ModelError, NodeId, XmlNode};

impl BpmnModel {
    /// Read a model from XML bytes.
    pub fn from_xml(input: &[u8]) -> Result<Self, ModelError> {
        read_xml(input)
    }

    /// Read a model from a file, remembering the source path for file-link
    /// resolution.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut model = read_xml(&bytes)?;
        model.set_source_path(path);
        Ok(model)
    }

    /// Serialize the model to XML bytes.
    pub fn to_xml(&self) -> Result<Vec<u8>, ModelError> {
        write_xml(self)
    }
}

/// Parse a BPMN definitions document.
pub fn read_xml(input: &[u8]) -> Result<BpmnModel, ModelError> {
    let mut model = BpmnModel::bare();
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root: Option<NodeId> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let id = handle_start(&mut model, &stack, &mut root, e)?;
                stack.push(id);
            }
            Ok(Event::Empty(ref e)) => {
                handle_start(&mut model, &stack, &mut root, e)?;
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(ref e)) => {
                if let Some(&parent) = stack.last() {
                    let text = e
                        .unescape()
                        .map_err(|e| ModelError::xml(format!("Text error: {e}")))?;
                    if !text.is_empty() {
                        let node = model.create_text(&text);
                        model.append_child(parent, node);
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(&parent) = stack.last() {
                    let text = std::str::from_utf8(e)
                        .map_err(|e| ModelError::xml(format!("CDATA error: {e}")))?;
                    let node = model.create_cdata(text);
                    model.append_child(parent, node);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ModelError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
        }
        buf.clear();
    }

    let root = root.ok_or_else(|| ModelError::missing_element("bpmn2:definitions"))?;
    model.set_root(root);
    Ok(model)
}

fn handle_start(
    model: &mut BpmnModel,
    stack: &[NodeId],
    root: &mut Option<NodeId>,
    e: &BytesStart<'_>,
) -> Result<NodeId, ModelError> {
    let name = e.name();
    let tag = std::str::from_utf8(name.as_ref())
        .map_err(|e| ModelError::xml(format!("Invalid tag name: {e}")))?;
    let (prefix, local) = match tag.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, tag),
    };

    let id = model.create_raw_element(prefix, local);

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| ModelError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ModelError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ModelError::xml(format!("Attribute value error: {e}")))?;

        // Namespace declarations are tracked on the model, not kept as
        // plain attributes.
        if key == "xmlns" {
            model.declare_namespace("", &value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            model.declare_namespace(prefix, &value);
        } else {
            model.set_attribute(id, key, &value);
        }
    }

    match stack.last() {
        Some(&parent) => model.append_child(parent, id),
        None => {
            if local != "definitions" {
                return Err(ModelError::InvalidDocument(format!(
                    "expected a definitions root element, found '{tag}'"
                )));
            }
            *root = Some(id);
        }
    }
    Ok(id)
}

/// Serialize a model back to XML.
pub fn write_xml(model: &BpmnModel) -> Result<Vec<u8>, ModelError> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;

    write_node(&mut writer, model, model.definitions(), true)?;

    let mut output = buffer.into_inner();
    output.push(b'\n');
    Ok(output)
}

fn write_node<W: std::io::Write>(
    writer: &mut Writer<W>,
    model: &BpmnModel,
    id: NodeId,
    is_root: bool,
) -> Result<(), ModelError> {
    match model.node(id) {
        Some(XmlNode::Element(el)) => {
            let tag = el.tag_name();
            // Keep namespace declaration attributes alive until the tag is
            // written.
            let xmlns: Vec<(String, &str)> = if is_root {
                model
                    .namespaces()
                    .map(|(prefix, uri)| {
                        let key = if prefix.is_empty() {
                            "xmlns".to_string()
                        } else {
                            format!("xmlns:{prefix}")
                        };
                        (key, uri)
                    })
                    .collect()
            } else {
                Vec::new()
            };

            let mut start = BytesStart::new(tag.as_str());
            for (key, uri) in &xmlns {
                start.push_attribute((key.as_str(), *uri));
            }
            for (key, value) in el.attributes() {
                start.push_attribute((key, value));
            }

            let children = model.children(id);
            if children.is_empty() {
                writer.write_event(Event::Empty(start)).map_err(write_error)?;
            } else {
                writer.write_event(Event::Start(start)).map_err(write_error)?;
                for &child in children {
                    write_node(writer, model, child, false)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(tag.as_str())))
                    .map_err(write_error)?;
            }
        }
        Some(XmlNode::Text(text)) => {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?;
        }
        Some(XmlNode::CData(text)) => {
            writer
                .write_event(Event::CData(BytesCData::new(text.as_str())))
                .map_err(write_error)?;
        }
        None => {}
    }
    Ok(())
}

fn write_error(e: impl std::fmt::Display) -> ModelError {
    ModelError::xml(format!("Write error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ns;

    const MINIMAL: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn2:definitions xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:imixs="http://www.imixs.org/bpmn2" id="definitions_1">
  <bpmn2:process id="process_1">
    <bpmn2:task id="task_1" name="Approve">
      <bpmn2:extensionElements>
        <imixs:item name="user.name" type="xs:string">
          <imixs:value><![CDATA[John]]></imixs:value>
        </imixs:item>
      </bpmn2:extensionElements>
    </bpmn2:task>
  </bpmn2:process>
</bpmn2:definitions>
"#;

    #[test]
    fn reads_minimal_document() {
        let model = read_xml(MINIMAL).unwrap();
        assert!(model.has_namespace(Ns::Imixs));
        let activities = model.find_all_activities();
        assert_eq!(activities.len(), 1);
        assert_eq!(model.attribute(activities[0], "name"), Some("Approve"));
    }

    #[test]
    fn rejects_non_definitions_root() {
        let err = read_xml(b"<bpmn2:process id=\"p\"/>").unwrap_err();
        assert!(matches!(err, ModelError::InvalidDocument(_)));
    }

    #[test]
    fn roundtrip_preserves_cdata_values() {
        let model = read_xml(MINIMAL).unwrap();
        let bytes = write_xml(&model).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("<![CDATA[John]]>"));
        let reread = read_xml(text.as_bytes()).unwrap();
        assert_eq!(reread.find_all_activities().len(), 1);
    }
}
