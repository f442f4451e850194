//! Data-object type classification and file-link resolution.

use std::fs;
use std::io;

use imixs_bpmn::extension::dataobject::{
    classify, update_data_type, validate_data_objects, DataObjectType, FileLinkReader,
    FsFileLinkReader, DATATYPE_ATTRIBUTE,
};
use imixs_bpmn::{BpmnModel, NodeId, Ns};

fn model_with_data_object() -> (BpmnModel, NodeId) {
    let mut model = BpmnModel::new();
    let definitions = model.definitions();
    let process = model.create_element(Ns::Bpmn2, "process");
    model.append_child(definitions, process);
    let data_object = model.create_element(Ns::Bpmn2, "dataObject");
    model.set_attribute(data_object, "id", "dataobject_1");
    model.append_child(process, data_object);
    (model, data_object)
}

fn with_documentation(model: &mut BpmnModel, element: NodeId, content: &str) -> NodeId {
    let documentation = model.create_element(Ns::Bpmn2, "documentation");
    let cdata = model.create_cdata(content);
    model.append_child(documentation, cdata);
    model.append_child(element, documentation);
    documentation
}

#[test]
fn form_marker_yields_form_tag() {
    assert_eq!(
        classify("<imixs-form><imixs-form-section label=\"Address\"/></imixs-form>"),
        Some(DataObjectType::FormData)
    );
}

#[test]
fn unmarked_content_clears_a_cached_tag() {
    let (mut model, data_object) = model_with_data_object();
    model.set_extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE, "form-data");

    let changed = update_data_type(&mut model, data_object, "plain notes");
    assert!(changed);
    assert!(!model.has_extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE));
}

#[test]
fn reclassifying_same_content_reports_no_change() {
    let (mut model, data_object) = model_with_data_object();
    assert!(update_data_type(&mut model, data_object, "<imixs-form/>"));
    assert!(!update_data_type(&mut model, data_object, "<imixs-form/>"));
    assert_eq!(
        model.extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE),
        Some("form-data")
    );
}

#[test]
fn sweep_tags_untagged_objects_from_inline_documentation() {
    let (mut model, data_object) = model_with_data_object();
    with_documentation(&mut model, data_object, "<PromptDefinition><prompt/></PromptDefinition>");

    let valid = validate_data_objects(&mut model, &FsFileLinkReader);
    assert!(!valid);
    assert_eq!(
        model.extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE),
        Some("prompt-data")
    );
}

#[test]
fn sweep_skips_already_tagged_objects() {
    let (mut model, data_object) = model_with_data_object();
    with_documentation(&mut model, data_object, "<imixs-form/>");
    model.set_extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE, "prompt-data");

    let valid = validate_data_objects(&mut model, &FsFileLinkReader);
    assert!(valid);
    assert_eq!(
        model.extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE),
        Some("prompt-data")
    );
}

#[test]
fn linked_file_content_wins_over_inline_text() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prompt.xml"), "<PromptDefinition/>").unwrap();

    let (mut model, data_object) = model_with_data_object();
    model.set_source_path(dir.path().join("model.bpmn"));
    let documentation = with_documentation(&mut model, data_object, "plain inline text");
    model.set_extension_attribute(documentation, Ns::OpenBpmn, "file-link", "file://prompt.xml");

    let valid = validate_data_objects(&mut model, &FsFileLinkReader);
    assert!(!valid);
    assert_eq!(
        model.extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE),
        Some("prompt-data")
    );
}

#[test]
fn unreadable_link_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let (mut model, data_object) = model_with_data_object();
    model.set_source_path(dir.path().join("model.bpmn"));
    let documentation = with_documentation(&mut model, data_object, "");
    model.set_extension_attribute(documentation, Ns::OpenBpmn, "file-link", "file://missing.xml");

    let valid = validate_data_objects(&mut model, &FsFileLinkReader);
    assert!(valid);
    assert!(!model.has_extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE));
}

#[test]
fn custom_reader_feeds_the_sweep() {
    struct FixedContent(&'static str);
    impl FileLinkReader for FixedContent {
        fn read_content(
            &self,
            _model: &BpmnModel,
            _documentation: NodeId,
        ) -> io::Result<Option<String>> {
            Ok(Some(self.0.to_string()))
        }
    }

    let (mut model, data_object) = model_with_data_object();
    with_documentation(&mut model, data_object, "ignored");

    let valid = validate_data_objects(&mut model, &FixedContent("<imixs-form/>"));
    assert!(!valid);
    assert_eq!(
        model.extension_attribute(data_object, Ns::Imixs, DATATYPE_ATTRIBUTE),
        Some("form-data")
    );
}
