//! Document-level behavior: parse, edit, validate and serialize.

use imixs_bpmn::extension::items::{get_item_value, get_item_value_list, set_item_value};
use imixs_bpmn::extension::ExtensionRegistry;
use imixs_bpmn::{BpmnModel, Ns};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn2:definitions xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:imixs="http://www.imixs.org/bpmn2" id="definitions_1" targetNamespace="http://open-bpmn.org">
  <bpmn2:extensionElements>
    <imixs:item name="txtworkflowmodelversion" type="xs:string">
      <imixs:value><![CDATA[ticket-en-1.0]]></imixs:value>
    </imixs:item>
    <imixs:item name="txtfieldmapping" type="xs:string">
      <imixs:value><![CDATA[Creator|$creator]]></imixs:value>
      <imixs:value><![CDATA[Owner|$owner]]></imixs:value>
    </imixs:item>
  </bpmn2:extensionElements>
  <bpmn2:process id="process_1" name="Ticket">
    <bpmn2:task id="task_1" name="Open Ticket" imixs:processid="1000">
      <bpmn2:extensionElements>
        <imixs:item name="keyownershipfields" type="xs:string">
          <imixs:value><![CDATA[$owner]]></imixs:value>
          <imixs:value><![CDATA[$unknown]]></imixs:value>
        </imixs:item>
        <imixs:item name="txteditorid" type="xs:string">form_basic</imixs:item>
      </bpmn2:extensionElements>
    </bpmn2:task>
    <bpmn2:intermediateCatchEvent id="event_1" name="submit" imixs:activityid="10"/>
  </bpmn2:process>
</bpmn2:definitions>
"#;

#[test]
fn parses_model_level_items() {
    let model = BpmnModel::from_xml(DOCUMENT.as_bytes()).unwrap();
    let definitions = model.definitions();
    assert_eq!(
        get_item_value(&model, definitions, "txtworkflowmodelversion", ""),
        "ticket-en-1.0"
    );
    assert_eq!(
        get_item_value_list(&model, definitions, "txtfieldmapping"),
        vec!["Creator|$creator".to_string(), "Owner|$owner".to_string()]
    );
}

#[test]
fn plain_text_item_values_are_tolerated() {
    let model = BpmnModel::from_xml(DOCUMENT.as_bytes()).unwrap();
    let task = model.find_all_activities()[0];
    assert_eq!(get_item_value(&model, task, "txteditorid", ""), "form_basic");
}

#[test]
fn load_repairs_stale_references_and_flags_the_document() {
    let mut model = BpmnModel::from_xml(DOCUMENT.as_bytes()).unwrap();
    let registry = ExtensionRegistry::default();

    registry.on_load(&mut model);

    let task = model.find_all_activities()[0];
    assert_eq!(
        get_item_value_list(&model, task, "keyownershipfields"),
        vec!["$owner".to_string()]
    );
    assert!(model.is_dirty());
    assert_eq!(model.notifications().len(), 1);

    // a second load pass finds nothing left to repair
    let mut reloaded = BpmnModel::from_xml(model.to_xml().unwrap().as_slice()).unwrap();
    registry.on_load(&mut reloaded);
    assert!(!reloaded.is_dirty());
    assert!(reloaded.notifications().is_empty());
}

#[test]
fn serialization_writes_values_as_cdata() {
    let mut model = BpmnModel::from_xml(DOCUMENT.as_bytes()).unwrap();
    let task = model.find_all_activities()[0];
    set_item_value(&mut model, task, "txtworkflowsummary", "xs:string", "Ticket #4711");

    let output = String::from_utf8(model.to_xml().unwrap()).unwrap();
    assert!(output.contains("<![CDATA[Ticket #4711]]>"));
    assert!(output.contains("xmlns:imixs=\"http://www.imixs.org/bpmn2\""));

    let reread = BpmnModel::from_xml(output.as_bytes()).unwrap();
    let task = reread.find_all_activities()[0];
    assert_eq!(
        get_item_value(&reread, task, "txtworkflowsummary", ""),
        "Ticket #4711"
    );
}

#[test]
fn extension_attributes_survive_the_roundtrip() {
    let model = BpmnModel::from_xml(DOCUMENT.as_bytes()).unwrap();
    let task = model.find_all_activities()[0];
    assert_eq!(
        model.extension_attribute(task, Ns::Imixs, "processid"),
        Some("1000")
    );

    let output = model.to_xml().unwrap();
    let reread = BpmnModel::from_xml(&output).unwrap();
    let task = reread.find_all_activities()[0];
    assert_eq!(
        reread.extension_attribute(task, Ns::Imixs, "processid"),
        Some("1000")
    );
    let event = reread.find_all_events()[0];
    assert_eq!(
        reread.extension_attribute(event, Ns::Imixs, "activityid"),
        Some("10")
    );
}
