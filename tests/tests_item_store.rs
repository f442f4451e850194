//! Extension item store behavior on the element tree.

use imixs_bpmn::extension::items::{
    get_item_value, get_item_value_boolean, get_item_value_list, get_item_value_list_filtered,
    remove_item, set_item_value, set_item_value_list,
};
use imixs_bpmn::{BpmnModel, ElementKind, NodeId, Ns};
use rstest::rstest;

fn model_with_task() -> (BpmnModel, NodeId) {
    let mut model = BpmnModel::new();
    let definitions = model.definitions();
    let process = model.create_element(Ns::Bpmn2, "process");
    model.append_child(definitions, process);
    let task = model.create_element(Ns::Bpmn2, "task");
    model.set_attribute(task, "id", "task_1");
    model.append_child(process, task);
    (model, task)
}

#[rstest]
#[case("workitem")]
#[case("Owner|$owner")]
#[case("text with spaces")]
#[case("äöü unicode")]
fn roundtrip_returns_written_value(#[case] value: &str) {
    let (mut model, task) = model_with_task();
    set_item_value(&mut model, task, "txttype", "xs:string", value);
    assert_eq!(get_item_value(&model, task, "txttype", ""), value);
}

#[test]
fn writing_empty_removes_the_item() {
    let (mut model, task) = model_with_task();
    set_item_value(&mut model, task, "txttype", "xs:string", "workitem");
    set_item_value(&mut model, task, "txttype", "xs:string", "");
    assert_eq!(get_item_value(&model, task, "txttype", "fallback"), "fallback");
}

#[test]
fn absent_item_returns_default() {
    let (model, task) = model_with_task();
    assert_eq!(get_item_value(&model, task, "missing", "default"), "default");
    assert!(get_item_value_list(&model, task, "missing").is_empty());
}

#[test]
fn write_filter_keeps_relative_order() {
    let (mut model, task) = model_with_task();
    let values: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let reference: Vec<String> = ["a", "c"].iter().map(|s| s.to_string()).collect();
    set_item_value_list(
        &mut model,
        task,
        "keyownershipfields",
        "xs:string",
        &values,
        Some(&reference),
    );
    assert_eq!(
        get_item_value_list(&model, task, "keyownershipfields"),
        vec!["a".to_string(), "c".to_string()]
    );
}

#[test]
fn writing_fully_filtered_list_removes_the_item() {
    let (mut model, task) = model_with_task();
    let values = vec!["a".to_string()];
    set_item_value_list(&mut model, task, "keyownershipfields", "xs:string", &values, None);

    let reference = vec!["x".to_string()];
    set_item_value_list(
        &mut model,
        task,
        "keyownershipfields",
        "xs:string",
        &values,
        Some(&reference),
    );
    assert!(get_item_value_list(&model, task, "keyownershipfields").is_empty());
}

#[test]
fn read_deduplicates_by_value_part() {
    let (mut model, task) = model_with_task();
    // "Owner|$owner" and a bare "$owner" are the same logical value; the
    // first occurrence wins and keeps its original form.
    let values = vec!["Owner|$owner".to_string(), "$owner".to_string()];
    set_item_value_list(&mut model, task, "keyownershipfields", "xs:string", &values, None);
    assert_eq!(
        get_item_value_list(&model, task, "keyownershipfields"),
        vec!["Owner|$owner".to_string()]
    );
}

#[test]
fn read_filter_drops_stale_values() {
    let (mut model, task) = model_with_task();
    let values = vec!["$owner".to_string(), "$unknown".to_string()];
    set_item_value_list(&mut model, task, "keyownershipfields", "xs:string", &values, None);

    let reference = vec!["$owner".to_string()];
    assert_eq!(
        get_item_value_list_filtered(&model, task, "keyownershipfields", Some(&reference)),
        vec!["$owner".to_string()]
    );
    // unfiltered read still sees the stored values
    assert_eq!(
        get_item_value_list(&model, task, "keyownershipfields").len(),
        2
    );
}

#[test]
fn boolean_items_default_to_true() {
    let (mut model, task) = model_with_task();
    assert!(get_item_value_boolean(&model, task, "keyupdateacl"));
    set_item_value(&mut model, task, "keyupdateacl", "xs:string", "false");
    assert!(!get_item_value_boolean(&model, task, "keyupdateacl"));
}

#[test]
fn remove_item_is_a_noop_when_absent() {
    let (mut model, task) = model_with_task();
    remove_item(&mut model, task, "missing");
    assert!(model.children(task).is_empty());
}

#[test]
fn container_is_created_as_first_child_and_reused() {
    let (mut model, task) = model_with_task();
    let documentation = model.create_element(Ns::Bpmn2, "documentation");
    model.append_child(task, documentation);

    set_item_value(&mut model, task, "txttype", "xs:string", "workitem");
    assert_eq!(model.kind(model.children(task)[0]), ElementKind::ExtensionElements);

    set_item_value(&mut model, task, "txteditorid", "xs:string", "form_basic");
    let containers = model
        .child_elements(task)
        .filter(|&c| model.kind(c) == ElementKind::ExtensionElements)
        .count();
    assert_eq!(containers, 1);
    assert_eq!(get_item_value(&model, task, "txttype", ""), "workitem");
    assert_eq!(get_item_value(&model, task, "txteditorid", ""), "form_basic");
}

#[test]
fn replacing_a_value_clears_prior_values() {
    let (mut model, task) = model_with_task();
    let values = vec!["one".to_string(), "two".to_string()];
    set_item_value_list(&mut model, task, "txtplugins", "xs:string", &values, None);
    set_item_value(&mut model, task, "txtplugins", "xs:string", "three");
    assert_eq!(
        get_item_value_list(&model, task, "txtplugins"),
        vec!["three".to_string()]
    );
}
