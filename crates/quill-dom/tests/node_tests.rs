//! Tests for node construction, accessors, JSON form and the tree outline.

use pretty_assertions::assert_eq;
use quill_dom::{AttributesMap, ElementData, Node, tree_to_string};
use serde_json::json;

#[test]
fn test_attribute_reinsert_keeps_position() {
    let data = ElementData::new("div")
        .with_attribute("x", "1")
        .with_attribute("y", "2")
        .with_attribute("x", "3");

    let keys: Vec<&str> = data.attrs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["x", "y"]);
    assert_eq!(data.attr("x"), Some("3"));
    assert_eq!(data.attr("z"), None);
}

#[test]
fn test_accessors_on_text() {
    let node = Node::text("hello");
    assert_eq!(node.as_text(), Some("hello"));
    assert_eq!(node.name(), None);
    assert!(node.attrs().is_none());
    assert!(node.children().is_empty());
    assert!(!node.is_void());
    assert!(!node.is_component());
    assert!(node.validate().is_ok());
}

#[test]
fn test_accessors_on_element_and_component() {
    let element = Node::Element(ElementData::with_children(
        "p",
        AttributesMap::new(),
        vec![Node::text("a")],
    ));
    assert_eq!(element.name(), Some("p"));
    assert_eq!(element.children().len(), 1);
    assert!(element.as_text().is_none());
    assert!(!element.is_component());

    let component = Node::Component(ElementData::void("widget", AttributesMap::new()));
    assert_eq!(component.name(), Some("widget"));
    assert!(component.is_component());
    assert!(component.is_void());
    assert!(component.as_element().is_some());
}

#[test]
fn test_json_shape_of_element() {
    let node = Node::Element(ElementData::with_children(
        "div",
        AttributesMap::from([("class".to_string(), "oh".to_string())]),
        vec![
            Node::Element(ElementData::void("img", AttributesMap::new())),
            Node::text("hi"),
        ],
    ));

    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "tag",
            "name": "div",
            "attrs": { "class": "oh" },
            "voidElement": false,
            "children": [
                { "type": "tag", "name": "img", "attrs": {}, "voidElement": true, "children": [] },
                { "type": "text", "content": "hi" }
            ]
        })
    );
}

#[test]
fn test_json_shape_of_component() {
    let node = Node::Component(ElementData::new("my-component").with_attribute("some", "thing"));
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "component",
            "name": "my-component",
            "attrs": { "some": "thing" },
            "voidElement": false,
            "children": []
        })
    );
}

#[test]
fn test_json_defaults_for_missing_fields() {
    let node: Node = serde_json::from_value(json!({ "type": "tag", "name": "br" })).unwrap();
    assert_eq!(node, Node::Element(ElementData::new("br")));
}

#[test]
fn test_json_attribute_order_survives() {
    let node: Node = serde_json::from_str(
        r#"{"type":"tag","name":"a","attrs":{"z":"1","a":"2","m":"3"},"voidElement":false,"children":[]}"#,
    )
    .unwrap();
    let keys: Vec<&str> = node.attrs().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_deserialized_tree_can_break_invariants() {
    let node: Node = serde_json::from_value(json!({
        "type": "tag",
        "name": "img",
        "voidElement": true,
        "children": [{ "type": "text", "content": "x" }]
    }))
    .unwrap();
    assert!(node.validate().is_err());
}

#[test]
fn test_tree_outline() {
    let nodes = vec![Node::Element(ElementData::with_children(
        "div",
        AttributesMap::from([
            ("id".to_string(), "main".to_string()),
            ("hidden".to_string(), String::new()),
        ]),
        vec![
            Node::text("a b"),
            Node::Component(ElementData::void("icon", AttributesMap::new())),
        ],
    ))];

    let expected = "<div id=\"main\" hidden>\n  \"a\u{00B7}b\"\n  <component icon />\n";
    assert_eq!(tree_to_string(&nodes), expected);
}
