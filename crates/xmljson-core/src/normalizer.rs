//! Normalizer — maps a parsed [`XmlElement`] tree onto a [`serde_json::Value`].
//!
//! # Rules
//!
//! | Input                                  | Output                                   |
//! |----------------------------------------|------------------------------------------|
//! | attributes                             | `"@attributes": { name: value, … }`      |
//! | element child `<t>`                    | `"t": value`                             |
//! | second `<t>` sibling                   | `"t": [first, second]`                   |
//! | further `<t>` siblings                 | appended to the array                    |
//! | text (trimmed, non-empty, concatenated)| `"#text": "…"`                           |
//! | text only, no attributes, no children  | the bare string                          |
//! | nothing at all                         | `{}`                                     |
//!
//! Comments and processing instructions are dropped. Whitespace-only text is
//! dropped. The function is total: every tree maps to a value.

use crate::types::{XmlElement, XmlNode};
use serde_json::{Map, Value};

/// Key holding an element's attribute object.
pub const ATTRIBUTES_KEY: &str = "@attributes";
/// Key holding an element's text when it cannot collapse to a bare string.
pub const TEXT_KEY: &str = "#text";

/// Normalise one element subtree.
pub fn normalize(element: &XmlElement) -> Value {
    let mut object = Map::new();

    if !element.attributes.is_empty() {
        let attributes: Map<String, Value> = element
            .attributes
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }

    let mut text = String::new();
    let mut has_element_children = false;

    for child in &element.children {
        match child {
            XmlNode::Element(e) => {
                has_element_children = true;
                merge_child(&mut object, &e.name, normalize(e));
            }
            XmlNode::Text(t) => {
                let t = t.trim();
                if !t.is_empty() {
                    text.push_str(t);
                }
            }
            XmlNode::Comment(_) | XmlNode::ProcessingInstruction { .. } => {}
        }
    }

    if text.is_empty() {
        return Value::Object(object);
    }

    // Leaf-value collapse: only when nothing else would be lost.
    if !has_element_children && object.is_empty() {
        return Value::String(text);
    }

    object.insert(TEXT_KEY.to_string(), Value::String(text));
    Value::Object(object)
}

/// Insert `value` under `key`, promoting to an array on the second occurrence
/// and appending on every occurrence after that.
fn merge_child(object: &mut Map<String, Value>, key: &str, value: Value) {
    match object.get_mut(key) {
        None => {
            object.insert(key.to_string(), value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::take(existing);
            *existing = Value::Array(vec![first, value]);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
