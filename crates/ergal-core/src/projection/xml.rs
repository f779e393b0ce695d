// crates/ergal-core/src/projection/xml.rs
// ============================================================================
// Module: Ergal XML Conversion
// Description: Converts XML documents into nested JSON mappings.
// Purpose: Let the projector search XML bodies with the same traversal as JSON.
// Dependencies: roxmltree, serde_json
// ============================================================================

//! ## Overview
//! The converted shape follows the common XML-to-dict convention:
//! - the document becomes `{root_tag: value}`;
//! - attributes become `@name` keys;
//! - repeated child tags collapse into an array under one key;
//! - text next to attributes or children is stored under `#text`;
//! - an empty element becomes `null` and a text-only element a string.
//!
//! Whitespace-only text is dropped. Tag and attribute names keep the
//! namespace prefix exactly as written in the source text. Documents may
//! carry a DTD; entity expansion stays bounded by the parser.

// ============================================================================
// SECTION: Imports
// ============================================================================

use roxmltree::Attribute;
use roxmltree::Document;
use roxmltree::Node;
use roxmltree::ParsingOptions;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Key used for element text that sits beside attributes or children.
const TEXT_KEY: &str = "#text";
/// Prefix applied to attribute keys.
const ATTRIBUTE_PREFIX: char = '@';

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Parses an XML document and converts it into a JSON mapping.
pub(crate) fn xml_to_value(body: &str) -> Result<Value, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(body, options)?;
    let root = document.root_element();
    let mut map = Map::new();
    map.insert(element_name(body, root), element_value(body, root));
    Ok(Value::Object(map))
}

/// Converts one element and its subtree.
fn element_value(input: &str, node: Node<'_, '_>) -> Value {
    let mut map = Map::new();
    for attribute in node.attributes() {
        let name = attribute_name(input, &attribute);
        let value = Value::String(attribute.value().to_string());
        map.insert(format!("{ATTRIBUTE_PREFIX}{name}"), value);
    }
    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            insert_child(&mut map, element_name(input, child), element_value(input, child));
        } else if child.is_text()
            && let Some(fragment) = child.text()
        {
            text.push_str(fragment);
        }
    }
    let text = text.trim();
    if map.is_empty() {
        return if text.is_empty() { Value::Null } else { Value::String(text.to_string()) };
    }
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }
    Value::Object(map)
}

/// Inserts a child value, collapsing repeated tags into an array.
///
/// Element values are never arrays, so an array under a tag key always marks
/// an earlier repeat.
fn insert_child(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Returns an element's qualified tag as written in the source text.
///
/// Element ranges start at the opening `<`, so the tag runs up to the first
/// whitespace, `/` or `>`.
fn element_name(input: &str, node: Node<'_, '_>) -> String {
    input
        .get(node.range().start + 1..)
        .and_then(|rest| rest.split(|c: char| c.is_whitespace() || c == '/' || c == '>').next())
        .filter(|name| !name.is_empty())
        .map_or_else(|| node.tag_name().name().to_string(), str::to_string)
}

/// Returns an attribute's qualified name as written in the source text.
fn attribute_name(input: &str, attribute: &Attribute<'_, '_>) -> String {
    input
        .get(attribute.range_qname())
        .map_or_else(|| attribute.name().to_string(), str::to_string)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
