//! XML document to JSON value mapping.
//!
//! The mapping follows the familiar "attributes with a prefix, repeated
//! children become arrays, leaves collapse to their text" convention:
//!
//! ```text
//! <r id="5"><a>1</a><a>2</a><b/></r>   =>   {"r": {"@id": 5, "a": [1, 2], "b": {}}}
//! ```
//!
//! Keys appear in the order their first occurrence was met while walking
//! the tree, and the walk is deterministic, so the same input always
//! yields byte-identical output.

use crate::coercion;
use crate::errors::ParseError;
use crate::formats::json;
use crate::formats::xml::{self, Document, Element, Node, Text};
use log::debug;
use serde_json::{Map, Value};

/// Reserved key for text that sits next to attributes or child elements.
pub const DEFAULT_CONTENT_KEY: &str = "content";

/// Prefix that marks a key as coming from an attribute.
pub const DEFAULT_ATTRIBUTE_PREFIX: &str = "@";

/// Knobs for the XML to JSON mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Key under which mixed text content is stored.
    pub content_key: String,
    /// Prepended to every attribute name.
    pub attribute_prefix: String,
    /// Turn numeric and boolean text into JSON numbers and booleans.
    /// When `false` every scalar stays a string.
    pub coerce_scalars: bool,
    /// Deepest element nesting accepted before the input is rejected.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            content_key: DEFAULT_CONTENT_KEY.to_string(),
            attribute_prefix: DEFAULT_ATTRIBUTE_PREFIX.to_string(),
            coerce_scalars: true,
            max_depth: xml::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Convert XML text into indented JSON text using the default options.
pub fn convert(input: &str) -> Result<String, ParseError> {
    convert_with_options(input, &ConvertOptions::default())
}

/// Convert XML text into indented JSON text.
///
/// Nothing is produced unless the whole document parses; any structural
/// problem is reported as a `ParseError`.
pub fn convert_with_options(input: &str, options: &ConvertOptions) -> Result<String, ParseError> {
    let document = xml::parse_with_depth(input, options.max_depth)?;
    debug!(
        "Parsed XML document with root <{}> ({} child elements)",
        document.root.name,
        document.root.children().count()
    );

    let value = document_to_value(&document, options);
    json::to_string_pretty(&value)
}

/// Map a whole document: a single-key object named after the root element.
pub fn document_to_value(document: &Document, options: &ConvertOptions) -> Value {
    let mut top = Map::new();
    top.insert(
        document.root.name.clone(),
        element_to_value(&document.root, options),
    );
    Value::Object(top)
}

/// Map the contents of one element (not including its own name).
pub fn element_to_value(element: &Element, options: &ConvertOptions) -> Value {
    if let Some(text) = element.sole_text() {
        return scalar(&text.value, text.verbatim, options);
    }

    let mut map = Map::new();
    if element.is_empty() {
        return Value::Object(map);
    }

    for attribute in &element.attributes {
        let key = format!("{}{}", options.attribute_prefix, attribute.name);
        accumulate(&mut map, key, scalar(&attribute.value, false, options));
    }

    for node in &element.content {
        match node {
            Node::Element(child) => {
                accumulate(&mut map, child.name.clone(), element_to_value(child, options));
            }
            Node::Text(Text { value, verbatim }) => {
                accumulate(
                    &mut map,
                    options.content_key.clone(),
                    scalar(value, *verbatim, options),
                );
            }
        }
    }

    Value::Object(map)
}

fn scalar(text: &str, verbatim: bool, options: &ConvertOptions) -> Value {
    if options.coerce_scalars && !verbatim {
        coercion::coerce(text)
    } else {
        Value::String(text.to_string())
    }
}

/// Insert `value` under `key`, turning a second occurrence into an array.
///
/// The key keeps the position of its first insertion.
fn accumulate(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        None => {
            map.insert(key, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn to_value(xml: &str) -> Value {
        to_value_with(xml, &ConvertOptions::default())
    }

    fn to_value_with(xml: &str, options: &ConvertOptions) -> Value {
        let document = xml::parse(xml).unwrap();
        document_to_value(&document, options)
    }

    #[test]
    fn test_leaf_collapses_to_scalar() {
        assert_eq!(to_value("<name>Ann</name>"), json!({"name": "Ann"}));
        assert_eq!(to_value("<age>30</age>"), json!({"age": 30}));
        assert_eq!(to_value("<ok> TRUE </ok>"), json!({"ok": true}));
    }

    #[test]
    fn test_repeated_siblings_become_array() {
        assert_eq!(
            to_value("<r><a>1</a><a>2</a></r>"),
            json!({"r": {"a": [1, 2]}})
        );
    }

    #[test]
    fn test_array_keeps_position_of_first_occurrence() {
        let value = to_value("<r><a>1</a><b>x</b><a>2</a><c/><a>3</a></r>");
        assert_eq!(value, json!({"r": {"a": [1, 2, 3], "b": "x", "c": {}}}));

        let keys: Vec<&String> = value["r"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_attributes_are_prefixed_and_coerced() {
        assert_eq!(to_value(r#"<r id="5"></r>"#), json!({"r": {"@id": 5}}));
        assert_eq!(
            to_value(r#"<r id="5" name="x" on="false"/>"#),
            json!({"r": {"@id": 5, "@name": "x", "@on": false}})
        );
    }

    #[test]
    fn test_attribute_values_are_not_trimmed() {
        assert_eq!(to_value(r#"<r n=" 5"/>"#), json!({"r": {"@n": " 5"}}));
    }

    #[test]
    fn test_text_with_attributes_uses_content_key() {
        assert_eq!(
            to_value(r#"<price currency="EUR">9.5</price>"#),
            json!({"price": {"@currency": "EUR", "content": 9.5}})
        );
    }

    #[test]
    fn test_mixed_content_accumulates_text() {
        assert_eq!(
            to_value("<p>Hello <b>big</b> world</p>"),
            json!({"p": {"content": ["Hello", "world"], "b": "big"}})
        );
    }

    #[test]
    fn test_empty_elements_are_empty_objects() {
        assert_eq!(to_value("<a/>"), json!({"a": {}}));
        assert_eq!(to_value("<a>   </a>"), json!({"a": {}}));
        assert_eq!(to_value("<r><a/><a/></r>"), json!({"r": {"a": [{}, {}]}}));
    }

    #[test]
    fn test_nested_objects() {
        assert_eq!(
            to_value("<a><b><c>deep</c></b></a>"),
            json!({"a": {"b": {"c": "deep"}}})
        );
    }

    #[test]
    fn test_child_named_like_content_key_merges() {
        assert_eq!(
            to_value("<r>text<content>x</content></r>"),
            json!({"r": {"content": ["text", "x"]}})
        );
    }

    #[test]
    fn test_cdata_is_never_coerced() {
        assert_eq!(
            to_value("<n><![CDATA[42]]></n>"),
            json!({"n": "42"})
        );
    }

    #[test]
    fn test_keep_strings_option() {
        let options = ConvertOptions {
            coerce_scalars: false,
            ..Default::default()
        };
        assert_eq!(
            to_value_with(r#"<r id="5"><a>1</a><b>true</b></r>"#, &options),
            json!({"r": {"@id": "5", "a": "1", "b": "true"}})
        );
    }

    #[test]
    fn test_custom_content_key_and_prefix() {
        let options = ConvertOptions {
            content_key: "#text".to_string(),
            attribute_prefix: "-".to_string(),
            ..Default::default()
        };
        assert_eq!(
            to_value_with(r#"<a x="1">hi</a>"#, &options),
            json!({"a": {"-x": 1, "#text": "hi"}})
        );
    }

    #[test]
    fn test_convert_renders_indented_json() {
        let text = convert("<person><name>Ann</name><age>30</age></person>").unwrap();
        assert_eq!(
            text,
            "{\n    \"person\": {\n        \"name\": \"Ann\",\n        \"age\": 30\n    }\n}"
        );
    }

    #[test]
    fn test_convert_respects_max_depth() {
        let options = ConvertOptions {
            max_depth: 2,
            ..Default::default()
        };
        assert!(convert_with_options("<a><b/></a>", &options).is_ok());
        assert!(matches!(
            convert_with_options("<a><b><c/></b></a>", &options),
            Err(ParseError::TooDeep(2))
        ));
    }

    #[test]
    fn test_convert_rejects_malformed_input() {
        for input in ["", "<a>", "<a></b>", "not xml at all"] {
            assert!(convert(input).is_err(), "input {:?}", input);
        }
    }
}
