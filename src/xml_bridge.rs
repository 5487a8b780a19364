//! In-process stand-in for the "xml-to-json" facility the XML-bridge
//! decoders depend on.
//!
//! The contract only names the facility as an external collaborator; it
//! does not mandate a specific JSON projection shape beyond "a JSON
//! projection the decoder walks". This implementation uses a
//! Badgerfish-style mapping (attributes as `@name` keys, repeated children
//! collapsed into arrays, text content as `#text`) because that's exactly
//! the shape [`crate::decoders::xml::junit_xml`] and
//! [`crate::decoders::xml::nunit_xml`] expect when they read
//! `@name`/`@classname`/`@time` and `failure`/`error`/`skipped` children.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde_json::{Map, Value};

pub fn parse_xml_to_json(xml: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<(String, Map<String, Value>, String)> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Eof => break,
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let mut obj = Map::new();
                for attr in e.attributes().flatten() {
                    let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
                    let val = attr.unescape_value().unwrap_or_default().to_string();
                    obj.insert(key, Value::String(val));
                }
                stack.push((name, obj, String::new()));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let mut obj = Map::new();
                for attr in e.attributes().flatten() {
                    let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
                    let val = attr.unescape_value().unwrap_or_default().to_string();
                    obj.insert(key, Value::String(val));
                }
                push_child(&mut stack, &mut root, name, Value::Object(obj));
            }
            Event::Text(t) => {
                if let Some((_, _, text)) = stack.last_mut() {
                    text.push_str(&t.unescape().unwrap_or_default());
                }
            }
            Event::End(_) => {
                let (name, mut obj, text) = stack.pop().ok_or("unbalanced xml: unmatched close tag")?;
                let text = text.trim().to_string();
                if !text.is_empty() && !obj.contains_key("#text") {
                    obj.insert("#text".to_string(), Value::String(text));
                }
                push_child(&mut stack, &mut root, name, Value::Object(obj));
            }
            _ => {}
        }
    }

    root.ok_or_else(|| "empty or malformed xml document".to_string())
}

/// Attaches a finished element to its parent (or to the document root),
/// collapsing repeated sibling tags into a JSON array the way a
/// Badgerfish-style projection does.
fn push_child(
    stack: &mut [(String, Map<String, Value>, String)],
    root: &mut Option<Value>,
    name: String,
    value: Value,
) {
    if let Some((_, parent, _)) = stack.last_mut() {
        match parent.get_mut(&name) {
            Some(Value::Array(arr)) => arr.push(value),
            Some(existing) => {
                let prev = existing.take();
                *existing = Value::Array(vec![prev, value]);
            }
            None => {
                parent.insert(name, value);
            }
        }
    } else {
        *root = Some(value);
    }
}

pub fn is_valid_xml(xml: &str) -> bool {
    parse_xml_to_json(xml).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_elements_with_attributes() {
        let xml = r#"<testsuite name="S"><testcase name="t" classname="C" time="0.5"/></testsuite>"#;
        let json = parse_xml_to_json(xml).unwrap();
        assert_eq!(json["@name"], "S");
        assert_eq!(json["testcase"]["@name"], "t");
        assert_eq!(json["testcase"]["@classname"], "C");
    }

    #[test]
    fn repeated_siblings_become_an_array() {
        let xml = r#"<suite><case name="a"/><case name="b"/></suite>"#;
        let json = parse_xml_to_json(xml).unwrap();
        assert!(json["case"].is_array());
        assert_eq!(json["case"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn captures_child_text_and_attributes() {
        let xml = r#"<testcase name="u"><failure message="bad">trace</failure></testcase>"#;
        let json = parse_xml_to_json(xml).unwrap();
        assert_eq!(json["failure"]["@message"], "bad");
        assert_eq!(json["failure"]["#text"], "trace");
    }

    #[test]
    fn rejects_unbalanced_xml() {
        assert!(parse_xml_to_json("<a><b></a>").is_err());
    }
}
