//! SpotBugs' JSON export (a flattened projection of its XML report):
//! `{"bugs":[{"type","category","priority","message","class","line"}]}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct SpotbugsJson;

impl Parser for SpotbugsJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "spotbugs_json",
            display_name: "SpotBugs JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Security,
            groups: &["java"],
            aliases: &["spotbugs"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('{')
            && serde_json::from_str::<Value>(trimmed)
                .map(|v| v.get("bugs").and_then(Value::as_array).is_some())
                .unwrap_or(false)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        if let Some(bugs) = root.get("bugs").and_then(Value::as_array) {
            for item in bugs {
                let priority = item.get("priority").and_then(Value::as_i64).unwrap_or(3);
                let mut event = ValidationEvent::new("spotbugs", ValidationEventType::SecurityFinding);
                event.ref_file = item.get("class").and_then(Value::as_str).unwrap_or_default().to_string();
                event.ref_line = item.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
                event.error_code = item.get("type").and_then(Value::as_str).unwrap_or_default().to_string();
                event.category = item.get("category").and_then(Value::as_str).unwrap_or("security").to_string();
                event.message = item.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
                event.status = Some(if priority <= 1 { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
                event.severity = if priority <= 1 { "error" } else { "warning" }.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("spotbugs", ValidationEventType::Summary).with_message("spotbugs reported no bugs"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bug_priority() {
        let json = r#"{"bugs":[{"type":"NP_NULL_ON_SOME_PATH","category":"CORRECTNESS","priority":1,"message":"Possible null pointer dereference","class":"com.app.Foo","line":20}]}"#;
        let decoder = SpotbugsJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
        assert_eq!(events[0].category, "CORRECTNESS");
    }
}
