//! `swiftlint lint --reporter json`: a flat array of
//! `{file, line, character, severity, rule_id, reason}` objects.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct SwiftlintJson;

impl Parser for SwiftlintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "swiftlint_json",
            display_name: "SwiftLint JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["swiftlint"],
            command_patterns: &["swiftlint lint --reporter json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("rule_id").is_some() && f.get("character").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for item in &root {
            let severity = item.get("severity").and_then(Value::as_str).unwrap_or("warning");
            let mut event = ValidationEvent::new("swiftlint", ValidationEventType::LintIssue);
            event.ref_file = item.get("file").and_then(Value::as_str).unwrap_or_default().to_string();
            event.ref_line = item.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.ref_column = item.get("character").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.error_code = item.get("rule_id").and_then(Value::as_str).unwrap_or_default().to_string();
            event.message = item.get("reason").and_then(Value::as_str).unwrap_or_default().to_string();
            event.status = Some(if severity.eq_ignore_ascii_case("error") {
                ValidationEventStatus::Error
            } else {
                ValidationEventStatus::Warning
            });
            event.severity = severity.to_ascii_lowercase();
            event.category = "lint".to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("swiftlint", ValidationEventType::Summary).with_message("swiftlint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_array() {
        let json = r#"[{"file":"App.swift","line":10,"character":5,"severity":"Error","rule_id":"force_cast","reason":"Force casts should be avoided"}]"#;
        let decoder = SwiftlintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
        assert_eq!(events[0].error_code, "force_cast");
    }
}
