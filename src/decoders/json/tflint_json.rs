//! `tflint --format=json`: `{"issues":[{"rule":{"name","severity"},
//! "message","range":{"filename","start":{"line","column"}}}]}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct TflintJson;

impl Parser for TflintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "tflint_json",
            display_name: "tflint JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["tflint"],
            command_patterns: &["tflint --format=json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('{')
            && serde_json::from_str::<Value>(trimmed)
                .map(|v| v.get("issues").and_then(Value::as_array).is_some())
                .unwrap_or(false)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        if let Some(issues) = root.get("issues").and_then(Value::as_array) {
            for item in issues {
                let severity = item.get("rule").and_then(|r| r.get("severity")).and_then(Value::as_str).unwrap_or("warning");
                let range = item.get("range");
                let mut event = ValidationEvent::new("tflint", ValidationEventType::LintIssue);
                event.ref_file = range.and_then(|r| r.get("filename")).and_then(Value::as_str).unwrap_or_default().to_string();
                event.ref_line = range
                    .and_then(|r| r.get("start"))
                    .and_then(|s| s.get("line"))
                    .and_then(Value::as_i64)
                    .map(|v| v as i32)
                    .unwrap_or(-1);
                event.ref_column = range
                    .and_then(|r| r.get("start"))
                    .and_then(|s| s.get("column"))
                    .and_then(Value::as_i64)
                    .map(|v| v as i32)
                    .unwrap_or(-1);
                event.error_code = item.get("rule").and_then(|r| r.get("name")).and_then(Value::as_str).unwrap_or_default().to_string();
                event.message = item.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
                event.status = Some(if severity == "error" { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
                event.severity = severity.to_string();
                event.category = "lint".to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("tflint", ValidationEventType::Summary).with_message("tflint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_range() {
        let json = r#"{"issues":[{"rule":{"name":"terraform_deprecated_interpolation","severity":"warning"},"message":"deprecated interpolation","range":{"filename":"main.tf","start":{"line":4,"column":3}}}]}"#;
        let decoder = TflintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].ref_file, "main.tf");
        assert_eq!(events[0].ref_line, 4);
    }
}
