//! `phpstan analyse --error-format=json`:
//! `{"totals":{"errors":N,"file_errors":N},"files":{"path":{"errors":N,"messages":[{"message","line","ignorable"}]}}}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct PhpstanJson;

impl Parser for PhpstanJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "phpstan_json",
            display_name: "PHPStan JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["phpstan"],
            command_patterns: &["phpstan analyse --error-format=json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('{')
            && serde_json::from_str::<Value>(trimmed)
                .map(|v| v.get("totals").is_some() && v.get("files").is_some())
                .unwrap_or(false)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        if let Some(Value::Object(files)) = root.get("files") {
            for (path, file_result) in files {
                let Some(messages) = file_result.get("messages").and_then(Value::as_array) else { continue };
                for msg in messages {
                    let ignorable = msg.get("ignorable").and_then(Value::as_bool).unwrap_or(false);
                    let mut event = ValidationEvent::new("phpstan", ValidationEventType::TypeError);
                    event.ref_file = path.clone();
                    event.ref_line = msg.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
                    event.message = msg.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
                    event.status = Some(if ignorable { ValidationEventStatus::Warning } else { ValidationEventStatus::Error });
                    event.severity = if ignorable { "warning" } else { "error" }.to_string();
                    event.category = "type_error".to_string();
                    events.push(event);
                }
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("phpstan", ValidationEventType::Summary).with_message("phpstan reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_per_file_messages() {
        let json = r#"{"totals":{"errors":1,"file_errors":1},"files":{"src/App.php":{"errors":1,"messages":[{"message":"Undefined variable: $x","line":12,"ignorable":false}]}}}"#;
        let decoder = PhpstanJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ref_file, "src/App.php");
        assert_eq!(events[0].ref_line, 12);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
