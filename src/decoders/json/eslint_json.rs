//! ESLint's `--format json` output: an array of `{filePath, messages[]}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct EslintJson;

impl Parser for EslintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "eslint_json",
            display_name: "ESLint JSON",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::Linter,
            groups: &["javascript"],
            aliases: &["eslint"],
            command_patterns: &["eslint --format json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        if !trimmed.starts_with('[') {
            return false;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Array(items)) => items
                .first()
                .map(|first| first.get("filePath").is_some() && first.get("messages").is_some())
                .unwrap_or(false),
            _ => false,
        }
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for file_result in &root {
            let file_path = file_result.get("filePath").and_then(Value::as_str).unwrap_or_default();
            let messages = file_result.get("messages").and_then(Value::as_array).cloned().unwrap_or_default();
            for msg in &messages {
                events.push(event_from_message(file_path, msg));
            }
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("eslint", ValidationEventType::Summary)
                    .with_message("eslint reported no issues"),
            );
        }
        events
    }
}

fn event_from_message(file_path: &str, msg: &Value) -> ValidationEvent {
    let severity_num = msg.get("severity").and_then(Value::as_i64).unwrap_or(1);
    let rule_id = msg.get("ruleId").and_then(Value::as_str).unwrap_or_default();
    let message = msg.get("message").and_then(Value::as_str).unwrap_or_default();
    let line = msg.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
    let column = msg.get("column").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);

    let mut event = ValidationEvent::new("eslint", ValidationEventType::LintIssue);
    event.ref_file = file_path.to_string();
    event.ref_line = line;
    event.ref_column = column;
    event.error_code = rule_id.to_string();
    event.message = message.to_string();
    event.status = Some(if severity_num >= 2 {
        ValidationEventStatus::Error
    } else {
        ValidationEventStatus::Warning
    });
    event.severity = if severity_num >= 2 { "error" } else { "warning" }.to_string();
    event.category = "lint".to_string();
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_messages_with_severity_mapping() {
        let json = r#"[{"filePath":"a.js","messages":[
            {"ruleId":"no-unused-vars","severity":2,"message":"'x' is unused","line":3,"column":7},
            {"ruleId":"no-console","severity":1,"message":"unexpected console","line":5,"column":1}
        ]}]"#;
        let decoder = EslintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Warning));
        assert_eq!(events[0].ref_line, 3);
    }
}
