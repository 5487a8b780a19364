//! `rubocop --format json`: `{"files":[{"path", "offenses":[...]}], "summary":{...}}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct RubocopJson;

impl Parser for RubocopJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "rubocop_json",
            display_name: "RuboCop JSON",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::Linter,
            groups: &["ruby"],
            aliases: &["rubocop"],
            command_patterns: &["rubocop --format json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        if !trimmed.starts_with('{') {
            return false;
        }
        serde_json::from_str::<Value>(trimmed)
            .map(|v| v.get("files").is_some() && v.get("summary").is_some())
            .unwrap_or(false)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        if let Some(files) = root.get("files").and_then(Value::as_array) {
            for file in files {
                let path = file.get("path").and_then(Value::as_str).unwrap_or_default();
                for offense in file.get("offenses").and_then(Value::as_array).into_iter().flatten() {
                    events.push(event_from_offense(path, offense));
                }
            }
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("rubocop", ValidationEventType::Summary)
                    .with_message("rubocop reported no offenses"),
            );
        }
        events
    }
}

fn event_from_offense(path: &str, offense: &Value) -> ValidationEvent {
    let severity = offense.get("severity").and_then(Value::as_str).unwrap_or("convention");
    let message = offense.get("message").and_then(Value::as_str).unwrap_or_default();
    let cop_name = offense.get("cop_name").and_then(Value::as_str).unwrap_or_default();
    let line = offense
        .get("location")
        .and_then(|l| l.get("line"))
        .and_then(Value::as_i64)
        .map(|v| v as i32)
        .unwrap_or(-1);
    let column = offense
        .get("location")
        .and_then(|l| l.get("column"))
        .and_then(Value::as_i64)
        .map(|v| v as i32)
        .unwrap_or(-1);

    let mut event = ValidationEvent::new("rubocop", ValidationEventType::LintIssue);
    event.ref_file = path.to_string();
    event.ref_line = line;
    event.ref_column = column;
    event.error_code = cop_name.to_string();
    event.message = message.to_string();
    event.severity = severity.to_string();
    event.status = Some(match severity {
        "error" | "fatal" => ValidationEventStatus::Error,
        "warning" => ValidationEventStatus::Warning,
        _ => ValidationEventStatus::Info,
    });
    event.category = "lint".to_string();
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offenses_per_file() {
        let json = r#"{
            "files": [{"path": "app.rb", "offenses": [
                {"severity": "warning", "message": "Line too long.", "cop_name": "Layout/LineLength", "location": {"line": 10, "column": 1}}
            ]}],
            "summary": {"offense_count": 1}
        }"#;
        let decoder = RubocopJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].error_code, "Layout/LineLength");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Warning));
    }
}
