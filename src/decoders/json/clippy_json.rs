//! `cargo clippy --message-format=json`: a stream of newline-delimited
//! `{"reason":"compiler-message", "message": {...}}` records.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct ClippyJson;

impl Parser for ClippyJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "clippy_json",
            display_name: "Clippy JSON",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::Linter,
            groups: &["rust"],
            aliases: &["clippy"],
            command_patterns: &["cargo clippy --message-format=json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .any(|l| {
                serde_json::from_str::<Value>(l)
                    .map(|v| v.get("reason").and_then(Value::as_str) == Some("compiler-message"))
                    .unwrap_or(false)
            })
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(record) = serde_json::from_str::<Value>(line) else { continue };
            if record.get("reason").and_then(Value::as_str) != Some("compiler-message") {
                continue;
            }
            if let Some(event) = event_from_message(&record) {
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("clippy", ValidationEventType::Summary)
                    .with_message("clippy reported no diagnostics"),
            );
        }
        events
    }
}

fn event_from_message(record: &Value) -> Option<ValidationEvent> {
    let message = record.get("message")?;
    let level = message.get("level").and_then(Value::as_str).unwrap_or("warning");
    let text = message.get("message").and_then(Value::as_str).unwrap_or_default();
    let code = message
        .get("code")
        .and_then(|c| c.get("code"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    let span = message.get("spans").and_then(Value::as_array).and_then(|s| s.first());
    let (file, line, column) = span
        .map(|s| {
            (
                s.get("file_name").and_then(Value::as_str).unwrap_or_default().to_string(),
                s.get("line_start").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1),
                s.get("column_start").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1),
            )
        })
        .unwrap_or((String::new(), -1, -1));

    let mut event = ValidationEvent::new("clippy", ValidationEventType::LintIssue);
    event.ref_file = file;
    event.ref_line = line;
    event.ref_column = column;
    event.error_code = code.to_string();
    event.message = text.to_string();
    event.severity = level.to_string();
    event.status = Some(if level == "error" {
        ValidationEventStatus::Error
    } else {
        ValidationEventStatus::Warning
    });
    event.category = "lint".to_string();
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compiler_message_stream() {
        let line = r#"{"reason":"compiler-message","message":{"level":"warning","message":"unused variable","code":{"code":"unused_variables"},"spans":[{"file_name":"src/main.rs","line_start":4,"column_start":9}]}}"#;
        let decoder = ClippyJson;
        assert!(decoder.can_parse(line));
        let events = decoder.parse(line);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ref_file, "src/main.rs");
        assert_eq!(events[0].error_code, "unused_variables");
    }
}
