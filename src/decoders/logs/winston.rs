//! Winston's default JSON transport output: one `{"level":...,"message":...,
//! "timestamp":...}` object per line, optionally with a `service`/`label`
//! field identifying the emitting component.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct Winston;

impl Parser for Winston {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "winston",
            display_name: "Winston",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &["javascript"],
            aliases: &[],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().filter(|l| !l.trim().is_empty()).any(|line| {
            serde_json::from_str::<Value>(line.trim())
                .ok()
                .and_then(|v| v.as_object().cloned())
                .is_some_and(|obj| obj.contains_key("level") && obj.contains_key("message"))
        })
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(line) else { continue };
            if !obj.contains_key("level") || !obj.contains_key("message") {
                continue;
            }

            let tool_name = obj
                .get("service")
                .or_else(|| obj.get("label"))
                .and_then(Value::as_str)
                .unwrap_or("winston")
                .to_string();
            let mut event = ValidationEvent::new(tool_name, ValidationEventType::DebugEvent);
            event.severity = obj
                .get("level")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_ascii_lowercase();
            event.message = obj.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
            event.started_at = obj.get("timestamp").and_then(Value::as_str).unwrap_or_default().to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            event.structured_data = serde_json::to_string(&obj).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("winston", ValidationEventType::Summary)
                    .with_message("no winston-shaped JSON records found"),
            );
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_and_message() {
        let content = r#"{"level":"error","message":"disk full","service":"billing","timestamp":"2023-10-10T13:55:36.001Z"}"#;
        let decoder = Winston;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool_name, "billing");
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].message, "disk full");
    }

    #[test]
    fn non_winston_json_does_not_match() {
        let decoder = Winston;
        assert!(!decoder.can_parse(r#"{"foo":"bar"}"#));
    }
}
