//! Bunyan's JSON log-record format: `{"name":...,"hostname":...,"pid":...,
//! "level":30,"msg":...,"time":...,"v":0}`. Distinguished from Pino by the
//! mandatory `v` (format version) field.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct Bunyan;

fn level_name(level: i64) -> &'static str {
    match level {
        n if n >= 60 => "critical",
        n if n >= 50 => "error",
        n if n >= 40 => "warning",
        n if n >= 30 => "info",
        _ => "debug",
    }
}

impl Parser for Bunyan {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "bunyan",
            display_name: "Bunyan",
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
                .is_some_and(|obj| obj.contains_key("v") && obj.get("level").is_some_and(Value::is_i64) && obj.contains_key("msg"))
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
            if !obj.contains_key("v") {
                continue;
            }
            let Some(level) = obj.get("level").and_then(Value::as_i64) else { continue };

            let tool_name = obj.get("name").and_then(Value::as_str).unwrap_or("bunyan").to_string();
            let mut event = ValidationEvent::new(tool_name, ValidationEventType::DebugEvent);
            event.severity = level_name(level).to_string();
            event.message = obj.get("msg").and_then(Value::as_str).unwrap_or_default().to_string();
            event.started_at = obj.get("time").and_then(Value::as_str).unwrap_or_default().to_string();
            event.principal = obj.get("pid").map(|v| v.to_string()).unwrap_or_default();
            event.origin = obj.get("hostname").and_then(Value::as_str).unwrap_or_default().to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            event.structured_data = serde_json::to_string(&obj).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("bunyan", ValidationEventType::Summary).with_message("no bunyan-shaped JSON records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bunyan_record() {
        let content = r#"{"name":"myapp","hostname":"h","pid":1,"level":40,"msg":"slow query","time":"2023-10-10T13:55:36.001Z","v":0}"#;
        let decoder = Bunyan;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].tool_name, "myapp");
        assert_eq!(events[0].severity, "warning");
    }
}
