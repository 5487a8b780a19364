//! Serilog's compact JSON formatter: `{"Timestamp":...,"Level":"Information",
//! "MessageTemplate":...,"Properties":{...}}`. PascalCase keys distinguish it
//! from the lowercase-keyed JS loggers.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct Serilog;

fn severity_for(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "verbose" => "debug",
        "debug" => "debug",
        "information" => "info",
        "warning" => "warning",
        "error" => "error",
        "fatal" => "critical",
        _ => "info",
    }
}

impl Parser for Serilog {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "serilog",
            display_name: "Serilog",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &["dotnet"],
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
                .is_some_and(|obj| obj.contains_key("Timestamp") && obj.contains_key("Level") && obj.contains_key("MessageTemplate"))
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
            if !obj.contains_key("Timestamp") || !obj.contains_key("MessageTemplate") {
                continue;
            }
            let level = obj.get("Level").and_then(Value::as_str).unwrap_or("Information");

            let mut event = ValidationEvent::new("serilog", ValidationEventType::DebugEvent);
            event.severity = severity_for(level).to_string();
            event.message = obj.get("MessageTemplate").and_then(Value::as_str).unwrap_or_default().to_string();
            event.started_at = obj.get("Timestamp").and_then(Value::as_str).unwrap_or_default().to_string();
            if let Some(exception) = obj.get("Exception").and_then(Value::as_str) {
                event.error_code = exception.lines().next().unwrap_or_default().to_string();
            }
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            event.structured_data = serde_json::to_string(&obj).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("serilog", ValidationEventType::Summary).with_message("no serilog-shaped JSON records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_level_name_to_severity() {
        let content = r#"{"Timestamp":"2023-10-10T13:55:36.001Z","Level":"Error","MessageTemplate":"Connection to {Host} failed","Properties":{"Host":"db1"}}"#;
        let decoder = Serilog;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].message, "Connection to {Host} failed");
    }
}
