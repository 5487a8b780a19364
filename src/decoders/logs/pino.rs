//! Pino's default JSON transport output: one `{"level":30,"time":...,
//! "msg":...}` object per line, with numeric levels (`10` trace .. `60`
//! fatal) rather than level names.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct Pino;

fn level_name(level: i64) -> &'static str {
    match level {
        n if n >= 60 => "critical",
        n if n >= 50 => "error",
        n if n >= 40 => "warning",
        n if n >= 30 => "info",
        n if n >= 20 => "debug",
        _ => "debug",
    }
}

impl Parser for Pino {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "pino",
            display_name: "Pino",
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
                .is_some_and(|obj| obj.get("level").is_some_and(Value::is_i64) && obj.contains_key("msg") && obj.contains_key("time"))
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
            let Some(level) = obj.get("level").and_then(Value::as_i64) else { continue };
            if !obj.contains_key("msg") {
                continue;
            }

            let tool_name = obj.get("name").and_then(Value::as_str).unwrap_or("pino").to_string();
            let mut event = ValidationEvent::new(tool_name, ValidationEventType::DebugEvent);
            event.severity = level_name(level).to_string();
            event.message = obj.get("msg").and_then(Value::as_str).unwrap_or_default().to_string();
            event.started_at = match obj.get("time") {
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::String(s)) => s.clone(),
                _ => String::new(),
            };
            event.principal = obj.get("pid").map(|v| v.to_string()).unwrap_or_default();
            event.origin = obj.get("hostname").and_then(Value::as_str).unwrap_or_default().to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            event.structured_data = serde_json::to_string(&obj).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("pino", ValidationEventType::Summary).with_message("no pino-shaped JSON records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_numeric_level_to_severity() {
        let content = r#"{"level":50,"time":1684000000000,"pid":1,"hostname":"h","msg":"disk full"}"#;
        let decoder = Pino;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].message, "disk full");
    }

    #[test]
    fn string_level_logs_do_not_match() {
        let decoder = Pino;
        assert!(!decoder.can_parse(r#"{"level":"info","msg":"x","time":"now"}"#));
    }
}
