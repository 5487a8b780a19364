//! logrus's JSON formatter output: `{"level":"info","msg":...,"time":...}`
//! plus arbitrary caller-supplied fields. Distinguished from Winston/Pino by
//! the `msg` key (not `message`) paired with a string-valued `level`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct Logrus;

impl Parser for Logrus {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "logrus",
            display_name: "logrus",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &["go"],
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
                .is_some_and(|obj| obj.get("level").is_some_and(Value::is_string) && obj.contains_key("msg") && obj.contains_key("time"))
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
            let Some(level) = obj.get("level").and_then(Value::as_str) else { continue };
            if !obj.contains_key("msg") || !obj.contains_key("time") {
                continue;
            }

            let mut event = ValidationEvent::new("logrus", ValidationEventType::DebugEvent);
            event.severity = match level {
                "warn" => "warning".to_string(),
                "panic" => "critical".to_string(),
                other => other.to_ascii_lowercase(),
            };
            event.message = obj.get("msg").and_then(Value::as_str).unwrap_or_default().to_string();
            event.started_at = obj.get("time").and_then(Value::as_str).unwrap_or_default().to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            event.structured_data = serde_json::to_string(&obj).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("logrus", ValidationEventType::Summary).with_message("no logrus-shaped JSON records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_and_fields() {
        let content = r#"{"level":"warn","msg":"retrying request","time":"2023-10-10T13:55:36Z","attempt":3}"#;
        let decoder = Logrus;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].severity, "warning");
        assert_eq!(events[0].message, "retrying request");
    }

    #[test]
    fn winston_shaped_message_key_does_not_match() {
        let decoder = Logrus;
        assert!(!decoder.can_parse(r#"{"level":"info","message":"x","time":"now"}"#));
    }
}
