//! Generic newline-delimited JSON-object decoder, the JSON-shaped sibling
//! of [`crate::decoders::logfmt`]: one object per line, best-effort
//! canonical field extraction by common key name, everything else folded
//! into `structured_data`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::{Map, Value};

pub struct JsonlDecoder;

const MESSAGE_FIELDS: &[&str] = &["msg", "message", "log.message"];
const LEVEL_FIELDS: &[&str] = &["level", "severity", "lvl"];
const TOOL_FIELDS: &[&str] = &["tool", "service", "app", "logger"];

impl Parser for JsonlDecoder {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "jsonl",
            display_name: "JSON Lines",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &[],
            aliases: &["ndjson"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return false;
        }
        lines.iter().all(|l| {
            matches!(
                serde_json::from_str::<Value>(l.trim()),
                Ok(Value::Object(_))
            )
        })
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(line) else {
                continue;
            };
            events.push(event_from_object(&obj, idx as i32 + 1));
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("jsonl", ValidationEventType::Summary)
                    .with_message("no JSON objects found"),
            );
        }
        events
    }
}

fn first_string(obj: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|f| obj.get(*f).and_then(Value::as_str))
        .map(str::to_string)
}

fn event_from_object(obj: &Map<String, Value>, line_number: i32) -> ValidationEvent {
    let tool_name = first_string(obj, TOOL_FIELDS).unwrap_or_else(|| "jsonl".to_string());
    let mut event = ValidationEvent::new(tool_name, ValidationEventType::DebugEvent);
    event.message = first_string(obj, MESSAGE_FIELDS).unwrap_or_default();
    event.severity = first_string(obj, LEVEL_FIELDS).unwrap_or_default();
    event.log_line_start = line_number;
    event.log_line_end = line_number;
    event.structured_data = serde_json::to_string(obj).unwrap_or_default();
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_event_per_line() {
        let content = "{\"msg\":\"started\",\"level\":\"info\"}\n{\"msg\":\"stopped\",\"level\":\"warn\"}";
        let decoder = JsonlDecoder;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "started");
        assert_eq!(events[1].severity, "warn");
    }

    #[test]
    fn rejects_non_object_lines() {
        let decoder = JsonlDecoder;
        assert!(!decoder.can_parse("[1,2,3]\n[4,5,6]"));
    }
}
