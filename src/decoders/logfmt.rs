//! Generic `key=value key2="quoted value"` logfmt decoder. A line counts
//! as logfmt once at least 3 key/value pairs match; shorter lines are too
//! easily confused with ordinary prose to trust.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static KEY_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([a-zA-Z0-9_.-]+)=(?:"((?:[^"\\]|\\.)*)"|([^\s]+))"#).unwrap());

pub struct LogfmtDecoder;

impl LogfmtDecoder {
    fn extract_pairs(&self, line: &str) -> HashMap<String, String> {
        let mut pairs = HashMap::new();
        for cap in KEY_VALUE_RE.captures_iter(line) {
            let key = cap.get(1).unwrap().as_str().to_string();
            let value = if let Some(quoted) = cap.get(2) {
                quoted
                    .as_str()
                    .replace(r#"\""#, "\"")
                    .replace(r"\\", "\\")
                    .replace(r"\n", "\n")
                    .replace(r"\t", "\t")
            } else {
                cap.get(3).map(|m| m.as_str().to_string()).unwrap_or_default()
            };
            pairs.insert(key, value);
        }
        pairs
    }

    fn meets_threshold(&self, line: &str) -> bool {
        KEY_VALUE_RE.find_iter(line).count() >= 3
    }
}

impl Parser for LogfmtDecoder {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "logfmt",
            display_name: "logfmt",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &[],
            aliases: &[],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| self.meets_threshold(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if !self.meets_threshold(line) {
                continue;
            }
            let pairs = self.extract_pairs(line);
            let tool_name = pairs
                .get("tool")
                .or_else(|| pairs.get("app"))
                .or_else(|| pairs.get("service"))
                .cloned()
                .unwrap_or_else(|| "logfmt".to_string());

            let mut event = ValidationEvent::new(tool_name, ValidationEventType::DebugEvent);
            event.message = pairs.get("msg").or_else(|| pairs.get("message")).cloned().unwrap_or_else(|| line.to_string());
            event.severity = pairs.get("level").cloned().unwrap_or_default();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.structured_data = serde_json::to_string(&pairs).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("logfmt", ValidationEventType::Summary)
                    .with_message("no logfmt-shaped lines found"),
            );
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_lines_above_threshold() {
        let content = "level=info msg=\"started\" service=api port=8080\nshort=1 two=2";
        let decoder = LogfmtDecoder;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "started");
        assert_eq!(events[0].tool_name, "api");
    }

    #[test]
    fn below_threshold_lines_are_skipped() {
        let decoder = LogfmtDecoder;
        assert!(!decoder.can_parse("a=1 b=2"));
    }
}
