//! log4j/Logback default pattern-layout output:
//! `YYYY-MM-DD HH:MM:SS,mmm [thread] LEVEL logger - message`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use crate::timefmt;
use once_cell::sync::Lazy;
use regex::Regex;

static LOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3})\s+\[([^\]]+)\]\s+(DEBUG|INFO|WARN|ERROR|FATAL)\s+(\S+)\s+-\s+(.+)$").unwrap()
});

pub struct Log4j;

impl Parser for Log4j {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "log4j",
            display_name: "log4j",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &["java"],
            aliases: &["logback"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| LOG_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = LOG_RE.captures(line) else { continue };
            let mut event = ValidationEvent::new(caps[4].to_string(), ValidationEventType::DebugEvent);
            event.started_at = timefmt::normalize(&caps[1]);
            event.actor_type = caps[2].to_string();
            event.severity = match &caps[3] {
                "WARN" => "warning".to_string(),
                "FATAL" => "critical".to_string(),
                other => other.to_ascii_lowercase(),
            };
            event.message = caps[5].to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thread_and_logger() {
        let content = "2023-10-10 13:55:36,001 [main] ERROR com.app.Service - NullPointerException";
        let decoder = Log4j;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool_name, "com.app.Service");
        assert_eq!(events[0].actor_type, "main");
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].started_at, "2023-10-10T13:55:36.001Z");
    }
}
