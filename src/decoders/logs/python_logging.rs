//! Python stdlib `logging` default formatter output:
//! `YYYY-MM-DD HH:MM:SS,mmm LEVEL logger_name: message`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use crate::timefmt;
use once_cell::sync::Lazy;
use regex::Regex;

static LOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3})\s+(DEBUG|INFO|WARNING|ERROR|CRITICAL)\s+(\S+):\s*(.+)$").unwrap()
});

pub struct PythonLogging;

impl Parser for PythonLogging {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "python_logging",
            display_name: "Python logging",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &["python"],
            aliases: &[],
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
            let mut event = ValidationEvent::new(caps[3].to_string(), ValidationEventType::DebugEvent);
            event.started_at = timefmt::normalize(&caps[1]);
            event.severity = caps[2].to_ascii_lowercase();
            event.message = caps[4].to_string();
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
    fn parses_level_and_logger_name() {
        let content = "2023-10-10 13:55:36,001 ERROR myapp.db: connection refused";
        let decoder = PythonLogging;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool_name, "myapp.db");
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].message, "connection refused");
        assert_eq!(events[0].started_at, "2023-10-10T13:55:36.001Z");
    }
}
