//! Ruby stdlib `Logger`'s default format:
//! `I, [2023-10-10T13:55:36.001000 #12345]  INFO -- progname: message`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static LOGGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[DIWEFU],\s*\[([^\s#]+)\s*#(\d+)\]\s*(DEBUG|INFO|WARN|ERROR|FATAL|UNKNOWN)\s*--\s*([^:]*):\s*(.*)$").unwrap()
});

pub struct RubyLogger;

impl Parser for RubyLogger {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "ruby_logger",
            display_name: "Ruby Logger",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &["ruby"],
            aliases: &[],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| LOGGER_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = LOGGER_RE.captures(line) else { continue };
            let progname = caps[4].trim();
            let mut event = ValidationEvent::new(
                if progname.is_empty() { "ruby_logger".to_string() } else { progname.to_string() },
                ValidationEventType::DebugEvent,
            );
            event.started_at = caps[1].to_string();
            event.principal = caps[2].to_string();
            event.severity = match &caps[3] {
                "WARN" => "warning".to_string(),
                "FATAL" => "critical".to_string(),
                "UNKNOWN" => "info".to_string(),
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
    fn parses_logger_line() {
        let content = "I, [2023-10-10T13:55:36.001000 #12345]  INFO -- MyApp: worker started";
        let decoder = RubyLogger;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool_name, "MyApp");
        assert_eq!(events[0].severity, "info");
        assert_eq!(events[0].principal, "12345");
    }
}
