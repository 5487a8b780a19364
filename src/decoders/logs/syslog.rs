//! RFC 3164-style syslog lines: `Mon DD HH:MM:SS host process[pid]: message`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static SYSLOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][a-z]{2}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2})\s+(\S+)\s+(\S+?)(?:\[(\d+)\])?:\s*(.+)$").unwrap()
});

pub struct Syslog;

impl Parser for Syslog {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "syslog",
            display_name: "syslog",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &[],
            aliases: &[],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().filter(|l| SYSLOG_RE.is_match(l)).count() >= 1
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = SYSLOG_RE.captures(line) else { continue };
            let mut event = ValidationEvent::new(caps[3].to_string(), ValidationEventType::DebugEvent);
            event.started_at = caps[1].to_string();
            event.origin = caps[2].to_string();
            event.external_id = caps.get(4).map(|m| m.as_str().to_string()).unwrap_or_default();
            event.message = caps[5].to_string();
            event.severity = infer_severity(&caps[5]);
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }
        events
    }
}

fn infer_severity(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("error") || lower.contains("fail") {
        "error".to_string()
    } else if lower.contains("warn") {
        "warning".to_string()
    } else {
        "info".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_process_and_pid() {
        let content = "Jan 12 10:00:01 web1 sshd[1234]: Failed password for root";
        let decoder = Syslog;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool_name, "sshd");
        assert_eq!(events[0].external_id, "1234");
        assert_eq!(events[0].severity, "error");
    }
}
