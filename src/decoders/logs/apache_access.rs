//! Apache/Common Log Format access lines:
//! `host - - [date] "METHOD path HTTP/ver" status bytes`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use crate::timefmt;
use once_cell::sync::Lazy;
use regex::Regex;

static CLF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\S+) \S+ \S+ \[([^\]]+)\] "(\S+) (\S+) [^"]+" (\d{3}) (\S+)"#).unwrap()
});

pub struct ApacheAccess;

impl Parser for ApacheAccess {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "apache_access",
            display_name: "Apache access log",
            priority: Priority::MEDIUM,
            category: ParserCategory::Network,
            groups: &[],
            aliases: &["apache"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| CLF_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = CLF_RE.captures(line) else { continue };
            let status: i32 = caps[5].parse().unwrap_or(0);

            let mut event = ValidationEvent::new("apache", ValidationEventType::DebugEvent);
            event.origin = caps[1].to_string();
            event.started_at = timefmt::normalize(&caps[2]);
            event.target = caps[4].to_string();
            event.actor_type = caps[3].to_string();
            event.message = format!("{} {} -> {}", &caps[3], &caps[4], status);
            event.severity = if status >= 500 {
                "error"
            } else if status >= 400 {
                "warning"
            } else {
                "info"
            }
            .to_string();
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
    fn parses_request_line_and_infers_severity() {
        let content = r#"127.0.0.1 - - [10/Oct/2023:13:55:36 +0000] "GET /api/users HTTP/1.1" 500 1234"#;
        let decoder = ApacheAccess;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, "/api/users");
        assert_eq!(events[0].severity, "error");
        assert!(events[0].started_at.starts_with("2023-10-10T13:55:36"));
    }
}
