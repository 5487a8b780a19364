//! nginx default combined access log format — structurally identical to
//! Apache's CLF plus referrer/user-agent fields, distinguished in the
//! registry by its own `format_name` since callers expect to name it
//! explicitly rather than rely on auto-detect picking one CLF variant
//! over the other.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use crate::timefmt;
use once_cell::sync::Lazy;
use regex::Regex;

static COMBINED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\S+) - \S+ \[([^\]]+)\] "(\S+) (\S+) [^"]+" (\d{3}) (\S+) "([^"]*)" "([^"]*)""#).unwrap()
});

pub struct NginxAccess;

impl Parser for NginxAccess {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "nginx_access",
            display_name: "nginx access log",
            priority: Priority::MEDIUM,
            category: ParserCategory::Network,
            groups: &[],
            aliases: &["nginx"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| COMBINED_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = COMBINED_RE.captures(line) else { continue };
            let status: i32 = caps[5].parse().unwrap_or(0);

            let mut event = ValidationEvent::new("nginx", ValidationEventType::DebugEvent);
            event.origin = caps[1].to_string();
            event.started_at = timefmt::normalize(&caps[2]);
            event.target = caps[4].to_string();
            event.actor_type = caps[3].to_string();
            event.suggestion = caps[7].to_string();
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
    fn parses_combined_log_line() {
        let content = r#"10.0.0.5 - - [10/Oct/2023:13:55:36 +0000] "GET /health HTTP/1.1" 200 15 "-" "curl/8.0""#;
        let decoder = NginxAccess;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, "/health");
        assert_eq!(events[0].severity, "info");
        assert!(events[0].started_at.starts_with("2023-10-10T13:55:36"));
    }
}
