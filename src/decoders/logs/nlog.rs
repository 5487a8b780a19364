//! NLog's default pipe-delimited layout:
//! `timestamp|LEVEL|logger|message[|exception]`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static NLOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}(?:\.\d+)?)\|(TRACE|DEBUG|INFO|WARN|ERROR|FATAL)\|([^|]+)\|([^|]*)(?:\|(.*))?$").unwrap()
});

fn severity_for(level: &str) -> &'static str {
    match level.to_ascii_uppercase().as_str() {
        "FATAL" | "ERROR" => "error",
        "WARN" => "warning",
        _ => "info",
    }
}

fn status_for(severity: &str) -> ValidationEventStatus {
    match severity {
        "error" => ValidationEventStatus::Error,
        "warning" => ValidationEventStatus::Warning,
        _ => ValidationEventStatus::Info,
    }
}

pub struct Nlog;

impl Parser for Nlog {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "nlog",
            display_name: "NLog",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &["dotnet"],
            aliases: &[],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let mut checked = 0;
        let mut matched = 0;
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()).take(10) {
            checked += 1;
            if NLOG_RE.is_match(line) {
                matched += 1;
            }
        }
        matched > 0 && matched * 3 >= checked
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let Some(caps) = NLOG_RE.captures(line) else { continue };

            let mut event = ValidationEvent::new("nlog", ValidationEventType::DebugInfo);
            event.started_at = caps[1].to_string();
            let level = &caps[2];
            event.category = caps[3].to_string();
            event.message = caps[4].to_string();
            if let Some(exception) = caps.get(5) {
                if !exception.as_str().is_empty() {
                    event.error_code = exception.as_str().to_string();
                }
            }
            event.severity = severity_for(level).to_string();
            event.status = Some(status_for(&event.severity));
            event.structured_data = format!(
                r#"{{"level":"{}","logger":"{}"{}}}"#,
                level,
                event.category,
                if event.error_code.is_empty() {
                    String::new()
                } else {
                    format!(r#","exception":"{}""#, event.error_code)
                }
            );
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
    fn parses_plain_message() {
        let content = "2025-01-15 10:30:45.1234|INFO|MyApp.Program|Application started";
        let decoder = Nlog;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, "MyApp.Program");
        assert_eq!(events[0].severity, "info");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Info));
    }

    #[test]
    fn parses_message_with_exception() {
        let content = "2025-01-15 10:30:46.5678|ERROR|MyApp.Service|Connection failed|System.TimeoutException";
        let decoder = Nlog;
        let events = decoder.parse(content);
        assert_eq!(events[0].error_code, "System.TimeoutException");
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
