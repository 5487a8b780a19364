//! `klog`-formatted Kubernetes component logs:
//! `Ennnn hh:mm:ss.ffffff    1 controller.go:193] message`, where the
//! leading letter is the level (I/W/E/F).

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static KLOG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([IWEF])(\d{4})\s+(\d{2}:\d{2}:\d{2}\.\d+)\s+(\d+)\s+([^:]+):(\d+)\]\s*(.*)$").unwrap()
});

pub struct Kubernetes;

impl Parser for Kubernetes {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "kubernetes",
            display_name: "Kubernetes component log (klog)",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &[],
            aliases: &["klog", "k8s"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| KLOG_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = KLOG_RE.captures(line) else { continue };
            let level = &caps[1];
            let mut event = ValidationEvent::new("kubernetes", ValidationEventType::DebugEvent);
            event.severity = match level {
                "I" => "info",
                "W" => "warning",
                "E" => "error",
                "F" => "critical",
                _ => "info",
            }
            .to_string();
            event.status = Some(match level {
                "E" | "F" => ValidationEventStatus::Error,
                "W" => ValidationEventStatus::Warning,
                _ => ValidationEventStatus::Info,
            });
            event.ref_file = caps[5].to_string();
            event.ref_line = caps[6].parse().unwrap_or(-1);
            event.principal = caps[4].to_string();
            event.message = caps[7].to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("kubernetes", ValidationEventType::Summary).with_message("no klog-formatted records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_line() {
        let content = "E0912 10:30:45.123456       1 controller.go:193] Failed to sync resource";
        let decoder = Kubernetes;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].ref_file, "controller.go");
        assert_eq!(events[0].ref_line, 193);
    }
}
