//! Cisco ASA syslog messages: `%ASA-<level>-<msgnum>: message`, e.g.
//! `%ASA-4-106023: Deny tcp src outside:192.168.1.5/54321 dst
//! inside:10.0.0.1/443 by access-group "OUTSIDE_IN"`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static ASA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%ASA-(\d)-(\d+):\s*(.+)").unwrap());
static SRC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"src\s+\S+:(\S+)/(\d+)").unwrap());
static DST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"dst\s+\S+:(\S+)/(\d+)").unwrap());

fn severity_for(level: u8) -> &'static str {
    match level {
        0..=2 => "critical",
        3 => "error",
        4 => "warning",
        _ => "info",
    }
}

pub struct CiscoAsa;

impl Parser for CiscoAsa {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "cisco_asa",
            display_name: "Cisco ASA",
            priority: Priority::HIGH,
            category: ParserCategory::Security,
            groups: &[],
            aliases: &["asa"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| ASA_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = ASA_RE.captures(line) else { continue };
            let level: u8 = caps[1].parse().unwrap_or(6);
            let msgnum = &caps[2];
            let message = caps[3].to_string();

            let mut event = ValidationEvent::new("cisco_asa", ValidationEventType::SecurityFinding);
            event.error_code = format!("ASA-{level}-{msgnum}");
            event.severity = severity_for(level).to_string();
            event.category = "network".to_string();
            if let Some(src) = SRC_RE.captures(&message) {
                event.origin = format!("{}/{}", &src[1], &src[2]);
            }
            if let Some(dst) = DST_RE.captures(&message) {
                event.target = format!("{}/{}", &dst[1], &dst[2]);
            }
            let lower = message.to_ascii_lowercase();
            event.status = Some(if lower.starts_with("deny") {
                ValidationEventStatus::Fail
            } else if lower.starts_with("built") || lower.starts_with("teardown") {
                ValidationEventStatus::Pass
            } else {
                ValidationEventStatus::Info
            });
            event.message = message;
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("cisco_asa", ValidationEventType::Summary).with_message("no ASA syslog records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_deny_message() {
        let content = r#"%ASA-4-106023: Deny tcp src outside:192.168.1.5/54321 dst inside:10.0.0.1/443 by access-group "OUTSIDE_IN""#;
        let decoder = CiscoAsa;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[0].severity, "warning");
        assert_eq!(events[0].origin, "192.168.1.5/54321");
    }
}
