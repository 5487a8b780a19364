//! Linux netfilter/iptables kernel log lines, e.g.
//! `Jan 15 10:30:45 host kernel: [UFW BLOCK] IN=eth0 OUT= SRC=192.168.1.5
//! DST=10.0.0.1 PROTO=TCP SPT=54321 DPT=443`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static KV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(SRC|DST|PROTO|SPT|DPT|IN|OUT)=(\S*)").unwrap());
static BANNER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"kernel:.*\bIN=\S*.*\bOUT=\S*.*\bSRC=\d").unwrap());

pub struct Iptables;

impl Parser for Iptables {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "iptables",
            display_name: "iptables/netfilter",
            priority: Priority::MEDIUM,
            category: ParserCategory::Network,
            groups: &[],
            aliases: &["netfilter"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| BANNER_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if !BANNER_RE.is_match(line) {
                continue;
            }
            let mut fields = std::collections::HashMap::new();
            for caps in KV_RE.captures_iter(line) {
                fields.insert(caps[1].to_string(), caps[2].to_string());
            }

            let blocked = line.to_ascii_uppercase().contains("BLOCK") || line.to_ascii_uppercase().contains("DROP") || line.to_ascii_uppercase().contains("DENY");
            let mut event = ValidationEvent::new("iptables", ValidationEventType::SecurityFinding);
            event.origin = fields.get("SRC").cloned().unwrap_or_default();
            event.target = fields.get("DST").cloned().unwrap_or_default();
            event.category = "network".to_string();
            event.error_code = fields.get("PROTO").cloned().unwrap_or_default();
            event.status = Some(if blocked { ValidationEventStatus::Fail } else { ValidationEventStatus::Pass });
            event.severity = if blocked { "warning".to_string() } else { "info".to_string() };
            let spt = fields.get("SPT").cloned().unwrap_or_default();
            let dpt = fields.get("DPT").cloned().unwrap_or_default();
            event.message = format!(
                "{} {}:{} -> {}:{}",
                if blocked { "blocked" } else { "accepted" },
                event.origin,
                spt,
                event.target,
                dpt
            );
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("iptables", ValidationEventType::Summary).with_message("no netfilter records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_line() {
        let content = "Jan 15 10:30:45 host kernel: [UFW BLOCK] IN=eth0 OUT= SRC=192.168.1.5 DST=10.0.0.1 PROTO=TCP SPT=54321 DPT=443";
        let decoder = Iptables;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[0].origin, "192.168.1.5");
        assert_eq!(events[0].target, "10.0.0.1");
    }
}
