//! OpenBSD/macOS `pf` firewall log lines, e.g.
//! `Jan 15 10:30:45 host pf: rule 3/0(match): block in on en0:
//! 192.168.1.5.54321 > 10.0.0.1.443: UDP`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static PF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"pf:\s+rule\s+\S+\((\w+)\):\s+(block|pass)\s+(in|out)\s+on\s+(\S+):\s+(\S+)\.(\d+)\s+>\s+(\S+)\.(\d+):\s+(\S+)").unwrap()
});

pub struct PfFirewall;

impl Parser for PfFirewall {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "pf_firewall",
            display_name: "pf firewall log",
            priority: Priority::MEDIUM,
            category: ParserCategory::Network,
            groups: &[],
            aliases: &["pf"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| PF_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = PF_RE.captures(line) else { continue };
            let action = &caps[2];
            let mut event = ValidationEvent::new("pf", ValidationEventType::SecurityFinding);
            event.actor_type = caps[4].to_string();
            event.origin = format!("{}:{}", &caps[5], &caps[6]);
            event.target = format!("{}:{}", &caps[7], &caps[8]);
            event.category = "network".to_string();
            event.error_code = caps[9].to_string();
            event.status = Some(if action == "block" { ValidationEventStatus::Fail } else { ValidationEventStatus::Pass });
            event.severity = if action == "block" { "warning".to_string() } else { "info".to_string() };
            event.message = format!("{action} {} on {} ({})", &caps[3], &caps[4], &caps[1]);
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("pf", ValidationEventType::Summary).with_message("no pf firewall records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_blocked_udp() {
        let content = "Jan 15 10:30:45 host pf: rule 3/0(match): block in on en0: 192.168.1.5.54321 > 10.0.0.1.443: UDP";
        let decoder = PfFirewall;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[0].origin, "192.168.1.5:54321");
    }
}
