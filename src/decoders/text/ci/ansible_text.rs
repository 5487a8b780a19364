//! `ansible-playbook` console output: `TASK [name] ***` headers, per-host
//! `ok:`/`changed:`/`failed:`/`fatal:` result lines, and the closing
//! `PLAY RECAP` host-tally block.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static TASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^TASK \[(.+?)\]\s*\**$").unwrap());
static RESULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(ok|changed|failed|fatal|skipping|unreachable):\s*\[([^\]]+)\](?:\s*=>\s*(.*))?$").unwrap());
static RECAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s*:\s*ok=(\d+)\s+changed=(\d+)\s+unreachable=(\d+)\s+failed=(\d+)").unwrap()
});

pub struct AnsibleText;

impl Parser for AnsibleText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "ansible_text",
            display_name: "Ansible playbook run",
            priority: Priority::MEDIUM,
            category: ParserCategory::Ci,
            groups: &["ci"],
            aliases: &["ansible"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| TASK_RE.is_match(l)) && content.contains("PLAY RECAP")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut current_task = String::new();
        for (idx, line) in content.lines().enumerate() {
            if let Some(caps) = TASK_RE.captures(line) {
                current_task = caps[1].to_string();
                continue;
            }
            if let Some(caps) = RESULT_RE.captures(line) {
                let state = &caps[1];
                let host = caps[2].to_string();
                if state == "skipping" {
                    continue;
                }
                let mut event = ValidationEvent::new("ansible", ValidationEventType::TestResult);
                event.test_name = current_task.clone();
                event.unit = host.clone();
                event.message = caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_else(|| current_task.clone());
                event.status = Some(match state {
                    "ok" | "changed" => ValidationEventStatus::Pass,
                    "unreachable" => ValidationEventStatus::Error,
                    _ => ValidationEventStatus::Fail,
                });
                event.severity = match state {
                    "failed" | "fatal" => "error",
                    "unreachable" => "critical",
                    _ => "info",
                }
                .to_string();
                event.category = state.to_string();
                event.log_line_start = idx as i32 + 1;
                event.log_line_end = idx as i32 + 1;
                event.log_content = line.to_string();
                events.push(event);
                continue;
            }
            if let Some(caps) = RECAP_RE.captures(line) {
                let failed: i64 = caps[5].parse().unwrap_or(0);
                let unreachable: i64 = caps[4].parse().unwrap_or(0);
                let mut summary = ValidationEvent::new("ansible", ValidationEventType::Summary);
                summary.unit = caps[1].to_string();
                summary.message = line.trim().to_string();
                summary.status = Some(if failed > 0 || unreachable > 0 { ValidationEventStatus::Fail } else { ValidationEventStatus::Pass });
                summary.severity = if failed > 0 || unreachable > 0 { "error".to_string() } else { "info".to_string() };
                summary.log_line_start = idx as i32 + 1;
                summary.log_line_end = idx as i32 + 1;
                summary.log_content = line.to_string();
                events.push(summary);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("ansible", ValidationEventType::Summary).with_message("no ansible task results found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failed_task_and_recap() {
        let content = "TASK [Install nginx] ***********\nok: [host1]\nfailed: [host2] => {\"msg\": \"package not found\"}\n\nPLAY RECAP ***********\nhost1 : ok=2 changed=1 unreachable=0 failed=0\nhost2 : ok=1 changed=0 unreachable=0 failed=1\n";
        let decoder = AnsibleText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert!(events.iter().any(|e| e.event_type == ValidationEventType::Summary && e.unit == "host2" && e.status == Some(ValidationEventStatus::Fail)));
    }
}
