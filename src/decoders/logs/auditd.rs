//! Linux `auditd` records: `type=SYSCALL msg=audit(1684000000.123:456):
//! ... success=yes ... comm="bash" exe="/bin/bash" key="exec"`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^type=(\S+)\s+msg=audit\((\d+)\.(\d+):(\d+)\):").unwrap());
static KV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(\w+)=("([^"]*)"|\S+)"#).unwrap());

pub struct Auditd;

impl Parser for Auditd {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "auditd",
            display_name: "Linux auditd",
            priority: Priority::HIGH,
            category: ParserCategory::Security,
            groups: &[],
            aliases: &["audit_log"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| TYPE_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(header) = TYPE_RE.captures(line) else { continue };
            let record_type = header[1].to_string();
            let epoch: i64 = header[2].parse().unwrap_or(0);
            let millis: i64 = header[3].parse().unwrap_or(0);
            let serial = header[4].to_string();

            let mut fields = std::collections::HashMap::new();
            for caps in KV_RE.captures_iter(line) {
                let value = caps.get(3).map(|m| m.as_str()).unwrap_or(&caps[2]).to_string();
                fields.insert(caps[1].to_string(), value);
            }

            let mut event = ValidationEvent::new("auditd", ValidationEventType::SecurityFinding);
            event.category = record_type.to_ascii_lowercase();
            event.external_id = serial;
            event.started_at = chrono::DateTime::from_timestamp(epoch, (millis as u32) * 1_000_000)
                .map(|d| d.to_rfc3339())
                .unwrap_or_default();
            event.function_name = fields.get("comm").or_else(|| fields.get("exe")).cloned().unwrap_or_default();
            event.target = fields.get("exe").cloned().unwrap_or_default();
            event.category = fields.get("key").cloned().unwrap_or(event.category);
            let success = fields.get("success").map(String::as_str).unwrap_or("yes");
            event.status = Some(if success == "yes" { ValidationEventStatus::Pass } else { ValidationEventStatus::Fail });
            event.severity = if success == "yes" { "info".to_string() } else { "warning".to_string() };
            event.message = format!("{record_type}: {}", fields.get("comm").cloned().unwrap_or_default());
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("auditd", ValidationEventType::Summary).with_message("no auditd records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_syscall_record() {
        let content = r#"type=SYSCALL msg=audit(1684000000.123:456): arch=c000003e syscall=59 success=yes exit=0 comm="bash" exe="/bin/bash" key="exec""#;
        let decoder = Auditd;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[0].function_name, "bash");
        assert_eq!(events[0].category, "exec");
    }
}
