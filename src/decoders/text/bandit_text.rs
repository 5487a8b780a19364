//! `bandit` default text reporter (the console twin of `bandit_json`):
//! `>> Issue: [B101:assert_used] message` blocks followed by
//! `   Severity: High   Confidence: High` and `   Location: file:line`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static ISSUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>> Issue: \[(\S+):(\S+)\]\s*(.+)$").unwrap());
static SEVERITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*Severity:\s*(\w+)\s*Confidence:\s*(\w+)").unwrap());
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*Location:\s*([^:]+):(\d+)").unwrap());

pub struct BanditText;

impl Parser for BanditText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "bandit_text",
            display_name: "bandit (text)",
            priority: Priority::MEDIUM,
            category: ParserCategory::Security,
            groups: &["python"],
            aliases: &[],
            command_patterns: &["bandit -r"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        ISSUE_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut current: Option<ValidationEvent> = None;

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = ISSUE_RE.captures(line) {
                if let Some(event) = current.take() {
                    events.push(event);
                }
                let mut event = ValidationEvent::new("bandit", ValidationEventType::SecurityFinding);
                event.error_code = caps[1].to_string();
                event.function_name = caps[2].to_string();
                event.message = caps[3].to_string();
                event.category = "security".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                current = Some(event);
            } else if let Some(caps) = SEVERITY_RE.captures(line) {
                if let Some(event) = current.as_mut() {
                    let severity = caps[1].to_ascii_lowercase();
                    event.status = Some(if severity == "high" { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
                    event.severity = severity;
                    event.log_line_end = line_num;
                }
            } else if let Some(caps) = LOCATION_RE.captures(line) {
                if let Some(event) = current.as_mut() {
                    event.ref_file = caps[1].to_string();
                    event.ref_line = caps[2].parse().unwrap_or(-1);
                    event.log_line_end = line_num;
                }
            }
        }
        if let Some(event) = current.take() {
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("bandit", ValidationEventType::Summary).with_message("bandit reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_issue_block() {
        let content = "\
>> Issue: [B102:exec_used] Use of exec detected.
   Severity: High   Confidence: High
   Location: app.py:14
";
        let decoder = BanditText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ref_file, "app.py");
        assert_eq!(events[0].ref_line, 14);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
