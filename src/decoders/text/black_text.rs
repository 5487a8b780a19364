//! `black --check --diff` console output: `would reformat file` lines plus
//! a trailing `N files would be reformatted` summary.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static REFORMAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^would reformat (\S+)$").unwrap());
static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+) files? would be reformatted(?:, (\d+) files? would be left unchanged)?").unwrap());

pub struct BlackText;

impl Parser for BlackText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "black_text",
            display_name: "black --check",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &["python"],
            aliases: &["black"],
            command_patterns: &["black --check"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        REFORMAT_RE.is_match(content) || SUMMARY_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = REFORMAT_RE.captures(line) {
                let mut event = ValidationEvent::new("black", ValidationEventType::LintIssue);
                event.ref_file = caps[1].to_string();
                event.message = "would reformat".to_string();
                event.status = Some(ValidationEventStatus::Warning);
                event.severity = "warning".to_string();
                event.category = "formatting".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = SUMMARY_RE.captures(line) {
                let reformatted: i64 = caps[1].parse().unwrap_or(0);
                let mut event = ValidationEvent::new("black", ValidationEventType::Summary);
                event.message = line.to_string();
                event.category = "formatting_summary".to_string();
                event.status = Some(if reformatted > 0 { ValidationEventStatus::Warning } else { ValidationEventStatus::Info });
                event.severity = if reformatted > 0 { "warning" } else { "info" }.to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reformat_lines_and_summary() {
        let content = "\
would reformat app/models.py
1 files would be reformatted, 3 files would be left unchanged.
";
        let decoder = BlackText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ref_file, "app/models.py");
        assert_eq!(events[1].event_type, ValidationEventType::Summary);
    }
}
