//! RSpec console output (default/documentation formatter): a trailing
//! `N examples, M failures` summary line, with per-failure `rspec ./spec.rb:12`
//! locator lines under a `Failures:` block.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) examples?, (\d+) failures?(?:, (\d+) pending)?").unwrap());
static LOCATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^rspec (\S+\.rb):(\d+)").unwrap());
static NUMBERED_FAILURE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\)\s+(.+)$").unwrap());

pub struct RspecText;

impl Parser for RspecText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "rspec_text",
            display_name: "RSpec",
            priority: Priority::HIGH,
            category: ParserCategory::TestFramework,
            groups: &["ruby", "test"],
            aliases: &["rspec"],
            command_patterns: &["rspec"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("examples") && content.contains("failures")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let lines: Vec<&str> = content.lines().collect();
        let mut current_description = String::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = NUMBERED_FAILURE_RE.captures(line) {
                current_description = caps[1].to_string();
                continue;
            }

            if let Some(caps) = LOCATOR_RE.captures(line) {
                let mut event = ValidationEvent::new("rspec", ValidationEventType::TestResult);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.test_name = current_description.clone();
                event.message = current_description.clone();
                event.status = Some(ValidationEventStatus::Fail);
                event.severity = "error".to_string();
                event.category = "test_result".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
                continue;
            }

            if let Some(caps) = SUMMARY_RE.captures(line) {
                let total: i64 = caps[1].parse().unwrap_or(0);
                let failed: i64 = caps[2].parse().unwrap_or(0);
                let mut event = ValidationEvent::new("rspec", ValidationEventType::Summary);
                event.category = "test_summary".to_string();
                event.message = format!("{total} examples, {failed} failures");
                event.status = Some(if failed > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if failed > 0 { "error" } else { "info" }.to_string();
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
    fn parses_failure_locators_and_summary() {
        let content = "\
Failures:

  1) User#valid? returns false for an empty name
     Failure/Error: expect(user.valid?).to be false
     rspec ./spec/user_spec.rb:42

3 examples, 1 failures
";
        let decoder = RspecText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ref_file, "./spec/user_spec.rb");
        assert_eq!(events[0].ref_line, 42);
        assert_eq!(events[1].event_type, ValidationEventType::Summary);
        assert_eq!(events[1].message, "3 examples, 1 failures");
    }
}
