//! `isort --check-only --diff` console output: `ERROR: file Imports are
//! incorrectly sorted and/or formatted.`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ERROR:\s+(\S+)\s+(.+)$").unwrap());

pub struct IsortText;

impl Parser for IsortText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "isort_text",
            display_name: "isort --check-only",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &["python"],
            aliases: &["isort"],
            command_patterns: &["isort --check-only"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        ERROR_RE.is_match(content) && content.contains("Imports are incorrectly sorted")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = ERROR_RE.captures(line) else { continue };
            let mut event = ValidationEvent::new("isort", ValidationEventType::LintIssue);
            event.ref_file = caps[1].to_string();
            event.message = caps[2].to_string();
            event.status = Some(ValidationEventStatus::Warning);
            event.severity = "warning".to_string();
            event.category = "formatting".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("isort", ValidationEventType::Summary).with_message("isort reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_line() {
        let content = "ERROR: app/models.py Imports are incorrectly sorted and/or formatted.";
        let decoder = IsortText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].ref_file, "app/models.py");
    }
}
