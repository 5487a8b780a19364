//! flake8's default text format: `file:line:col: CODE message`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static DIAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:\s]+):(\d+):(\d+):\s*([EWF]\d{3})\s+(.+)$").unwrap());

pub struct Flake8Text;

impl Parser for Flake8Text {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "flake8_text",
            display_name: "flake8",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &["python"],
            aliases: &["flake8"],
            command_patterns: &["flake8"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        DIAG_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = DIAG_RE.captures(line) else { continue };
            let code = &caps[4];
            let severity = if code.starts_with('E') || code.starts_with('F') { "error" } else { "warning" };
            let mut event = ValidationEvent::new("flake8", ValidationEventType::LintIssue);
            event.ref_file = caps[1].to_string();
            event.ref_line = caps[2].parse().unwrap_or(-1);
            event.ref_column = caps[3].parse().unwrap_or(-1);
            event.error_code = code.to_string();
            event.message = caps[5].to_string();
            event.status = Some(if severity == "error" { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
            event.severity = severity.to_string();
            event.category = "lint".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("flake8", ValidationEventType::Summary).with_message("flake8 reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_diagnostic_code() {
        let content = "app.py:3:1: F401 'os' imported but unused";
        let decoder = Flake8Text;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].error_code, "F401");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
