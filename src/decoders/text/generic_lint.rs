//! Fallback linter console format: `file:line:col: severity: message` with
//! no tool-specific banner. Lowest priority in the linter tier so any
//! tool-specific decoder claims its own output first.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static DIAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:\s]+):(\d+):(?:(\d+):)?\s*(error|warning|info|note):\s*(.+)$").unwrap());

pub struct GenericLint;

impl Parser for GenericLint {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "generic_lint",
            display_name: "Generic lint output",
            priority: Priority::LOW,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &[],
            command_patterns: &[],
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
            let level = &caps[4];
            let mut event = ValidationEvent::new("generic_lint", ValidationEventType::LintIssue);
            event.ref_file = caps[1].to_string();
            event.ref_line = caps[2].parse().unwrap_or(-1);
            event.ref_column = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(-1);
            event.message = caps[5].to_string();
            event.status = Some(match level {
                "error" => ValidationEventStatus::Error,
                "warning" => ValidationEventStatus::Warning,
                _ => ValidationEventStatus::Info,
            });
            event.severity = level.to_string();
            event.category = "lint".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("generic_lint", ValidationEventType::Summary).with_message("no lint diagnostics found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generic_diagnostic_line() {
        let content = "lib/widget.rb:42:3: warning: unused variable";
        let decoder = GenericLint;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].ref_line, 42);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Warning));
    }
}
