//! pylint's default text format: `file:line:col: CODE: message (symbol)`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static DIAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:\s]+):(\d+):(\d+):\s*([CRWEF]\d{4}):\s*(.+?)(?:\s+\(([a-z-]+)\))?$").unwrap());

pub struct PylintText;

impl Parser for PylintText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "pylint_text",
            display_name: "pylint",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &["python"],
            aliases: &["pylint"],
            command_patterns: &["pylint"],
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
            let severity = match code.chars().next().unwrap_or('C') {
                'E' | 'F' => "error",
                'W' => "warning",
                _ => "info",
            };
            let mut event = ValidationEvent::new("pylint", ValidationEventType::LintIssue);
            event.ref_file = caps[1].to_string();
            event.ref_line = caps[2].parse().unwrap_or(-1);
            event.ref_column = caps[3].parse().unwrap_or(-1);
            event.error_code = code.to_string();
            event.message = caps[5].to_string();
            event.suggestion = caps.get(6).map(|m| m.as_str().to_string()).unwrap_or_default();
            event.status = Some(match severity {
                "error" => ValidationEventStatus::Error,
                "warning" => ValidationEventStatus::Warning,
                _ => ValidationEventStatus::Info,
            });
            event.severity = severity.to_string();
            event.category = "lint".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("pylint", ValidationEventType::Summary).with_message("pylint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_diagnostic_with_symbol() {
        let content = "app/models.py:10:0: C0114: Missing module docstring (missing-module-docstring)";
        let decoder = PylintText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].error_code, "C0114");
        assert_eq!(events[0].suggestion, "missing-module-docstring");
    }
}
