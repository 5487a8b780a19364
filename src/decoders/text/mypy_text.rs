//! mypy console output: `file.py:12: error: message  [error-code]` plus a
//! trailing `Found N errors in M files` summary.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static DIAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+\.py):(\d+)(?::(\d+))?:\s*(error|warning|note):\s*(.+?)(?:\s+\[([a-z-]+)\])?$").unwrap()
});
static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Found (\d+) errors? in (\d+) files?").unwrap());

pub struct MypyText;

impl Parser for MypyText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "mypy_text",
            display_name: "mypy",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &["python"],
            aliases: &["mypy"],
            command_patterns: &["mypy"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        DIAG_RE.is_match(content) || SUMMARY_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = DIAG_RE.captures(line) {
                let level = &caps[4];
                let mut event = ValidationEvent::new("mypy", ValidationEventType::TypeError);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.ref_column = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(-1);
                event.message = caps[5].to_string();
                event.error_code = caps.get(6).map(|m| m.as_str().to_string()).unwrap_or_default();
                event.status = Some(match level {
                    "error" => ValidationEventStatus::Error,
                    "warning" => ValidationEventStatus::Warning,
                    _ => ValidationEventStatus::Info,
                });
                event.severity = level.to_string();
                event.category = "type_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = SUMMARY_RE.captures(line) {
                let errors: i64 = caps[1].parse().unwrap_or(0);
                let files: i64 = caps[2].parse().unwrap_or(0);
                let mut event = ValidationEvent::new("mypy", ValidationEventType::Summary);
                event.category = "test_summary".to_string();
                event.message = format!("Found {errors} errors in {files} files");
                event.status = Some(if errors > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if errors > 0 { "error" } else { "info" }.to_string();
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
    fn parses_diagnostic_with_code_and_summary() {
        let content = "\
app/models.py:42: error: Incompatible return value type  [return-value]
Found 1 errors in 1 files
";
        let decoder = MypyText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ref_line, 42);
        assert_eq!(events[0].error_code, "return-value");
        assert_eq!(events[1].message, "Found 1 errors in 1 files");
    }
}
