//! GNU Make console output: compiler `file:line:col: error|warning: message`
//! lines plus `make: *** [target] Error N` failure banners.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static COMPILER_DIAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:\s]+):(\d+):(\d+):\s*(error|warning|fatal error):\s*(.+)$").unwrap());
static MAKE_FAILURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^make(?:\[\d+\])?:\s*\*\*\*\s*\[([^\]]+)\]\s*Error\s*(\d+)").unwrap());

pub struct MakeError;

impl Parser for MakeError {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "make_error",
            display_name: "Make",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["c_cpp", "ci"],
            aliases: &["make"],
            command_patterns: &["make"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        MAKE_FAILURE_RE.is_match(content) || COMPILER_DIAG_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = COMPILER_DIAG_RE.captures(line) {
                let is_error = caps[4].contains("error");
                let mut event = ValidationEvent::new("make", ValidationEventType::BuildError);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.ref_column = caps[3].parse().unwrap_or(-1);
                event.message = caps[5].to_string();
                event.status = Some(if is_error { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
                event.severity = if is_error { "error" } else { "warning" }.to_string();
                event.category = if is_error { "compilation_error" } else { "build_warning" }.to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = MAKE_FAILURE_RE.captures(line) {
                let mut event = ValidationEvent::new("make", ValidationEventType::BuildError);
                event.target = caps[1].to_string();
                event.error_code = caps[2].to_string();
                event.message = format!("target '{}' failed with exit code {}", &caps[1], &caps[2]);
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
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
    fn parses_compiler_diagnostic_and_make_failure() {
        let content = "\
src/main.c:20:9: error: 'x' undeclared
make: *** [all] Error 1
";
        let decoder = MakeError;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ref_line, 20);
        assert_eq!(events[0].category, "compilation_error");
        assert_eq!(events[1].target, "all");
    }
}
