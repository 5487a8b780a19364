//! clang-tidy diagnostic lines: `path/to/file.cpp:10:5: warning: do not use
//! C-style casts [cppcoreguidelines-pro-type-cstyle-cast]`. The bracketed
//! check name becomes `error_code`, distinguishing this from
//! [`super::generic_lint`].

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static DIAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:\s]+):(\d+):(\d+):\s*(warning|error|note):\s*(.+?)(?:\s+\[([\w,.\-]+)\])?$").unwrap());

pub struct ClangTidyText;

impl Parser for ClangTidyText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "clang_tidy_text",
            display_name: "clang-tidy",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &["c_cpp"],
            aliases: &["clang_tidy"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| DIAG_RE.is_match(l) && l.contains('['))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = DIAG_RE.captures(line) else { continue };
            let level = &caps[4];
            let mut event = ValidationEvent::new("clang-tidy", ValidationEventType::LintIssue);
            event.ref_file = caps[1].to_string();
            event.ref_line = caps[2].parse().unwrap_or(-1);
            event.ref_column = caps[3].parse().unwrap_or(-1);
            event.message = caps[5].to_string();
            event.error_code = caps.get(6).map(|m| m.as_str().to_string()).unwrap_or_default();
            event.status = Some(if level == "warning" {
                ValidationEventStatus::Warning
            } else {
                ValidationEventStatus::Fail
            });
            event.severity = level.to_string();
            event.category = "lint".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("clang-tidy", ValidationEventType::Summary).with_message("no clang-tidy diagnostics found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_checked_diagnostic() {
        let content = "src/widget.cpp:10:5: warning: do not use C-style casts [cppcoreguidelines-pro-type-cstyle-cast]";
        let decoder = ClangTidyText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].ref_line, 10);
        assert_eq!(events[0].error_code, "cppcoreguidelines-pro-type-cstyle-cast");
    }
}
