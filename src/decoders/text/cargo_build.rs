//! `cargo build`/`cargo check` human-readable diagnostics: the two-line
//! `error[E0000]: message` / `  --> file:line:col` pair rustc emits (the
//! text twin of `cargo_test_json`'s machine-readable stream, and distinct
//! from `clippy_json`'s `--message-format=json` path).

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static DIAG_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(error|warning)(?:\[(E\d+)\])?: (.+)$").unwrap());
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-->\s*([^:]+):(\d+):(\d+)").unwrap());

pub struct CargoBuild;

impl Parser for CargoBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "cargo_build",
            display_name: "cargo build",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["rust"],
            aliases: &["rustc"],
            command_patterns: &["cargo build", "cargo check"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        DIAG_HEADER_RE.is_match(content) && LOCATION_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut pending: Option<ValidationEvent> = None;

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = DIAG_HEADER_RE.captures(line) {
                if let Some(event) = pending.take() {
                    events.push(event);
                }
                let is_error = &caps[1] == "error";
                let mut event = ValidationEvent::new(
                    "rustc",
                    if is_error { ValidationEventType::BuildError } else { ValidationEventType::LintIssue },
                );
                event.error_code = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
                event.message = caps[3].to_string();
                event.status = Some(if is_error { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
                event.severity = if is_error { "error" } else { "warning" }.to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                pending = Some(event);
            } else if let Some(caps) = LOCATION_RE.captures(line) {
                if let Some(event) = pending.as_mut() {
                    event.ref_file = caps[1].to_string();
                    event.ref_line = caps[2].parse().unwrap_or(-1);
                    event.ref_column = caps[3].parse().unwrap_or(-1);
                    event.log_line_end = line_num;
                }
            }
        }
        if let Some(event) = pending.take() {
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("rustc", ValidationEventType::Summary).with_message("no cargo build diagnostics found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_with_code_and_location() {
        let content = "\
error[E0308]: mismatched types
 --> src/main.rs:4:13
";
        let decoder = CargoBuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].error_code, "E0308");
        assert_eq!(events[0].ref_file, "src/main.rs");
        assert_eq!(events[0].ref_line, 4);
    }
}
