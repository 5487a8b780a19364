//! `yapf --diff` unified-diff output, recognized the same way as
//! `autopep8_text` but keyed on yapf's own `+++ after-formatting/` marker
//! to avoid double-claiming autopep8's diffs.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^--- (\S+)\s+\(original\)\s*$").unwrap());

pub struct YapfText;

impl Parser for YapfText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "yapf_text",
            display_name: "yapf --diff",
            priority: Priority::LOW,
            category: ParserCategory::Linter,
            groups: &["python"],
            aliases: &["yapf"],
            command_patterns: &["yapf --diff"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        HEADER_RE.is_match(content) && content.contains("(reformatted)")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = HEADER_RE.captures(line) else { continue };
            let mut event = ValidationEvent::new("yapf", ValidationEventType::LintIssue);
            event.ref_file = caps[1].to_string();
            event.message = "would reformat".to_string();
            event.status = Some(ValidationEventStatus::Warning);
            event.severity = "warning".to_string();
            event.category = "formatting".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("yapf", ValidationEventType::Summary).with_message("yapf reported no diffs"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_diff_header() {
        let content = "\
--- app.py\t(original)
+++ app.py\t(reformatted)
@@ -1,1 +1,1 @@
-x=1
+x = 1
";
        let decoder = YapfText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].ref_file, "app.py");
    }
}
