//! `autopep8 --diff` unified-diff output: only the `--- original/file`
//! header lines are recognized, one event per file that would change.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^--- original/(\S+)\s*$").unwrap());

pub struct Autopep8Text;

impl Parser for Autopep8Text {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "autopep8_text",
            display_name: "autopep8 --diff",
            priority: Priority::LOW,
            category: ParserCategory::Linter,
            groups: &["python"],
            aliases: &["autopep8"],
            command_patterns: &["autopep8 --diff"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        HEADER_RE.is_match(content) && content.contains("+++ fixed/")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = HEADER_RE.captures(line) else { continue };
            let mut event = ValidationEvent::new("autopep8", ValidationEventType::LintIssue);
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
            events.push(ValidationEvent::new("autopep8", ValidationEventType::Summary).with_message("autopep8 reported no diffs"));
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
--- original/app.py
+++ fixed/app.py
@@ -1,1 +1,1 @@
-x=1
+x = 1
";
        let decoder = Autopep8Text;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].ref_file, "app.py");
    }
}
