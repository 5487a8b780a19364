//! Plain-text JUnit console runner output (e.g. `mvn test`'s own summary
//! lines, distinct from the structured [`crate::decoders::xml::junit_xml`]
//! report): `Tests run: 5, Failures: 1, Errors: 0, Skipped: 0`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Tests run: (\d+), Failures: (\d+), Errors: (\d+), Skipped: (\d+)").unwrap()
});
static FAILED_TEST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:FAILED|ERROR)\s+(\S+)").unwrap());

pub struct JunitText;

impl Parser for JunitText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "junit_text",
            display_name: "JUnit (text)",
            priority: Priority::MEDIUM,
            category: ParserCategory::TestFramework,
            groups: &["java", "test"],
            aliases: &[],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        SUMMARY_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = FAILED_TEST_RE.captures(line) {
                let mut event = ValidationEvent::new("junit", ValidationEventType::TestResult);
                event.test_name = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Fail);
                event.severity = "error".to_string();
                event.category = "test_result".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = SUMMARY_RE.captures(line) {
                let run: i64 = caps[1].parse().unwrap_or(0);
                let failures: i64 = caps[2].parse().unwrap_or(0);
                let errors: i64 = caps[3].parse().unwrap_or(0);
                let skipped: i64 = caps[4].parse().unwrap_or(0);
                let mut event = ValidationEvent::new("junit", ValidationEventType::Summary);
                event.category = "test_summary".to_string();
                event.message = format!("Tests run: {run}, Failures: {failures}, Errors: {errors}, Skipped: {skipped}");
                event.status = Some(if failures > 0 || errors > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if failures > 0 || errors > 0 { "error" } else { "info" }.to_string();
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
    fn parses_summary_line() {
        let content = "Tests run: 5, Failures: 1, Errors: 0, Skipped: 0";
        let decoder = JunitText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
