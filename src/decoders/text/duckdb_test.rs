//! DuckDB's `sqllogictest`-derived test-runner console output:
//! `[PASS|FAIL|SKIP] test/sql/path.test` lines plus a trailing
//! `N tests, M failures` summary.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static RESULT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(PASS|FAIL|SKIP)\]\s+(\S+\.test)").unwrap());
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+) tests?, (\d+) failures?").unwrap());

pub struct DuckdbTest;

impl Parser for DuckdbTest {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "duckdb_test",
            display_name: "DuckDB sqllogictest",
            priority: Priority::HIGH,
            category: ParserCategory::TestFramework,
            groups: &["test"],
            aliases: &["duckdb"],
            command_patterns: &["test/unittest"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        RESULT_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = RESULT_RE.captures(line) {
                let status = match &caps[1] {
                    "PASS" => ValidationEventStatus::Pass,
                    "SKIP" => ValidationEventStatus::Skip,
                    _ => ValidationEventStatus::Fail,
                };
                let mut event = ValidationEvent::new("duckdb_test", ValidationEventType::TestResult);
                event.test_name = caps[2].to_string();
                event.status = Some(status);
                event.severity = if status == ValidationEventStatus::Fail { "error" } else { "info" }.to_string();
                event.category = "test_result".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = SUMMARY_RE.captures(line) {
                let failures: i64 = caps[2].parse().unwrap_or(0);
                let mut event = ValidationEvent::new("duckdb_test", ValidationEventType::Summary);
                event.message = line.to_string();
                event.category = "test_summary".to_string();
                event.status = Some(if failures > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if failures > 0 { "error" } else { "info" }.to_string();
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
    fn parses_pass_fail_lines() {
        let content = "\
[PASS] test/sql/join/inner.test
[FAIL] test/sql/join/outer.test
2 tests, 1 failures
";
        let decoder = DuckdbTest;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[2].event_type, ValidationEventType::Summary);
    }
}
