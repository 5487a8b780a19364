//! `go test -v` console output: `--- PASS:`/`--- FAIL:`/`--- SKIP:` result
//! lines plus a trailing `ok  	pkg	0.123s` or `FAIL	pkg	0.123s` package
//! summary line.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static RUN_BANNER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^=== RUN\s+(\S+)").unwrap());
static RESULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*--- (PASS|FAIL|SKIP): (\S+) \(([\d.]+)s\)").unwrap());
static PACKAGE_SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(ok|FAIL)\s+(\S+)\s+([\d.]+)s").unwrap());

pub struct GotestText;

impl Parser for GotestText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "gotest_text",
            display_name: "go test",
            priority: Priority::HIGH,
            category: ParserCategory::TestFramework,
            groups: &["go", "test"],
            aliases: &["gotest", "go"],
            command_patterns: &["go test"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| RUN_BANNER_RE.is_match(l))
            && content.lines().any(|l| RESULT_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = RESULT_RE.captures(line) {
                let status = match &caps[1] {
                    "PASS" => ValidationEventStatus::Pass,
                    "FAIL" => ValidationEventStatus::Fail,
                    _ => ValidationEventStatus::Skip,
                };
                let mut event = ValidationEvent::new("gotest", ValidationEventType::TestResult);
                event.test_name = caps[2].to_string();
                event.execution_time = caps[3].parse().unwrap_or(0.0);
                event.status = Some(status);
                event.severity = match status {
                    ValidationEventStatus::Fail => "error",
                    ValidationEventStatus::Skip => "warning",
                    _ => "info",
                }
                .to_string();
                event.category = "test_result".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = PACKAGE_SUMMARY_RE.captures(line) {
                let failed = &caps[1] == "FAIL";
                let mut event = ValidationEvent::new("gotest", ValidationEventType::Summary);
                event.ref_file = caps[2].to_string();
                event.execution_time = caps[3].parse().unwrap_or(0.0);
                event.category = "test_summary".to_string();
                event.message = format!("package {} {}", &caps[2], if failed { "failed" } else { "ok" });
                event.status = Some(if failed { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if failed { "error" } else { "info" }.to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("gotest", ValidationEventType::Summary).with_message("no go test result lines found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pass_and_fail_lines() {
        let content = "\
=== RUN   TestAdd
--- PASS: TestAdd (0.00s)
=== RUN   TestSub
--- FAIL: TestSub (0.01s)
FAIL	example.com/pkg	0.013s
";
        let decoder = GotestText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[1].test_name, "TestSub");
        assert_eq!(events[2].event_type, ValidationEventType::Summary);
        assert_eq!(events[2].status, Some(ValidationEventStatus::Error));
    }
}
