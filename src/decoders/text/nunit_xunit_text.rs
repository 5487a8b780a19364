//! xUnit.net / NUnit console-runner text output (the non-XML text twin of
//! `nunit_xml`): `  Passed: Namespace.Class.Method [12 ms]` and
//! `  Failed: Namespace.Class.Method [3 ms]` lines plus an
//! `Error Message:` detail line for failures.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static RESULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(Passed|Failed|Skipped):\s+(\S+)\s+\[(\d+)\s*ms\]").unwrap());
static ERROR_MESSAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*Error Message:\s*$").unwrap());

pub struct NunitXunitText;

impl Parser for NunitXunitText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "nunit_xunit_text",
            display_name: "NUnit/xUnit console",
            priority: Priority::MEDIUM,
            category: ParserCategory::TestFramework,
            groups: &["dotnet", "test"],
            aliases: &["xunit"],
            command_patterns: &["dotnet test"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        RESULT_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let lines: Vec<&str> = content.lines().collect();

        for (idx, line) in lines.iter().enumerate() {
            let Some(caps) = RESULT_RE.captures(line) else { continue };
            let status = match &caps[1] {
                "Passed" => ValidationEventStatus::Pass,
                "Skipped" => ValidationEventStatus::Skip,
                _ => ValidationEventStatus::Fail,
            };
            let mut event = ValidationEvent::new("xunit", ValidationEventType::TestResult);
            event.test_name = caps[2].to_string();
            event.function_name = caps[2].to_string();
            event.execution_time = caps[3].parse().unwrap_or(0.0);
            event.status = Some(status);
            event.severity = if status == ValidationEventStatus::Fail { "error" } else { "info" }.to_string();
            event.category = "test_result".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;

            if status == ValidationEventStatus::Fail {
                if let Some(next) = lines.get(idx + 1) {
                    if ERROR_MESSAGE_RE.is_match(next) {
                        if let Some(detail) = lines.get(idx + 2) {
                            event.message = detail.trim().to_string();
                            event.log_line_end = idx as i32 + 3;
                        }
                    }
                }
            }
            events.push(event);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failed_test_with_error_message() {
        let content = "\
  Passed: MyApp.Tests.CalculatorTests.Add [12 ms]
  Failed: MyApp.Tests.CalculatorTests.Divide [3 ms]
  Error Message:
   Expected: 2
   Actual:   3
";
        let decoder = NunitXunitText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[1].message, "Expected: 2");
    }
}
