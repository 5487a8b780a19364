//! GoogleTest console output: `[ RUN      ]`/`[       OK ]`/`[  FAILED  ]`
//! bracketed banners, duration in milliseconds.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static RESULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\s*(OK|FAILED)\s*\]\s+(\S+)\s+\((\d+)\s*ms\)").unwrap());

pub struct GtestText;

impl Parser for GtestText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "gtest_text",
            display_name: "GoogleTest",
            priority: Priority::HIGH,
            category: ParserCategory::TestFramework,
            groups: &["c_cpp", "test"],
            aliases: &["gtest"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("[ RUN      ]") && RESULT_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = RESULT_RE.captures(line) else { continue };
            let status = if &caps[1] == "OK" { ValidationEventStatus::Pass } else { ValidationEventStatus::Fail };

            let mut event = ValidationEvent::new("gtest", ValidationEventType::TestResult);
            event.test_name = caps[2].to_string();
            event.execution_time = caps[3].parse::<f64>().unwrap_or(0.0) / 1000.0;
            event.status = Some(status);
            event.severity = if status == ValidationEventStatus::Fail { "error" } else { "info" }.to_string();
            event.category = "test_result".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("gtest", ValidationEventType::Summary).with_message("no gtest result lines found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ok_and_failed_lines() {
        let content = "\
[ RUN      ] Suite.AddsNumbers
[       OK ] Suite.AddsNumbers (1 ms)
[ RUN      ] Suite.Divides
[  FAILED  ] Suite.Divides (2 ms)
";
        let decoder = GtestText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].test_name, "Suite.AddsNumbers");
        assert_eq!(events[0].execution_time, 0.001);
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
    }
}
