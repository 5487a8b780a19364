//! Mocha/Chai "spec" reporter output: indented tick/cross (`✓`/`✗`/`1)`)
//! lines plus a trailing `N passing`/`N failing` summary.
//!
//! Disambiguated from [`super::rspec_text`] in [`crate::detect`]'s legacy
//! cascade by requiring both a tick/cross glyph AND a `passing`/`failing`
//! summary line — RSpec never emits either.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static PASS_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:✓|√)\s+(.+?)(?:\s+\((\d+)ms\))?$").unwrap());
static FAIL_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\)\s+(.+)$").unwrap());
static PASSING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+) passing(?:\s+\((\d+)ms\))?").unwrap());
static FAILING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+) failing").unwrap());

pub struct MochaChaiText;

impl Parser for MochaChaiText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "mocha_chai_text",
            display_name: "Mocha/Chai",
            priority: Priority::HIGH,
            category: ParserCategory::TestFramework,
            groups: &["javascript", "test"],
            aliases: &["mocha", "chai"],
            command_patterns: &["mocha"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        (content.contains('✓') || content.contains('√')) && (content.contains("passing") || content.contains("failing"))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = PASS_LINE_RE.captures(line) {
                let mut event = ValidationEvent::new("mocha", ValidationEventType::TestResult);
                event.test_name = caps[1].trim().to_string();
                event.execution_time = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok()).unwrap_or(0.0) / 1000.0;
                event.status = Some(ValidationEventStatus::Pass);
                event.severity = "info".to_string();
                event.category = "test_result".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = FAIL_LINE_RE.captures(line) {
                let mut event = ValidationEvent::new("mocha", ValidationEventType::TestResult);
                event.test_name = caps[1].trim().to_string();
                event.message = caps[1].trim().to_string();
                event.status = Some(ValidationEventStatus::Fail);
                event.severity = "error".to_string();
                event.category = "test_result".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = PASSING_RE.captures(line) {
                let passed: i64 = caps[1].parse().unwrap_or(0);
                let failed: i64 = FAILING_RE.captures(content).and_then(|c| c[1].parse().ok()).unwrap_or(0);
                let mut event = ValidationEvent::new("mocha", ValidationEventType::Summary);
                event.category = "test_summary".to_string();
                event.message = format!("{passed} passing, {failed} failing");
                event.status = Some(if failed > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if failed > 0 { "error" } else { "info" }.to_string();
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
    fn parses_ticks_crosses_and_summary() {
        let content = "\
  ✓ adds numbers (3ms)
  1) divides by zero

1 passing (12ms)
1 failing
";
        let decoder = MochaChaiText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[2].message, "1 passing, 1 failing");
    }
}
