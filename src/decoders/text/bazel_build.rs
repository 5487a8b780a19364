//! Bazel build/test console output: a cascade of independent line
//! patterns (`PASSED:`, `FAILED:`, `ERROR:`, `WARNING:`, `Total: ...`).
//! Covers test results and build errors/warnings; the long tail of
//! loading/analysis/linking-specific diagnostics is left for later.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static TARGET_BANNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[a-zA-Z0-9_/.-]+:[a-zA-Z0-9_.-]+\s+\((PASSED|FAILED|TIMEOUT|SKIPPED|FLAKY)").unwrap());
static TEST_PASSED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PASSED: (//[^/\s]+(?:/[^/\s]+)*:[^/\s]+) \(([\d.]+)s\)").unwrap());
static TEST_FAILED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"FAILED: (//[^/\s]+(?:/[^/\s]+)*:[^/\s]+) \(([\d.]+)s\) \[(\d+)/(\d+) attempts\]").unwrap()
});
static BUILD_ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"ERROR: ([^:]+):(\d+):(\d+): (.+)").unwrap());
static WARNING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"WARNING: (.+)").unwrap());
static TEST_SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Total: (\d+) tests?, (\d+) passed, (\d+) failed(?:, (\d+) timeout)?(?:, (\d+) flaky)?(?:, (\d+) skipped)?").unwrap()
});

pub struct BazelBuild;

impl Parser for BazelBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "bazel_build",
            display_name: "Bazel",
            priority: Priority::HIGH,
            category: ParserCategory::BuildSystem,
            groups: &["ci"],
            aliases: &["bazel"],
            command_patterns: &["bazel build", "bazel test"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        TARGET_BANNER_RE.is_match(content)
            || TEST_PASSED_RE.is_match(content)
            || TEST_FAILED_RE.is_match(content)
            || content.contains("INFO: Elapsed time:")
            || BUILD_ERROR_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = TEST_PASSED_RE.captures(line) {
                events.push(test_result_event(&caps[1], caps[2].parse().unwrap_or(0.0), ValidationEventStatus::Pass, line, line_num));
            } else if let Some(caps) = TEST_FAILED_RE.captures(line) {
                events.push(test_result_event(&caps[1], caps[2].parse().unwrap_or(0.0), ValidationEventStatus::Fail, line, line_num));
            } else if let Some(caps) = BUILD_ERROR_RE.captures(line) {
                let mut event = ValidationEvent::new("bazel", ValidationEventType::BuildError);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.ref_column = caps[3].parse().unwrap_or(-1);
                event.message = caps[4].to_string();
                event.category = "build_error".to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = WARNING_RE.captures(line) {
                let mut event = ValidationEvent::new("bazel", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.category = "build_warning".to_string();
                event.status = Some(ValidationEventStatus::Warning);
                event.severity = "warning".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = TEST_SUMMARY_RE.captures(line) {
                events.push(summary_event(&caps, line, line_num));
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("bazel", ValidationEventType::Summary).with_message("no recognized bazel output lines"));
        }
        events
    }
}

fn test_result_event(target: &str, duration: f64, status: ValidationEventStatus, line: &str, line_num: i32) -> ValidationEvent {
    let mut event = ValidationEvent::new("bazel", ValidationEventType::TestResult);
    event.test_name = target.to_string();
    event.execution_time = duration;
    event.status = Some(status);
    event.severity = if status == ValidationEventStatus::Pass { "info" } else { "error" }.to_string();
    event.category = "test_result".to_string();
    event.log_line_start = line_num;
    event.log_line_end = line_num;
    event.log_content = line.to_string();
    event
}

fn summary_event(caps: &regex::Captures, line: &str, line_num: i32) -> ValidationEvent {
    let total: i64 = caps[1].parse().unwrap_or(0);
    let passed: i64 = caps[2].parse().unwrap_or(0);
    let failed: i64 = caps[3].parse().unwrap_or(0);

    let mut event = ValidationEvent::new("bazel", ValidationEventType::Summary);
    event.category = "test_summary".to_string();
    event.message = format!("{total} tests, {passed} passed, {failed} failed");
    event.status = Some(if failed > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
    event.severity = if failed > 0 { "error" } else { "info" }.to_string();
    event.log_line_start = line_num;
    event.log_line_end = line_num;
    event.log_content = line.to_string();
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_bazel_test_passed() {
        let decoder = BazelBuild;
        let content = "PASSED: //a/b:test (1.25s)";
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, ValidationEventType::TestResult);
        assert_eq!(events[0].test_name, "//a/b:test");
        assert_eq!(events[0].execution_time, 1.25);
        assert_eq!(events[0].tool_name, "bazel");
        assert_eq!(events[0].category, "test_result");
    }

    #[test]
    fn parses_build_error_location() {
        let decoder = BazelBuild;
        let content = "ERROR: /src/BUILD.bazel:12:5: Compiling foo.cc failed";
        let events = decoder.parse(content);
        assert_eq!(events[0].ref_file, "/src/BUILD.bazel");
        assert_eq!(events[0].ref_line, 12);
        assert_eq!(events[0].ref_column, 5);
    }
}
