//! pytest captured-stdout text output: two-pass recognition.
//!
//! Pass one scans the `FAILURES` section to build a `test_name → (file,
//! line, message)` map; pass two walks every `::`-bearing result line and
//! enriches failed/error tests from that map. This is deliberately not a
//! single streaming pass: the location a result line wants appears later
//! in the file, inside the FAILURES block.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_+\s+(\S+)\s+_+$").unwrap());
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+\.py):(\d+)(?::\d+)?:\s*(.+)$").unwrap());
static ERROR_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^E\s+(.+)$").unwrap());
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)=+\s*(\d+)\s+passed(?:,\s*(\d+)\s+failed)?(?:,\s*(\d+)\s+skipped)?.*?in\s+([\d.]+)s?\s*=+").unwrap()
});

#[derive(Default, Clone)]
struct FailureInfo {
    file: String,
    line: i32,
    message: String,
}

pub struct PytestText;

impl Parser for PytestText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "pytest_text",
            display_name: "pytest (text)",
            priority: Priority::HIGH,
            category: ParserCategory::TestFramework,
            groups: &["python", "test"],
            aliases: &["pytest"],
            command_patterns: &["pytest"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("::") && (content.contains("PASSED") || content.contains("FAILED") || content.contains("SKIPPED"))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let failure_info = extract_failure_info(content);
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = SUMMARY_RE.captures(line) {
                events.push(summary_event(&caps, line, line_num));
                continue;
            }

            if line.contains("::") {
                if let Some(event) = parse_test_line(line, line_num, &failure_info) {
                    events.push(event);
                }
            }
        }

        events
    }
}

fn extract_failure_info(content: &str) -> HashMap<String, FailureInfo> {
    let mut failures = HashMap::new();
    let mut in_failures_section = false;
    let mut current_test = String::new();
    let mut current_message = String::new();

    for line in content.lines() {
        if line.contains("= FAILURES =") || line.contains("=FAILURES=") || (line.contains("FAILURES") && line.contains("===")) {
            in_failures_section = true;
            continue;
        }
        if in_failures_section
            && (line.contains("short test summary") || (line.contains("passed") && line.contains("===")))
        {
            in_failures_section = false;
            continue;
        }
        if !in_failures_section {
            continue;
        }

        if let Some(caps) = HEADER_RE.captures(line) {
            current_test = caps[1].to_string();
            current_message.clear();
            continue;
        }

        if let Some(caps) = ERROR_LINE_RE.captures(line) {
            if current_message.is_empty() {
                current_message = caps[1].to_string();
            }
            continue;
        }

        if !current_test.is_empty() {
            if let Some(caps) = LOCATION_RE.captures(line) {
                // Prefer an explicit "E   <message>" line; when absent, the
                // location line's own trailing text is the only detail
                // available (pytest sometimes inlines it there directly).
                let message = if current_message.is_empty() {
                    caps[3].to_string()
                } else {
                    current_message.clone()
                };
                failures.insert(
                    current_test.clone(),
                    FailureInfo {
                        file: caps[1].to_string(),
                        line: caps[2].parse().unwrap_or(-1),
                        message,
                    },
                );
            }
        }
    }

    failures
}

fn summary_event(caps: &regex::Captures, line: &str, line_num: i32) -> ValidationEvent {
    let passed: i64 = caps[1].parse().unwrap_or(0);
    let failed: i64 = caps.get(2).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0);
    let skipped: i64 = caps.get(3).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0);
    let duration = &caps[4];

    let mut message = format!("{passed} passed");
    if failed > 0 {
        message.push_str(&format!(", {failed} failed"));
    }
    if skipped > 0 {
        message.push_str(&format!(", {skipped} skipped"));
    }
    message.push_str(&format!(" in {duration}s"));

    let mut event = ValidationEvent::new("pytest", ValidationEventType::Summary);
    event.category = "test_summary".to_string();
    event.log_line_start = line_num;
    event.log_line_end = line_num;
    event.log_content = line.to_string();
    event.message = message;
    event.status = Some(if failed > 0 {
        ValidationEventStatus::Error
    } else {
        ValidationEventStatus::Info
    });
    event.severity = if failed > 0 { "error" } else { "info" }.to_string();
    event.structured_data = format!(
        "{{\"passed\":{passed},\"failed\":{failed},\"skipped\":{skipped},\"duration\":{duration}}}"
    );
    event
}

fn parse_test_line(line: &str, line_num: i32, failure_info: &HashMap<String, FailureInfo>) -> Option<ValidationEvent> {
    let separator = line.find("::")?;

    let mut event = ValidationEvent::new("pytest", ValidationEventType::TestResult);
    event.category = "test".to_string();
    event.log_line_start = line_num;
    event.log_line_end = line_num;
    event.log_content = line.to_string();
    event.structured_data = "pytest_text".to_string();

    let status_at_start = ["FAILED ", "PASSED ", "SKIPPED ", "ERROR "]
        .iter()
        .any(|prefix| line.starts_with(prefix));

    if status_at_start {
        if line.starts_with("FAILED ") {
            event.status = Some(ValidationEventStatus::Fail);
            event.severity = "error".to_string();
        } else if line.starts_with("PASSED ") {
            event.status = Some(ValidationEventStatus::Pass);
            event.severity = "info".to_string();
        } else if line.starts_with("SKIPPED ") {
            event.status = Some(ValidationEventStatus::Skip);
            event.severity = "warning".to_string();
        } else {
            event.status = Some(ValidationEventStatus::Error);
            event.severity = "error".to_string();
        }

        let file_start = line.find(' ')? + 1;
        event.ref_file = line[file_start..separator].to_string();

        let rest = &line[separator + 2..];
        if let Some(dash_pos) = rest.find(" - ") {
            event.test_name = rest[..dash_pos].to_string();
            event.message = rest[dash_pos + 3..].to_string();
        } else {
            event.test_name = rest.to_string();
            event.message = format!(
                "Test {}",
                match event.status {
                    Some(ValidationEventStatus::Fail) => "failed",
                    Some(ValidationEventStatus::Pass) => "passed",
                    Some(ValidationEventStatus::Skip) => "skipped",
                    _ => "error",
                }
            );
        }
    } else {
        event.ref_file = line[..separator].to_string();
        let rest = &line[separator + 2..];

        if let Some(pos) = rest.find(" PASSED") {
            event.status = Some(ValidationEventStatus::Pass);
            event.severity = "info".to_string();
            event.message = "Test passed".to_string();
            event.test_name = rest[..pos].to_string();
        } else if let Some(pos) = rest.find(" FAILED") {
            event.status = Some(ValidationEventStatus::Fail);
            event.severity = "error".to_string();
            event.message = "Test failed".to_string();
            event.test_name = rest[..pos].to_string();
        } else if let Some(pos) = rest.find(" ERROR") {
            event.status = Some(ValidationEventStatus::Error);
            event.severity = "error".to_string();
            event.message = "Test error".to_string();
            event.test_name = rest[..pos].to_string();
        } else if let Some(pos) = rest.find(" SKIPPED") {
            event.status = Some(ValidationEventStatus::Skip);
            event.severity = "warning".to_string();
            event.message = "Test skipped".to_string();
            event.test_name = rest[..pos].to_string();
        } else {
            return None;
        }
    }

    if matches!(event.status, Some(ValidationEventStatus::Fail) | Some(ValidationEventStatus::Error)) {
        if let Some(info) = failure_info.get(&event.test_name) {
            event.ref_line = info.line;
            if !info.file.is_empty() {
                event.ref_file = info.file.clone();
            }
            if !info.message.is_empty() && event.message == "Test failed" {
                event.message = info.message.clone();
            }
        }
    }

    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_one_failure() {
        let content = "\
test_a.py::test_ok PASSED
test_a.py::test_bad FAILED
============= FAILURES =============
___ test_bad ___
test_a.py:7: AssertionError: expected 1 got 2
============= 1 passed, 1 failed in 0.12s =============
";
        let decoder = PytestText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[0].ref_file, "test_a.py");

        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[1].ref_file, "test_a.py");
        assert_eq!(events[1].ref_line, 7);
        assert_eq!(events[1].message, "AssertionError: expected 1 got 2");

        assert_eq!(events[2].event_type, ValidationEventType::Summary);
        assert_eq!(events[2].status, Some(ValidationEventStatus::Error));
        assert_eq!(events[2].message, "1 passed, 1 failed in 0.12s");
    }
}
