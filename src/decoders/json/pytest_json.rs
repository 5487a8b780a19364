//! `pytest --json-report` output: one event per test, plus a summary.
//!
//! Reads the `tests[].{nodeid,outcome,call.duration,longrepr}` / `summary`
//! shape of the JSON report, the structured sibling of pytest's
//! captured-stdout text format.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct PytestJson;

impl Parser for PytestJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "pytest_json",
            display_name: "pytest --json-report",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::TestFramework,
            groups: &["python", "test"],
            aliases: &["pytest-json"],
            command_patterns: &["pytest --json-report"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        if !trimmed.starts_with('{') {
            return false;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(v) => v.get("tests").is_some() && (v.get("summary").is_some() || v.get("nodeid").is_some()),
            Err(_) => false,
        }
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        if let Some(tests) = root.get("tests").and_then(Value::as_array) {
            for test in tests {
                events.push(event_from_test(test));
            }
        }

        if let Some(summary) = root.get("summary") {
            events.push(summary_event(summary));
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("pytest", ValidationEventType::Summary).with_message("pytest json report contained no tests"));
        }

        events
    }
}

fn event_from_test(test: &Value) -> ValidationEvent {
    let nodeid = test.get("nodeid").and_then(Value::as_str).unwrap_or_default();
    let outcome = test.get("outcome").and_then(Value::as_str).unwrap_or("unknown");

    let status = match outcome {
        "passed" => ValidationEventStatus::Pass,
        "failed" => ValidationEventStatus::Fail,
        "skipped" => ValidationEventStatus::Skip,
        "error" => ValidationEventStatus::Error,
        _ => ValidationEventStatus::Info,
    };

    let duration = test
        .get("call")
        .and_then(|c| c.get("duration"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let message = test
        .get("call")
        .and_then(|c| c.get("longrepr"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let (file, line) = nodeid
        .split_once("::")
        .map(|(f, _)| (f.to_string(), -1))
        .unwrap_or((String::new(), -1));

    let mut event = ValidationEvent::new("pytest", ValidationEventType::TestResult);
    event.test_name = nodeid.to_string();
    event.ref_file = file;
    event.ref_line = line;
    event.status = Some(status);
    event.execution_time = duration;
    event.message = message;
    event.category = "test_result".to_string();
    event
}

fn summary_event(summary: &Value) -> ValidationEvent {
    let passed = summary.get("passed").and_then(Value::as_i64).unwrap_or(0);
    let failed = summary.get("failed").and_then(Value::as_i64).unwrap_or(0);
    let skipped = summary.get("skipped").and_then(Value::as_i64).unwrap_or(0);
    let total = summary.get("total").and_then(Value::as_i64).unwrap_or(passed + failed + skipped);

    let mut event = ValidationEvent::new("pytest", ValidationEventType::Summary);
    event.status = Some(if failed > 0 {
        ValidationEventStatus::Error
    } else {
        ValidationEventStatus::Info
    });
    event.message = format!("{passed} passed, {failed} failed, {skipped} skipped, {total} total");
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tests_and_summary() {
        let json = r#"{
            "tests": [
                {"nodeid": "test_a.py::test_ok", "outcome": "passed", "call": {"duration": 0.01}},
                {"nodeid": "test_a.py::test_bad", "outcome": "failed", "call": {"duration": 0.02, "longrepr": "AssertionError: boom"}}
            ],
            "summary": {"passed": 1, "failed": 1, "skipped": 0, "total": 2}
        }"#;
        let decoder = PytestJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[1].message, "AssertionError: boom");
        assert_eq!(events[2].event_type, ValidationEventType::Summary);
    }
}
