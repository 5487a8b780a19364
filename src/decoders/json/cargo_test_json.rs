//! `cargo test -- -Z unstable-options --format json`: newline-delimited
//! `{"type":"test", "event": "ok"|"failed"|"ignored", "name": ..., "exec_time": ...}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct CargoTestJson;

impl Parser for CargoTestJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "cargo_test_json",
            display_name: "cargo test JSON",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::TestFramework,
            groups: &["rust", "test"],
            aliases: &["cargo-test-json"],
            command_patterns: &["cargo test --format json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().filter(|l| !l.trim().is_empty()).any(|l| {
            serde_json::from_str::<Value>(l)
                .map(|v| v.get("type").and_then(Value::as_str) == Some("test"))
                .unwrap_or(false)
        })
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(record) = serde_json::from_str::<Value>(line) else { continue };
            match record.get("type").and_then(Value::as_str) {
                Some("test") => {
                    if let Some(event) = event_from_test(&record) {
                        events.push(event);
                    }
                }
                Some("suite") if record.get("event").and_then(Value::as_str) == Some("completed") => {
                    events.push(summary_event(&record));
                }
                _ => {}
            }
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("cargo-test", ValidationEventType::Summary)
                    .with_message("cargo test json stream contained no test events"),
            );
        }
        events
    }
}

fn event_from_test(record: &Value) -> Option<ValidationEvent> {
    let name = record.get("name").and_then(Value::as_str)?;
    let outcome = record.get("event").and_then(Value::as_str).unwrap_or("ok");
    let status = match outcome {
        "ok" => ValidationEventStatus::Pass,
        "failed" => ValidationEventStatus::Fail,
        "ignored" => ValidationEventStatus::Skip,
        _ => ValidationEventStatus::Info,
    };

    let mut event = ValidationEvent::new("cargo-test", ValidationEventType::TestResult);
    event.test_name = name.to_string();
    event.status = Some(status);
    event.execution_time = record.get("exec_time").and_then(Value::as_f64).unwrap_or(0.0);
    event.message = record.get("stdout").and_then(Value::as_str).unwrap_or_default().to_string();
    event.category = "test_result".to_string();
    Some(event)
}

fn summary_event(record: &Value) -> ValidationEvent {
    let passed = record.get("passed").and_then(Value::as_i64).unwrap_or(0);
    let failed = record.get("failed").and_then(Value::as_i64).unwrap_or(0);
    let ignored = record.get("ignored").and_then(Value::as_i64).unwrap_or(0);

    let mut event = ValidationEvent::new("cargo-test", ValidationEventType::Summary);
    event.status = Some(if failed > 0 {
        ValidationEventStatus::Error
    } else {
        ValidationEventStatus::Info
    });
    event.message = format!("{passed} passed; {failed} failed; {ignored} ignored");
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_test_and_suite_events() {
        let content = "\
            {\"type\":\"test\",\"event\":\"ok\",\"name\":\"tests::it_works\",\"exec_time\":0.001}\n\
            {\"type\":\"test\",\"event\":\"failed\",\"name\":\"tests::it_fails\",\"exec_time\":0.002}\n\
            {\"type\":\"suite\",\"event\":\"completed\",\"passed\":1,\"failed\":1,\"ignored\":0}\n";
        let decoder = CargoTestJson;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[2].event_type, ValidationEventType::Summary);
    }
}
