//! `go test -json`: one JSON object per action per line (JSONL-shaped, but
//! catalogued alongside the other structured Go/test formats). Only
//! `pass`/`fail`/`skip` actions become events; `run`/`output`/`pause`/`cont`
//! lines are accumulation noise the decoder discards. A record with no
//! `Test` field is a package-level result and becomes a summary.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct GotestJson;

impl Parser for GotestJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "gotest_json",
            display_name: "go test -json",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::TestFramework,
            groups: &["go", "test"],
            aliases: &[],
            command_patterns: &["go test -json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().filter(|l| !l.trim().is_empty()).take(20).any(|line| {
            serde_json::from_str::<Value>(line.trim())
                .ok()
                .and_then(|v| v.as_object().cloned())
                .is_some_and(|obj| obj.contains_key("Action") && obj.contains_key("Package"))
        })
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(line) else { continue };
            let Some(action) = obj.get("Action").and_then(Value::as_str) else { continue };
            if !matches!(action, "pass" | "fail" | "skip") {
                continue;
            }
            let package = obj.get("Package").and_then(Value::as_str).unwrap_or_default();
            let test = obj.get("Test").and_then(Value::as_str);
            let elapsed = obj.get("Elapsed").and_then(Value::as_f64).unwrap_or(0.0) * 1000.0;

            let mut event = ValidationEvent::new(
                "gotest",
                if test.is_some() { ValidationEventType::TestResult } else { ValidationEventType::Summary },
            );
            event.status = Some(match action {
                "pass" => ValidationEventStatus::Pass,
                "skip" => ValidationEventStatus::Skip,
                _ => ValidationEventStatus::Fail,
            });
            event.severity = if action == "fail" { "error" } else { "info" }.to_string();
            event.category = if test.is_some() { "test_result".to_string() } else { "test_summary".to_string() };
            event.execution_time = elapsed;
            event.scope = package.to_string();
            if let Some(t) = test {
                event.test_name = t.to_string();
                event.function_name = format!("{package}.{t}");
                event.message = format!("{t}: {action}");
            } else {
                event.message = format!("{package}: {action}");
            }
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("gotest", ValidationEventType::Summary)
                    .with_message("no go test -json pass/fail/skip records found"),
            );
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_test_and_package_results() {
        let content = "\
{\"Action\":\"run\",\"Package\":\"pkg\",\"Test\":\"TestFoo\"}
{\"Action\":\"pass\",\"Package\":\"pkg\",\"Test\":\"TestFoo\",\"Elapsed\":0.01}
{\"Action\":\"fail\",\"Package\":\"pkg\"}
";
        let decoder = GotestJson;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[0].test_name, "TestFoo");
        assert_eq!(events[1].event_type, ValidationEventType::Summary);
    }
}
