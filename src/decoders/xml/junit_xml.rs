//! JUnit XML reports (`<testsuite><testcase/></testsuite>`), consumed via
//! the [`crate::context::ParseContext`] XML bridge rather than a dedicated
//! XML parse path.
//!
//! Testsuite attributes carry the summary; each testcase becomes one
//! event, with `function_name` set to `classname::name`.

use crate::context::ParseContext;
use crate::error::{ScanError, ScanResult};
use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct JunitXml;

impl Parser for JunitXml {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "junit_xml",
            display_name: "JUnit (XML)",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::TestFramework,
            groups: &["java", "test"],
            aliases: &["junit"],
            command_patterns: &[],
            requires_context: true,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("<testsuite")
    }

    fn parse(&self, _content: &str) -> Vec<ValidationEvent> {
        Vec::new()
    }

    fn parse_with_context(&self, ctx: &dyn ParseContext, content: &str) -> ScanResult<Vec<ValidationEvent>> {
        let suite = ctx.xml_to_json(content)?;
        if !suite.is_object() {
            return Err(ScanError::decoder("junit_xml", "parse_with_context", "malformed <testsuite> root"));
        }
        Ok(events_from_suite(&suite))
    }
}

fn events_from_suite(suite: &Value) -> Vec<ValidationEvent> {
    let suite_name = attr_str(suite, "name");
    let mut events = Vec::new();

    match suite.get("testcase") {
        Some(Value::Array(cases)) => {
            for case in cases {
                events.push(event_from_testcase(&suite_name, case));
            }
        }
        Some(case @ Value::Object(_)) => {
            events.push(event_from_testcase(&suite_name, case));
        }
        _ => {}
    }

    let tests: i64 = attr_str(suite, "tests").parse().unwrap_or(events.len() as i64);
    let failures: i64 = attr_str(suite, "failures").parse().unwrap_or(0);
    let errors: i64 = attr_str(suite, "errors").parse().unwrap_or(0);

    let mut summary = ValidationEvent::new("junit", ValidationEventType::Summary);
    summary.category = "test_summary".to_string();
    summary.message = format!("{tests} tests, {failures} failures, {errors} errors");
    summary.status = Some(if failures > 0 || errors > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
    summary.severity = if failures > 0 || errors > 0 { "error" } else { "info" }.to_string();
    events.push(summary);

    events
}

fn event_from_testcase(suite_name: &str, case: &Value) -> ValidationEvent {
    let name = attr_str(case, "name");
    let classname = attr_str(case, "classname");
    let time: f64 = attr_str(case, "time").parse().unwrap_or(0.0);

    let mut event = ValidationEvent::new("junit", ValidationEventType::TestResult);
    event.test_name = name.clone();
    event.function_name = if classname.is_empty() {
        format!("{suite_name}::{name}")
    } else {
        format!("{classname}::{name}")
    };
    event.execution_time = time;
    event.category = "test_result".to_string();

    if let Some(failure) = case.get("failure") {
        event.status = Some(ValidationEventStatus::Fail);
        event.severity = "error".to_string();
        event.message = attr_str(failure, "message");
        if event.message.is_empty() {
            event.message = failure.get("#text").and_then(Value::as_str).unwrap_or("test failed").to_string();
        }
    } else if let Some(error) = case.get("error") {
        event.status = Some(ValidationEventStatus::Error);
        event.severity = "error".to_string();
        event.message = attr_str(error, "message");
    } else if case.get("skipped").is_some() {
        event.status = Some(ValidationEventStatus::Skip);
        event.severity = "warning".to_string();
        event.message = "test skipped".to_string();
    } else {
        event.status = Some(ValidationEventStatus::Pass);
        event.severity = "info".to_string();
        event.message = "test passed".to_string();
    }

    event
}

fn attr_str(value: &Value, attr: &str) -> String {
    value
        .get(format!("@{attr}"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BasicXmlContext;

    #[test]
    fn parses_testsuite_with_mixed_results() {
        let xml = r#"
        <testsuite name="UserTests" tests="2" failures="1" errors="0">
            <testcase classname="UserTest" name="test_create" time="0.01"/>
            <testcase classname="UserTest" name="test_delete" time="0.02">
                <failure message="assertion failed">expected true</failure>
            </testcase>
        </testsuite>
        "#;
        let decoder = JunitXml;
        assert!(decoder.can_parse(xml));
        let ctx = BasicXmlContext;
        let events = decoder.parse_with_context(&ctx, xml).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].function_name, "UserTest::test_create");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[1].message, "assertion failed");
        assert_eq!(events[2].event_type, ValidationEventType::Summary);
    }
}
