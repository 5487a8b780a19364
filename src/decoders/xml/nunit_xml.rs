//! NUnit3 XML reports (`<test-run><test-suite><test-case result="Passed"/>`).
//! Walks the tree recursively since `test-suite` nests arbitrarily deep;
//! only leaf `test-case` elements become events.

use crate::context::ParseContext;
use crate::error::{ScanError, ScanResult};
use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct NunitXml;

impl Parser for NunitXml {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "nunit_xml",
            display_name: "NUnit (XML)",
            priority: Priority::VERY_HIGH,
            category: ParserCategory::TestFramework,
            groups: &["dotnet", "test"],
            aliases: &["nunit"],
            command_patterns: &[],
            requires_context: true,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("<test-run") || content.contains("<test-suite")
    }

    fn parse(&self, _content: &str) -> Vec<ValidationEvent> {
        Vec::new()
    }

    fn parse_with_context(&self, ctx: &dyn ParseContext, content: &str) -> ScanResult<Vec<ValidationEvent>> {
        let run = ctx.xml_to_json(content)?;
        if !run.is_object() {
            return Err(ScanError::decoder("nunit_xml", "parse_with_context", "malformed <test-run>/<test-suite> root"));
        }

        let mut events = Vec::new();
        walk(&run, &mut events);

        let passed = events.iter().filter(|e| e.status == Some(ValidationEventStatus::Pass)).count();
        let failed = events.iter().filter(|e| e.status == Some(ValidationEventStatus::Fail)).count();

        let mut summary = ValidationEvent::new("nunit", ValidationEventType::Summary);
        summary.category = "test_summary".to_string();
        summary.message = format!("{} tests, {passed} passed, {failed} failed", events.len());
        summary.status = Some(if failed > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
        summary.severity = if failed > 0 { "error" } else { "info" }.to_string();
        events.push(summary);

        Ok(events)
    }
}

fn walk(node: &Value, events: &mut Vec<ValidationEvent>) {
    match node.get("test-suite") {
        Some(Value::Array(suites)) => suites.iter().for_each(|s| walk(s, events)),
        Some(suite @ Value::Object(_)) => walk(suite, events),
        _ => {}
    }
    match node.get("test-case") {
        Some(Value::Array(cases)) => cases.iter().for_each(|c| events.push(event_from_case(c))),
        Some(case @ Value::Object(_)) => events.push(event_from_case(case)),
        _ => {}
    }
}

fn event_from_case(case: &Value) -> ValidationEvent {
    let name = attr_str(case, "name");
    let result = attr_str(case, "result");
    let duration: f64 = attr_str(case, "duration").parse().unwrap_or(0.0);

    let mut event = ValidationEvent::new("nunit", ValidationEventType::TestResult);
    event.test_name = name;
    event.execution_time = duration;
    event.category = "test_result".to_string();

    event.status = Some(match result.as_str() {
        "Passed" => ValidationEventStatus::Pass,
        "Failed" => ValidationEventStatus::Fail,
        "Skipped" | "Ignored" => ValidationEventStatus::Skip,
        _ => ValidationEventStatus::Error,
    });
    event.severity = match event.status {
        Some(ValidationEventStatus::Pass) => "info",
        Some(ValidationEventStatus::Skip) => "warning",
        _ => "error",
    }
    .to_string();

    if let Some(failure) = case.get("failure") {
        event.message = failure
            .get("message")
            .and_then(|m| m.get("#text"))
            .and_then(Value::as_str)
            .unwrap_or("test failed")
            .to_string();
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
    fn parses_nested_suites_and_cases() {
        let xml = r#"
        <test-run>
            <test-suite name="Outer">
                <test-case name="A" result="Passed" duration="0.01"/>
                <test-case name="B" result="Failed" duration="0.02">
                    <failure><message>boom</message></failure>
                </test-case>
            </test-suite>
        </test-run>
        "#;
        let decoder = NunitXml;
        assert!(decoder.can_parse(xml));
        let ctx = BasicXmlContext;
        let events = decoder.parse_with_context(&ctx, xml).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[1].message, "boom");
    }
}
