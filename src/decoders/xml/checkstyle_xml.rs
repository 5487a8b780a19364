//! Checkstyle XML reports (`<checkstyle><file name="..."><error .../>
//! </file></checkstyle>`), consumed via the
//! [`crate::context::ParseContext`] XML bridge.

use crate::context::ParseContext;
use crate::error::{ScanError, ScanResult};
use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct CheckstyleXml;

impl Parser for CheckstyleXml {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "checkstyle_xml",
            display_name: "Checkstyle (XML)",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &["java"],
            aliases: &["checkstyle"],
            command_patterns: &[],
            requires_context: true,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("<checkstyle")
    }

    fn parse(&self, _content: &str) -> Vec<ValidationEvent> {
        Vec::new()
    }

    fn parse_with_context(&self, ctx: &dyn ParseContext, content: &str) -> ScanResult<Vec<ValidationEvent>> {
        let root = ctx.xml_to_json(content)?;
        if !root.is_object() {
            return Err(ScanError::decoder("checkstyle_xml", "parse_with_context", "malformed <checkstyle> root"));
        }
        Ok(events_from_root(&root))
    }
}

fn events_from_root(root: &Value) -> Vec<ValidationEvent> {
    let mut events = Vec::new();
    let mut error_count = 0i64;

    match root.get("file") {
        Some(Value::Array(files)) => {
            for file in files {
                error_count += events_from_file(file, &mut events);
            }
        }
        Some(file @ Value::Object(_)) => {
            error_count += events_from_file(file, &mut events);
        }
        _ => {}
    }

    let mut summary = ValidationEvent::new("checkstyle", ValidationEventType::Summary);
    summary.category = "lint_summary".to_string();
    summary.message = format!("{error_count} checkstyle violations");
    summary.status = Some(if error_count > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
    summary.severity = if error_count > 0 { "error" } else { "info" }.to_string();
    events.push(summary);

    events
}

fn events_from_file(file: &Value, events: &mut Vec<ValidationEvent>) -> i64 {
    let file_name = attr_str(file, "name");
    let mut count = 0i64;

    match file.get("error") {
        Some(Value::Array(errors)) => {
            for error in errors {
                events.push(event_from_error(&file_name, error));
                count += 1;
            }
        }
        Some(error @ Value::Object(_)) => {
            events.push(event_from_error(&file_name, error));
            count += 1;
        }
        _ => {}
    }
    count
}

fn event_from_error(file_name: &str, error: &Value) -> ValidationEvent {
    let severity = attr_str(error, "severity");
    let line: i32 = attr_str(error, "line").parse().unwrap_or(-1);
    let column: i32 = attr_str(error, "column").parse().unwrap_or(-1);

    let mut event = ValidationEvent::new("checkstyle", ValidationEventType::LintIssue);
    event.ref_file = file_name.to_string();
    event.ref_line = line;
    event.ref_column = column;
    event.message = attr_str(error, "message");
    event.error_code = attr_str(error, "source");
    event.category = "lint".to_string();
    event.severity = if severity.is_empty() { "error".to_string() } else { severity.clone() };
    event.status = Some(match severity.as_str() {
        "info" => ValidationEventStatus::Info,
        "warning" => ValidationEventStatus::Warning,
        _ => ValidationEventStatus::Error,
    });
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
    fn parses_violations_across_files() {
        let xml = r#"
        <checkstyle version="8.0">
            <file name="src/Foo.java">
                <error line="10" column="5" severity="error" message="missing javadoc" source="com.puppycrawl.checks.javadoc.JavadocMethodCheck"/>
            </file>
            <file name="src/Bar.java">
                <error line="3" column="1" severity="warning" message="line too long"/>
            </file>
        </checkstyle>
        "#;
        let decoder = CheckstyleXml;
        assert!(decoder.can_parse(xml));
        let ctx = BasicXmlContext;
        let events = decoder.parse_with_context(&ctx, xml).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].ref_file, "src/Foo.java");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Warning));
        assert_eq!(events[2].event_type, ValidationEventType::Summary);
    }
}
