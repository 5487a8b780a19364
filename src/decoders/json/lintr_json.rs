//! R's `lintr::lint()` exported as JSON: an array of
//! `{filename, line_number, column_number, type, message, linter}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct LintrJson;

impl Parser for LintrJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "lintr_json",
            display_name: "lintr JSON",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["lintr"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("linter").is_some() && f.get("line_number").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for item in &root {
            let kind = item.get("type").and_then(Value::as_str).unwrap_or("style");
            let mut event = ValidationEvent::new("lintr", ValidationEventType::LintIssue);
            event.ref_file = item.get("filename").and_then(Value::as_str).unwrap_or_default().to_string();
            event.ref_line = item.get("line_number").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.ref_column = item.get("column_number").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.error_code = item.get("linter").and_then(Value::as_str).unwrap_or_default().to_string();
            event.message = item.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
            event.status = Some(if kind == "error" { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
            event.severity = kind.to_string();
            event.category = "lint".to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("lintr", ValidationEventType::Summary).with_message("lintr reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_linter_name_as_code() {
        let json = r#"[{"filename":"analysis.R","line_number":9,"column_number":1,"type":"style","message":"Use camelCase","linter":"object_name_linter"}]"#;
        let decoder = LintrJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "object_name_linter");
    }
}
