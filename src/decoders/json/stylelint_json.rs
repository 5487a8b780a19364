//! `stylelint --formatter json`: an array of
//! `{source, warnings:[{line, column, rule, severity, text}]}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct StylelintJson;

impl Parser for StylelintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "stylelint_json",
            display_name: "stylelint JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &["javascript"],
            aliases: &["stylelint"],
            command_patterns: &["stylelint --formatter json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("source").is_some() && f.get("warnings").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for file_result in &root {
            let source = file_result.get("source").and_then(Value::as_str).unwrap_or_default();
            let warnings = file_result.get("warnings").and_then(Value::as_array).cloned().unwrap_or_default();
            for w in &warnings {
                let severity = w.get("severity").and_then(Value::as_str).unwrap_or("warning");
                let mut event = ValidationEvent::new("stylelint", ValidationEventType::LintIssue);
                event.ref_file = source.to_string();
                event.ref_line = w.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
                event.ref_column = w.get("column").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
                event.error_code = w.get("rule").and_then(Value::as_str).unwrap_or_default().to_string();
                event.message = w.get("text").and_then(Value::as_str).unwrap_or_default().to_string();
                event.status = Some(if severity == "error" { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
                event.severity = severity.to_string();
                event.category = "lint".to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("stylelint", ValidationEventType::Summary).with_message("stylelint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_warnings_per_source() {
        let json = r#"[{"source":"style.css","warnings":[{"line":2,"column":3,"rule":"color-no-invalid-hex","severity":"error","text":"Unexpected invalid hex color"}]}]"#;
        let decoder = StylelintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].ref_file, "style.css");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
