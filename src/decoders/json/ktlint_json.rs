//! `ktlint --reporter=json`: an array of `{file, errors:[{line, column,
//! message, rule}]}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct KtlintJson;

impl Parser for KtlintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "ktlint_json",
            display_name: "ktlint JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["ktlint"],
            command_patterns: &["ktlint --reporter=json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("errors").is_some() && f.get("file").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for file_result in &root {
            let file = file_result.get("file").and_then(Value::as_str).unwrap_or_default();
            let errors = file_result.get("errors").and_then(Value::as_array).cloned().unwrap_or_default();
            for err in &errors {
                let mut event = ValidationEvent::new("ktlint", ValidationEventType::LintIssue);
                event.ref_file = file.to_string();
                event.ref_line = err.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
                event.ref_column = err.get("column").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
                event.error_code = err.get("rule").and_then(Value::as_str).unwrap_or_default().to_string();
                event.message = err.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
                event.status = Some(ValidationEventStatus::Warning);
                event.severity = "warning".to_string();
                event.category = "lint".to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("ktlint", ValidationEventType::Summary).with_message("ktlint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_errors_per_file() {
        let json = r#"[{"file":"Main.kt","errors":[{"line":3,"column":1,"message":"Unused import","rule":"no-unused-imports"}]}]"#;
        let decoder = KtlintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "no-unused-imports");
    }
}
