//! `sqlfluff lint --format json`: an array of
//! `{filepath, violations:[{line_no, line_pos, code, description}]}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct SqlfluffJson;

impl Parser for SqlfluffJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "sqlfluff_json",
            display_name: "sqlfluff JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["sqlfluff"],
            command_patterns: &["sqlfluff lint --format json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("violations").is_some() && f.get("filepath").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for file_result in &root {
            let filepath = file_result.get("filepath").and_then(Value::as_str).unwrap_or_default();
            let violations = file_result.get("violations").and_then(Value::as_array).cloned().unwrap_or_default();
            for v in &violations {
                let mut event = ValidationEvent::new("sqlfluff", ValidationEventType::LintIssue);
                event.ref_file = filepath.to_string();
                event.ref_line = v.get("line_no").and_then(Value::as_i64).map(|x| x as i32).unwrap_or(-1);
                event.ref_column = v.get("line_pos").and_then(Value::as_i64).map(|x| x as i32).unwrap_or(-1);
                event.error_code = v.get("code").and_then(Value::as_str).unwrap_or_default().to_string();
                event.message = v.get("description").and_then(Value::as_str).unwrap_or_default().to_string();
                event.status = Some(ValidationEventStatus::Warning);
                event.severity = "warning".to_string();
                event.category = "lint".to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("sqlfluff", ValidationEventType::Summary).with_message("sqlfluff reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_violations_per_file() {
        let json = r#"[{"filepath":"query.sql","violations":[{"line_no":2,"line_pos":1,"code":"L010","description":"Keywords should be consistently upper case"}]}]"#;
        let decoder = SqlfluffJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "L010");
    }
}
