//! `yamllint -f parsable` piped through a JSON wrapper (this decoder reads
//! the `-f json`-shaped array of `{path, line, column, level, message, rule}`
//! some CI wrappers emit for yamllint).

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct YamllintJson;

impl Parser for YamllintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "yamllint_json",
            display_name: "yamllint JSON",
            priority: Priority::MEDIUM,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["yamllint"],
            command_patterns: &["yamllint -f json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("rule").is_some() && f.get("level").is_some() && f.get("path").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for item in &root {
            let level = item.get("level").and_then(Value::as_str).unwrap_or("warning");
            let mut event = ValidationEvent::new("yamllint", ValidationEventType::LintIssue);
            event.ref_file = item.get("path").and_then(Value::as_str).unwrap_or_default().to_string();
            event.ref_line = item.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.ref_column = item.get("column").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.error_code = item.get("rule").and_then(Value::as_str).unwrap_or_default().to_string();
            event.message = item.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
            event.status = Some(if level == "error" { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
            event.severity = level.to_string();
            event.category = "lint".to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("yamllint", ValidationEventType::Summary).with_message("yamllint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_rule() {
        let json = r#"[{"path":"ci.yml","line":3,"column":1,"level":"error","rule":"indentation","message":"wrong indentation"}]"#;
        let decoder = YamllintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "indentation");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
