//! `hadolint -f json`: an array of `{file, line, column, level, code, message}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct HadolintJson;

impl Parser for HadolintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "hadolint_json",
            display_name: "hadolint JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["hadolint"],
            command_patterns: &["hadolint -f json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("code").and_then(Value::as_str).is_some_and(|c| c.starts_with("DL")
                    || c.starts_with("SC"))))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for item in &root {
            let level = item.get("level").and_then(Value::as_str).unwrap_or("warning");
            let mut event = ValidationEvent::new("hadolint", ValidationEventType::LintIssue);
            event.ref_file = item.get("file").and_then(Value::as_str).unwrap_or_default().to_string();
            event.ref_line = item.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.ref_column = item.get("column").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.error_code = item.get("code").and_then(Value::as_str).unwrap_or_default().to_string();
            event.message = item.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
            event.status = Some(if level == "error" { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
            event.severity = level.to_string();
            event.category = "lint".to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("hadolint", ValidationEventType::Summary).with_message("hadolint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dockerfile_rule_code() {
        let json = r#"[{"file":"Dockerfile","line":3,"column":1,"level":"warning","code":"DL3008","message":"Pin versions in apt-get install"}]"#;
        let decoder = HadolintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "DL3008");
    }
}
