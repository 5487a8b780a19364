//! `shellcheck --format json`: a flat array of
//! `{file, line, endLine, column, endColumn, level, code, message}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct ShellcheckJson;

impl Parser for ShellcheckJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "shellcheck_json",
            display_name: "ShellCheck JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["shellcheck"],
            command_patterns: &["shellcheck --format json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("code").is_some() && f.get("level").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for item in &root {
            let level = item.get("level").and_then(Value::as_str).unwrap_or("info");
            let mut event = ValidationEvent::new("shellcheck", ValidationEventType::LintIssue);
            event.ref_file = item.get("file").and_then(Value::as_str).unwrap_or_default().to_string();
            event.ref_line = item.get("line").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.ref_column = item.get("column").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.error_code = item.get("code").and_then(Value::as_i64).map(|c| format!("SC{c}")).unwrap_or_default();
            event.message = item.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
            event.status = Some(match level {
                "error" => ValidationEventStatus::Error,
                "info" | "style" => ValidationEventStatus::Info,
                _ => ValidationEventStatus::Warning,
            });
            event.severity = level.to_string();
            event.category = "lint".to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("shellcheck", ValidationEventType::Summary).with_message("shellcheck reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_and_level() {
        let json = r#"[{"file":"deploy.sh","line":4,"column":1,"level":"warning","code":2086,"message":"Double quote to prevent globbing"}]"#;
        let decoder = ShellcheckJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "SC2086");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Warning));
    }
}
