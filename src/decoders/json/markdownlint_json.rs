//! `markdownlint --json`: an array of
//! `{fileName, lineNumber, ruleNames, ruleDescription, errorDetail, errorContext}`.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct MarkdownlintJson;

impl Parser for MarkdownlintJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "markdownlint_json",
            display_name: "markdownlint JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Linter,
            groups: &[],
            aliases: &["markdownlint"],
            command_patterns: &["markdownlint --json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('[')
            && matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Array(items))
                if items.first().is_some_and(|f| f.get("ruleNames").is_some() && f.get("lineNumber").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Vec<Value> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        for item in &root {
            let rule_names: Vec<String> = item
                .get("ruleNames")
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default();
            let mut event = ValidationEvent::new("markdownlint", ValidationEventType::LintIssue);
            event.ref_file = item.get("fileName").and_then(Value::as_str).unwrap_or_default().to_string();
            event.ref_line = item.get("lineNumber").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
            event.error_code = rule_names.first().cloned().unwrap_or_default();
            event.message = item.get("ruleDescription").and_then(Value::as_str).unwrap_or_default().to_string();
            if let Some(detail) = item.get("errorDetail").and_then(Value::as_str) {
                event.message = format!("{} [{}]", event.message, detail);
            }
            event.status = Some(crate::event::ValidationEventStatus::Warning);
            event.severity = "warning".to_string();
            event.category = "lint".to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("markdownlint", ValidationEventType::Summary).with_message("markdownlint reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rule_names_and_line() {
        let json = r#"[{"fileName":"README.md","lineNumber":5,"ruleNames":["MD013","line-length"],"ruleDescription":"Line length","errorDetail":"Expected: 80; Actual: 120","errorContext":null}]"#;
        let decoder = MarkdownlintJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "MD013");
        assert_eq!(events[0].ref_line, 5);
    }
}
