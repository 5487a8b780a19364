//! `bandit -f json`: `{"results":[{"filename","line_number","issue_severity",
//! "issue_confidence","issue_text","test_id","test_name"}]}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct BanditJson;

impl Parser for BanditJson {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "bandit_json",
            display_name: "Bandit JSON",
            priority: Priority::HIGH,
            category: ParserCategory::Security,
            groups: &["python"],
            aliases: &["bandit"],
            command_patterns: &["bandit -f json"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        trimmed.starts_with('{')
            && serde_json::from_str::<Value>(trimmed)
                .map(|v| v.get("results").is_some() && v.get("errors").is_some())
                .unwrap_or(false)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let root: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut events = Vec::new();
        if let Some(results) = root.get("results").and_then(Value::as_array) {
            for item in results {
                let severity = item.get("issue_severity").and_then(Value::as_str).unwrap_or("MEDIUM");
                let mut event = ValidationEvent::new("bandit", ValidationEventType::SecurityFinding);
                event.ref_file = item.get("filename").and_then(Value::as_str).unwrap_or_default().to_string();
                event.ref_line = item.get("line_number").and_then(Value::as_i64).map(|v| v as i32).unwrap_or(-1);
                event.error_code = item.get("test_id").and_then(Value::as_str).unwrap_or_default().to_string();
                event.function_name = item.get("test_name").and_then(Value::as_str).unwrap_or_default().to_string();
                event.message = item.get("issue_text").and_then(Value::as_str).unwrap_or_default().to_string();
                event.status = Some(if severity.eq_ignore_ascii_case("HIGH") {
                    ValidationEventStatus::Error
                } else {
                    ValidationEventStatus::Warning
                });
                event.severity = severity.to_ascii_lowercase();
                event.category = "security".to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("bandit", ValidationEventType::Summary).with_message("bandit reported no issues"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_array() {
        let json = r#"{"errors":[],"results":[{"filename":"app.py","line_number":14,"issue_severity":"HIGH","issue_confidence":"HIGH","issue_text":"Use of exec detected","test_id":"B102","test_name":"exec_used"}]}"#;
        let decoder = BanditJson;
        assert!(decoder.can_parse(json));
        let events = decoder.parse(json);
        assert_eq!(events[0].error_code, "B102");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
