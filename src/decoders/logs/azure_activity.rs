//! Azure Activity Log JSON records: `{"time":...,"resourceId":...,
//! "operationName":...,"level":"Informational","resultType":"Success",
//! "caller":...}`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct AzureActivity;

fn severity_for(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "verbose" => "debug",
        "informational" | "information" => "info",
        "warning" => "warning",
        "error" => "error",
        "critical" => "critical",
        _ => "info",
    }
}

impl Parser for AzureActivity {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "azure_activity",
            display_name: "Azure Activity Log",
            priority: Priority::MEDIUM,
            category: ParserCategory::Security,
            groups: &[],
            aliases: &["azure_activity_log"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().filter(|l| !l.trim().is_empty()).any(|line| {
            serde_json::from_str::<Value>(line.trim())
                .ok()
                .and_then(|v| v.as_object().cloned())
                .is_some_and(|obj| obj.contains_key("operationName") && obj.contains_key("resourceId"))
        })
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(line) else { continue };
            if !obj.contains_key("operationName") || !obj.contains_key("resourceId") {
                continue;
            }

            let mut event = ValidationEvent::new("azure_activity", ValidationEventType::SecurityFinding);
            event.function_name = obj.get("operationName").and_then(Value::as_str).unwrap_or_default().to_string();
            event.target = obj.get("resourceId").and_then(Value::as_str).unwrap_or_default().to_string();
            event.principal = obj.get("caller").and_then(Value::as_str).unwrap_or_default().to_string();
            event.started_at = obj.get("time").and_then(Value::as_str).unwrap_or_default().to_string();
            event.external_id = obj.get("correlationId").and_then(Value::as_str).unwrap_or_default().to_string();

            let level = obj.get("level").and_then(Value::as_str).unwrap_or("Informational");
            event.severity = severity_for(level).to_string();

            let result_type = obj.get("resultType").and_then(Value::as_str).unwrap_or_default();
            event.status = Some(match result_type.to_ascii_lowercase().as_str() {
                "success" => ValidationEventStatus::Pass,
                "failed" => ValidationEventStatus::Fail,
                _ => ValidationEventStatus::Info,
            });
            event.message = format!("{} -> {}", event.function_name, if result_type.is_empty() { "unknown" } else { result_type });
            event.structured_data = serde_json::to_string(&obj).unwrap_or_default();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("azure_activity", ValidationEventType::Summary).with_message("no Azure Activity Log records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failed_operation() {
        let content = r#"{"time":"2023-10-10T13:55:36Z","resourceId":"/subscriptions/x/vm1","operationName":"Microsoft.Compute/virtualMachines/restart/action","level":"Error","resultType":"Failed","caller":"user@example.com","correlationId":"corr-1"}"#;
        let decoder = AzureActivity;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].principal, "user@example.com");
    }
}
