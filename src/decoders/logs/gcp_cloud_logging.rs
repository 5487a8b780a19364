//! GCP Cloud Logging JSONL export: one `{"timestamp":...,"severity":...,
//! "logName":...,"resource":{...},"textPayload"|"jsonPayload":...}` object
//! per line.

use crate::event::{ValidationEvent, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct GcpCloudLogging;

fn severity_for(raw: &str) -> &'static str {
    match raw.to_ascii_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" | "NOTICE" | "DEFAULT" => "info",
        "WARNING" => "warning",
        "ERROR" => "error",
        "CRITICAL" | "ALERT" | "EMERGENCY" => "critical",
        _ => "info",
    }
}

impl Parser for GcpCloudLogging {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "gcp_cloud_logging",
            display_name: "GCP Cloud Logging",
            priority: Priority::MEDIUM,
            category: ParserCategory::Logging,
            groups: &[],
            aliases: &["gcp_logging", "stackdriver"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().filter(|l| !l.trim().is_empty()).any(|line| {
            serde_json::from_str::<Value>(line.trim())
                .ok()
                .and_then(|v| v.as_object().cloned())
                .is_some_and(|obj| obj.contains_key("logName") && (obj.contains_key("severity") || obj.contains_key("resource")))
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
            if !obj.contains_key("logName") {
                continue;
            }

            let resource_type = obj.get("resource").and_then(|r| r.get("type")).and_then(Value::as_str).unwrap_or("gcp_cloud_logging");
            let mut event = ValidationEvent::new(resource_type, ValidationEventType::DebugEvent);
            let severity = obj.get("severity").and_then(Value::as_str).unwrap_or("DEFAULT");
            event.severity = severity_for(severity).to_string();
            event.message = obj
                .get("textPayload")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| obj.get("jsonPayload").map(|p| p.to_string()))
                .unwrap_or_default();
            event.started_at = obj.get("timestamp").and_then(Value::as_str).unwrap_or_default().to_string();
            event.external_id = obj.get("insertId").and_then(Value::as_str).unwrap_or_default().to_string();
            event.log_file = obj.get("logName").and_then(Value::as_str).unwrap_or_default().to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            event.structured_data = serde_json::to_string(&obj).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("gcp_cloud_logging", ValidationEventType::Summary).with_message("no Cloud Logging records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_payload_record() {
        let content = r#"{"timestamp":"2023-10-10T13:55:36Z","severity":"ERROR","logName":"projects/p/logs/run","resource":{"type":"cloud_run_revision"},"textPayload":"panic: nil pointer","insertId":"xyz"}"#;
        let decoder = GcpCloudLogging;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].tool_name, "cloud_run_revision");
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].message, "panic: nil pointer");
    }
}
