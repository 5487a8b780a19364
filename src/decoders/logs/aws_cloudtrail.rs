//! AWS CloudTrail log files: a single `{"Records":[...]}` document, one
//! event per record. Error records carry `errorCode`/`errorMessage`; their
//! absence means the API call succeeded.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use serde_json::Value;

pub struct AwsCloudtrail;

impl Parser for AwsCloudtrail {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "aws_cloudtrail",
            display_name: "AWS CloudTrail",
            priority: Priority::HIGH,
            category: ParserCategory::Security,
            groups: &[],
            aliases: &["cloudtrail"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        let Ok(value) = serde_json::from_str::<Value>(content.trim()) else { return false };
        value
            .get("Records")
            .and_then(Value::as_array)
            .is_some_and(|records| records.first().is_some_and(|r| r.get("eventSource").is_some() && r.get("eventName").is_some()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let Ok(value) = serde_json::from_str::<Value>(content.trim()) else {
            return vec![ValidationEvent::new("aws_cloudtrail", ValidationEventType::Summary).with_message("malformed CloudTrail document")];
        };
        let records = value.get("Records").and_then(Value::as_array).cloned().unwrap_or_default();

        for record in &records {
            let event_name = record.get("eventName").and_then(Value::as_str).unwrap_or_default();
            let event_source = record.get("eventSource").and_then(Value::as_str).unwrap_or("cloudtrail");
            let error_code = record.get("errorCode").and_then(Value::as_str).unwrap_or_default();

            let mut event = ValidationEvent::new(event_source, ValidationEventType::SecurityFinding);
            event.function_name = event_name.to_string();
            event.origin = record.get("sourceIPAddress").and_then(Value::as_str).unwrap_or_default().to_string();
            event.target = record.get("awsRegion").and_then(Value::as_str).unwrap_or_default().to_string();
            event.principal = record
                .get("userIdentity")
                .and_then(|u| u.get("principalId").or_else(|| u.get("arn")))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            event.actor_type = record
                .get("userIdentity")
                .and_then(|u| u.get("type"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            event.started_at = record.get("eventTime").and_then(Value::as_str).unwrap_or_default().to_string();
            event.external_id = record.get("eventID").and_then(Value::as_str).unwrap_or_default().to_string();

            if error_code.is_empty() {
                event.status = Some(ValidationEventStatus::Pass);
                event.severity = "info".to_string();
                event.message = format!("{event_name} succeeded");
            } else {
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.error_code = error_code.to_string();
                event.message = record
                    .get("errorMessage")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{event_name} failed"));
            }
            event.structured_data = serde_json::to_string(record).unwrap_or_default();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("aws_cloudtrail", ValidationEventType::Summary).with_message("no CloudTrail records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_and_error_records() {
        let content = r#"{"Records":[
            {"eventVersion":"1.08","eventTime":"2023-10-10T13:55:36Z","eventSource":"iam.amazonaws.com","eventName":"CreateUser","awsRegion":"us-east-1","sourceIPAddress":"203.0.113.5","userIdentity":{"type":"IAMUser","principalId":"AID123"},"eventID":"abc"},
            {"eventVersion":"1.08","eventTime":"2023-10-10T13:56:00Z","eventSource":"s3.amazonaws.com","eventName":"GetObject","awsRegion":"us-east-1","sourceIPAddress":"203.0.113.9","userIdentity":{"type":"AssumedRole","principalId":"AID456"},"errorCode":"AccessDenied","errorMessage":"Access Denied","eventID":"def"}
        ]}"#;
        let decoder = AwsCloudtrail;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Error));
        assert_eq!(events[1].error_code, "AccessDenied");
    }
}
