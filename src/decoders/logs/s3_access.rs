//! Amazon S3 server access log format (space-separated with quoted
//! sub-fields): `bucketowner bucket [date] remoteip requester requestid
//! operation key "request" status error bytessent objectsize ...`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static S3_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\S+) (\S+) \[([^\]]+)\] (\S+) (\S+) (\S+) (REST\.\S+|BATCH\.\S+|WEBSITE\.\S+) (\S+) "([^"]*)" (\d{3}|-)"#).unwrap()
});

pub struct S3Access;

impl Parser for S3Access {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "s3_access",
            display_name: "S3 server access log",
            priority: Priority::MEDIUM,
            category: ParserCategory::Network,
            groups: &[],
            aliases: &["s3_access_log"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| S3_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = S3_RE.captures(line) else { continue };
            let bucket = caps[2].to_string();
            let remote_ip = caps[4].to_string();
            let requester = caps[5].to_string();
            let operation = caps[7].to_string();
            let key = caps[8].to_string();
            let status_str = &caps[10];
            let status: i32 = status_str.parse().unwrap_or(0);

            let mut event = ValidationEvent::new("s3_access", ValidationEventType::DebugEvent);
            event.target = format!("{bucket}/{key}");
            event.origin = remote_ip;
            event.principal = requester;
            event.function_name = operation.clone();
            event.started_at = crate::timefmt::normalize(&caps[3]);
            event.status = Some(if status == 0 || status < 400 { ValidationEventStatus::Pass } else { ValidationEventStatus::Fail });
            event.severity = if status >= 500 {
                "error".to_string()
            } else if status >= 400 {
                "warning".to_string()
            } else {
                "info".to_string()
            };
            event.message = format!("{operation} {key} -> {status_str}");
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("s3_access", ValidationEventType::Summary).with_message("no S3 access log records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_object_request() {
        let content = r#"79a59df900b bucket-name [06/Feb/2019:00:00:38 +0000] 192.0.2.3 requester-id 7EF REST.GET.OBJECT key.txt "GET /bucket-name/key.txt HTTP/1.1" 200 - 2662 2662"#;
        let decoder = S3Access;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].target, "bucket-name/key.txt");
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
    }
}
