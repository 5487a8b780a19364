//! Rails' `production.log`/`development.log` request blocks:
//! `Started METHOD "path" for IP at TIMESTAMP` /
//! `Processing by Controller#action as FORMAT` /
//! `Completed STATUS TEXT in Nms (...)`. One event per completed request.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static STARTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Started (\S+) "([^"]+)" for (\S+) at (.+)$"#).unwrap());
static PROCESSING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Processing by (\S+) as (\S+)$").unwrap());
static COMPLETED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Completed (\d{3}) ([^\n]*?) in (\d+(?:\.\d+)?)ms").unwrap());

pub struct RailsLog;

impl Parser for RailsLog {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "rails_log",
            display_name: "Rails request log",
            priority: Priority::HIGH,
            category: ParserCategory::Logging,
            groups: &["ruby"],
            aliases: &[],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| STARTED_RE.is_match(l)) && content.lines().any(|l| COMPLETED_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut pending: Option<(usize, String, String, String, String)> = None;
        let mut action = String::new();

        for (idx, line) in content.lines().enumerate() {
            if let Some(caps) = STARTED_RE.captures(line) {
                pending = Some((idx, caps[1].to_string(), caps[2].to_string(), caps[3].to_string(), caps[4].to_string()));
                action.clear();
                continue;
            }
            if let Some(caps) = PROCESSING_RE.captures(line) {
                action = caps[1].to_string();
                continue;
            }
            if let Some(caps) = COMPLETED_RE.captures(line) {
                let Some((start, method, path, ip, started_at)) = pending.take() else { continue };
                let status: i32 = caps[1].parse().unwrap_or(0);
                let status_text = caps[2].trim().to_string();
                let duration: f64 = caps[3].parse().unwrap_or(0.0);

                let mut event = ValidationEvent::new("rails", ValidationEventType::DebugEvent);
                event.function_name = action.clone();
                event.target = path;
                event.origin = ip;
                event.started_at = started_at;
                event.execution_time = duration;
                event.message = format!("{method} -> {status} {status_text}");
                event.status = Some(if status >= 500 {
                    ValidationEventStatus::Error
                } else if status >= 400 {
                    ValidationEventStatus::Fail
                } else {
                    ValidationEventStatus::Pass
                });
                event.severity = if status >= 500 {
                    "error".to_string()
                } else if status >= 400 {
                    "warning".to_string()
                } else {
                    "info".to_string()
                };
                event.log_line_start = start as i32 + 1;
                event.log_line_end = idx as i32 + 1;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("rails", ValidationEventType::Summary).with_message("no completed Rails request blocks found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_completed_request_block() {
        let content = "Started GET \"/users\" for 127.0.0.1 at 2023-10-10 13:55:36 +0000\n\
                        Processing by UsersController#index as HTML\n\
                        Completed 200 OK in 45ms (Views: 40.0ms | ActiveRecord: 2.0ms)\n";
        let decoder = RailsLog;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].function_name, "UsersController#index");
        assert_eq!(events[0].execution_time, 45.0);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
    }

    #[test]
    fn server_error_maps_to_error_status() {
        let content = "Started GET \"/crash\" for 127.0.0.1 at 2023-10-10 13:56:00 +0000\n\
                        Processing by CrashController#index as HTML\n\
                        Completed 500 Internal Server Error in 12ms (ActiveRecord: 1.0ms)\n";
        let decoder = RailsLog;
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Error));
    }
}
