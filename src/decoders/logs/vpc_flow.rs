//! AWS VPC Flow Logs default format (space-separated):
//! `version account-id interface-id srcaddr dstaddr srcport dstport
//! protocol packets bytes start end action log-status`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};

pub struct VpcFlow;

fn protocol_name(number: &str) -> &'static str {
    match number {
        "6" => "TCP",
        "17" => "UDP",
        "1" => "ICMP",
        _ => "IP",
    }
}

impl Parser for VpcFlow {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "vpc_flow",
            display_name: "AWS VPC Flow Logs",
            priority: Priority::MEDIUM,
            category: ParserCategory::Network,
            groups: &[],
            aliases: &["vpc_flow_logs"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| {
            let fields: Vec<&str> = l.split_whitespace().collect();
            fields.len() >= 13
                && fields[0].parse::<u32>().is_ok()
                && (fields[11] == "ACCEPT" || fields[11] == "REJECT")
        })
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 13 || fields[0].parse::<u32>().is_err() {
                continue;
            }
            let action = fields[11];
            if action != "ACCEPT" && action != "REJECT" {
                continue;
            }

            let mut event = ValidationEvent::new("vpc_flow_logs", ValidationEventType::DebugEvent);
            event.principal = fields[1].to_string();
            event.origin = format!("{}:{}", fields[3], fields[5]);
            event.target = format!("{}:{}", fields[4], fields[6]);
            event.error_code = protocol_name(fields[7]).to_string();
            event.category = "network".to_string();
            event.status = Some(if action == "ACCEPT" { ValidationEventStatus::Pass } else { ValidationEventStatus::Fail });
            event.severity = if action == "ACCEPT" { "info".to_string() } else { "warning".to_string() };
            event.message = format!("{action} {}->{} {} bytes", event.origin, event.target, fields[9]);
            if let Ok(start) = fields[10].parse::<i64>() {
                event.started_at = chrono::DateTime::from_timestamp(start, 0).map(|d| d.to_rfc3339()).unwrap_or_default();
            }
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("vpc_flow_logs", ValidationEventType::Summary).with_message("no VPC flow records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accept_and_reject() {
        let content = "2 123456789010 eni-1235b8ca123456789 172.31.16.139 172.31.16.21 20641 22 6 20 4249 1418530010 1418530070 ACCEPT OK\n\
                        2 123456789010 eni-1235b8ca123456789 172.31.16.21 172.31.16.139 22 20641 6 20 4249 1418530010 1418530070 REJECT OK";
        let decoder = VpcFlow;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[0].error_code, "TCP");
    }
}
