//! Valgrind Memcheck text output: `==PID== message` lines, with
//! `Invalid read/write`, `LEAK SUMMARY`, and `ERROR SUMMARY: N errors`
//! banners distinguished by keyword.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^==(\d+)==\s?(.*)$").unwrap());
static ERROR_SUMMARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"ERROR SUMMARY: (\d+) errors?").unwrap());
static LEAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\d,]+) bytes? in (\d+) blocks? are (definitely|possibly|still reachable|indirectly) lost").unwrap());

pub struct Valgrind;

impl Parser for Valgrind {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "valgrind",
            display_name: "Valgrind",
            priority: Priority::HIGH,
            category: ParserCategory::Debugger,
            groups: &["c_cpp"],
            aliases: &["memcheck"],
            command_patterns: &["valgrind"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        LINE_RE.is_match(content) && content.contains("Memcheck")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            let Some(caps) = LINE_RE.captures(line) else { continue };
            let pid = &caps[1];
            let body = caps[2].trim();

            if body.starts_with("Invalid read") || body.starts_with("Invalid write") {
                let mut event = ValidationEvent::new("valgrind", ValidationEventType::MemoryError);
                event.external_id = pid.to_string();
                event.message = body.to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "memory".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = LEAK_RE.captures(body) {
                let mut event = ValidationEvent::new("valgrind", ValidationEventType::MemoryLeak);
                event.external_id = pid.to_string();
                event.message = body.to_string();
                event.category = caps[3].replace(' ', "_");
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = ERROR_SUMMARY_RE.captures(body) {
                let count: i64 = caps[1].parse().unwrap_or(0);
                let mut event = ValidationEvent::new("valgrind", ValidationEventType::Summary);
                event.external_id = pid.to_string();
                event.message = body.to_string();
                event.category = "memory_summary".to_string();
                event.status = Some(if count > 0 { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if count > 0 { "error" } else { "info" }.to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("valgrind", ValidationEventType::Summary).with_message("no valgrind findings recognized"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_invalid_read_and_summary() {
        let content = "\
==1234== Memcheck, a memory error detector
==1234== Invalid read of size 4
==1234==    at 0x1234: main (main.c:10)
==1234== ERROR SUMMARY: 1 errors from 1 contexts
";
        let decoder = Valgrind;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert!(events.iter().any(|e| e.event_type == ValidationEventType::MemoryError));
        assert!(events.iter().any(|e| e.event_type == ValidationEventType::Summary));
    }
}
