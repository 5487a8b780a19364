//! Windows Event Viewer's text export: `Key:   value` lines grouped into
//! blank-line-separated event records (`Log Name`, `Source`, `Date`,
//! `Event ID`, `Level`, `Description`).

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static FIELD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(Log Name|Source|Date|Event ID|Level|Task Category|Description):\s*(.*)$").unwrap());

fn severity_for(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "critical" => "critical",
        "error" => "error",
        "warning" => "warning",
        "information" => "info",
        "verbose" => "debug",
        _ => "info",
    }
}

pub struct WindowsEvent;

impl Parser for WindowsEvent {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "windows_event",
            display_name: "Windows Event Log export",
            priority: Priority::MEDIUM,
            category: ParserCategory::Security,
            groups: &[],
            aliases: &["evtx_text", "windows_event_log"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("Log Name:") && content.contains("Event ID:")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut fields: std::collections::HashMap<String, String> = std::collections::HashMap::new();
        let mut description_lines: Vec<String> = Vec::new();
        let mut in_description = false;
        let mut block_start: Option<usize> = None;

        let lines: Vec<&str> = content.lines().collect();
        let flush = |fields: &std::collections::HashMap<String, String>, desc: &[String], start: usize, end: usize, events: &mut Vec<ValidationEvent>| {
            if !fields.contains_key("Event ID") {
                return;
            }
            let level = fields.get("Level").cloned().unwrap_or_else(|| "Information".to_string());
            let mut event = ValidationEvent::new(fields.get("Source").cloned().unwrap_or_else(|| "windows_event".to_string()), ValidationEventType::DebugEvent);
            event.error_code = fields.get("Event ID").cloned().unwrap_or_default();
            event.severity = severity_for(&level).to_string();
            event.status = Some(match event.severity.as_str() {
                "error" | "critical" => ValidationEventStatus::Error,
                "warning" => ValidationEventStatus::Warning,
                _ => ValidationEventStatus::Info,
            });
            event.category = fields.get("Task Category").cloned().unwrap_or_default();
            event.started_at = fields.get("Date").cloned().unwrap_or_default();
            event.log_file = fields.get("Log Name").cloned().unwrap_or_default();
            event.message = desc.join("\n").trim().to_string();
            event.log_line_start = start as i32 + 1;
            event.log_line_end = end as i32 + 1;
            event.log_content = lines[start..=end].join("\n");
            events.push(event);
        };

        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                if let Some(start) = block_start {
                    flush(&fields, &description_lines, start, idx.saturating_sub(1), &mut events);
                    fields.clear();
                    description_lines.clear();
                    in_description = false;
                    block_start = None;
                }
                continue;
            }
            if block_start.is_none() {
                block_start = Some(idx);
            }
            if let Some(caps) = FIELD_RE.captures(line) {
                let key = caps[1].to_string();
                let value = caps[2].to_string();
                if key == "Description" {
                    in_description = true;
                    if !value.is_empty() {
                        description_lines.push(value);
                    }
                } else {
                    in_description = false;
                    fields.insert(key, value);
                }
            } else if in_description {
                description_lines.push(line.trim().to_string());
            }
        }
        if let Some(start) = block_start {
            flush(&fields, &description_lines, start, lines.len() - 1, &mut events);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("windows_event", ValidationEventType::Summary).with_message("no Windows Event Log records found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_record() {
        let content = "Log Name:      Application\nSource:        MsiInstaller\nDate:          1/15/2023 10:30:45 AM\nEvent ID:      1033\nLevel:         Error\nDescription:\nInstallation failed.\n";
        let decoder = WindowsEvent;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tool_name, "MsiInstaller");
        assert_eq!(events[0].error_code, "1033");
        assert_eq!(events[0].severity, "error");
        assert_eq!(events[0].message, "Installation failed.");
    }
}
