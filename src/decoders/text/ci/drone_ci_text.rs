//! Drone CI step output: shell-traced `+ command` echo lines followed by an
//! `exit status N` / `exit code N` line when a step fails.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static CMD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+ (.+)$").unwrap());
static EXIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^exit (?:status|code) (\d+)$").unwrap());

pub struct DroneCiText;

impl Parser for DroneCiText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "drone_ci_text",
            display_name: "Drone CI",
            priority: Priority::MEDIUM,
            category: ParserCategory::Ci,
            groups: &["ci"],
            aliases: &["drone", "drone_ci"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| CMD_RE.is_match(l)) && content.lines().any(|l| EXIT_RE.is_match(l.trim()))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut last_command = String::new();
        for (idx, line) in content.lines().enumerate() {
            if let Some(caps) = CMD_RE.captures(line) {
                last_command = caps[1].to_string();
                continue;
            }
            if let Some(caps) = EXIT_RE.captures(line.trim()) {
                let code: i32 = caps[1].parse().unwrap_or(1);
                let mut event = ValidationEvent::new("drone", ValidationEventType::BuildError);
                event.message = if last_command.is_empty() {
                    format!("step exited with code {code}")
                } else {
                    format!("`{last_command}` exited with code {code}")
                };
                event.status = Some(if code == 0 { ValidationEventStatus::Pass } else { ValidationEventStatus::Fail });
                event.severity = if code == 0 { "info".to_string() } else { "error".to_string() };
                event.category = "ci".to_string();
                event.log_line_start = idx as i32 + 1;
                event.log_line_end = idx as i32 + 1;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("drone", ValidationEventType::Summary).with_message("no Drone step exit codes found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failed_step() {
        let content = "+ go test ./...\nFAIL\nexit status 1\n";
        let decoder = DroneCiText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Fail));
        assert!(events[0].message.contains("go test"));
    }
}
