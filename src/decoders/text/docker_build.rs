//! `docker build`/BuildKit console output: `#N [stage M/N] STEP` progress
//! lines plus a terminal `failed to solve: ...` error line.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static STEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#(\d+) \[([^]]+)\] (.+)$").unwrap());
static FAILED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^failed to solve: (.+)$").unwrap());

pub struct DockerBuild;

impl Parser for DockerBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "docker_build",
            display_name: "Docker build",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["ci"],
            aliases: &["buildkit"],
            command_patterns: &["docker build"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        STEP_RE.is_match(content) || FAILED_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = FAILED_RE.captures(line) {
                let mut event = ValidationEvent::new("docker", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = STEP_RE.captures(line) {
                let mut event = ValidationEvent::new("docker", ValidationEventType::DebugEvent);
                event.scope = caps[2].to_string();
                event.message = caps[3].to_string();
                event.severity = "info".to_string();
                event.category = "build_step".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("docker", ValidationEventType::Summary).with_message("no docker build output recognized"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_step_and_failure() {
        let content = "\
#4 [build 2/4] RUN cargo build --release
failed to solve: process \"/bin/sh -c cargo build --release\" did not complete successfully: exit code: 101
";
        let decoder = DockerBuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].scope, "build 2/4");
        assert_eq!(events[1].status, Some(ValidationEventStatus::Error));
    }
}
