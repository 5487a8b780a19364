//! Gradle console output: `> Task :module:taskName`, `FAILURE: Build failed
//! with an exception`, `e: file.kt: (12, 5): message` Kotlin-style locations.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static KOTLIN_ERROR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^e:\s+(\S+\.kts?):\s*\((\d+),\s*(\d+)\):\s*(.+)$").unwrap());
static TASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^> Task (:\S+)(?:\s+(\S+))?").unwrap());
static FAILURE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^FAILURE: (.+)$").unwrap());

pub struct GradleBuild;

impl Parser for GradleBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "gradle_build",
            display_name: "Gradle",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["java", "ci"],
            aliases: &["gradle"],
            command_patterns: &["gradle", "gradlew"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        TASK_RE.is_match(content) || content.starts_with("FAILURE:") || content.contains("\nFAILURE:")
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = KOTLIN_ERROR_RE.captures(line) {
                let mut event = ValidationEvent::new("gradle", ValidationEventType::BuildError);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.ref_column = caps[3].parse().unwrap_or(-1);
                event.message = caps[4].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = FAILURE_RE.captures(line) {
                let mut event = ValidationEvent::new("gradle", ValidationEventType::Summary);
                event.category = "build_error".to_string();
                event.message = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = TASK_RE.captures(line) {
                let task_status = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                if task_status == "FAILED" {
                    let mut event = ValidationEvent::new("gradle", ValidationEventType::BuildError);
                    event.target = caps[1].to_string();
                    event.message = format!("task {} failed", &caps[1]);
                    event.status = Some(ValidationEventStatus::Error);
                    event.severity = "error".to_string();
                    event.category = "build_error".to_string();
                    event.log_line_start = line_num;
                    event.log_line_end = line_num;
                    event.log_content = line.to_string();
                    events.push(event);
                }
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("gradle", ValidationEventType::Summary).with_message("build completed without reported failures"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failed_task_and_kotlin_error() {
        let content = "\
> Task :compileKotlin FAILED
e: src/Main.kt: (12, 5): unresolved reference: foo
FAILURE: Build failed with an exception.
";
        let decoder = GradleBuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].ref_line, 12);
        assert_eq!(events[1].ref_column, 5);
    }
}
