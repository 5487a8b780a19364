//! Maven console output: `[ERROR]`/`[WARNING]` lines, with `[ERROR] file:[line,col] message`
//! compiler-plugin locations where present.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static LOCATED_ERROR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[ERROR\]\s+(\S+\.java):\[(\d+),(\d+)\]\s+(.+)$").unwrap());
static ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[ERROR\]\s+(.+)$").unwrap());
static WARNING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[WARNING\]\s+(.+)$").unwrap());
static BUILD_STATUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[INFO\] BUILD (SUCCESS|FAILURE)").unwrap());

pub struct MavenBuild;

impl Parser for MavenBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "maven_build",
            display_name: "Maven",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["java", "ci"],
            aliases: &["maven", "mvn"],
            command_patterns: &["mvn"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("[INFO] BUILD") || ERROR_RE.is_match(content) || WARNING_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = LOCATED_ERROR_RE.captures(line) {
                let mut event = ValidationEvent::new("maven", ValidationEventType::BuildError);
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
            } else if let Some(caps) = BUILD_STATUS_RE.captures(line) {
                let failed = &caps[1] == "FAILURE";
                let mut event = ValidationEvent::new("maven", ValidationEventType::Summary);
                event.category = "build_success".to_string();
                event.message = format!("BUILD {}", &caps[1]);
                event.status = Some(if failed { ValidationEventStatus::Error } else { ValidationEventStatus::Info });
                event.severity = if failed { "error" } else { "info" }.to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = ERROR_RE.captures(line) {
                let mut event = ValidationEvent::new("maven", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = WARNING_RE.captures(line) {
                let mut event = ValidationEvent::new("maven", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Warning);
                event.severity = "warning".to_string();
                event.category = "build_warning".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_located_error_and_build_status() {
        let content = "\
[ERROR] src/main/java/App.java:[12,5] cannot find symbol
[INFO] BUILD FAILURE
";
        let decoder = MavenBuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ref_line, 12);
        assert_eq!(events[0].ref_column, 5);
        assert_eq!(events[1].category, "build_success");
    }
}
