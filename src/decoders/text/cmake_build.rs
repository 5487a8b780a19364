//! CMake/Make-via-CMake console output: `CMake Error at file.cmake:12 (message):`
//! and `CMake Warning` blocks.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static ERROR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CMake Error at (\S+):(\d+)\s*(?:\(([^)]+)\))?:").unwrap());
static WARNING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CMake Warning(?: \(dev\))? at (\S+):(\d+)").unwrap());

pub struct CmakeBuild;

impl Parser for CmakeBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "cmake_build",
            display_name: "CMake",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["c_cpp", "ci"],
            aliases: &["cmake"],
            command_patterns: &["cmake"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        ERROR_RE.is_match(content) || WARNING_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let lines: Vec<&str> = content.lines().collect();

        for (idx, line) in lines.iter().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = ERROR_RE.captures(line) {
                let message = lines.get(idx + 1).map(|l| l.trim()).unwrap_or("").to_string();
                let mut event = ValidationEvent::new("cmake", ValidationEventType::BuildError);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.message = if message.is_empty() { caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default() } else { message };
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = WARNING_RE.captures(line) {
                let message = lines.get(idx + 1).map(|l| l.trim()).unwrap_or("").to_string();
                let mut event = ValidationEvent::new("cmake", ValidationEventType::BuildError);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.message = message;
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
    fn parses_error_with_following_message_line() {
        let content = "\
CMake Error at CMakeLists.txt:14 (add_executable):
  Cannot find source file: missing.cpp
";
        let decoder = CmakeBuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ref_file, "CMakeLists.txt");
        assert_eq!(events[0].ref_line, 14);
        assert_eq!(events[0].message, "Cannot find source file: missing.cpp");
    }
}
