//! `python setup.py build`/`pip install` console output: a Python
//! traceback ending in `ExceptionType: message`, or `error: message` from
//! distutils/setuptools.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static TRACEBACK_FRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*File "([^"]+)", line (\d+), in (\S+)"#).unwrap());
static EXC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+(?:Error|Exception)): (.+)$").unwrap());
static SETUP_ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^error: (.+)$").unwrap());

pub struct PythonBuild;

impl Parser for PythonBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "python_build",
            display_name: "Python build",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["python"],
            aliases: &["setuptools", "pip"],
            command_patterns: &["python setup.py build", "pip install"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("Traceback (most recent call last):") || SETUP_ERROR_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut last_frame: Option<(String, i32, String)> = None;

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = TRACEBACK_FRAME_RE.captures(line) {
                last_frame = Some((caps[1].to_string(), caps[2].parse().unwrap_or(-1), caps[3].to_string()));
            } else if let Some(caps) = EXC_RE.captures(line) {
                let mut event = ValidationEvent::new("python_build", ValidationEventType::BuildError);
                if let Some((file, ln, func)) = last_frame.take() {
                    event.ref_file = file;
                    event.ref_line = ln;
                    event.function_name = func;
                }
                event.error_code = caps[1].to_string();
                event.message = caps[2].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = SETUP_ERROR_RE.captures(line) {
                let mut event = ValidationEvent::new("python_build", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("python_build", ValidationEventType::Summary).with_message("no build errors found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_traceback_and_exception() {
        let content = "\
Traceback (most recent call last):
  File \"setup.py\", line 10, in <module>
    build()
ImportError: No module named 'foo'
";
        let decoder = PythonBuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ref_file, "setup.py");
        assert_eq!(events[0].ref_line, 10);
        assert_eq!(events[0].error_code, "ImportError");
    }
}
