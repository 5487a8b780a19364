//! npm/webpack/tsc console build output: `npm ERR!` lines and webpack's
//! `ERROR in file\nmessage` blocks.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static NPM_ERR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^npm ERR! (.+)$").unwrap());
static WEBPACK_ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ERROR in (\S+)").unwrap());
static TSC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+\.tsx?)\((\d+),(\d+)\): error (TS\d+): (.+)$").unwrap());

pub struct NodeBuild;

impl Parser for NodeBuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "node_build",
            display_name: "Node build",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["javascript"],
            aliases: &["npm", "webpack", "tsc"],
            command_patterns: &["npm run build", "webpack", "tsc"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        NPM_ERR_RE.is_match(content) || WEBPACK_ERROR_RE.is_match(content) || TSC_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut pending_webpack_file: Option<String> = None;

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = TSC_RE.captures(line) {
                let mut event = ValidationEvent::new("tsc", ValidationEventType::TypeError);
                event.ref_file = caps[1].to_string();
                event.ref_line = caps[2].parse().unwrap_or(-1);
                event.ref_column = caps[3].parse().unwrap_or(-1);
                event.error_code = caps[4].to_string();
                event.message = caps[5].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "type_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = WEBPACK_ERROR_RE.captures(line) {
                pending_webpack_file = Some(caps[1].to_string());
            } else if let Some(caps) = NPM_ERR_RE.captures(line) {
                let mut event = ValidationEvent::new("npm", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "build_error".to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(file) = pending_webpack_file.take() {
                if !line.trim().is_empty() {
                    let mut event = ValidationEvent::new("webpack", ValidationEventType::BuildError);
                    event.ref_file = file;
                    event.message = line.trim().to_string();
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
            events.push(ValidationEvent::new("node_build", ValidationEventType::Summary).with_message("no build errors found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tsc_diagnostic() {
        let content = "src/index.tsx(12,5): error TS2322: Type 'string' is not assignable to type 'number'.";
        let decoder = NodeBuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].error_code, "TS2322");
        assert_eq!(events[0].ref_line, 12);
    }

    #[test]
    fn parses_npm_err_and_webpack_error() {
        let content = "\
npm ERR! code ENOENT
ERROR in ./src/app.js
Module not found: Error: Can't resolve './missing'
";
        let decoder = NodeBuild;
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].ref_file, "./src/app.js");
    }
}
