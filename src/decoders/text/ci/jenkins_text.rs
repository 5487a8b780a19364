//! Jenkins pipeline console output: `[Pipeline] stage`/`[Pipeline] {`
//! structural markers, `ERROR: ` diagnostics, and the closing
//! `Finished: SUCCESS|FAILURE|UNSTABLE|ABORTED` banner.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static PIPELINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[Pipeline\]").unwrap());
static ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ERROR:\s*(.+)$").unwrap());
static FINISHED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Finished:\s*(SUCCESS|FAILURE|UNSTABLE|ABORTED)$").unwrap());

pub struct JenkinsText;

impl Parser for JenkinsText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "jenkins_text",
            display_name: "Jenkins pipeline console",
            priority: Priority::HIGH,
            category: ParserCategory::Ci,
            groups: &["ci"],
            aliases: &["jenkins"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| PIPELINE_RE.is_match(l)) || FINISHED_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if let Some(caps) = ERROR_RE.captures(line) {
                let mut event = ValidationEvent::new("jenkins", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.severity = "error".to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.category = "ci".to_string();
                event.log_line_start = idx as i32 + 1;
                event.log_line_end = idx as i32 + 1;
                event.log_content = line.to_string();
                events.push(event);
                continue;
            }
            if let Some(caps) = FINISHED_RE.captures(line) {
                let result = &caps[1];
                let mut summary = ValidationEvent::new("jenkins", ValidationEventType::Summary);
                summary.message = format!("Finished: {result}");
                summary.status = Some(if result == "SUCCESS" { ValidationEventStatus::Pass } else { ValidationEventStatus::Fail });
                summary.severity = if result == "SUCCESS" { "info".to_string() } else { "error".to_string() };
                summary.log_line_start = idx as i32 + 1;
                summary.log_line_end = idx as i32 + 1;
                summary.log_content = line.to_string();
                events.push(summary);
            }
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("jenkins", ValidationEventType::Summary).with_message("pipeline ran with no diagnostics"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_and_finished_banner() {
        let content = "[Pipeline] { (Build)\nERROR: script returned exit code 1\n[Pipeline] End of Pipeline\nFinished: FAILURE\n";
        let decoder = JenkinsText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].message, "script returned exit code 1");
        assert_eq!(events[1].event_type, ValidationEventType::Summary);
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
    }
}
