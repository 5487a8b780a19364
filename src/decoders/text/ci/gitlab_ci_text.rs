//! GitLab CI job log shape: a `Running with gitlab-runner ...` banner,
//! `$ command` echo lines, `ERROR: ` diagnostics, and a closing
//! `Job succeeded`/`ERROR: Job failed:` line.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static BANNER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Running with gitlab-runner").unwrap());
static ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ERROR:\s*(.+)$").unwrap());
static JOB_RESULT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(Job succeeded|ERROR: Job failed.*)$").unwrap());

pub struct GitlabCiText;

impl Parser for GitlabCiText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "gitlab_ci_text",
            display_name: "GitLab CI",
            priority: Priority::HIGH,
            category: ParserCategory::Ci,
            groups: &["ci"],
            aliases: &["gitlab_ci"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        BANNER_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if let Some(caps) = ERROR_RE.captures(line) {
                if JOB_RESULT_RE.is_match(line) {
                    continue;
                }
                let mut event = ValidationEvent::new("gitlab_ci", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.severity = "error".to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.category = "ci".to_string();
                event.log_line_start = idx as i32 + 1;
                event.log_line_end = idx as i32 + 1;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = JOB_RESULT_RE.captures(line) else { continue };
            let succeeded = caps[1].starts_with("Job succeeded");
            let mut summary = ValidationEvent::new("gitlab_ci", ValidationEventType::Summary);
            summary.message = caps[1].to_string();
            summary.status = Some(if succeeded { ValidationEventStatus::Pass } else { ValidationEventStatus::Fail });
            summary.severity = if succeeded { "info".to_string() } else { "error".to_string() };
            summary.log_line_start = idx as i32 + 1;
            summary.log_line_end = idx as i32 + 1;
            summary.log_content = line.to_string();
            events.push(summary);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("gitlab_ci", ValidationEventType::Summary).with_message("gitlab-runner session produced no diagnostics"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_and_job_result() {
        let content = "Running with gitlab-runner 16.0.0\n$ cargo test\nERROR: Command failed with exit code 1\nERROR: Job failed: exit code 1\n";
        let decoder = GitlabCiText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].message, "Command failed with exit code 1");
        assert_eq!(events.last().unwrap().event_type, ValidationEventType::Summary);
        assert_eq!(events.last().unwrap().status, Some(ValidationEventStatus::Fail));
    }
}
