//! GitHub Actions workflow-command annotations:
//! `::error file=src/a.rs,line=10,col=5::message`,
//! `::warning::message`, `::notice::message`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static CMD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^::(error|warning|notice)(?:\s+([^:]*))?::(.*)$").unwrap());
static KV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)=([^,]*)").unwrap());

pub struct GithubActionsText;

impl Parser for GithubActionsText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "github_actions_text",
            display_name: "GitHub Actions",
            priority: Priority::HIGH,
            category: ParserCategory::Ci,
            groups: &["ci"],
            aliases: &["github_actions", "gha"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| CMD_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = CMD_RE.captures(line) else { continue };
            let kind = &caps[1];
            let mut event = ValidationEvent::new("github_actions", ValidationEventType::BuildError);
            for kv in KV_RE.captures_iter(caps.get(2).map(|m| m.as_str()).unwrap_or_default()) {
                match &kv[1] {
                    "file" => event.ref_file = kv[2].to_string(),
                    "line" => event.ref_line = kv[2].parse().unwrap_or(-1),
                    "col" => event.ref_column = kv[2].parse().unwrap_or(-1),
                    _ => {}
                }
            }
            event.message = caps[3].to_string();
            event.severity = match kind {
                "error" => "error",
                "warning" => "warning",
                _ => "info",
            }
            .to_string();
            event.status = Some(match kind {
                "error" => ValidationEventStatus::Error,
                "warning" => ValidationEventStatus::Warning,
                _ => ValidationEventStatus::Info,
            });
            event.category = "ci".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("github_actions", ValidationEventType::Summary).with_message("no GitHub Actions annotations found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_annotation_with_location() {
        let content = "::error file=src/main.rs,line=42,col=9::unresolved import `foo`";
        let decoder = GithubActionsText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].ref_file, "src/main.rs");
        assert_eq!(events[0].ref_line, 42);
        assert_eq!(events[0].severity, "error");
    }

    #[test]
    fn parses_bare_warning() {
        let content = "::warning::deprecated action input";
        let decoder = GithubActionsText;
        let events = decoder.parse(content);
        assert_eq!(events[0].severity, "warning");
        assert_eq!(events[0].message, "deprecated action input");
    }
}
