//! `terraform plan`/`apply` console output: `Error: ` diagnostic blocks
//! (optionally followed by an `on file line N, in ...:` locator) and the
//! closing `Plan: N to add, M to change, K to destroy.` summary.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static ERROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Error:\s*(.+)$").unwrap());
static LOCATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*on\s+(\S+)\s+line\s+(\d+)"#).unwrap());
static PLAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Plan:\s*(\d+) to add,\s*(\d+) to change,\s*(\d+) to destroy\.$").unwrap());

pub struct TerraformText;

impl Parser for TerraformText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "terraform_text",
            display_name: "Terraform",
            priority: Priority::MEDIUM,
            category: ParserCategory::Ci,
            groups: &["ci"],
            aliases: &["terraform"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        PLAN_RE.is_match(content) || content.lines().any(|l| ERROR_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let lines: Vec<&str> = content.lines().collect();
        let mut idx = 0;
        while idx < lines.len() {
            let line = lines[idx];
            if let Some(caps) = ERROR_RE.captures(line) {
                let mut event = ValidationEvent::new("terraform", ValidationEventType::BuildError);
                event.message = caps[1].to_string();
                event.status = Some(ValidationEventStatus::Error);
                event.severity = "error".to_string();
                event.category = "ci".to_string();
                let start = idx;
                let mut lookahead = idx + 1;
                if lines.get(lookahead).is_some_and(|l| l.trim().is_empty()) {
                    lookahead += 1;
                }
                if let Some(loc) = lines.get(lookahead).and_then(|l| LOCATOR_RE.captures(l)) {
                    event.ref_file = loc[1].to_string();
                    event.ref_line = loc[2].parse().unwrap_or(-1);
                    idx = lookahead;
                }
                event.log_line_start = start as i32 + 1;
                event.log_line_end = idx as i32 + 1;
                event.log_content = lines[start..=idx].join("\n");
                events.push(event);
            } else if let Some(caps) = PLAN_RE.captures(line) {
                let add: i64 = caps[1].parse().unwrap_or(0);
                let change: i64 = caps[2].parse().unwrap_or(0);
                let destroy: i64 = caps[3].parse().unwrap_or(0);
                let mut summary = ValidationEvent::new("terraform", ValidationEventType::Summary);
                summary.message = line.to_string();
                summary.status = Some(ValidationEventStatus::Info);
                summary.severity = "info".to_string();
                summary.structured_data = format!(r#"{{"add":{add},"change":{change},"destroy":{destroy}}}"#);
                summary.log_line_start = idx as i32 + 1;
                summary.log_line_end = idx as i32 + 1;
                summary.log_content = line.to_string();
                events.push(summary);
            }
            idx += 1;
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("terraform", ValidationEventType::Summary).with_message("no terraform plan/apply diagnostics found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_with_locator() {
        let content = "Error: Unsupported argument\n\n  on main.tf line 10, in resource \"aws_instance\" \"foo\":\n  10:   bad_arg = true\n";
        let decoder = TerraformText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].message, "Unsupported argument");
    }

    #[test]
    fn parses_plan_summary() {
        let content = "Plan: 3 to add, 1 to change, 0 to destroy.";
        let decoder = TerraformText;
        let events = decoder.parse(content);
        assert_eq!(events[0].event_type, ValidationEventType::Summary);
    }
}
