//! `regexp:<pattern>` — a generic decoder built at bind time from a
//! user-supplied regex with named captures. Capture names matching
//! [`crate::event::ValidationEvent`] field names populate those fields;
//! other captures are dropped. Matches are line-scoped.

use crate::event::{ValidationEvent, ValidationEventType};
use regex::Regex;

pub struct RegexpDecoder {
    pattern: Regex,
}

const KNOWN_STRING_FIELDS: &[&str] = &[
    "tool_name",
    "ref_file",
    "function_name",
    "severity",
    "category",
    "error_code",
    "message",
    "suggestion",
    "test_name",
    "principal",
    "origin",
    "target",
    "actor_type",
    "started_at",
    "external_id",
];

impl RegexpDecoder {
    pub fn compile(pattern: &str) -> Result<Self, String> {
        Regex::new(pattern)
            .map(|pattern| Self { pattern })
            .map_err(|e| e.to_string())
    }

    pub fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(captures) = self.pattern.captures(line) else { continue };
            let mut event = ValidationEvent::new("regexp", ValidationEventType::Unknown);
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();

            for name in self.pattern.capture_names().flatten() {
                let Some(value) = captures.name(name) else { continue };
                let value = value.as_str().to_string();
                assign_field(&mut event, name, value);
            }
            events.push(event);
        }
        events
    }
}

fn assign_field(event: &mut ValidationEvent, name: &str, value: String) {
    if !KNOWN_STRING_FIELDS.contains(&name) {
        return;
    }
    match name {
        "tool_name" => event.tool_name = value,
        "ref_file" => event.ref_file = value,
        "function_name" => event.function_name = value,
        "severity" => event.severity = value,
        "category" => event.category = value,
        "error_code" => event.error_code = value,
        "message" => event.message = value,
        "suggestion" => event.suggestion = value,
        "test_name" => event.test_name = value,
        "principal" => event.principal = value,
        "origin" => event.origin = value,
        "target" => event.target = value,
        "actor_type" => event.actor_type = value,
        "started_at" => event.started_at = value,
        "external_id" => event.external_id = value,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_captures_populate_matching_fields() {
        let decoder = RegexpDecoder::compile(r"(?P<severity>ERROR|WARN): (?P<message>.+)").unwrap();
        let events = decoder.parse("ERROR: disk full\nINFO: ignored\nWARN: low memory");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].severity, "ERROR");
        assert_eq!(events[0].message, "disk full");
        assert_eq!(events[1].severity, "WARN");
    }

    #[test]
    fn unknown_capture_names_are_dropped() {
        let decoder = RegexpDecoder::compile(r"(?P<bogus_field>\d+)").unwrap();
        let events = decoder.parse("42");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "");
    }

    #[test]
    fn invalid_pattern_is_rejected_at_compile() {
        assert!(RegexpDecoder::compile("(unclosed").is_err());
    }
}
