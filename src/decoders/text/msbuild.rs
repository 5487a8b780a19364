//! MSBuild console output: `file(line,col): error|warning CODE: message
//! [project]`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static DIAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\((\d+),(\d+)\):\s*(error|warning)\s+(\S+):\s*(.+?)\s*\[(\S+)\]$").unwrap()
});

pub struct Msbuild;

impl Parser for Msbuild {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "msbuild",
            display_name: "MSBuild",
            priority: Priority::MEDIUM,
            category: ParserCategory::BuildSystem,
            groups: &["dotnet"],
            aliases: &["dotnet_build"],
            command_patterns: &["msbuild", "dotnet build"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        DIAG_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = DIAG_RE.captures(line) else { continue };
            let is_error = &caps[4] == "error";
            let mut event = ValidationEvent::new("msbuild", ValidationEventType::BuildError);
            event.ref_file = caps[1].to_string();
            event.ref_line = caps[2].parse().unwrap_or(-1);
            event.ref_column = caps[3].parse().unwrap_or(-1);
            event.error_code = caps[5].to_string();
            event.message = caps[6].to_string();
            event.scope = caps[7].to_string();
            event.status = Some(if is_error { ValidationEventStatus::Error } else { ValidationEventStatus::Warning });
            event.severity = if is_error { "error" } else { "warning" }.to_string();
            event.category = "build_error".to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("msbuild", ValidationEventType::Summary).with_message("no msbuild diagnostics found"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_diagnostic_with_project_scope() {
        let content = r"Program.cs(10,5): error CS0103: The name 'foo' does not exist [App.csproj]";
        let decoder = Msbuild;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].error_code, "CS0103");
        assert_eq!(events[0].scope, "App.csproj");
    }
}
