//! `coverage report` console table: `Name  Stmts  Miss  Cover` header
//! followed by one row per file and a `TOTAL` row. Each file row becomes a
//! `performance_metric` event carrying coverage percentage.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+\.py)\s+(\d+)\s+(\d+)\s+(\d+)%").unwrap());
static TOTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^TOTAL\s+(\d+)\s+(\d+)\s+(\d+)%").unwrap());

pub struct CoverageText;

impl Parser for CoverageText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "coverage_text",
            display_name: "coverage report",
            priority: Priority::MEDIUM,
            category: ParserCategory::TestFramework,
            groups: &["python", "coverage"],
            aliases: &["coverage_py"],
            command_patterns: &["coverage report"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.contains("Stmts") && content.contains("Miss") && (ROW_RE.is_match(content) || TOTAL_RE.is_match(content))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;
            if let Some(caps) = ROW_RE.captures(line) {
                let pct: f64 = caps[4].parse().unwrap_or(0.0);
                let mut event = ValidationEvent::new("coverage", ValidationEventType::PerformanceMetric);
                event.ref_file = caps[1].to_string();
                event.message = format!("{pct}% covered");
                event.execution_time = pct;
                event.category = "coverage".to_string();
                event.status = Some(if pct < 80.0 { ValidationEventStatus::Warning } else { ValidationEventStatus::Pass });
                event.severity = if pct < 80.0 { "warning" } else { "info" }.to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            } else if let Some(caps) = TOTAL_RE.captures(line) {
                let pct: f64 = caps[3].parse().unwrap_or(0.0);
                let mut event = ValidationEvent::new("coverage", ValidationEventType::Summary);
                event.message = format!("total coverage {pct}%");
                event.execution_time = pct;
                event.category = "coverage_summary".to_string();
                event.status = Some(if pct < 80.0 { ValidationEventStatus::Warning } else { ValidationEventStatus::Pass });
                event.severity = if pct < 80.0 { "warning" } else { "info" }.to_string();
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
    fn parses_file_rows_and_total() {
        let content = "\
Name             Stmts   Miss  Cover
app/models.py       40      8    80%
TOTAL               40      8    80%
";
        let decoder = CoverageText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].execution_time, 80.0);
        assert_eq!(events[1].event_type, ValidationEventType::Summary);
    }
}
