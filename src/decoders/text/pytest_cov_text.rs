//! pytest's `--cov` terminal report: the same `Name Stmts Miss Cover`
//! table as `coverage_text`, but preceded by pytest's own banner and
//! optionally a `Missing` column. Disambiguated from a bare `coverage_text`
//! table by requiring the `---------- coverage:` banner pytest-cov prints.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static BANNER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+\s*coverage:.*-+").unwrap());
static ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+\.py)\s+(\d+)\s+(\d+)\s+(\d+)%(?:\s+(.+))?$").unwrap());

pub struct PytestCovText;

impl Parser for PytestCovText {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "pytest_cov_text",
            display_name: "pytest-cov",
            priority: Priority::HIGH,
            category: ParserCategory::TestFramework,
            groups: &["python", "coverage"],
            aliases: &["pytest_cov"],
            command_patterns: &["pytest --cov"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        BANNER_RE.is_match(content) && ROW_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = ROW_RE.captures(line) else { continue };
            let pct: f64 = caps[4].parse().unwrap_or(0.0);
            let mut event = ValidationEvent::new("pytest_cov", ValidationEventType::PerformanceMetric);
            event.ref_file = caps[1].to_string();
            event.message = format!("{pct}% covered");
            event.execution_time = pct;
            event.suggestion = caps.get(5).map(|m| m.as_str().to_string()).unwrap_or_default();
            event.category = "coverage".to_string();
            event.status = Some(if pct < 80.0 { ValidationEventStatus::Warning } else { ValidationEventStatus::Pass });
            event.severity = if pct < 80.0 { "warning" } else { "info" }.to_string();
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_missing_lines_column() {
        let content = "\
---------- coverage: platform linux, python 3.11 -----------
Name             Stmts   Miss  Cover   Missing
app/models.py       40      8    80%   12-19
";
        let decoder = PytestCovText;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].suggestion, "12-19");
    }

    #[test]
    fn plain_coverage_table_without_banner_is_rejected() {
        let decoder = PytestCovText;
        assert!(!decoder.can_parse("Name             Stmts   Miss  Cover\napp.py 40 8 80%\n"));
    }
}
