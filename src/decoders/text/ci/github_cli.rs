//! `gh` CLI tabular check output (`gh pr checks`, `gh run view`): one row
//! per check, tab-separated `glyph\tname\tconclusion\telapsed\turl`, where
//! the leading glyph is `✓`/`X`/`-`/`*`.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([✓X*\-])\s+([^\t]+)\t([^\t]+)\t([^\t]+)(?:\t(\S+))?$").unwrap());

pub struct GithubCli;

impl Parser for GithubCli {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "github_cli",
            display_name: "gh CLI checks",
            priority: Priority::MEDIUM,
            category: ParserCategory::Ci,
            groups: &["ci"],
            aliases: &["gh_cli", "gh"],
            command_patterns: &[],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| ROW_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let Some(caps) = ROW_RE.captures(line) else { continue };
            let glyph = &caps[1];
            let name = caps[2].trim().to_string();
            let conclusion = caps[3].trim().to_string();
            let elapsed = caps[4].trim();

            let mut event = ValidationEvent::new("gh", ValidationEventType::TestResult);
            event.test_name = name.clone();
            event.status = Some(match glyph {
                "✓" => ValidationEventStatus::Pass,
                "X" => ValidationEventStatus::Fail,
                "*" => ValidationEventStatus::Skip,
                _ => ValidationEventStatus::Info,
            });
            event.severity = if glyph == "X" { "error".to_string() } else { "info".to_string() };
            event.message = format!("{name}: {conclusion}");
            event.target = caps.get(5).map(|m| m.as_str().to_string()).unwrap_or_default();
            if let Ok(seconds) = parse_elapsed(elapsed) {
                event.execution_time = seconds * 1000.0;
            }
            event.log_line_start = idx as i32 + 1;
            event.log_line_end = idx as i32 + 1;
            event.log_content = line.to_string();
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("gh", ValidationEventType::Summary).with_message("no gh CLI check rows found"));
        }
        events
    }
}

fn parse_elapsed(raw: &str) -> Result<f64, ()> {
    let mut total = 0.0;
    let mut num = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            num.push(ch);
        } else if ch == 'm' || ch == 's' {
            let value: f64 = num.parse().map_err(|_| ())?;
            total += if ch == 'm' { value * 60.0 } else { value };
            num.clear();
        }
    }
    if total == 0.0 && num.is_empty() {
        return Err(());
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_rows() {
        let content = "✓\tbuild\tsuccess\t1m30s\thttps://github.com/org/repo/actions/runs/1\nX\tlint\tfailure\t20s\thttps://github.com/org/repo/actions/runs/2\n";
        let decoder = GithubCli;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[1].status, Some(ValidationEventStatus::Fail));
        assert_eq!(events[0].execution_time, 90_000.0);
    }
}
