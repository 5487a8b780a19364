//! `log_content` truncation and the optional line-context column.
//!
//! `smart` mode takes the window `[start-2 .. end+2]` (1-based, clamped),
//! adds `"...\n"` / `"..."` markers when the window doesn't reach an edge,
//! and falls back to `limit(k)` when the window itself still exceeds `k`
//! or when the event carries no line-span information at all.

use crate::event::ContentMode;

pub fn shape_content(content: &str, mode: &ContentMode, line_start: i32, line_end: i32) -> Option<String> {
    match mode {
        ContentMode::None => None,
        ContentMode::Full => Some(content.to_string()),
        ContentMode::Limit(k) => Some(limit(content, *k)),
        ContentMode::Smart(k) => Some(smart(content, *k, line_start, line_end)),
    }
}

fn limit(content: &str, k: usize) -> String {
    if content.len() <= k {
        content.to_string()
    } else {
        let boundary = floor_char_boundary(content, k);
        format!("{}...", &content[..boundary])
    }
}

/// Largest byte index `<= k` that lands on a UTF-8 char boundary, so slicing
/// never panics on content whose byte length exceeds `k` mid-codepoint.
fn floor_char_boundary(content: &str, k: usize) -> usize {
    if k >= content.len() {
        return content.len();
    }
    let mut idx = k;
    while idx > 0 && !content.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn smart(content: &str, k: usize, line_start: i32, line_end: i32) -> String {
    if content.len() <= k {
        return content.to_string();
    }
    if line_start <= 0 {
        return limit(content, k);
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let n = lines.len();
    let start_idx = (line_start as usize).saturating_sub(1);
    let end_idx = (line_end.max(line_start) as usize).saturating_sub(1).min(n.saturating_sub(1));

    let window_start = start_idx.saturating_sub(2);
    let window_end = (end_idx + 2).min(n.saturating_sub(1));

    let mut window = lines[window_start..=window_end].join("\n");
    if window_start > 0 {
        window = format!("...\n{window}");
    }
    if window_end < n.saturating_sub(1) {
        window = format!("{window}...");
    }

    if window.len() > k {
        limit(content, k)
    } else {
        window
    }
}

/// One row of the optional `context` column.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextLine {
    pub line_number: i32,
    pub content: String,
    pub is_event: bool,
}

/// Builds the `context_lines=N` parallel column. Requires both the event's
/// line span and the caller-supplied full line buffer for the source log;
/// absent either, the column is absent (`None`), not an empty vector.
pub fn extract_context(
    buffer_lines: Option<&[String]>,
    line_start: i32,
    line_end: i32,
    context_lines: u32,
) -> Option<Vec<ContextLine>> {
    let lines = buffer_lines?;
    if line_start <= 0 || context_lines == 0 {
        return None;
    }
    let n = lines.len();
    let start_idx = (line_start as usize).saturating_sub(1);
    let end_idx = (line_end.max(line_start) as usize)
        .saturating_sub(1)
        .min(n.saturating_sub(1));

    let window_start = start_idx.saturating_sub(context_lines as usize);
    let window_end = (end_idx + context_lines as usize).min(n.saturating_sub(1));

    Some(
        (window_start..=window_end)
            .map(|idx| ContextLine {
                line_number: (idx + 1) as i32,
                content: lines[idx].clone(),
                is_event: idx >= start_idx && idx <= end_idx,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smart_leaves_content_at_or_under_limit_untouched() {
        let content = "L1\nL2\nL3\nL4\nL5\nL6\nL7";
        let out = smart(content, 100, 4, 4);
        assert_eq!(out, content);
    }

    #[test]
    fn smart_windows_around_the_event_when_over_limit() {
        let content = "L1\nL2\nL3\nL4\nL5\nL6\nL7";
        let out = smart(content, content.len() - 1, 4, 4);
        assert_eq!(out, "...\nL2\nL3\nL4\nL5\nL6...");
    }

    #[test]
    fn full_under_limit_equals_content_at_exact_length() {
        let content = "short message";
        assert_eq!(
            shape_content(content, &ContentMode::Full, -1, -1),
            Some(content.to_string())
        );
        assert_eq!(
            shape_content(content, &ContentMode::Limit(content.len()), -1, -1),
            Some(content.to_string())
        );
    }

    #[test]
    fn limit_does_not_panic_on_a_multibyte_boundary() {
        let content = "é".repeat(10); // each 'é' is 2 bytes
        let out = shape_content(&content, &ContentMode::Limit(5), -1, -1).unwrap();
        assert!(out.ends_with("..."));
        assert!(content.starts_with(out.trim_end_matches("...")));
    }

    #[test]
    fn none_mode_emits_nothing() {
        assert_eq!(shape_content("anything", &ContentMode::None, -1, -1), None);
    }

    #[test]
    fn smart_falls_back_to_limit_without_line_info() {
        let content = "a".repeat(50);
        let out = shape_content(&content, &ContentMode::Smart(10), -1, -1).unwrap();
        assert_eq!(out, limit(&content, 10));
    }

    #[test]
    fn context_lines_absent_without_buffer() {
        assert_eq!(extract_context(None, 4, 4, 2), None);
    }

    #[test]
    fn context_lines_window_is_clamped() {
        let lines: Vec<String> = (1..=7).map(|i| format!("L{i}")).collect();
        let ctx = extract_context(Some(&lines), 4, 4, 2).unwrap();
        assert_eq!(ctx.len(), 5);
        assert_eq!(ctx[0].line_number, 2);
        assert_eq!(ctx.last().unwrap().line_number, 6);
        assert!(ctx.iter().find(|c| c.line_number == 4).unwrap().is_event);
        assert!(!ctx.iter().find(|c| c.line_number == 2).unwrap().is_event);
    }
}
