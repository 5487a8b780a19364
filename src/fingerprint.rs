//! Message normalization, fingerprinting, pattern-id assignment, and
//! similarity scoring.
//!
//! The ten-step ordered regex substitution list, the
//! `tool_name_category_hex(hash)` fingerprint shape, first-occurrence-wins
//! clustering, and the position-wise-prefix-plus-keyword-bonus similarity
//! formula are exact: idempotence and range properties depend on matching
//! them precisely, not just "in spirit".

use crate::event::ValidationEvent;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

struct NormalizeRegexes {
    file_ext_path: Regex,
    unix_path: Regex,
    win_path: Regex,
    iso_datetime: Regex,
    bare_time: Regex,
    line_col: Regex,
    line_num: Regex,
    column_num: Regex,
    hex_addr: Regex,
    long_int: Regex,
    single_quoted: Regex,
    double_quoted: Regex,
    decimal: Regex,
    integer: Regex,
    whitespace: Regex,
    needs_normalization: Regex,
}

static RE: Lazy<NormalizeRegexes> = Lazy::new(|| NormalizeRegexes {
    file_ext_path: Regex::new(r"[\w./\\-]+\.(?:py|rs|js|ts|jsx|tsx|go|java|rb|c|cpp|h|hpp|cs|php|swift|kt|scala|sh|yaml|yml|json|xml|toml|md)\b").unwrap(),
    unix_path: Regex::new(r"/[\w./-]+").unwrap(),
    win_path: Regex::new(r"[A-Za-z]:\\[\w.\\-]+").unwrap(),
    iso_datetime: Regex::new(r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:?\d{2})?").unwrap(),
    bare_time: Regex::new(r"\b\d{2}:\d{2}:\d{2}(?:\.\d+)?\b").unwrap(),
    line_col: Regex::new(r":\d+:\d+:").unwrap(),
    line_num: Regex::new(r"\bline\s+\d+\b").unwrap(),
    column_num: Regex::new(r"\bcolumn\s+\d+\b").unwrap(),
    hex_addr: Regex::new(r"\b0x[0-9a-fA-F]+\b").unwrap(),
    long_int: Regex::new(r"\b\d{6,}\b").unwrap(),
    single_quoted: Regex::new(r"'[^']*'").unwrap(),
    double_quoted: Regex::new(r#""[^"]*""#).unwrap(),
    decimal: Regex::new(r"\b\d+\.\d+\b").unwrap(),
    integer: Regex::new(r"\b\d+\b").unwrap(),
    whitespace: Regex::new(r"\s+").unwrap(),
    needs_normalization: Regex::new(r#"[/\\:'"0-9\t\n]"#).unwrap(),
});

/// Lower-cases and applies the ten-step ordered substitution list. Applying
/// the steps out of order changes the result, because later patterns can
/// match placeholders earlier ones left behind (e.g. `line <num>` after the
/// integer pass would double-replace).
pub fn normalize_message(message: &str) -> String {
    if !RE.needs_normalization.is_match(message) {
        return message.trim().to_string();
    }

    let mut s = message.to_lowercase();
    s = RE.file_ext_path.replace_all(&s, " <file> ").to_string();
    s = RE.unix_path.replace_all(&s, "/<path>/").to_string();
    s = RE.win_path.replace_all(&s, r"\<path>\").to_string();
    s = RE.iso_datetime.replace_all(&s, "<timestamp>").to_string();
    s = RE.bare_time.replace_all(&s, "<time>").to_string();
    s = RE.line_col.replace_all(&s, ":<line>:<col>:").to_string();
    s = RE.line_num.replace_all(&s, "line <num>").to_string();
    s = RE.column_num.replace_all(&s, "column <num>").to_string();
    s = RE.hex_addr.replace_all(&s, "<addr>").to_string();
    s = RE.long_int.replace_all(&s, "<id>").to_string();
    s = RE.single_quoted.replace_all(&s, "'<var>'").to_string();
    s = RE.double_quoted.replace_all(&s, "\"<var>\"").to_string();
    s = RE.decimal.replace_all(&s, "<decimal>").to_string();
    s = RE.integer.replace_all(&s, "<num>").to_string();
    s = RE.whitespace.replace_all(&s, " ").to_string();
    s.trim().to_string()
}

/// `tool_name_category_hex(hash(tool:category:normalized))`. The hash
/// function need only be stable within a process; clustering depends on
/// fingerprint *equality*, never on the numeric value.
pub fn generate_fingerprint(tool_name: &str, category: &str, normalized_message: &str) -> String {
    let mut hasher = DefaultHasher::new();
    format!("{tool_name}:{category}:{normalized_message}").hash(&mut hasher);
    format!("{tool_name}_{category}_{:x}", hasher.finish())
}

const SIMILARITY_KEYWORDS: &[&str] = &[
    "error",
    "warning",
    "failed",
    "exception",
    "timeout",
    "permission",
    "not found",
];

/// `position-wise-matching-prefix-chars / max(len) + 0.1 * common keyword
/// count`, clamped to 1.0. `a` is the normalized candidate message, `b` the
/// representative's original message (normalized on demand by the caller).
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    let mut matching = 0usize;
    for (x, y) in a_bytes.iter().zip(b_bytes.iter()) {
        if x == y {
            matching += 1;
        } else {
            break;
        }
    }
    let max_len = a_bytes.len().max(b_bytes.len()) as f64;
    let mut score = matching as f64 / max_len;

    let keyword_count = SIMILARITY_KEYWORDS
        .iter()
        .filter(|kw| a.contains(*kw) && b.contains(*kw))
        .count();
    score += 0.1 * keyword_count as f64;

    score.min(1.0)
}

/// Keyword cascade supplementing decoder-assigned `category`: when a
/// decoder leaves `category` blank, infer a coarse root-cause bucket from
/// the message so downstream aggregation still has something to group on.
pub fn detect_root_cause_category(message: &str) -> &'static str {
    let m = message.to_lowercase();
    if m.contains("connection")
        || m.contains("network")
        || m.contains("timeout")
        || m.contains("dns")
    {
        "network"
    } else if m.contains("permission") || m.contains("access denied") || m.contains("forbidden") {
        "permission"
    } else if m.contains("config") || m.contains("setting") || m.contains("option") {
        "configuration"
    } else if m.contains("memory") || m.contains("disk") || m.contains("resource") {
        "resource"
    } else if m.contains("syntax") || m.contains("parse error") || m.contains("unexpected token") {
        "syntax"
    } else if m.contains("build") || m.contains("compile") || m.contains("link") {
        "build"
    } else if m.contains("assert") || m.contains("expected") {
        "test_logic"
    } else {
        "unknown"
    }
}

/// Single-pass fingerprint assignment plus similarity scoring against each
/// fingerprint's representative, run once over the whole per-scan event set
/// (clustering needs the complete set, so this cannot stream).
pub fn process_events(events: &mut [ValidationEvent]) {
    let mut fingerprint_to_pattern_id: HashMap<String, i64> = HashMap::new();
    let mut representative_normalized: HashMap<String, String> = HashMap::new();
    let mut next_pattern_id: i64 = 1;

    for event in events.iter_mut() {
        if event.message.is_empty() {
            continue;
        }
        let category = if event.category.is_empty() {
            detect_root_cause_category(&event.message)
        } else {
            event.category.as_str()
        };
        let normalized = normalize_message(&event.message);
        let fingerprint = generate_fingerprint(&event.tool_name, category, &normalized);

        let pattern_id = *fingerprint_to_pattern_id
            .entry(fingerprint.clone())
            .or_insert_with(|| {
                let id = next_pattern_id;
                next_pattern_id += 1;
                representative_normalized.insert(fingerprint.clone(), normalized.clone());
                id
            });

        event.fingerprint = fingerprint.clone();
        event.pattern_id = pattern_id;

        let representative = representative_normalized.get(&fingerprint).unwrap();
        event.similarity_score = calculate_similarity(&normalized, representative);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ValidationEventType;
    use quickcheck_macros::quickcheck;

    #[test]
    fn normalization_replaces_paths_and_numbers() {
        let n = normalize_message("'foo' not found at /srv/x/y.py:10");
        assert!(!n.contains("/srv/x/y.py"));
        assert!(n.contains("'<var>'"));
    }

    #[test]
    fn fingerprint_clustering_scenario_matches() {
        let a = normalize_message("'foo' not found at /srv/x/y.py:10");
        let b = normalize_message("'bar' not found at /srv/a/b.py:99");
        assert_eq!(a, b);

        let mut events = vec![
            ValidationEvent::new("pytest", ValidationEventType::TestResult)
                .with_message("'foo' not found at /srv/x/y.py:10"),
            ValidationEvent::new("pytest", ValidationEventType::TestResult)
                .with_message("'bar' not found at /srv/a/b.py:99"),
        ];
        events[0].category = "test_logic".to_string();
        events[1].category = "test_logic".to_string();
        process_events(&mut events);

        assert_eq!(events[0].pattern_id, events[1].pattern_id);
        assert_eq!(events[0].similarity_score, 1.0);
        assert_eq!(events[1].similarity_score, 1.0);
    }

    #[test]
    fn similarity_edge_cases() {
        assert_eq!(calculate_similarity("", ""), 1.0);
        assert_eq!(calculate_similarity("", "x"), 0.0);
        assert_eq!(calculate_similarity("x", ""), 0.0);
        assert_eq!(calculate_similarity("abc", "abc"), 1.0);
    }

    #[quickcheck]
    fn normalization_is_idempotent(message: String) -> bool {
        let once = normalize_message(&message);
        let twice = normalize_message(&once);
        once == twice
    }

    #[quickcheck]
    fn similarity_always_in_unit_range(a: String, b: String) -> bool {
        let score = calculate_similarity(&a, &b);
        (0.0..=1.0).contains(&score)
    }
}
