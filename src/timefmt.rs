//! Timestamp normalization shared by the structured-log decoders in
//! [`crate::decoders::logs`]. `started_at` is an ISO-8601 string; several
//! source formats (CLF's `%d/%b/%Y:%H:%M:%S %z`,
//! Python logging's comma-separated milliseconds) are not, so each decoder
//! that captures a timestamp normalizes it here before storing it. A
//! format this module doesn't recognize is passed through verbatim rather
//! than dropped — a best-effort `started_at` beats an empty one.

use chrono::{DateTime, NaiveDateTime};

const CANDIDATE_FORMATS: &[&str] = &[
    "%d/%b/%Y:%H:%M:%S %z",       // Apache/nginx combined log format
    "%Y-%m-%d %H:%M:%S%.3f",      // Python logging / log4j (comma normalized to '.' first)
    "%a %b %e %H:%M:%S %Y",       // syslog-adjacent banner timestamps
];

/// Normalizes a captured timestamp to RFC 3339 (a strict subset of
/// ISO-8601) when it matches one of the known source formats; otherwise
/// returns the input unchanged.
pub fn normalize(raw: &str) -> String {
    let candidate = raw.replace(',', ".");

    if let Ok(dt) = DateTime::parse_from_str(raw, "%d/%b/%Y:%H:%M:%S %z") {
        return dt.to_rfc3339();
    }

    for fmt in CANDIDATE_FORMATS.iter().skip(1) {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&candidate, fmt) {
            return format!("{}Z", naive.format("%Y-%m-%dT%H:%M:%S%.3f"));
        }
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_apache_combined_log_timestamp() {
        let out = normalize("10/Oct/2023:13:55:36 +0000");
        assert!(out.starts_with("2023-10-10T13:55:36"));
    }

    #[test]
    fn normalizes_python_logging_timestamp() {
        let out = normalize("2023-10-10 13:55:36,001");
        assert_eq!(out, "2023-10-10T13:55:36.001Z");
    }

    #[test]
    fn passes_through_unrecognized_timestamps_unchanged() {
        assert_eq!(normalize("not-a-timestamp"), "not-a-timestamp");
    }
}
