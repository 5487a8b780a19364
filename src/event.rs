//! The wide validation-event record and its enum vocabulary.
//!
//! Every decoder in [`crate::decoders`] produces [`ValidationEvent`] values;
//! nothing downstream constructs one from scratch. Field semantics mirror the
//! external schema in [`crate::emitter`] verbatim — this struct is the
//! in-memory shape, the emitter's chunk population is the wire shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of finding a decoder produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationEventType {
    TestResult,
    LintIssue,
    TypeError,
    SecurityFinding,
    BuildError,
    PerformanceIssue,
    MemoryError,
    MemoryLeak,
    ThreadError,
    PerformanceMetric,
    Summary,
    DebugEvent,
    CrashSignal,
    DebugInfo,
    Unknown,
}

impl ValidationEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestResult => "test_result",
            Self::LintIssue => "lint_issue",
            Self::TypeError => "type_error",
            Self::SecurityFinding => "security_finding",
            Self::BuildError => "build_error",
            Self::PerformanceIssue => "performance_issue",
            Self::MemoryError => "memory_error",
            Self::MemoryLeak => "memory_leak",
            Self::ThreadError => "thread_error",
            Self::PerformanceMetric => "performance_metric",
            Self::Summary => "summary",
            Self::DebugEvent => "debug_event",
            Self::CrashSignal => "crash_signal",
            Self::DebugInfo => "debug_info",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for ValidationEventType {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Outcome of the referenced test/check/syscall, not of the parse itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationEventStatus {
    Pass,
    Fail,
    Skip,
    Error,
    Warning,
    Info,
}

impl ValidationEventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Ordered severity, used only by the threshold filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl SeverityLevel {
    /// Maps a free-text severity string (case-insensitive) to a level.
    /// Unrecognized strings map to `Info` so they pass the default
    /// threshold rather than being silently dropped.
    pub fn from_str_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Self::Debug,
            "warning" | "warn" => Self::Warning,
            "error" | "err" => Self::Error,
            "critical" | "fatal" | "crit" => Self::Critical,
            "info" | "information" | "" => Self::Info,
            _ => Self::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

/// How `log_content` is shaped at emission time.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentMode {
    Full,
    None,
    Limit(usize),
    Smart(usize),
}

impl Default for ContentMode {
    fn default() -> Self {
        Self::Full
    }
}

/// A single normalized record in the output relation.
///
/// Every field is logically optional except `tool_name` and `event_type`;
/// emission-time NULL projection is handled entirely in
/// [`crate::emitter`] — this struct stores "absent" using sentinel values
/// (`-1` for unset line/pattern ids, `0.0` for unset durations) rather
/// than emitting NULLs itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub event_id: i64,
    pub tool_name: String,
    pub event_type: ValidationEventType,

    pub ref_file: String,
    pub ref_line: i32,
    pub ref_column: i32,
    pub function_name: String,

    pub status: Option<ValidationEventStatus>,
    pub severity: String,
    pub category: String,
    pub error_code: String,

    pub message: String,
    pub suggestion: String,
    pub log_content: String,
    pub structured_data: String,

    pub log_line_start: i32,
    pub log_line_end: i32,
    pub log_file: String,

    pub test_name: String,
    pub execution_time: f64,

    pub principal: String,
    pub origin: String,
    pub target: String,
    pub actor_type: String,

    pub started_at: String,
    pub external_id: String,

    pub scope: String,
    pub scope_id: String,
    pub scope_status: String,
    pub group: String,
    pub group_id: String,
    pub group_status: String,
    pub unit: String,
    pub unit_id: String,
    pub unit_status: String,
    pub subunit: String,
    pub subunit_id: String,

    pub fingerprint: String,
    pub similarity_score: f64,
    pub pattern_id: i64,

    /// Free-form fields a decoder captured but that have no dedicated
    /// column; folded into `structured_data` at emission if non-empty and
    /// `structured_data` itself is still blank.
    #[serde(default)]
    pub extra_fields: HashMap<String, serde_json::Value>,
}

impl ValidationEvent {
    pub fn new(tool_name: impl Into<String>, event_type: ValidationEventType) -> Self {
        Self {
            tool_name: tool_name.into(),
            event_type,
            ref_line: -1,
            ref_column: -1,
            log_line_start: -1,
            log_line_end: -1,
            pattern_id: -1,
            execution_time: 0.0,
            similarity_score: 0.0,
            ..Default::default()
        }
    }

    /// Sets the source line span for this event (1-based, inclusive).
    pub fn with_log_lines(mut self, start: i32, end: i32) -> Self {
        self.log_line_start = start;
        self.log_line_end = end;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_status(mut self, status: ValidationEventStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// `event_type=unknown` always emits `status`/`severity` as NULL,
    /// regardless of whatever a decoder set — enforced once here so every
    /// decoder doesn't need to remember it.
    pub fn is_unknown(&self) -> bool {
        self.event_type == ValidationEventType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_has_absent_sentinels() {
        let ev = ValidationEvent::new("pytest", ValidationEventType::TestResult);
        assert_eq!(ev.ref_line, -1);
        assert_eq!(ev.ref_column, -1);
        assert_eq!(ev.log_line_start, -1);
        assert_eq!(ev.log_line_end, -1);
        assert_eq!(ev.pattern_id, -1);
        assert_eq!(ev.execution_time, 0.0);
        assert_eq!(ev.similarity_score, 0.0);
    }

    #[test]
    fn severity_from_str_is_case_insensitive() {
        assert_eq!(SeverityLevel::from_str_lenient("ERROR"), SeverityLevel::Error);
        assert_eq!(SeverityLevel::from_str_lenient("Warn"), SeverityLevel::Warning);
        assert_eq!(SeverityLevel::from_str_lenient("bogus"), SeverityLevel::Info);
        assert_eq!(SeverityLevel::from_str_lenient(""), SeverityLevel::Info);
    }

    #[test]
    fn severity_ordering() {
        assert!(SeverityLevel::Debug < SeverityLevel::Info);
        assert!(SeverityLevel::Info < SeverityLevel::Warning);
        assert!(SeverityLevel::Warning < SeverityLevel::Error);
        assert!(SeverityLevel::Error < SeverityLevel::Critical);
    }
}
