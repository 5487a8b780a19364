//! Vector-sized batched population of the output relation.
//!
//! There is no live DuckDB `DataChunk` to populate here — [`EmittedRow`]
//! is the row shape a host binding would copy into vectors, with column
//! order, nullability, and the NULL-projection rules fixed; `ChunkedEmitter`
//! is the `events`/`cursor` state machine a chunk-pull loop would drive.

use crate::event::{ContentMode, ValidationEvent};
use crate::shaper::{self, ContextLine};

/// One fully-projected output row: every optional-string/int/float column
/// has already had the NULL-projection rules from the external interface
/// section applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedRow {
    pub event_id: i64,
    pub tool_name: Option<String>,
    pub event_type: String,
    pub ref_file: Option<String>,
    pub ref_line: Option<i32>,
    pub ref_column: Option<i32>,
    pub function_name: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub error_code: Option<String>,
    pub message: Option<String>,
    pub suggestion: Option<String>,
    pub log_content: Option<String>,
    pub structured_data: Option<String>,
    pub log_line_start: Option<i32>,
    pub log_line_end: Option<i32>,
    pub log_file: Option<String>,
    pub test_name: Option<String>,
    pub execution_time: f64,
    pub principal: Option<String>,
    pub origin: Option<String>,
    pub target: Option<String>,
    pub actor_type: Option<String>,
    pub started_at: Option<String>,
    pub external_id: Option<String>,
    pub scope: Option<String>,
    pub scope_id: Option<String>,
    pub scope_status: Option<String>,
    pub group: Option<String>,
    pub group_id: Option<String>,
    pub group_status: Option<String>,
    pub unit: Option<String>,
    pub unit_id: Option<String>,
    pub unit_status: Option<String>,
    pub subunit: Option<String>,
    pub subunit_id: Option<String>,
    pub fingerprint: Option<String>,
    pub similarity_score: Option<f64>,
    pub pattern_id: Option<i64>,
    /// Present only when `context_lines > 0` and the source buffer was
    /// available; not part of the fixed column list, an additive column.
    pub context: Option<Vec<ContextLine>>,
}

fn nullable_str(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn nullable_int(v: i32) -> Option<i32> {
    if v == -1 {
        None
    } else {
        Some(v)
    }
}

/// Projects one in-memory event into its emitted row, applying the shaping
/// mode to `log_content` and the full NULL-projection rule table.
pub fn project(
    event: &ValidationEvent,
    content_mode: &ContentMode,
    context_lines: u32,
    source_buffer: Option<&[String]>,
) -> EmittedRow {
    let is_unknown = event.is_unknown();

    let log_content = shaper::shape_content(
        &event.log_content,
        content_mode,
        event.log_line_start,
        event.log_line_end,
    )
    .and_then(|s| if s.is_empty() { None } else { Some(s) });

    let context = shaper::extract_context(
        source_buffer,
        event.log_line_start,
        event.log_line_end,
        context_lines,
    );

    EmittedRow {
        event_id: event.event_id,
        tool_name: Some(event.tool_name.clone()).filter(|s| !s.is_empty()),
        event_type: event.event_type.as_str().to_string(),
        ref_file: nullable_str(&event.ref_file),
        ref_line: nullable_int(event.ref_line),
        ref_column: nullable_int(event.ref_column),
        function_name: nullable_str(&event.function_name),
        status: if is_unknown {
            None
        } else {
            event.status.map(|s| s.as_str().to_string())
        },
        severity: if is_unknown { None } else { nullable_str(&event.severity) },
        category: nullable_str(&event.category),
        error_code: nullable_str(&event.error_code),
        message: nullable_str(&event.message),
        suggestion: nullable_str(&event.suggestion),
        log_content,
        structured_data: nullable_str(&event.structured_data),
        log_line_start: nullable_int(event.log_line_start),
        log_line_end: nullable_int(event.log_line_end),
        log_file: nullable_str(&event.log_file),
        test_name: nullable_str(&event.test_name),
        execution_time: event.execution_time,
        principal: nullable_str(&event.principal),
        origin: nullable_str(&event.origin),
        target: nullable_str(&event.target),
        actor_type: nullable_str(&event.actor_type),
        started_at: nullable_str(&event.started_at),
        external_id: nullable_str(&event.external_id),
        scope: nullable_str(&event.scope),
        scope_id: nullable_str(&event.scope_id),
        scope_status: nullable_str(&event.scope_status),
        group: nullable_str(&event.group),
        group_id: nullable_str(&event.group_id),
        group_status: nullable_str(&event.group_status),
        unit: nullable_str(&event.unit),
        unit_id: nullable_str(&event.unit_id),
        unit_status: nullable_str(&event.unit_status),
        subunit: nullable_str(&event.subunit),
        subunit_id: nullable_str(&event.subunit_id),
        fingerprint: nullable_str(&event.fingerprint),
        similarity_score: if event.similarity_score == 0.0 {
            None
        } else {
            Some(event.similarity_score)
        },
        pattern_id: if event.pattern_id == -1 {
            None
        } else {
            Some(event.pattern_id)
        },
        context,
    }
}

/// The `events`/`cursor` state machine the chunk-pull entry point drives.
pub struct ChunkedEmitter {
    events: Vec<ValidationEvent>,
    cursor: usize,
    vector_size: usize,
    content_mode: ContentMode,
    context_lines: u32,
    source_buffers: std::collections::HashMap<String, Vec<String>>,
}

impl ChunkedEmitter {
    pub fn new(events: Vec<ValidationEvent>, vector_size: usize, content_mode: ContentMode, context_lines: u32) -> Self {
        Self {
            events,
            cursor: 0,
            vector_size,
            content_mode,
            context_lines,
            source_buffers: std::collections::HashMap::new(),
        }
    }

    /// Registers the full line buffer for a source file, enabling the
    /// `context` column for events whose `log_file` matches.
    pub fn with_source_buffer(mut self, log_file: impl Into<String>, lines: Vec<String>) -> Self {
        self.source_buffers.insert(log_file.into(), lines);
        self
    }

    pub fn total_events(&self) -> usize {
        self.events.len()
    }

    /// Emits the next batch, advancing the cursor. Returns an empty vector
    /// exactly once, when the cursor reaches the end — the caller's signal
    /// to terminate the scan.
    pub fn pull(&mut self) -> Vec<EmittedRow> {
        let remaining = self.events.len() - self.cursor;
        let take = remaining.min(self.vector_size);
        let rows: Vec<EmittedRow> = self.events[self.cursor..self.cursor + take]
            .iter()
            .map(|event| {
                let buffer = self.source_buffers.get(&event.log_file).map(|v| v.as_slice());
                project(event, &self.content_mode, self.context_lines, buffer)
            })
            .collect();
        self.cursor += take;
        rows
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ValidationEventStatus, ValidationEventType};

    fn sample_event() -> ValidationEvent {
        let mut e = ValidationEvent::new("pytest", ValidationEventType::TestResult);
        e.status = Some(ValidationEventStatus::Pass);
        e.severity = String::new();
        e.execution_time = 0.0;
        e.similarity_score = 0.0;
        e.pattern_id = -1;
        e.ref_line = -1;
        e
    }

    #[test]
    fn empty_optional_strings_project_to_null() {
        let row = project(&sample_event(), &ContentMode::Full, 0, None);
        assert_eq!(row.severity, None);
        assert_eq!(row.ref_file, None);
    }

    #[test]
    fn sentinel_ints_project_to_null() {
        let row = project(&sample_event(), &ContentMode::Full, 0, None);
        assert_eq!(row.ref_line, None);
        assert_eq!(row.pattern_id, None);
    }

    #[test]
    fn execution_time_zero_is_not_null() {
        let row = project(&sample_event(), &ContentMode::Full, 0, None);
        assert_eq!(row.execution_time, 0.0);
    }

    #[test]
    fn similarity_score_zero_is_null_but_nonzero_is_not() {
        let mut e = sample_event();
        let row = project(&e, &ContentMode::Full, 0, None);
        assert_eq!(row.similarity_score, None);
        e.similarity_score = 0.5;
        let row = project(&e, &ContentMode::Full, 0, None);
        assert_eq!(row.similarity_score, Some(0.5));
    }

    #[test]
    fn unknown_event_type_nulls_status_and_severity() {
        let mut e = sample_event();
        e.event_type = ValidationEventType::Unknown;
        e.severity = "error".to_string();
        let row = project(&e, &ContentMode::Full, 0, None);
        assert_eq!(row.status, None);
        assert_eq!(row.severity, None);
    }

    #[test]
    fn chunked_emitter_terminates_with_empty_pull() {
        let events = vec![sample_event(), sample_event(), sample_event()];
        let mut emitter = ChunkedEmitter::new(events, 2, ContentMode::Full, 0);
        assert_eq!(emitter.pull().len(), 2);
        assert!(!emitter.is_exhausted());
        assert_eq!(emitter.pull().len(), 1);
        assert!(emitter.is_exhausted());
        assert_eq!(emitter.pull().len(), 0);
    }
}
