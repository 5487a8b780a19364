//! End-to-end orchestration tying source expansion through chunked
//! emission together for callers outside a live query engine's bind
//! context — the demo CLI and the integration tests.
//!
//! A host engine drives this sequence itself via `init-global` (source
//! expansion, dispatch, fingerprinting, filtering — everything up to
//! `ChunkedEmitter::new`) followed by repeated `init-local`/chunk-pull calls
//! against the resulting [`crate::emitter::ChunkedEmitter`]. [`run`]
//! collapses that same sequence into one call for callers that just want
//! the fully materialized row set.

use crate::bind::ScanOptions;
use crate::context::ParseContext;
use crate::emitter::{ChunkedEmitter, EmittedRow};
use crate::error::ScanResult;
use crate::event::ValidationEvent;
use crate::fingerprint;
use crate::registry::Registry;
use crate::severity;
use crate::source;

const DEFAULT_VECTOR_SIZE: usize = 2048;

/// Runs the full pipeline — expand, dispatch, fingerprint, filter, shape —
/// and returns every emitted row. Equivalent to pulling a
/// [`crate::emitter::ChunkedEmitter`] until it's exhausted.
pub fn run(
    sources: &[String],
    options: &ScanOptions,
    registry: &Registry,
    ctx: &dyn ParseContext,
) -> ScanResult<Vec<EmittedRow>> {
    let events = decode_and_postprocess(sources, options, registry, ctx)?;
    let content_mode = options.content_mode()?;
    let mut emitter = ChunkedEmitter::new(events, DEFAULT_VECTOR_SIZE, content_mode, options.context_lines);

    let mut rows = Vec::new();
    loop {
        let chunk = emitter.pull();
        if chunk.is_empty() {
            break;
        }
        rows.extend(chunk);
    }
    Ok(rows)
}

/// The `init-global`-equivalent half of the pipeline: everything up to (but
/// not including) chunked emission. Exposed separately so callers that want
/// to drive [`ChunkedEmitter`] themselves (e.g. to register source line
/// buffers for the `context` column) don't have to re-implement source
/// expansion, fingerprinting, and severity filtering.
pub fn decode_and_postprocess(
    sources: &[String],
    options: &ScanOptions,
    registry: &Registry,
    ctx: &dyn ParseContext,
) -> ScanResult<Vec<ValidationEvent>> {
    let mut events = source::process_multi(sources, registry, ctx, &options.format, options.ignore_errors)?;
    fingerprint::process_events(&mut events);
    let mut events = severity::filter_by_severity(events, options.severity_level());
    for (idx, event) in events.iter_mut().enumerate() {
        event.event_id = idx as i64 + 1;
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NullContext;

    #[test]
    fn pytest_scenario_end_to_end() {
        let content = "test_a.py::test_ok PASSED\n\
             test_a.py::test_bad FAILED\n\
             ============= FAILURES =============\n\
             ___ test_bad ___\n\
             test_a.py:7: AssertionError: expected 1 got 2\n\
             ============= 1 passed, 1 failed in 0.12s =============";

        let registry = Registry::with_defaults();
        let options = ScanOptions { format: "pytest_text".to_string(), ..ScanOptions::default() };
        let rows = run(&[content.to_string()], &options, &registry, &NullContext).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].status.as_deref(), Some("pass"));
        assert_eq!(rows[1].status.as_deref(), Some("fail"));
        assert_eq!(rows[1].ref_line, Some(7));
        assert_eq!(rows[2].event_type, "summary");

        assert_eq!(rows[0].event_id, 1);
        assert_eq!(rows[1].event_id, 2);
        assert_eq!(rows[2].event_id, 3);
    }

    #[test]
    fn severity_threshold_drops_low_severity_rows() {
        let content = r#"{"msg":"low","level":"debug","a":1,"b":2}
{"msg":"high","level":"error","a":1,"b":2}"#;
        let registry = Registry::with_defaults();
        let mut options = ScanOptions { format: "jsonl".to_string(), ..ScanOptions::default() };
        options.severity_threshold = "error".to_string();
        let rows = run(&[content.to_string()], &options, &registry, &NullContext).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].severity.as_deref(), Some("error"));
    }
}
