//! Source resolution and multi-file expansion.
//!
//! `expand` tries each candidate in turn: literal file, then glob, then
//! (for directory-shaped sources) the common test-output globs, then "not
//! found" — at which point the caller treats the input string as inline
//! content rather than a path.

use crate::bind;
use crate::context::ParseContext;
use crate::error::{ScanError, ScanResult};
use crate::event::ValidationEvent;
use crate::registry::Registry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

const COMMON_GLOBS: &[&str] = &["*.xml", "*.json", "*.txt", "*.log", "*.out"];

pub fn expand(source: &str) -> Result<Vec<PathBuf>, ScanError> {
    let path = Path::new(source);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if let Ok(paths) = glob::glob(source) {
        let matches: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
        if !matches.is_empty() {
            return Ok(matches);
        }
    }

    if source.ends_with('/') || path.is_dir() {
        let mut matches = Vec::new();
        for pattern in COMMON_GLOBS {
            let full = format!("{}/{}", source.trim_end_matches('/'), pattern);
            if let Ok(paths) = glob::glob(&full) {
                matches.extend(paths.filter_map(Result::ok));
            }
        }
        if !matches.is_empty() {
            return Ok(matches);
        }
    }

    Err(ScanError::NotFound(source.to_string()))
}

/// Reads each file independently, back-filling `log_file` on every emitted
/// event. An I/O failure on a single file is always swallowed (partial-read
/// robustness); any other decoder-surfaced error is swallowed only when
/// `ignore_errors` is set.
pub fn read_files(paths: &[PathBuf], ignore_errors: bool) -> Vec<(PathBuf, String)> {
    use rayon::prelude::*;

    paths
        .par_iter()
        .filter_map(|path| match std::fs::read_to_string(path) {
            Ok(contents) => Some((path.clone(), contents)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                let _ = ignore_errors; // IOException is always skipped, regardless of the flag
                None
            }
        })
        .collect()
}

/// One unit of work for [`process_multi`]: either a resolved file path, or
/// (when a source string resolved to zero files) the source string itself
/// treated as inline content.
enum Unit {
    File(PathBuf, String),
    Inline(String),
}

/// Expands every source string, reads matched files in parallel, then
/// dispatches each unit through [`bind::dispatch`] independently. An I/O
/// error on a single file is always skipped; any other decoder error is
/// skipped iff `ignore_errors`, re-raised otherwise. Every event inherits
/// its file's path into `log_file` when the decoder itself left that
/// field unset. Ordering follows source order, then file order within
/// each expanded source.
pub fn process_multi(
    sources: &[String],
    registry: &Registry,
    ctx: &dyn ParseContext,
    format: &str,
    ignore_errors: bool,
) -> ScanResult<Vec<ValidationEvent>> {
    let mut units = Vec::new();
    for source in sources {
        match expand(source) {
            Ok(paths) => {
                for (path, contents) in read_files(&paths, ignore_errors) {
                    units.push(Unit::File(path, contents));
                }
            }
            Err(_) => units.push(Unit::Inline(source.clone())),
        }
    }

    use rayon::prelude::*;
    let decoded: Vec<ScanResult<Vec<ValidationEvent>>> = units
        .par_iter()
        .map(|unit| {
            let content = match unit {
                Unit::File(_, contents) => contents.as_str(),
                Unit::Inline(contents) => contents.as_str(),
            };
            bind::dispatch(registry, ctx, format, content)
        })
        .collect();

    let mut all_events = Vec::new();
    for (unit, result) in units.into_iter().zip(decoded.into_iter()) {
        let events = match result {
            Ok(events) => events,
            Err(e) if ignore_errors => {
                tracing::debug!(error = %e, "skipping decoder error for unit");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        if let Unit::File(path, _) = unit {
            let path_str = path.to_string_lossy().to_string();
            let mut events = events;
            for event in events.iter_mut() {
                if event.log_file.is_empty() {
                    event.log_file = path_str.clone();
                }
            }
            all_events.extend(events);
        } else {
            all_events.extend(events);
        }
    }

    Ok(all_events)
}

static BUILD_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"build-([A-Za-z0-9_.-]+)").unwrap());
static ENV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"env-([A-Za-z0-9_.-]+)").unwrap());

/// Best-effort `build-<id>` / `env-<name>` path-segment extraction, used
/// only to backfill `external_id`-adjacent hints a decoder left unset.
pub fn infer_build_id(path: &Path) -> Option<String> {
    BUILD_ID_RE
        .captures(path.to_string_lossy().as_ref())
        .map(|c| c[1].to_string())
}

pub fn infer_environment(path: &Path) -> Option<String> {
    ENV_RE
        .captures(path.to_string_lossy().as_ref())
        .map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_not_found() {
        let result = expand("/this/path/definitely/does/not/exist/**/*.zzz");
        assert!(result.is_err());
    }

    #[test]
    fn build_id_and_environment_inference() {
        let path = Path::new("/logs/build-1234/env-staging/out.log");
        assert_eq!(infer_build_id(path), Some("1234".to_string()));
        assert_eq!(infer_environment(path), Some("staging".to_string()));
    }

    #[test]
    fn no_build_id_when_absent() {
        let path = Path::new("/logs/out.log");
        assert_eq!(infer_build_id(path), None);
    }

    #[test]
    fn process_multi_treats_unresolved_source_as_inline_content() {
        let registry = Registry::with_defaults();
        let ctx = crate::context::NullContext;
        let content = "test_a.py::test_ok PASSED\n============= 1 passed in 0.01s =============";
        let events = process_multi(&[content.to_string()], &registry, &ctx, "pytest_text", false).unwrap();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.log_file.is_empty()));
    }

    #[test]
    fn process_multi_backfills_log_file_for_real_files() {
        let dir = std::env::temp_dir().join("duck_hunt_log_source_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.txt");
        std::fs::write(&path, "test_a.py::test_ok PASSED\n").unwrap();

        let registry = Registry::with_defaults();
        let ctx = crate::context::NullContext;
        let events = process_multi(
            &[path.to_string_lossy().to_string()],
            &registry,
            &ctx,
            "pytest_text",
            false,
        )
        .unwrap();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| !e.log_file.is_empty()));

        std::fs::remove_file(&path).ok();
    }
}
