//! Options parsing and code-path selection.
//!
//! Implements the `format` option's dispatch precedence: a recognized
//! canonical name or alias wins outright; else a group name runs every
//! member by descending priority until one is *productive*; else a
//! `regexp:PATTERN` string builds a dynamic decoder; else auto-detection
//! takes over. Anything else is a bind-time rejection.

use crate::context::ParseContext;
use crate::decoders::regexp::RegexpDecoder;
use crate::detect;
use crate::error::{ScanError, ScanResult};
use crate::event::{ContentMode, SeverityLevel, ValidationEvent};
use crate::registry::Registry;

/// Standalone configuration surface independent of any specific host
/// engine's bind-argument representation; the demo CLI and tests drive the
/// library through this struct directly.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub format: String,
    pub severity_threshold: String,
    pub ignore_errors: bool,
    /// Mirrors the named `content` parameter: `"full"`, `"none"`,
    /// `"smart"`, or an integer encoded as a string (`"200"` → `limit(200)`,
    /// `"0"`/negative → `none`).
    pub content: String,
    pub context_lines: u32,
    pub parallelism: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            severity_threshold: "debug".to_string(),
            ignore_errors: false,
            content: "full".to_string(),
            context_lines: 0,
            parallelism: None,
        }
    }
}

impl ScanOptions {
    /// Loads scan options from a TOML config file — a convenience for
    /// callers driving this crate outside a SQL engine's bind context,
    /// not part of the table-function ABI itself.
    pub fn from_toml_str(s: &str) -> ScanResult<Self> {
        toml::from_str(s).map_err(|e| ScanError::bind(format!("invalid config TOML: {e}")))
    }

    pub fn severity_level(&self) -> SeverityLevel {
        SeverityLevel::from_str_lenient(&self.severity_threshold)
    }

    /// Parses the `content` named parameter per the external-interface
    /// rules: an integer means `limit(k)` (k<=0 means `none`), `"full"` /
    /// `"none"` / `"smart"` are the literal modes.
    pub fn content_mode(&self) -> ScanResult<ContentMode> {
        match self.content.as_str() {
            "full" => Ok(ContentMode::Full),
            "none" => Ok(ContentMode::None),
            "smart" => Ok(ContentMode::Smart(4000)),
            other => other
                .parse::<i64>()
                .map(|k| {
                    if k <= 0 {
                        ContentMode::None
                    } else {
                        ContentMode::Limit(k as usize)
                    }
                })
                .map_err(|_| ScanError::bind(format!("invalid content mode: '{other}'"))),
        }
    }
}

/// Parses content through the resolved code path, returning raw (not yet
/// fingerprinted/filtered/shaped) events.
pub fn dispatch(
    registry: &Registry,
    ctx: &dyn ParseContext,
    format: &str,
    content: &str,
) -> ScanResult<Vec<ValidationEvent>> {
    if format == "auto" {
        return dispatch_auto(registry, ctx, content);
    }

    if let Some(pattern) = format.strip_prefix("regexp:") {
        let decoder = RegexpDecoder::compile(pattern)
            .map_err(|detail| ScanError::Pattern { pattern: pattern.to_string(), detail })?;
        return Ok(decoder.parse(content));
    }

    if registry.has_format(format) {
        let parser = registry.get_by_format(format).unwrap();
        return if parser.metadata().requires_context {
            parser.parse_with_context(ctx, content)
        } else {
            Ok(parser.parse(content))
        };
    }

    if registry.is_group(format) {
        return dispatch_group(registry, ctx, format, content);
    }

    Err(ScanError::bind(format!(
        "unrecognized format '{format}': not a canonical name, alias, group, or regexp: pattern"
    )))
}

/// First parser in the group whose `can_parse` is true AND whose `parse`
/// yields at least one event wins; later members are not attempted after a
/// productive hit. A group where nothing is productive yields zero events,
/// not an error.
fn dispatch_group(
    registry: &Registry,
    ctx: &dyn ParseContext,
    group: &str,
    content: &str,
) -> ScanResult<Vec<ValidationEvent>> {
    for parser in registry.by_group(group) {
        if !parser.can_parse(content) {
            continue;
        }
        let events = if parser.metadata().requires_context {
            parser.parse_with_context(ctx, content)?
        } else {
            parser.parse(content)
        };
        if !events.is_empty() {
            return Ok(events);
        }
    }
    Ok(Vec::new())
}

fn dispatch_auto(
    registry: &Registry,
    ctx: &dyn ParseContext,
    content: &str,
) -> ScanResult<Vec<ValidationEvent>> {
    match detect::detect_format(content, registry) {
        Some(format) => {
            let parser = registry
                .get_by_format(format)
                .ok_or_else(|| ScanError::bind(format!("auto-detected format '{format}' has no registered decoder")))?;
            if parser.metadata().requires_context {
                parser.parse_with_context(ctx, content)
            } else {
                Ok(parser.parse(content))
            }
        }
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_mode_parses_integer_as_limit() {
        let mut opts = ScanOptions::default();
        opts.content = "200".to_string();
        assert_eq!(opts.content_mode().unwrap(), ContentMode::Limit(200));
    }

    #[test]
    fn content_mode_nonpositive_integer_is_none() {
        let mut opts = ScanOptions::default();
        opts.content = "0".to_string();
        assert_eq!(opts.content_mode().unwrap(), ContentMode::None);
    }

    #[test]
    fn content_mode_rejects_garbage() {
        let mut opts = ScanOptions::default();
        opts.content = "not-a-mode".to_string();
        assert!(opts.content_mode().is_err());
    }

    #[test]
    fn unrecognized_format_is_rejected() {
        let registry = Registry::with_defaults();
        let ctx = crate::context::NullContext;
        let result = dispatch(&registry, &ctx, "totally_made_up_format", "content");
        assert!(result.is_err());
    }
}
