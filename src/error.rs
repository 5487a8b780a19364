//! Error kinds surfaced across the bind/decode/emit pipeline.
//!
//! One enum covers every failure mode: bind-time validation, I/O, a missing
//! host capability, a decoder-internal failure, and a malformed
//! user-supplied regex. `Display` messages are written to be actionable
//! on their own, independent of surrounding context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("bind error: {0}")]
    Bind(String),

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing capability '{capability}': {detail}")]
    MissingCapability { capability: String, detail: String },

    #[error("decoder '{format}' failed on {context}: {detail}")]
    Decoder {
        format: String,
        context: String,
        detail: String,
    },

    #[error("invalid pattern '{pattern}': {detail}")]
    Pattern { pattern: String, detail: String },

    #[error("source not found: {0}")]
    NotFound(String),
}

impl ScanError {
    pub fn bind(msg: impl Into<String>) -> Self {
        Self::Bind(msg.into())
    }

    pub fn missing_capability(capability: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MissingCapability {
            capability: capability.into(),
            detail: detail.into(),
        }
    }

    pub fn decoder(
        format: impl Into<String>,
        context: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Decoder {
            format: format.into(),
            context: context.into(),
            detail: detail.into(),
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
