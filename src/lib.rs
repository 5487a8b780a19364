//! Ingests heterogeneous developer-tool output — test runners, linters,
//! compilers, debuggers, CI logs, structured application/infra logs — and
//! emits a normalized tabular stream of validation events.
//!
//! The crate is organized around the twelve components of the design: an
//! [`event`] model every decoder produces, a [`catalog`] of legal format
//! names, a [`parser`] contract implemented by each entry in [`decoders`],
//! a [`registry`] that owns and indexes them, [`detect`]ion for `format =
//! auto`, a [`fingerprint`]/cluster post-processing pass, a [`severity`]
//! threshold filter, a content [`shaper`], a [`source`] expander for
//! file/glob/inline resolution, a chunked [`emitter`], and a [`bind`] shim
//! that ties option parsing to code-path selection. [`scan::run`] composes
//! all of it into the single entry point a host embedding this crate
//! outside a live query engine would call directly.

pub mod bind;
pub mod catalog;
pub mod context;
pub mod decoders;
pub mod detect;
pub mod emitter;
pub mod error;
pub mod event;
pub mod fingerprint;
pub mod parser;
pub mod registry;
pub mod scan;
pub mod severity;
pub mod shaper;
pub mod source;
pub mod timefmt;
pub mod xml_bridge;

pub mod cli;
pub mod commands;

pub use bind::ScanOptions;
pub use context::{BasicXmlContext, NullContext, ParseContext};
pub use emitter::{ChunkedEmitter, EmittedRow};
pub use error::{ScanError, ScanResult};
pub use event::{ContentMode, SeverityLevel, ValidationEvent, ValidationEventStatus, ValidationEventType};
pub use parser::{Parser, ParserCategory, ParserMetadata, Priority};
pub use registry::Registry;
