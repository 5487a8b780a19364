//! The decoder contract.
//!
//! Every decoder in [`crate::decoders`] implements [`Parser`]. The trait is
//! deliberately thin: a cheap sniff (`can_parse`), a total deterministic
//! decode (`parse`), and an optional capability-gated decode
//! (`parse_with_context`) for the handful of formats that must call out to
//! [`crate::context::ParseContext`]. Everything else a decoder needs to
//! describe itself lives in [`ParserMetadata`], returned once and cached by
//! the registry rather than recomputed per call.

use crate::context::ParseContext;
use crate::error::ScanResult;
use crate::event::ValidationEvent;

/// The domain a decoder's format belongs to, mirroring the taxonomy named
/// in the component design (build_system | test_framework | linter | ci |
/// logging | network | security | debugger | specialized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserCategory {
    BuildSystem,
    TestFramework,
    Linter,
    Ci,
    Logging,
    Network,
    Security,
    Debugger,
    Specialized,
}

impl ParserCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuildSystem => "build_system",
            Self::TestFramework => "test_framework",
            Self::Linter => "linter",
            Self::Ci => "ci",
            Self::Logging => "logging",
            Self::Network => "network",
            Self::Security => "security",
            Self::Debugger => "debugger",
            Self::Specialized => "specialized",
        }
    }
}

/// Relative rank used to order auto-detection attempts and group dispatch.
/// Higher wins. JSON/XML-shaped formats that can be identified from
/// structure almost for free get `VeryHigh`; text state machines whose
/// `can_parse` is a strong-but-not-exclusive heuristic get `High`, and so
/// on down to the plain-text-style fallback tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(pub i32);

impl Priority {
    pub const VERY_HIGH: Priority = Priority(100);
    pub const HIGH: Priority = Priority(75);
    pub const MEDIUM: Priority = Priority(50);
    pub const LOW: Priority = Priority(25);
}

/// Static descriptive metadata a decoder reports once.
#[derive(Debug, Clone)]
pub struct ParserMetadata {
    pub format_name: &'static str,
    pub display_name: &'static str,
    pub priority: Priority,
    pub category: ParserCategory,
    pub groups: &'static [&'static str],
    pub aliases: &'static [&'static str],
    /// Declared but not yet consulted by any dispatch path — carried for
    /// forward compatibility with command-based detection, same as the
    /// original interface's unused `command_patterns` field.
    pub command_patterns: &'static [&'static str],
    pub requires_context: bool,
}

/// The decoder contract every format implements.
pub trait Parser: Send + Sync {
    fn metadata(&self) -> ParserMetadata;

    /// Cheap heuristic over a prefix of the content. Must not allocate
    /// heavily or fully parse; it exists to let the registry rank
    /// candidates before committing to a full `parse`.
    fn can_parse(&self, content: &str) -> bool;

    /// Total and deterministic: never panics, never performs I/O. Ill-formed
    /// content degrades to an empty vector or a single `event_type=summary`
    /// placeholder — it never returns an error.
    fn parse(&self, content: &str) -> Vec<ValidationEvent>;

    /// Decoders with `requires_context=true` override this; the default
    /// simply ignores the context and calls `parse`, which is correct for
    /// every decoder that declares no capability requirement.
    fn parse_with_context(
        &self,
        _ctx: &dyn ParseContext,
        content: &str,
    ) -> ScanResult<Vec<ValidationEvent>> {
        Ok(self.parse(content))
    }
}
