//! The capability boundary for decoders that must call a host service.
//!
//! Only the XML-bridge decoders need this today: they depend on an
//! "xml-to-json" facility that a host might only provide at runtime. We
//! model that as a trait object threaded through
//! [`crate::parser::Parser::parse_with_context`] rather than a hard
//! dependency, so a build without an XML bridge available still links and
//! degrades to [`crate::error::ScanError::MissingCapability`].

use crate::error::{ScanError, ScanResult};

/// A host-provided capability a decoder can call mid-parse.
pub trait ParseContext: Send + Sync {
    /// Converts an XML document into its JSON projection, the shape the
    /// XML-bridge decoders (`junit_xml`, `nunit_xml`) expect to walk.
    fn xml_to_json(&self, xml: &str) -> ScanResult<serde_json::Value>;

    fn xml_bridge_available(&self) -> bool;
}

/// A context with no XML bridge wired up. Every capability call fails with
/// a remediation hint, matching `WebbedIntegration::GetWebbedRequiredError`
/// in spirit: tell the caller what's missing, not just that something failed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullContext;

impl ParseContext for NullContext {
    fn xml_to_json(&self, _xml: &str) -> ScanResult<serde_json::Value> {
        Err(ScanError::missing_capability(
            "xml-to-json",
            "no XML bridge is registered; XML-bridge formats (junit_xml, nunit_xml) require a \
             ParseContext that implements xml_to_json",
        ))
    }

    fn xml_bridge_available(&self) -> bool {
        false
    }
}

/// A minimal in-process XML bridge backed by a hand-rolled reader, used by
/// the CLI demo and by tests. Supports the flat/nested element shapes the
/// JUnit/NUnit decoders expect; not a general-purpose XML parser.
pub struct BasicXmlContext;

impl ParseContext for BasicXmlContext {
    fn xml_to_json(&self, xml: &str) -> ScanResult<serde_json::Value> {
        crate::xml_bridge::parse_xml_to_json(xml)
            .map_err(|e| ScanError::decoder("xml-bridge", "xml_to_json", e))
    }

    fn xml_bridge_available(&self) -> bool {
        true
    }
}
