//! Decoders that depend on [`crate::context::ParseContext`]'s XML bridge.

pub mod checkstyle_xml;
pub mod junit_xml;
pub mod nunit_xml;

use crate::registry::Registry;

pub fn register_all(registry: &mut Registry) {
    registry.register(junit_xml::JunitXml);
    registry.register(nunit_xml::NunitXml);
    registry.register(checkstyle_xml::CheckstyleXml);
}
