//! The ~90-entry format decoder catalogue, factored along wire-shape
//! (json / jsonl / text / xml) and domain (test / build / lint / ci / log /
//! trace). [`register_all`] is the explicit builder
//! [`crate::registry::Registry::with_defaults`] calls, enumerating every
//! decoder constructor module-by-module rather than relying on
//! static-initializer self-registration.
//!
//! `regexp` is deliberately not registered here: `regexp:<pattern>` decoders
//! are built on demand at bind time from a user-supplied pattern, not drawn
//! from the static catalogue (see [`crate::bind::dispatch`]).

pub mod json;
pub mod jsonl;
pub mod logfmt;
pub mod logs;
pub mod regexp;
pub mod strace;
pub mod text;
pub mod xml;

use crate::registry::Registry;

pub fn register_all(registry: &mut Registry) {
    json::register_all(registry);
    text::register_all(registry);
    xml::register_all(registry);
    logs::register_all(registry);
    registry.register(jsonl::JsonlDecoder);
    registry.register(logfmt::LogfmtDecoder);
    registry.register(strace::Strace);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_registry_is_non_empty_and_covers_every_wire_shape() {
        let registry = Registry::with_defaults();
        assert!(registry.len() >= 25);
        for name in [
            "pytest_json", "pytest_text", "junit_xml", "jsonl", "logfmt", "syslog", "strace",
        ] {
            assert!(registry.has_format(name), "missing decoder: {name}");
        }
    }
}
