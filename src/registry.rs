//! Owns parser instances; indexes by format name, group, and category; keeps
//! a priority-sorted dispatch view.
//!
//! An explicit, ownable value rather than process-wide mutable singleton
//! state: `register`/`find`/`get_by_format`/`all`/`by_category`, a
//! lazily-recomputed sorted-by-priority cache, and registration-order as
//! the tie-break for equal priority.

use crate::catalog;
use crate::parser::{Parser, ParserCategory};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct Registry {
    parsers: Vec<Arc<dyn Parser>>,
    by_name: HashMap<&'static str, usize>,
    by_alias: HashMap<&'static str, usize>,
    sorted_cache: RwLock<Option<Vec<usize>>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
            by_name: HashMap::new(),
            by_alias: HashMap::new(),
            sorted_cache: RwLock::new(None),
        }
    }

    /// Builds a registry with every decoder this crate ships registered,
    /// an explicit builder in place of static-initializer self-registration.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        crate::decoders::register_all(&mut registry);
        registry
    }

    /// Idempotent on `format_name`: re-registering the same canonical name
    /// replaces the previous decoder rather than appending a duplicate.
    pub fn register(&mut self, parser: impl Parser + 'static) {
        let meta = parser.metadata();
        let arc: Arc<dyn Parser> = Arc::new(parser);

        if let Some(&idx) = self.by_name.get(meta.format_name) {
            self.parsers[idx] = arc;
        } else {
            let idx = self.parsers.len();
            self.parsers.push(arc);
            self.by_name.insert(meta.format_name, idx);
            for alias in meta.aliases {
                self.by_alias.entry(alias).or_insert(idx);
            }
        }
        *self.sorted_cache.write() = None;
    }

    pub fn has_format(&self, name: &str) -> bool {
        self.by_name.contains_key(name) || self.by_alias.contains_key(name)
    }

    pub fn is_group(&self, name: &str) -> bool {
        catalog::is_group(name)
    }

    /// Resolves a canonical name or alias to a decoder.
    pub fn get_by_format(&self, name: &str) -> Option<Arc<dyn Parser>> {
        let resolved = catalog::resolve_builtin_alias(name).unwrap_or(name);
        self.by_name
            .get(resolved)
            .or_else(|| self.by_alias.get(resolved))
            .or_else(|| self.by_alias.get(name))
            .map(|&idx| self.parsers[idx].clone())
    }

    /// All parsers in `group`, sorted by descending priority (stable on
    /// registration order for ties).
    pub fn by_group(&self, group: &str) -> Vec<Arc<dyn Parser>> {
        self.sorted_indices()
            .into_iter()
            .map(|idx| self.parsers[idx].clone())
            .filter(|p| p.metadata().groups.contains(&group))
            .collect()
    }

    pub fn by_category(&self, category: ParserCategory) -> Vec<Arc<dyn Parser>> {
        self.sorted_indices()
            .into_iter()
            .map(|idx| self.parsers[idx].clone())
            .filter(|p| p.metadata().category == category)
            .collect()
    }

    pub fn all(&self) -> Vec<Arc<dyn Parser>> {
        self.sorted_indices()
            .into_iter()
            .map(|idx| self.parsers[idx].clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Iterates parsers in descending priority, returning the first whose
    /// `can_parse` is true. This is the registry-sweep half of two-phase
    /// auto-detection, run after the hand-coded fingerprint cascade.
    pub fn find(&self, content: &str) -> Option<Arc<dyn Parser>> {
        self.sorted_indices()
            .into_iter()
            .map(|idx| self.parsers[idx].clone())
            .find(|p| p.can_parse(content))
    }

    fn sorted_indices(&self) -> Vec<usize> {
        if let Some(cached) = self.sorted_cache.read().as_ref() {
            return cached.clone();
        }
        let mut indices: Vec<usize> = (0..self.parsers.len()).collect();
        indices.sort_by(|&a, &b| {
            self.parsers[b]
                .metadata()
                .priority
                .cmp(&self.parsers[a].metadata().priority)
                .then(a.cmp(&b))
        });
        *self.sorted_cache.write() = Some(indices.clone());
        indices
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseContext;
    use crate::event::{ValidationEvent, ValidationEventType};
    use crate::parser::{ParserMetadata, Priority};

    struct Stub(&'static str, Priority);
    impl Parser for Stub {
        fn metadata(&self) -> ParserMetadata {
            ParserMetadata {
                format_name: self.0,
                display_name: self.0,
                priority: self.1,
                category: ParserCategory::Specialized,
                groups: &["test"],
                aliases: &[],
                command_patterns: &[],
                requires_context: false,
            }
        }
        fn can_parse(&self, content: &str) -> bool {
            content.contains(self.0)
        }
        fn parse(&self, _content: &str) -> Vec<ValidationEvent> {
            vec![ValidationEvent::new(self.0, ValidationEventType::Summary)]
        }
    }

    #[test]
    fn higher_priority_wins_find() {
        let mut reg = Registry::empty();
        reg.register(Stub("low", Priority::LOW));
        reg.register(Stub("high", Priority::HIGH));
        let found = reg.find("contains both low and high").unwrap();
        assert_eq!(found.metadata().format_name, "high");
    }

    #[test]
    fn register_is_idempotent_on_format_name() {
        let mut reg = Registry::empty();
        reg.register(Stub("dup", Priority::LOW));
        reg.register(Stub("dup", Priority::HIGH));
        assert_eq!(reg.len(), 1);
        assert_eq!(
            reg.get_by_format("dup").unwrap().metadata().priority,
            Priority::HIGH
        );
    }

    #[test]
    fn equal_priority_ties_break_on_registration_order() {
        let mut reg = Registry::empty();
        reg.register(Stub("first", Priority::MEDIUM));
        reg.register(Stub("second", Priority::MEDIUM));
        let all = reg.all();
        assert_eq!(all[0].metadata().format_name, "first");
        assert_eq!(all[1].metadata().format_name, "second");
    }

    #[allow(dead_code)]
    fn _assert_context_object_safe(_p: &dyn Parser, _c: &dyn ParseContext) {}
}
