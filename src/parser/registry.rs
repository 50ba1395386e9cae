use std::collections::HashMap;
use std::fmt;

use crate::handlers::{self, HandlerFactory, NamespaceHandler};

/// Per-parse handler instances, created lazily from their factories.
///
/// Resolution is get-or-insert: every element of a prefix within one parse
/// reaches the same instance, so container state survives between the
/// start and end of an element.
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
    instances: HashMap<String, Box<dyn NamespaceHandler>>,
}

impl HandlerRegistry {
    /// A registry over the built-in handlers plus `custom` factories,
    /// which win over built-ins of the same prefix.
    pub fn new(custom: HashMap<String, HandlerFactory>) -> Self {
        Self {
            factories: custom,
            instances: HashMap::new(),
        }
    }

    fn factory(&self, prefix: &str) -> Option<HandlerFactory> {
        self.factories
            .get(prefix)
            .copied()
            .or_else(|| handlers::builtin(prefix))
    }

    /// The handler for `prefix`, instantiating it on first use.
    pub fn resolve(&mut self, prefix: &str) -> Option<&mut (dyn NamespaceHandler + 'static)> {
        if !self.instances.contains_key(prefix) {
            let factory = self.factory(prefix)?;
            self.instances.insert(prefix.to_string(), factory());
        }
        self.instances.get_mut(prefix).map(|handler| &mut **handler)
    }

    /// Number of handlers instantiated so far.
    pub fn instantiated(&self) -> usize {
        self.instances.len()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut active: Vec<_> = self.instances.keys().collect();
        active.sort();
        f.debug_struct("HandlerRegistry")
            .field("custom", &self.factories.len())
            .field("active", &active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Element, FeedContext};

    #[derive(Default)]
    struct Counting(usize);

    impl NamespaceHandler for Counting {
        fn start(&mut self, _element: &Element, ctx: &mut FeedContext) {
            self.0 += 1;
            ctx.feed.id = Some(self.0.to_string());
        }

        fn end(&mut self, _element: &Element, _ctx: &mut FeedContext) {}
    }

    fn counting() -> Box<dyn NamespaceHandler> {
        Box::new(Counting::default())
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut registry = HandlerRegistry::default();
        let first = registry.resolve("atom").expect("atom handler") as *mut dyn NamespaceHandler
            as *mut ();
        let second = registry.resolve("atom").expect("atom handler") as *mut dyn NamespaceHandler
            as *mut ();
        assert_eq!(first, second);
        assert_eq!(registry.instantiated(), 1);
    }

    #[test]
    fn test_unknown_prefix_has_no_handler() {
        let mut registry = HandlerRegistry::default();
        assert!(registry.resolve("xhtml").is_none());
        assert!(registry.resolve("unknown").is_none());
        assert_eq!(registry.instantiated(), 0);
    }

    #[test]
    fn test_custom_factory_keeps_state() {
        let mut custom = HashMap::new();
        custom.insert("ex".to_string(), counting as HandlerFactory);
        let mut registry = HandlerRegistry::new(custom);
        let mut ctx = FeedContext::new();
        let element = Element::new(
            crate::parser::ExpandedName::new(Some("http://example.com/ns"), "thing"),
            "ex",
            Default::default(),
        );

        for _ in 0..3 {
            registry
                .resolve("ex")
                .expect("custom handler")
                .start(&element, &mut ctx);
        }
        assert_eq!(ctx.feed.id.as_deref(), Some("3"));
    }
}
