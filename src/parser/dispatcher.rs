//! Routes XML events to namespace handlers.

use std::collections::HashMap;

use crate::handlers::HandlerFactory;
use crate::model::ExtensionValue;

use super::context::FeedContext;
use super::diagnostics::Diagnostic;
use super::element::{Attributes, Element, ElementStack};
use super::events::{ExpandedName, XmlEvent};
use super::namespaces::{NamespaceTable, UNKNOWN_PREFIX};
use super::{ParseError, Parsed};

/// `rss` root versions handled by the unqualified RSS handler. A missing
/// version attribute is treated the same way.
const SUPPORTED_RSS_VERSIONS: &[&str] = &["2.0", "0.91", "0.92", "0.93", "0.94"];

/// Drives one parse: owns the element stack, the per-parse handler
/// instances and the shared [`FeedContext`].
#[derive(Debug)]
pub struct Dispatcher {
    namespaces: NamespaceTable,
    registry: super::registry::HandlerRegistry,
    stack: ElementStack,
    context: FeedContext,
    /// Prefix for unqualified elements, decided by the root element.
    default_prefix: Option<String>,
    root_seen: bool,
    max_depth: usize,
}

impl Dispatcher {
    pub fn new(
        namespaces: NamespaceTable,
        custom_handlers: HashMap<String, HandlerFactory>,
        max_depth: usize,
    ) -> Self {
        Self {
            namespaces,
            registry: super::registry::HandlerRegistry::new(custom_handlers),
            stack: ElementStack::default(),
            context: FeedContext::new(),
            default_prefix: None,
            root_seen: false,
            max_depth,
        }
    }

    pub fn context(&self) -> &FeedContext {
        &self.context
    }

    pub fn handle(&mut self, event: XmlEvent) -> Result<(), ParseError> {
        match event {
            XmlEvent::StartNamespace { prefix, uri } => {
                self.start_namespace(prefix.as_deref(), &uri);
                Ok(())
            }
            XmlEvent::Start { name, attributes } => self.start_element(name, attributes),
            XmlEvent::Text(text) => {
                self.character_data(&text);
                Ok(())
            }
            XmlEvent::End { name } => self.end_element(&name),
        }
    }

    /// A namespace declaration in the document.
    ///
    /// Unknown URIs are registered under the document's own prefix unless
    /// that prefix is already taken. The handler for the namespace is
    /// instantiated right away so a missing one is reported once, here.
    pub fn start_namespace(&mut self, prefix: Option<&str>, uri: &str) {
        if self.namespaces.prefix_for(uri).is_none() {
            match prefix {
                Some(prefix) if !prefix.is_empty() && !self.namespaces.is_prefix_claimed(prefix) => {
                    if self.namespaces.register(uri, prefix).is_err() {
                        self.context.diagnose(Diagnostic::InvalidPrefix {
                            uri: uri.to_string(),
                            prefix: prefix.to_string(),
                        });
                        return;
                    }
                    tracing::debug!(uri = %uri, prefix = %prefix, "Registered document namespace");
                }
                _ => {
                    self.context.diagnose(Diagnostic::UnknownNamespace {
                        uri: uri.to_string(),
                    });
                    return;
                }
            }
        }

        let Some(prefix) = self.namespaces.prefix_for(uri).map(str::to_string) else {
            return;
        };
        if self.registry.resolve(&prefix).is_none() {
            self.context.diagnose(Diagnostic::NoHandler {
                prefix,
                element: None,
            });
        }
    }

    pub fn start_element(
        &mut self,
        name: ExpandedName,
        attributes: Attributes,
    ) -> Result<(), ParseError> {
        if self.stack.depth() >= self.max_depth {
            return Err(ParseError::MaxDepthExceeded(self.max_depth));
        }
        if !self.root_seen {
            self.root_seen = true;
            self.detect_dialect(&name, &attributes);
        }

        let (resolved, diagnostic) = self
            .namespaces
            .resolve(&name, self.default_prefix.as_deref());
        if let Some(diagnostic) = diagnostic {
            self.context.diagnose(diagnostic);
        }

        let element = self
            .stack
            .push(Element::new(name, resolved.prefix, attributes));
        match self.registry.resolve(&element.prefix) {
            Some(handler) => handler.start(element, &mut self.context),
            // Unknown namespaces were already reported by the resolver.
            None if element.prefix == UNKNOWN_PREFIX => {}
            None => self.context.diagnose(Diagnostic::NoHandler {
                prefix: element.prefix.clone(),
                element: Some(element.local_name.clone()),
            }),
        }
        Ok(())
    }

    pub fn character_data(&mut self, text: &str) {
        if let Some(element) = self.stack.current_mut() {
            element.append_text(text);
        }
    }

    pub fn end_element(&mut self, name: &ExpandedName) -> Result<(), ParseError> {
        let Some(mut element) = self.stack.pop() else {
            return Err(ParseError::UnbalancedEnd(name.to_string()));
        };
        if element.name != *name {
            return Err(ParseError::MismatchedEnd {
                expected: element.name.to_string(),
                found: name.to_string(),
            });
        }
        element.finish_text();

        let was_in_entry = self.context.in_entry;
        if let Some(handler) = self.registry.resolve(&element.prefix) {
            handler.end(&element, &mut self.context);
        }
        if was_in_entry && !self.context.in_entry {
            self.context.flush_entry();
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Parsed, ParseError> {
        if !self.root_seen {
            return Err(ParseError::NoRootElement);
        }
        if !self.stack.is_empty() {
            return Err(ParseError::UnclosedElements(self.stack.depth()));
        }
        tracing::trace!(handlers = self.registry.instantiated(), "Dispatch finished");
        let (feed, diagnostics) = self.context.into_parts();
        Ok(Parsed { feed, diagnostics })
    }

    /// Picks the handler for unqualified elements from the root element.
    fn detect_dialect(&mut self, name: &ExpandedName, attributes: &Attributes) {
        if name.namespace.is_some() {
            return;
        }
        let default = match name.local_name.as_str() {
            "rss" => {
                let version = attributes.get("version");
                if let Some(version) = version {
                    self.context
                        .feed
                        .extensions
                        .insert("rss-version", ExtensionValue::from(version));
                }
                match version {
                    None => self.namespaces.prefix_for("").map(str::to_string),
                    Some(v) if SUPPORTED_RSS_VERSIONS.contains(&v) => {
                        self.namespaces.prefix_for("").map(str::to_string)
                    }
                    Some(v) => {
                        self.context.diagnose(Diagnostic::UnsupportedRssVersion {
                            version: v.to_string(),
                        });
                        let digits: String = v.chars().filter(char::is_ascii_digit).collect();
                        Some(format!("rss{}", digits))
                    }
                }
            }
            "feed" => self.namespaces.prefix_for(super::namespaces::uri::ATOM).map(str::to_string),
            "RDF" => self.namespaces.prefix_for(super::namespaces::uri::RDF).map(str::to_string),
            _ => None,
        };
        tracing::debug!(root = %name, dialect = ?default, "Detected feed dialect");
        self.default_prefix = default;
    }
}
