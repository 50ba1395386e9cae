use std::collections::BTreeMap;

use super::events::ExpandedName;

/// A resolved attribute on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// Attributes of one element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Value of an unqualified attribute.
    pub fn get(&self, local_name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.namespace.is_none() && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Value of a namespace-qualified attribute, e.g. `rdf:about`.
    pub fn get_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Like [`get`](Self::get), but treats an empty value as absent.
    pub fn non_empty(&self, local_name: &str) -> Option<&str> {
        self.get(local_name).filter(|v| !v.is_empty())
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    /// Unqualified attributes as a map, for elements stored verbatim.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter(|a| a.namespace.is_none())
            .map(|a| (a.local_name.clone(), a.value.clone()))
            .collect()
    }
}

impl FromIterator<(&'static str, &'static str)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| Attribute {
                    namespace: None,
                    local_name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        )
    }
}

/// An element as seen by namespace handlers.
///
/// `text` accumulates while the element is open and is trimmed before the
/// element's end is dispatched; handlers only read it at the end edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: ExpandedName,
    /// Registered prefix of the element's namespace.
    pub prefix: String,
    pub local_name: String,
    /// `{prefix}-{localName}`, or the bare local name in no namespace.
    pub key: String,
    pub attributes: Attributes,
    pub text: String,
}

impl Element {
    pub fn new(
        name: ExpandedName,
        prefix: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        let prefix = prefix.into();
        let local_name = name.local_name.clone();
        let key = if prefix.is_empty() {
            local_name.clone()
        } else {
            format!("{}-{}", prefix, local_name)
        };
        Self {
            name,
            prefix,
            local_name,
            key,
            attributes,
            text: String::new(),
        }
    }

    /// Non-empty attribute value as an owned string.
    pub fn attr(&self, local_name: &str) -> Option<String> {
        self.attributes.non_empty(local_name).map(str::to_string)
    }

    /// Appends character data.
    ///
    /// Leading whitespace-only chunks are dropped so indentation between
    /// child elements never starts a container's text.
    pub(crate) fn append_text(&mut self, chunk: &str) {
        if self.text.is_empty() && chunk.trim().is_empty() {
            return;
        }
        self.text.push_str(chunk);
    }

    pub(crate) fn finish_text(&mut self) {
        let trimmed = self.text.trim();
        if trimmed.len() != self.text.len() {
            self.text = trimmed.to_string();
        }
    }

    /// The trimmed text, if any.
    pub fn non_empty_text(&self) -> Option<&str> {
        Some(self.text.as_str()).filter(|t| !t.is_empty())
    }
}

/// Open elements, innermost last.
#[derive(Debug, Default)]
pub struct ElementStack {
    elements: Vec<Element>,
}

impl ElementStack {
    pub fn push(&mut self, element: Element) -> &Element {
        let index = self.elements.len();
        self.elements.push(element);
        &self.elements[index]
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    pub fn current_mut(&mut self) -> Option<&mut Element> {
        self.elements.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
