//! Namespace-resolved XML event stream.
//!
//! Wraps a `quick_xml::NsReader` and turns its output into the four events
//! the dispatcher consumes. Namespace declarations surface as their own
//! events, delivered before the start tag that carries them, and are not
//! repeated in that tag's attribute list.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;
use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;

use super::element::{Attribute, Attributes};
use super::ParseError;

/// An element or attribute name after namespace resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    /// Namespace URI; `None` for names in no namespace.
    pub namespace: Option<String>,
    pub local_name: String,
}

impl ExpandedName {
    pub fn new(namespace: Option<&str>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local_name: local_name.into(),
        }
    }

    /// A name in no namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self::new(None, local_name)
    }

    /// Splits a raw `uri:local` string on its last colon.
    ///
    /// Event sources that report names as one joined string (URIs contain
    /// colons themselves) can be bridged through this.
    pub fn from_raw(raw: &str) -> Self {
        match raw.rsplit_once(':') {
            Some((namespace, local)) => Self::new(Some(namespace), local),
            None => Self::local(raw),
        }
    }
}

impl fmt::Display for ExpandedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// What the dispatcher reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// `xmlns` (prefix `None`) or `xmlns:prefix` declaration.
    StartNamespace { prefix: Option<String>, uri: String },
    Start {
        name: ExpandedName,
        attributes: Attributes,
    },
    /// Unescaped character data; CDATA sections arrive here too.
    Text(String),
    End { name: ExpandedName },
}

/// Pulls [`XmlEvent`]s out of a byte stream.
///
/// Malformed XML (mismatched tags, bad escapes, invalid attributes) surfaces
/// as a [`ParseError`]; the iterator stops after the first error.
pub struct EventSource<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    pending: VecDeque<XmlEvent>,
    finished: bool,
}

impl<R: BufRead> EventSource<R> {
    pub fn new(input: R) -> Self {
        let mut reader = NsReader::from_reader(input);
        // Self-closing tags become Start + End so handlers see both edges.
        reader.config_mut().expand_empty_elements = true;
        reader.config_mut().trim_text(false);

        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Returns the next event, or `None` once the document is exhausted.
    pub fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            if self.finished {
                return Ok(None);
            }

            self.buf.clear();
            let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
            let namespace = namespace_uri(resolved);

            match event {
                Event::Start(start) => {
                    let (declarations, attributes) = read_attributes(&self.reader, &start)?;
                    let local_name = decode(&self.reader, start.local_name().as_ref())?;
                    self.pending.extend(declarations);
                    self.pending.push_back(XmlEvent::Start {
                        name: ExpandedName {
                            namespace,
                            local_name,
                        },
                        attributes,
                    });
                }
                Event::End(end) => {
                    let local_name = decode(&self.reader, end.local_name().as_ref())?;
                    self.pending.push_back(XmlEvent::End {
                        name: ExpandedName {
                            namespace,
                            local_name,
                        },
                    });
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if !text.is_empty() {
                        self.pending.push_back(XmlEvent::Text(text.into_owned()));
                    }
                }
                Event::CData(cdata) => {
                    let text = self
                        .reader
                        .decoder()
                        .decode(&cdata)
                        .map_err(quick_xml::Error::from)?;
                    if !text.is_empty() {
                        self.pending.push_back(XmlEvent::Text(text.into_owned()));
                    }
                }
                Event::Eof => self.finished = true,
                // Declarations, comments, processing instructions, doctype.
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for EventSource<R> {
    type Item = Result<XmlEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event() {
            Ok(event) => event.map(Ok),
            Err(e) => {
                self.finished = true;
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound => None,
        // An undeclared prefix can never match a registered URI.
        ResolveResult::Unknown(prefix) => Some(format!(
            "urn:undeclared-prefix:{}",
            String::from_utf8_lossy(&prefix)
        )),
    }
}

fn decode<R>(reader: &NsReader<R>, bytes: &[u8]) -> Result<String, ParseError> {
    let text = reader
        .decoder()
        .decode(bytes)
        .map_err(quick_xml::Error::from)?;
    Ok(text.into_owned())
}

/// Splits a start tag's attributes into namespace declarations and
/// ordinary (resolved) attributes.
fn read_attributes<R>(
    reader: &NsReader<R>,
    start: &BytesStart<'_>,
) -> Result<(Vec<XmlEvent>, Attributes), ParseError> {
    let mut declarations = Vec::new();
    let mut attributes = Attributes::default();

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();

        if let Some(binding) = attr.key.as_namespace_binding() {
            let prefix = match binding {
                PrefixDeclaration::Default => None,
                PrefixDeclaration::Named(prefix) => Some(decode(reader, prefix)?),
            };
            declarations.push(XmlEvent::StartNamespace { prefix, uri: value });
            continue;
        }

        let (resolved, local) = reader.resolve_attribute(attr.key);
        let local_name = decode(reader, local.as_ref())?;
        attributes.push(Attribute {
            namespace: namespace_uri(resolved),
            local_name,
            value,
        });
    }

    Ok((declarations, attributes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(xml: &str) -> Vec<XmlEvent> {
        EventSource::new(xml.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .expect("well-formed test document")
    }

    #[test]
    fn test_from_raw_splits_on_last_colon() {
        let name = ExpandedName::from_raw("http://www.w3.org/2005/Atom:link");
        assert_eq!(name.namespace.as_deref(), Some("http://www.w3.org/2005/Atom"));
        assert_eq!(name.local_name, "link");
        assert_eq!(ExpandedName::from_raw("title"), ExpandedName::local("title"));
    }

    #[test]
    fn test_declarations_precede_start_and_are_not_attributes() {
        let events = collect(r#"<rss xmlns:dc="http://purl.org/dc/elements/1.1/" version="2.0"/>"#);
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            XmlEvent::StartNamespace {
                prefix: Some("dc".to_string()),
                uri: "http://purl.org/dc/elements/1.1/".to_string(),
            }
        );
        match &events[1] {
            XmlEvent::Start { name, attributes } => {
                assert_eq!(name, &ExpandedName::local("rss"));
                assert_eq!(attributes.len(), 1);
                assert_eq!(attributes.get("version"), Some("2.0"));
            }
            other => panic!("expected start, got {:?}", other),
        }
        assert_eq!(
            events[2],
            XmlEvent::End {
                name: ExpandedName::local("rss")
            }
        );
    }

    #[test]
    fn test_default_namespace_applies_to_elements() {
        let events = collect(r#"<feed xmlns="http://www.w3.org/2005/Atom"><id>x</id></feed>"#);
        assert_eq!(
            events[0],
            XmlEvent::StartNamespace {
                prefix: None,
                uri: "http://www.w3.org/2005/Atom".to_string(),
            }
        );
        let XmlEvent::Start { name, .. } = &events[2] else {
            panic!("expected start");
        };
        assert_eq!(name.namespace.as_deref(), Some("http://www.w3.org/2005/Atom"));
        assert_eq!(events[3], XmlEvent::Text("x".to_string()));
    }

    #[test]
    fn test_prefixed_attribute_is_resolved() {
        let xml = r#"<r:RDF xmlns:r="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><item r:about="u"/></r:RDF>"#;
        let events = collect(xml);
        let XmlEvent::Start { attributes, .. } = &events[2] else {
            panic!("expected start");
        };
        assert_eq!(
            attributes.get_ns("http://www.w3.org/1999/02/22-rdf-syntax-ns#", "about"),
            Some("u")
        );
        assert_eq!(attributes.get("about"), None);
    }

    #[test]
    fn test_entities_and_cdata_are_text() {
        let events = collect("<a>Fish &amp; <![CDATA[<b>Chips</b>]]></a>");
        assert_eq!(events[1], XmlEvent::Text("Fish & ".to_string()));
        assert_eq!(events[2], XmlEvent::Text("<b>Chips</b>".to_string()));
    }

    #[test]
    fn test_mismatched_end_is_an_error() {
        let result: Result<Vec<_>, _> = EventSource::new("<a><b></a>".as_bytes()).collect();
        assert!(result.is_err());
    }
}
