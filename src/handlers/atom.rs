//! Atom 1.0 (RFC 4287).

use crate::model::{Author, Category, Content, ExtensionValue, Generator, Link};
use crate::parser::{Diagnostic, Element, FeedContext, Placement};
use crate::util::{escape_html, normalize_date};

use super::{check_vocabulary, missing_attribute, unexpected, NamespaceHandler};

const VOCABULARY: &[&str] = &[
    "feed",
    "entry",
    "author",
    "contributor",
    "source",
    "category",
    "content",
    "email",
    "generator",
    "icon",
    "id",
    "link",
    "logo",
    "name",
    "published",
    "rights",
    "subtitle",
    "summary",
    "title",
    "updated",
    "uri",
];

/// The person construct being filled, if any.
#[derive(Debug, Default)]
enum Person {
    #[default]
    Closed,
    Author(Author),
    Contributor(Author),
}

#[derive(Debug, Default)]
pub struct AtomHandler {
    person: Person,
    /// Inside `atom:source`; its metadata describes another feed.
    in_source: bool,
}

impl NamespaceHandler for AtomHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "feed" => ctx.in_feed = true,
            "entry" => ctx.in_entry = true,
            "source" => self.in_source = true,
            "author" => self.person = Person::Author(Author::default()),
            "contributor" => self.person = Person::Contributor(Author::default()),
            _ => check_vocabulary(VOCABULARY, element, ctx),
        }
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "feed" => ctx.in_feed = false,
            "entry" => ctx.in_entry = false,
            "source" => self.in_source = false,
            "author" | "contributor" => {
                let person = std::mem::take(&mut self.person);
                if self.in_source {
                    return;
                }
                let Some(target) = ctx.current() else {
                    unexpected(element, ctx, "outside feed");
                    return;
                };
                match person {
                    Person::Author(author) => target.push_author(author),
                    Person::Contributor(contributor) => target.push_contributor(contributor),
                    Person::Closed => unexpected(element, ctx, "close without open person"),
                }
            }
            "name" | "email" | "uri" => {
                if self.in_source {
                    return;
                }
                let person = match &mut self.person {
                    Person::Author(p) | Person::Contributor(p) => p,
                    Person::Closed => {
                        unexpected(element, ctx, "outside author or contributor");
                        return;
                    }
                };
                let text = element.text.clone();
                match element.local_name.as_str() {
                    "name" => person.name = text,
                    "email" => person.email = Some(text),
                    _ => person.uri = Some(text),
                }
            }
            _ if self.in_source => {}

            "content" => {
                let content = build_content(element, ctx);
                match ctx.placement() {
                    Placement::Entry => ctx.entry.content = Some(content),
                    _ => unexpected(element, ctx, "content outside entry"),
                }
            }
            "title" | "subtitle" | "summary" | "rights" => {
                let (text, _) = negotiate(element, ctx);
                text_construct(element, ctx, text);
            }
            "link" => {
                let Some(href) = element.attr("href") else {
                    missing_attribute(element, ctx, "href");
                    return;
                };
                let link = Link {
                    href,
                    rel: element.attr("rel"),
                    media_type: element.attr("type"),
                    length: element.attr("length"),
                    hreflang: element.attr("hreflang"),
                    title: element.attr("title"),
                };
                match ctx.current() {
                    Some(target) => target.push_link(link),
                    None => unexpected(element, ctx, "outside feed"),
                }
            }
            "category" => {
                let Some(term) = element.attr("term") else {
                    missing_attribute(element, ctx, "term");
                    return;
                };
                let category = Category {
                    term,
                    scheme: element.attr("scheme"),
                    label: element.attr("label"),
                };
                match ctx.current() {
                    Some(target) => target.push_category(category),
                    None => unexpected(element, ctx, "outside feed"),
                }
            }
            "generator" => {
                if ctx.placement() == Placement::Feed {
                    ctx.feed.generator = Some(Generator {
                        name: element.text.clone(),
                        uri: element.attr("uri"),
                        version: element.attr("version"),
                    });
                }
            }
            "icon" => {
                if ctx.placement() == Placement::Feed {
                    ctx.feed.icon = Some(element.text.clone());
                }
            }
            "logo" => {
                if ctx.placement() == Placement::Feed {
                    ctx.feed.logo = Some(element.text.clone());
                }
            }
            "id" => match ctx.current() {
                Some(target) => target.id = Some(element.text.clone()),
                None => unexpected(element, ctx, "outside feed"),
            },
            "updated" => {
                let updated = date_or_raw(&element.text);
                match ctx.current() {
                    Some(target) => target.updated = Some(updated),
                    None => unexpected(element, ctx, "outside feed"),
                }
            }
            "published" => {
                let published = date_or_raw(&element.text);
                match ctx.placement() {
                    Placement::Entry => ctx.entry.published = Some(published),
                    Placement::Feed => ctx
                        .feed
                        .extensions
                        .insert(element.key.clone(), ExtensionValue::Text(published)),
                    Placement::Outside => unexpected(element, ctx, "outside feed"),
                }
            }
            _ => {}
        }
    }
}

/// Atom dates are already ISO-8601; normalizing only unifies the offset
/// notation. Anything unparseable is kept as written.
fn date_or_raw(text: &str) -> String {
    normalize_date(text).unwrap_or_else(|| text.to_string())
}

/// Applies the `type` attribute of a text construct.
///
/// Returns the HTML-ready text and, for MIME-typed content, the type.
fn negotiate(element: &Element, ctx: &mut FeedContext) -> (String, Option<String>) {
    match element.attributes.non_empty("type") {
        None | Some("text") => (escape_html(&element.text).into_owned(), None),
        Some("html") => (element.text.clone(), None),
        Some("xhtml") => {
            ctx.diagnose(Diagnostic::XhtmlContent {
                element: element.key.clone(),
            });
            (element.text.clone(), None)
        }
        Some(mime) => (element.text.clone(), Some(mime.to_string())),
    }
}

fn build_content(element: &Element, ctx: &mut FeedContext) -> Content {
    if let Some(src) = element.attr("src") {
        return Content {
            src: Some(src),
            content_type: element.attr("type"),
            text: None,
        };
    }
    let (text, content_type) = negotiate(element, ctx);
    if text.is_empty() {
        return Content::default();
    }
    Content {
        text: Some(text),
        src: None,
        content_type,
    }
}

fn text_construct(element: &Element, ctx: &mut FeedContext, text: String) {
    match (ctx.placement(), element.local_name.as_str()) {
        (Placement::Outside, _) => unexpected(element, ctx, "outside feed"),
        (Placement::Entry, "summary") => ctx.entry.summary = Some(text),
        // Feeds have no summary of their own.
        (Placement::Feed, "summary") => ctx
            .feed
            .extensions
            .insert(element.key.clone(), ExtensionValue::Text(text)),
        (_, name) => {
            if let Some(target) = ctx.current() {
                match name {
                    "title" => target.title = Some(text),
                    "subtitle" => target.subtitle = Some(text),
                    _ => target.rights = Some(text),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{element, leaf};
    use pretty_assertions::assert_eq;

    fn in_entry() -> (AtomHandler, FeedContext) {
        let mut ctx = FeedContext::new();
        ctx.in_feed = true;
        ctx.in_entry = true;
        (AtomHandler::default(), ctx)
    }

    #[test]
    fn test_link_attributes_verbatim() {
        let (mut h, mut ctx) = in_entry();
        let link = element(
            "atom",
            "link",
            &[
                ("rel", "enclosure"),
                ("href", "http://x/a.mp3"),
                ("type", "audio/mpeg"),
                ("length", "123"),
            ],
        );
        leaf(&mut h, &mut ctx, link, "");

        assert_eq!(
            ctx.entry.links(),
            &[Link {
                href: "http://x/a.mp3".to_string(),
                rel: Some("enclosure".to_string()),
                media_type: Some("audio/mpeg".to_string()),
                length: Some("123".to_string()),
                hreflang: None,
                title: None,
            }]
        );
    }

    #[test]
    fn test_link_without_rel_gets_no_default() {
        let (mut h, mut ctx) = in_entry();
        leaf(&mut h, &mut ctx, element("atom", "link", &[("href", "http://x/")]), "");
        let link = &ctx.entry.links()[0];
        assert!(link.rel.is_none());
        assert!(link.media_type.is_none());
    }

    #[test]
    fn test_content_html_passes_through() {
        let (mut h, mut ctx) = in_entry();
        leaf(
            &mut h,
            &mut ctx,
            element("atom", "content", &[("type", "html")]),
            "<p>Hi & bye</p>",
        );
        let content = ctx.entry.content.as_ref().expect("content");
        assert_eq!(content.text.as_deref(), Some("<p>Hi & bye</p>"));
        assert!(content.content_type.is_none());
    }

    #[test]
    fn test_content_without_type_is_escaped() {
        let (mut h, mut ctx) = in_entry();
        leaf(&mut h, &mut ctx, element("atom", "content", &[]), "a < b");
        assert_eq!(
            ctx.entry.content.as_ref().and_then(|c| c.text.as_deref()),
            Some("a &lt; b")
        );
    }

    #[test]
    fn test_content_mime_type_recorded() {
        let (mut h, mut ctx) = in_entry();
        leaf(
            &mut h,
            &mut ctx,
            element("atom", "content", &[("type", "text/markdown")]),
            "# Hi",
        );
        let content = ctx.entry.content.as_ref().expect("content");
        assert_eq!(content.text.as_deref(), Some("# Hi"));
        assert_eq!(content.content_type.as_deref(), Some("text/markdown"));
    }

    #[test]
    fn test_content_src() {
        let (mut h, mut ctx) = in_entry();
        leaf(
            &mut h,
            &mut ctx,
            element("atom", "content", &[("src", "http://x/body"), ("type", "text/html")]),
            "",
        );
        let content = ctx.entry.content.as_ref().expect("content");
        assert_eq!(content.src.as_deref(), Some("http://x/body"));
        assert_eq!(content.content_type.as_deref(), Some("text/html"));
        assert!(content.text.is_none());
    }

    #[test]
    fn test_xhtml_title_warns() {
        let (mut h, mut ctx) = in_entry();
        leaf(&mut h, &mut ctx, element("atom", "title", &[("type", "xhtml")]), "<b>x</b>");
        assert_eq!(ctx.entry.title.as_deref(), Some("<b>x</b>"));
        assert!(matches!(ctx.diagnostics(), [Diagnostic::XhtmlContent { .. }]));
    }

    #[test]
    fn test_author_construct() {
        let (mut h, mut ctx) = in_entry();
        let author = element("atom", "author", &[]);
        h.start(&author, &mut ctx);
        leaf(&mut h, &mut ctx, element("atom", "name", &[]), "Jo");
        leaf(&mut h, &mut ctx, element("atom", "email", &[]), "jo@example.com");
        h.end(&author, &mut ctx);

        assert_eq!(
            ctx.entry.authors(),
            &[Author {
                name: "Jo".to_string(),
                email: Some("jo@example.com".to_string()),
                uri: None,
            }]
        );
    }

    #[test]
    fn test_source_metadata_ignored() {
        let (mut h, mut ctx) = in_entry();
        let source = element("atom", "source", &[]);
        h.start(&source, &mut ctx);
        leaf(&mut h, &mut ctx, element("atom", "title", &[]), "Other feed");
        leaf(&mut h, &mut ctx, element("atom", "id", &[]), "urn:other");
        h.end(&source, &mut ctx);
        leaf(&mut h, &mut ctx, element("atom", "id", &[]), "urn:mine");

        assert!(ctx.entry.title.is_none());
        assert_eq!(ctx.entry.id.as_deref(), Some("urn:mine"));
    }

    #[test]
    fn test_updated_normalized_or_raw() {
        let (mut h, mut ctx) = in_entry();
        leaf(&mut h, &mut ctx, element("atom", "updated", &[]), "2005-07-31T12:29:29Z");
        assert_eq!(ctx.entry.updated.as_deref(), Some("2005-07-31T12:29:29+00:00"));

        leaf(&mut h, &mut ctx, element("atom", "updated", &[]), "last tuesday");
        assert_eq!(ctx.entry.updated.as_deref(), Some("last tuesday"));
    }
}
