//! Dublin Core element set, as used inside RSS and Atom.

use crate::model::Author;
use crate::parser::{Element, FeedContext, Placement};

use super::{check_vocabulary, parse_date_text, store_text, unexpected, NamespaceHandler};

const VOCABULARY: &[&str] = &[
    "contributor",
    "coverage",
    "creator",
    "date",
    "description",
    "format",
    "identifier",
    "language",
    "publisher",
    "relation",
    "rights",
    "source",
    "subject",
    "title",
    "type",
];

#[derive(Debug, Default)]
pub struct DublinCoreHandler;

impl NamespaceHandler for DublinCoreHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        check_vocabulary(VOCABULARY, element, ctx);
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "creator" => match ctx.current() {
                Some(target) => target.push_author(Author::named(element.text.clone())),
                None => unexpected(element, ctx, "outside feed"),
            },
            "date" => date(element, ctx),
            name if VOCABULARY.contains(&name) => store_text(element, ctx),
            _ => {}
        }
    }
}

/// `dc:date` fills `published` on entries and `updated` on feeds, unless
/// the dialect's own date got there first. The raw text is always kept.
fn date(element: &Element, ctx: &mut FeedContext) {
    match ctx.placement() {
        Placement::Entry if ctx.entry.published.is_none() => {
            let published = parse_date_text(element, ctx);
            ctx.entry.published = published;
        }
        Placement::Feed if ctx.feed.updated.is_none() => {
            let updated = parse_date_text(element, ctx);
            ctx.feed.updated = updated;
        }
        _ => {}
    }
    store_text(element, ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{element, leaf};

    #[test]
    fn test_date_on_entry() {
        let mut h = DublinCoreHandler;
        let mut ctx = FeedContext::new();
        ctx.in_feed = true;
        ctx.in_entry = true;
        leaf(&mut h, &mut ctx, element("dc", "date", &[]), "2002-09-05T12:00:00+01:00");

        assert_eq!(ctx.entry.published.as_deref(), Some("2002-09-05T12:00:00+01:00"));
        assert_eq!(
            ctx.entry.extension("dc-date").and_then(|v| v.as_text()),
            Some("2002-09-05T12:00:00+01:00")
        );
    }

    #[test]
    fn test_date_does_not_override_feed_updated() {
        let mut h = DublinCoreHandler;
        let mut ctx = FeedContext::new();
        ctx.in_feed = true;
        ctx.feed.updated = Some("2024-01-01T00:00:00+00:00".to_string());
        leaf(&mut h, &mut ctx, element("dc", "date", &[]), "2002-09-05");

        assert_eq!(ctx.feed.updated.as_deref(), Some("2024-01-01T00:00:00+00:00"));
        assert_eq!(
            ctx.feed.extension("dc-date").and_then(|v| v.as_text()),
            Some("2002-09-05")
        );
    }

    #[test]
    fn test_creator_is_author() {
        let mut h = DublinCoreHandler;
        let mut ctx = FeedContext::new();
        ctx.in_feed = true;
        leaf(&mut h, &mut ctx, element("dc", "creator", &[]), "Jo Smith");
        assert_eq!(ctx.feed.authors()[0], Author::named("Jo Smith"));
    }

    #[test]
    fn test_other_terms_stored_under_key() {
        let mut h = DublinCoreHandler;
        let mut ctx = FeedContext::new();
        ctx.in_feed = true;
        leaf(&mut h, &mut ctx, element("dc", "publisher", &[]), "ACME");
        assert_eq!(
            ctx.feed.extension("dc-publisher").and_then(|v| v.as_text()),
            Some("ACME")
        );
    }
}
