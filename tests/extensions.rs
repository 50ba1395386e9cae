//! Integration tests for extension namespaces and dispatch behavior:
//! Yahoo Media RSS, iTunes, Dublin Core, FeedBurner, syndication and the
//! content module, plus unknown and document-declared namespaces.

use feednorm::model::{ItunesCategory, ItunesOwner, MediaContent, MediaGroup};
use feednorm::parser::{Element, FeedContext};
use feednorm::{Diagnostic, ExtensionValue, FeedParser, NamespaceHandler, Parsed};
use pretty_assertions::assert_eq;

const NAMESPACES: &str = r#"xmlns:media="http://search.yahoo.com/mrss/"
    xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:feedburner="http://rssnamespace.org/feedburner/ext/1.0"
    xmlns:sy="http://purl.org/rss/1.0/modules/syndication/"
    xmlns:content="http://purl.org/rss/1.0/modules/content/""#;

fn rss(channel: &str) -> Parsed {
    let xml = format!(r#"<rss version="2.0" {NAMESPACES}><channel>{channel}</channel></rss>"#);
    FeedParser::new()
        .parse_with_diagnostics(xml.as_bytes())
        .expect("well-formed feed")
}

// ============================================================================
// Yahoo Media RSS
// ============================================================================

#[test]
fn test_media_content_becomes_enclosure() {
    let parsed = rss(
        r#"<item>
             <media:content url="http://x/v.mp4" type="video/mp4" fileSize="999"/>
             <media:content url="http://x/a.ogg" medium="audio"/>
           </item>"#,
    );
    let entry = &parsed.feed.entries()[0];
    let links = entry.links();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].rel(), "enclosure");
    assert_eq!(links[0].href, "http://x/v.mp4");
    assert_eq!(links[0].media_type.as_deref(), Some("video/mp4"));
    assert_eq!(links[0].length.as_deref(), Some("999"));
    assert_eq!(links[1].media_type.as_deref(), Some("audio/*"));
    assert_eq!(
        entry
            .extension("media-contents")
            .and_then(|v| v.as_list())
            .map(|l| l.len()),
        Some(2)
    );
}

#[test]
fn test_media_group_guesses_url_from_entry_link() {
    let parsed = rss(
        r#"<item>
             <link>http://x/watch</link>
             <media:group>
               <media:content type="video/mp4"><media:title>HD</media:title></media:content>
               <media:content url="http://x/sd.mp4"/>
             </media:group>
           </item>"#,
    );
    let entry = &parsed.feed.entries()[0];

    let Some(ExtensionValue::MediaGroup(group)) = entry.extension("media-group") else {
        panic!("expected media group, got {:?}", entry.extension("media-group"));
    };
    let urls: Vec<_> = group
        .contents()
        .iter()
        .map(|c| c.url.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(urls, vec!["http://x/watch", "http://x/sd.mp4"]);
    assert_eq!(
        group.contents()[0]
            .metadata
            .title
            .as_ref()
            .map(|t| t.text.as_str()),
        Some("HD")
    );
    // Grouped renditions are not enclosures of their own.
    assert_eq!(entry.links().len(), 1);
    assert!(parsed
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::GuessedMediaUrl { .. })));
}

#[test]
fn test_media_thumbnail_outside_containers_is_listed() {
    let parsed = rss(r#"<item><media:thumbnail url="http://x/t.jpg" width="75"/></item>"#);
    let entry = &parsed.feed.entries()[0];

    let thumbnails = entry
        .extension("media-thumbnails")
        .and_then(|v| v.as_list())
        .unwrap_or_default();
    assert_eq!(thumbnails.len(), 1);
    let ExtensionValue::MediaThumbnail(thumbnail) = &thumbnails[0] else {
        panic!("expected thumbnail, got {:?}", thumbnails[0]);
    };
    assert_eq!(thumbnail.url, "http://x/t.jpg");
    assert_eq!(thumbnail.width.as_deref(), Some("75"));
}

#[test]
fn test_media_group_before_any_context_attaches_to_feed() {
    let xml = r#"<media:group xmlns:media="http://search.yahoo.com/mrss/">
                   <media:content url="http://x/orphan.mp4"/>
                 </media:group>"#;
    let parsed = FeedParser::new()
        .parse_with_diagnostics(xml.as_bytes())
        .unwrap();

    assert!(parsed.feed.entries().is_empty());
    let Some(ExtensionValue::MediaGroup(group)) = parsed.feed.extension("media-group") else {
        panic!("group should land on the feed");
    };
    assert_eq!(
        group,
        &MediaGroup {
            contents: Some(vec![MediaContent {
                url: Some("http://x/orphan.mp4".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        }
    );
}

// ============================================================================
// iTunes
// ============================================================================

#[test]
fn test_itunes_channel() {
    let parsed = rss(
        r#"<itunes:author>Host</itunes:author>
           <itunes:explicit>no</itunes:explicit>
           <itunes:owner><itunes:name>Owner</itunes:name><itunes:email>o@example.com</itunes:email></itunes:owner>
           <itunes:category text="Technology"><itunes:category text="Tech News"/></itunes:category>
           <itunes:image href="http://x/cover.png"/>
           <itunes:keywords>rust, feeds ,  parsing</itunes:keywords>
           <item><itunes:duration>01:02:03</itunes:duration><itunes:episode>7</itunes:episode></item>"#,
    );
    let feed = &parsed.feed;

    assert_eq!(
        feed.extension("itunes-author").and_then(|v| v.as_text()),
        Some("Host")
    );
    assert_eq!(
        feed.extension("itunes-owner"),
        Some(&ExtensionValue::ItunesOwner(ItunesOwner {
            name: Some("Owner".to_string()),
            email: Some("o@example.com".to_string()),
        }))
    );
    assert_eq!(
        feed.extension("itunes-categories"),
        Some(&ExtensionValue::List(vec![ExtensionValue::ItunesCategory(
            ItunesCategory {
                text: Some("Technology".to_string()),
                subcategory: Some("Tech News".to_string()),
            }
        )]))
    );
    assert_eq!(
        feed.extension("itunes-keywords"),
        Some(&ExtensionValue::Keywords(vec![
            "rust".to_string(),
            "feeds".to_string(),
            "parsing".to_string()
        ]))
    );

    let cover = &feed.links()[0];
    assert_eq!(cover.rel(), "enclosure");
    assert_eq!(cover.href, "http://x/cover.png");
    assert_eq!(cover.media_type.as_deref(), Some("image/png"));

    let entry = &feed.entries()[0];
    assert_eq!(
        entry.extension("itunes-duration").and_then(|v| v.as_text()),
        Some("01:02:03")
    );
    assert_eq!(
        entry.extension("itunes-episode").and_then(|v| v.as_text()),
        Some("7")
    );
}

#[test]
fn test_itunes_owner_inside_item_is_dropped() {
    let parsed = rss(
        r#"<item><itunes:owner><itunes:name>Nope</itunes:name></itunes:owner></item>"#,
    );

    assert!(parsed.feed.extension("itunes-owner").is_none());
    assert!(parsed.feed.entries()[0].extension("itunes-owner").is_none());
    assert!(parsed
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnexpectedNesting { .. })));
}

// ============================================================================
// Dublin Core, FeedBurner, syndication, content module
// ============================================================================

#[test]
fn test_dublin_core() {
    let parsed = rss(
        r#"<dc:date>2024-05-06T07:08:09Z</dc:date>
           <dc:language>en</dc:language>
           <item>
             <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
             <dc:date>2020-01-01T00:00:00Z</dc:date>
             <dc:creator>Jo Writer</dc:creator>
             <dc:subject>feeds</dc:subject>
           </item>"#,
    );
    let feed = &parsed.feed;

    assert_eq!(feed.updated.as_deref(), Some("2024-05-06T07:08:09+00:00"));
    assert_eq!(
        feed.extension("dc-language").and_then(|v| v.as_text()),
        Some("en")
    );

    let entry = &feed.entries()[0];
    // pubDate came first; dc:date does not override it but is kept raw.
    assert_eq!(entry.published.as_deref(), Some("2024-01-01T00:00:00+00:00"));
    assert_eq!(
        entry.extension("dc-date").and_then(|v| v.as_text()),
        Some("2020-01-01T00:00:00Z")
    );
    assert_eq!(entry.authors()[0].name, "Jo Writer");
    assert_eq!(
        entry.extension("dc-subject").and_then(|v| v.as_text()),
        Some("feeds")
    );
}

#[test]
fn test_feedburner() {
    let parsed = rss(
        r#"<feedburner:info uri="examplefeed"/>
           <feedburner:browserFriendly>Subscribe!</feedburner:browserFriendly>
           <feedburner:feedFlare href="http://x/share" src="http://x/share.png">Share</feedburner:feedFlare>
           <item><feedburner:origLink>http://example.com/real</feedburner:origLink></item>"#,
    );
    let feed = &parsed.feed;

    assert_eq!(
        feed.extension("feedburner-info").and_then(|v| v.as_text()),
        Some("examplefeed")
    );
    assert_eq!(
        feed.extension("feedburner-browserFriendly")
            .and_then(|v| v.as_text()),
        Some("Subscribe!")
    );
    assert_eq!(
        feed.extension("feedburner-feedFlares")
            .and_then(|v| v.as_list())
            .map(|l| l.len()),
        Some(1)
    );
    assert_eq!(
        feed.entries()[0]
            .extension("feedburner-origLink")
            .and_then(|v| v.as_text()),
        Some("http://example.com/real")
    );
}

#[test]
fn test_syndication_and_content_encoded() {
    let parsed = rss(
        r#"<sy:updatePeriod>hourly</sy:updatePeriod>
           <sy:updateFrequency>2</sy:updateFrequency>
           <item><content:encoded><![CDATA[<p>Full <b>text</b></p>]]></content:encoded></item>"#,
    );
    let feed = &parsed.feed;

    assert_eq!(
        feed.extension("syn-updatePeriod").and_then(|v| v.as_text()),
        Some("hourly")
    );
    assert_eq!(
        feed.extension("syn-updateFrequency").and_then(|v| v.as_text()),
        Some("2")
    );
    assert_eq!(
        feed.entries()[0]
            .content
            .as_ref()
            .and_then(|c| c.text.as_deref()),
        Some("<p>Full <b>text</b></p>")
    );
}

// ============================================================================
// Dispatch edge cases
// ============================================================================

#[test]
fn test_unknown_element_in_known_namespace_is_ignored() {
    let parsed = rss(r#"<item><title>T</title><dc:bogus>x</dc:bogus></item>"#);
    let entry = &parsed.feed.entries()[0];

    assert_eq!(entry.title.as_deref(), Some("T"));
    assert!(entry.extension("dc-bogus").is_none());
    assert!(parsed.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::UnhandledElement { prefix, element } if prefix == "dc" && element == "bogus"
    )));
}

#[test]
fn test_document_namespace_registered_for_one_parse() {
    let parser = FeedParser::new();
    let xml = br#"<rss version="2.0" xmlns:slash="http://purl.org/rss/1.0/modules/slash/">
                    <channel><item><slash:comments>4</slash:comments></item></channel>
                  </rss>"#;
    let parsed = parser.parse_with_diagnostics(xml.as_slice()).unwrap();

    assert_eq!(parsed.feed.entries().len(), 1);
    assert!(parsed.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::NoHandler { prefix, .. } if prefix == "slash"
    )));
    assert_eq!(
        parser
            .namespaces()
            .prefix_for("http://purl.org/rss/1.0/modules/slash/"),
        None
    );
}

#[test]
fn test_undeclared_prefix_does_not_abort() {
    let parsed = rss(r#"<item><title>T</title></item>"#);
    assert!(parsed.diagnostics.is_empty());

    let parser = FeedParser::new();
    let parsed = parser
        .parse_with_diagnostics(
            br#"<rss version="2.0"><channel><item><foo:bar>x</foo:bar></item></channel></rss>"#
                .as_slice(),
        )
        .unwrap();
    assert_eq!(parsed.feed.entries().len(), 1);
    assert!(parsed
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnknownNamespace { .. })));
}

/// Counts every element it sees; used to check that one parse shares one
/// handler instance per prefix.
#[derive(Default)]
struct Counter {
    seen: usize,
}

impl NamespaceHandler for Counter {
    fn start(&mut self, _element: &Element, _ctx: &mut FeedContext) {
        self.seen += 1;
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        if let Some(target) = ctx.current() {
            target
                .extensions
                .insert(element.key.clone(), ExtensionValue::Text(self.seen.to_string()));
        }
    }
}

fn counter() -> Box<dyn NamespaceHandler> {
    Box::new(Counter::default())
}

#[test]
fn test_handler_state_persists_within_parse() {
    let mut parser = FeedParser::new();
    parser.register_handler("http://example.com/count", "count", counter);

    let xml = br#"<rss version="2.0" xmlns:c="http://example.com/count"><channel>
                    <c:a/><c:b/><c:total/>
                  </channel></rss>"#;
    let feed = parser.parse(xml).unwrap();
    assert_eq!(
        feed.extension("count-total").and_then(|v| v.as_text()),
        Some("3")
    );

    // A second parse starts from a fresh instance.
    let feed = parser.parse(xml).unwrap();
    assert_eq!(
        feed.extension("count-total").and_then(|v| v.as_text()),
        Some("3")
    );
}
