use std::borrow::Cow;

/// Escapes text so it can be embedded in HTML as-is.
///
/// Plain-text feed constructs are escaped so every text field in the model is
/// HTML-ready. Returns `Cow::Borrowed` when nothing needed escaping.
///
/// # Examples
///
/// ```
/// use feednorm::util::escape_html;
///
/// assert_eq!(escape_html("Fish & Chips"), "Fish &amp; Chips");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// Splits a comma-separated keyword list (`media:keywords`, `itunes:keywords`).
///
/// Whitespace around each keyword is dropped, as are empty keywords.
pub fn split_keywords(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits an RSS `author` / `managingEditor` value into `(name, email)`.
///
/// RSS asks for an email address, optionally followed by a name in
/// parentheses. Values without an `@` after the first character are treated
/// as a bare name. A bare address is used as both name and email.
///
/// ```
/// use feednorm::util::split_rss_person;
///
/// assert_eq!(
///     split_rss_person("jo@example.com (Jo Smith)"),
///     ("Jo Smith".to_string(), Some("jo@example.com".to_string()))
/// );
/// assert_eq!(split_rss_person("Jo Smith"), ("Jo Smith".to_string(), None));
/// ```
pub fn split_rss_person(s: &str) -> (String, Option<String>) {
    let s = s.trim();
    if s.find('@').unwrap_or(0) == 0 {
        return (s.to_string(), None);
    }

    if let Some((email, rest)) = s.split_once('(') {
        let name = rest.trim_end().trim_end_matches(')').trim();
        let email = email.trim();
        if !name.is_empty() && email.contains('@') {
            return (name.to_string(), Some(email.to_string()));
        }
    }

    (s.to_string(), Some(s.to_string()))
}
