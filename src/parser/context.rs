use crate::model::{Entry, Feed, Metadata};

use super::diagnostics::Diagnostic;

/// Where handler output currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Entry,
    Feed,
    /// Before the feed opened or after it closed.
    Outside,
}

/// Shared parse state that every namespace handler reads and writes.
///
/// `in_feed` / `in_entry` are set by whichever handler owns the dialect's
/// feed and entry elements. The dispatcher moves the entry under
/// construction into the feed when `in_entry` drops back to `false`.
#[derive(Debug, Default)]
pub struct FeedContext {
    pub feed: Feed,
    /// The entry under construction. Reset after every flush.
    pub entry: Entry,
    pub in_feed: bool,
    pub in_entry: bool,
    diagnostics: Vec<Diagnostic>,
}

impl FeedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(&self) -> Placement {
        if self.in_entry {
            Placement::Entry
        } else if self.in_feed {
            Placement::Feed
        } else {
            Placement::Outside
        }
    }

    /// The entry if inside one, else the feed if inside it.
    pub fn current(&mut self) -> Option<&mut Metadata> {
        match self.placement() {
            Placement::Entry => Some(&mut self.entry.metadata),
            Placement::Feed => Some(&mut self.feed.metadata),
            Placement::Outside => None,
        }
    }

    /// The entry if inside one, otherwise the feed.
    ///
    /// Closed containers (RSS images, media groups) attach here, so one
    /// that precedes the feed's opening element still lands on the feed.
    pub fn container_target(&mut self) -> &mut Metadata {
        if self.in_entry {
            &mut self.entry.metadata
        } else {
            &mut self.feed.metadata
        }
    }

    /// Records a non-fatal condition and logs it.
    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn flush_entry(&mut self) {
        let entry = std::mem::take(&mut self.entry);
        self.feed.push_entry(entry);
    }

    pub(crate) fn into_parts(self) -> (Feed, Vec<Diagnostic>) {
        (self.feed, self.diagnostics)
    }
}
