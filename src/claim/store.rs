//! Ordered tag storage.

use std::fmt;

use tracing::trace;

use super::color::{tag_colors, TagColors};

/// Identifier of a tag, unique within the store that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag-{}", self.0)
    }
}

/// A committed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: TagId,
    text: String,
    colors: TagColors,
}

impl Tag {
    /// Stable identifier of this tag.
    pub fn id(&self) -> TagId {
        self.id
    }

    /// Trimmed, non-empty tag text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Chip colors derived from the text.
    pub fn colors(&self) -> TagColors {
        self.colors
    }
}

/// Ordered collection of tags.
///
/// Mutating operations report whether the visible tag list changed so the
/// owner can notify listeners exactly once per real change. Duplicate texts
/// are kept as distinct tags.
#[derive(Debug, Default)]
pub struct TagStore {
    tags: Vec<Tag>,
    next_id: u64,
}

impl TagStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All tags in order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tag texts in order.
    pub fn texts(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.text.clone()).collect()
    }

    /// Get the tag at `index`.
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn make_tag(&mut self, text: &str) -> Tag {
        let id = TagId(self.next_id);
        self.next_id += 1;
        Tag {
            id,
            text: text.to_string(),
            colors: tag_colors(text),
        }
    }

    /// Append a tag for `text`.
    ///
    /// Returns false, leaving the store untouched, if `text` is blank.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let tag = self.make_tag(text);
        trace!(id = %tag.id, text = %tag.text, "Tag added");
        self.tags.push(tag);
        true
    }

    /// Remove the tag at `index`, clamped to the last tag.
    ///
    /// Returns the removed tag together with the index it was removed from.
    /// Removing from an empty store is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<(usize, Tag)> {
        let last = self.tags.len().checked_sub(1)?;
        let index = index.min(last);
        let tag = self.tags.remove(index);
        trace!(id = %tag.id, index, "Tag removed");
        Some((index, tag))
    }

    /// Replace every tag with fresh tags built from `texts`.
    ///
    /// Entries are trimmed and blank ones dropped. If the resulting texts
    /// equal the current ones element by element nothing happens and false
    /// is returned, so existing ids survive.
    pub fn replace_all<S: AsRef<str>>(&mut self, texts: &[S]) -> bool {
        let incoming: Vec<&str> = texts
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .collect();

        let unchanged = incoming.len() == self.tags.len()
            && incoming
                .iter()
                .zip(&self.tags)
                .all(|(text, tag)| *text == tag.text);
        if unchanged {
            return false;
        }

        let fresh: Vec<Tag> = incoming.iter().map(|text| self.make_tag(text)).collect();
        trace!(count = fresh.len(), "Tags replaced");
        self.tags = fresh;
        true
    }

    /// Remove every tag. Returns false if the store was already empty.
    pub fn clear(&mut self) -> bool {
        if self.tags.is_empty() {
            return false;
        }
        self.tags.clear();
        true
    }
}
