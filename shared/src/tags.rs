//! Per-article tag set.
//!
//! Membership is what gets stored; insertion order is kept only so chips
//! render in the order the author added them.

use thiserror::Error;

/// Rejection reasons for a tag candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The candidate is already in the set.
    #[error("Tag already exists")]
    Duplicate(String),
    /// The candidate was blank after trimming.
    #[error("Tag is empty")]
    Empty,
}

/// Ordered set of tag labels with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list, silently collapsing repeats.
    pub fn from_list<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for tag in tags {
            let _ = set.insert(tag);
        }
        set
    }

    /// Inserts `tag`, rejecting duplicates and leaving the set untouched.
    pub fn insert(&mut self, tag: impl Into<String>) -> Result<(), TagError> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(TagError::Empty);
        }
        if self.contains(&tag) {
            return Err(TagError::Duplicate(tag));
        }
        self.tags.push(tag);
        Ok(())
    }

    /// Removes `tag`; absent tags are a no-op. Returns whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        before != self.tags.len()
    }

    /// Exact membership test.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Owned copy for a save payload.
    pub fn to_vec(&self) -> Vec<String> {
        self.tags.clone()
    }
}
