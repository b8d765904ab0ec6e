//! Taxonomy term lookup.
//!
//! Genre, actor, and director lists are stored as plain text on the movie;
//! when the matching taxonomy is enabled each label is looked up here so it
//! can be linked to its term archive.

use std::collections::HashMap;

use wpmoly_common::{Taxonomy, TermId};

use crate::html::sanitize_title;

/// A classification term.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// Term id.
    pub id: TermId,
    /// Display name.
    pub name: String,
    /// URL slug; derived from the name when left empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: String,
    /// Owning taxonomy.
    pub taxonomy: Taxonomy,
}

impl Term {
    /// Build a term whose slug is derived from its name.
    pub fn new(id: u64, taxonomy: Taxonomy, name: &str) -> Self {
        Self {
            id: TermId::new(id),
            name: name.to_string(),
            slug: sanitize_title(name),
            taxonomy,
        }
    }
}

/// Read access to stored terms.
pub trait TermStore: Send + Sync {
    /// Term whose name matches `name`, case-insensitively.
    fn term_by_name(&self, taxonomy: Taxonomy, name: &str) -> Option<Term>;

    /// Term whose slug equals `slug`.
    fn term_by_slug(&self, taxonomy: Taxonomy, slug: &str) -> Option<Term>;
}

/// Terms held in memory, indexed by taxonomy.
#[derive(Debug, Clone, Default)]
pub struct MemoryTermStore {
    by_taxonomy: HashMap<Taxonomy, Vec<Term>>,
}

impl MemoryTermStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term, deriving its slug if it has none.
    pub fn insert(&mut self, mut term: Term) {
        if term.slug.is_empty() {
            term.slug = sanitize_title(&term.name);
        }
        self.by_taxonomy.entry(term.taxonomy).or_default().push(term);
    }

    /// Number of terms across all taxonomies.
    pub fn len(&self) -> usize {
        self.by_taxonomy.values().map(Vec::len).sum()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Term> for MemoryTermStore {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut store = Self::new();
        for term in iter {
            store.insert(term);
        }
        store
    }
}

impl TermStore for MemoryTermStore {
    fn term_by_name(&self, taxonomy: Taxonomy, name: &str) -> Option<Term> {
        let wanted = name.to_lowercase();
        self.by_taxonomy
            .get(&taxonomy)?
            .iter()
            .find(|t| t.name.to_lowercase() == wanted)
            .cloned()
    }

    fn term_by_slug(&self, taxonomy: Taxonomy, slug: &str) -> Option<Term> {
        self.by_taxonomy
            .get(&taxonomy)?
            .iter()
            .find(|t| t.slug == slug)
            .cloned()
    }
}
