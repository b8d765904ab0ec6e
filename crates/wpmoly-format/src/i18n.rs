//! Translation catalog.
//!
//! Every user-facing label (field texts, detail labels, month and day names,
//! country and language names) is looked up here by its English source text.
//! Missing entries fall back to the source text.

use std::borrow::Cow;
use std::collections::HashMap;

/// Source text to translated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog; every lookup falls back to the source text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation, builder style.
    pub fn with(mut self, source: &str, translated: &str) -> Self {
        self.insert(source, translated);
        self
    }

    /// Add or replace a translation.
    pub fn insert(&mut self, source: &str, translated: &str) {
        self.entries
            .insert(source.to_string(), translated.to_string());
    }

    /// Translate `source`, falling back to it unchanged.
    pub fn tr<'a>(&'a self, source: &'a str) -> Cow<'a, str> {
        match self.entries.get(source) {
            Some(translated) if !translated.is_empty() => Cow::Borrowed(translated.as_str()),
            _ => Cow::Borrowed(source),
        }
    }

    /// Translate a `%s` template and substitute its single argument.
    pub fn trf(&self, template: &str, arg: &str) -> String {
        self.tr(template).replacen("%s", arg, 1)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
