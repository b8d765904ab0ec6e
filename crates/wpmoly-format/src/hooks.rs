//! Named filter hooks.
//!
//! Every formatter threads its output through one or more filters before
//! returning it, so callers can post-process any field without touching the
//! formatter itself. A filter is a callback `(value, args) -> value`; several
//! callbacks on the same hook run in priority order (lower first, then
//! registration order), each receiving the previous one's output.
//!
//! ```
//! use wpmoly_format::hooks::{FilterArgs, Filters};
//!
//! let mut filters = Filters::new();
//! filters.add("wpmoly/filter/meta/writer", 10, |value, _args| value.to_uppercase());
//!
//! let out = filters.apply("wpmoly/filter/meta/writer", "chuck palahniuk".into(), &FilterArgs::default());
//! assert_eq!(out, "CHUCK PALAHNIUK");
//! ```

use std::collections::HashMap;
use std::fmt;

use wpmoly_common::MetaValue;

use crate::model::{Country, Language};
use crate::options::FormatOptions;
use crate::taxonomy::Term;

/// Default priority for filters that do not care about ordering.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Replacement for empty values.
pub const EMPTY_VALUE: &str = "wpmoly/filter/meta/empty/value";
/// Formatted money amounts.
pub const MONEY: &str = "wpmoly/filter/format/money";
/// Filled rating star markup.
pub const FILLED_STAR: &str = "wpmoly/filter/html/filled/star";
/// Half-filled rating star markup.
pub const HALF_STAR: &str = "wpmoly/filter/html/half/star";
/// Empty rating star markup.
pub const EMPTY_STAR: &str = "wpmoly/filter/html/empty/star";
/// Complete star block of a rating.
pub const RATING_STARS: &str = "wpmoly/filter/html/rating/stars";
/// Linked rating.
pub const RATING_LINK: &str = "wpmoly/filter/detail/rating/link";
/// Unlinked rating.
pub const RATING: &str = "wpmoly/filter/detail/rating";
/// Each item of a country entry (flag, name, ...).
pub const COUNTRY_SINGLE: &str = "wpmoly/filter/meta/country/single";
/// Complete country list.
pub const COUNTRIES: &str = "wpmoly/filter/meta/production_countries";
/// Each language of a language list.
pub const LANGUAGE_SINGLE: &str = "wpmoly/filter/meta/language/single";
/// Complete language list.
pub const LANGUAGES: &str = "wpmoly/filter/meta/spoken_languages";
/// Adult restriction label.
pub const ADULT: &str = "wpmoly/filter/meta/adult";
/// Certification.
pub const CERTIFICATION: &str = "wpmoly/filter/meta/certification";
/// Homepage link.
pub const HOMEPAGE: &str = "wpmoly/filter/meta/homepage";
/// Runtime.
pub const RUNTIME: &str = "wpmoly/filter/meta/runtime";

/// Per-item hook of a plain meta list, e.g. `wpmoly/filter/meta/writer/single`.
pub fn meta_single(name: &str) -> String {
    format!("wpmoly/filter/meta/{name}/single")
}

/// Final hook of a plain meta field, e.g. `wpmoly/filter/meta/writer`.
pub fn meta(name: &str) -> String {
    format!("wpmoly/filter/meta/{name}")
}

/// Per-slug hook of a detail.
pub fn detail_single(detail: &str) -> String {
    format!("wpmoly/filter/detail/{detail}/single")
}

/// Per-slug permalink hook of a detail.
pub fn detail_single_link(detail: &str) -> String {
    format!("wpmoly/filter/detail/{detail}/single/link")
}

/// Final hook of a detail.
pub fn detail(detail: &str) -> String {
    format!("wpmoly/filter/detail/{detail}")
}

/// Per-term hook of a taxonomy-backed list.
pub fn terms_single(taxonomy: &str) -> String {
    format!("wpmoly/filter/terms/{taxonomy}/single")
}

/// Final hook of a taxonomy-backed list.
pub fn terms(taxonomy: &str) -> String {
    format!("wpmoly/filter/terms/{taxonomy}")
}

/// Final hook of a release date; `variant` is empty or `local_`.
pub fn release_date(variant: &str) -> String {
    format!("wpmoly/filter/meta/{variant}release_date")
}

/// Context handed to filter callbacks alongside the value.
///
/// Each formatter fills in what it knows; everything else stays `None`.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs<'a> {
    /// Raw stored value being formatted.
    pub raw: Option<&'a MetaValue>,
    /// Raw item text or slug for per-item hooks.
    pub slug: Option<&'a str>,
    /// Effective formatting options.
    pub options: Option<&'a FormatOptions>,
    /// Resolved taxonomy term.
    pub term: Option<&'a Term>,
    /// Resolved country.
    pub country: Option<&'a Country>,
    /// Resolved language.
    pub language: Option<&'a Language>,
    /// Country format token or date pattern.
    pub format: Option<&'a str>,
    /// Ready-made icon markup the callback may use.
    pub icon: Option<&'a str>,
    /// Variant prefix (`my_`, `local_`).
    pub variant: Option<&'a str>,
    /// Permalink URL.
    pub url: Option<&'a str>,
    /// Title attribute.
    pub title: Option<&'a str>,
    /// CSS classes.
    pub class: Option<&'a str>,
    /// Text label.
    pub label: Option<&'a str>,
    /// Inner HTML.
    pub html: Option<&'a str>,
    /// Individual formatted items of a list.
    pub items: Option<&'a [String]>,
    /// Numeric value (rating, amount).
    pub number: Option<f64>,
    /// Unix timestamp of a date.
    pub timestamp: Option<i64>,
    /// Boolean state (adult restriction).
    pub flag: Option<bool>,
}

type FilterFn = dyn Fn(String, &FilterArgs<'_>) -> String + Send + Sync;

struct Registered {
    priority: i32,
    seq: u64,
    callback: Box<FilterFn>,
}

/// Registry of filter callbacks keyed by hook name.
#[derive(Default)]
pub struct Filters {
    hooks: HashMap<String, Vec<Registered>>,
    next_seq: u64,
}

impl Filters {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` on `hook` at `priority`.
    pub fn add<F>(&mut self, hook: impl Into<String>, priority: i32, callback: F)
    where
        F: Fn(String, &FilterArgs<'_>) -> String + Send + Sync + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;

        let entries = self.hooks.entry(hook.into()).or_default();
        entries.push(Registered {
            priority,
            seq,
            callback: Box::new(callback),
        });
        entries.sort_by_key(|r| (r.priority, r.seq));
    }

    /// Whether any callback is registered on `hook`.
    pub fn has(&self, hook: &str) -> bool {
        self.hooks.get(hook).is_some_and(|v| !v.is_empty())
    }

    /// Drop every callback registered on `hook`.
    pub fn clear(&mut self, hook: &str) {
        self.hooks.remove(hook);
    }

    /// Run `value` through every callback on `hook`.
    pub fn apply(&self, hook: &str, value: String, args: &FilterArgs<'_>) -> String {
        match self.hooks.get(hook) {
            Some(callbacks) => callbacks
                .iter()
                .fold(value, |acc, r| (r.callback)(acc, args)),
            None => value,
        }
    }
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self
            .hooks
            .iter()
            .map(|(name, callbacks)| (name.as_str(), callbacks.len()))
            .collect();
        names.sort_unstable();
        f.debug_struct("Filters").field("hooks", &names).finish()
    }
}
