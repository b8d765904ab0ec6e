//! Field formatter dispatch.
//!
//! [`Formatter`] owns the settings, translation catalog, term store, and
//! filter registry, and maps each [`Field`] to its formatting routine. The
//! routines live in the submodules, grouped by what they render.

mod date;
mod detail;
mod generic;
mod geo;
mod rating;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;
use wpmoly_common::{Error, MetaValue, MovieRecord, Taxonomy};

use crate::hooks::{self, FilterArgs, Filters};
use crate::i18n::Catalog;
use crate::options::FormatOptions;
use crate::settings::FormatSettings;
use crate::taxonomy::{MemoryTermStore, TermStore};

/// A formattable movie field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Field {
    /// Adult restriction.
    Adult,
    /// Screenplay author.
    Author,
    /// Production budget.
    Budget,
    /// Cast, matched against actor terms.
    Cast,
    /// Certification.
    Certification,
    /// Original music composer.
    Composer,
    /// Director, matched against collection terms.
    Director,
    /// Format detail.
    Format,
    /// Genres, matched against genre terms.
    Genres,
    /// Official homepage.
    Homepage,
    /// Original language.
    Language,
    /// Local release date.
    LocalReleaseDate,
    /// Media detail.
    Media,
    /// Director of photography.
    Photography,
    /// Producers.
    Producer,
    /// Production companies.
    ProductionCompanies,
    /// Production countries.
    ProductionCountries,
    /// Rating.
    Rating,
    /// Release date.
    ReleaseDate,
    /// Revenue.
    Revenue,
    /// Runtime in minutes.
    Runtime,
    /// Spoken languages.
    SpokenLanguages,
    /// Status detail.
    Status,
    /// Subtitle languages.
    Subtitles,
    /// Writers.
    Writer,
    /// Release year.
    Year,
}

impl Field {
    /// Every field, in display order.
    pub const ALL: [Field; 26] = [
        Field::Adult,
        Field::Author,
        Field::Budget,
        Field::Cast,
        Field::Certification,
        Field::Composer,
        Field::Director,
        Field::Format,
        Field::Genres,
        Field::Homepage,
        Field::Language,
        Field::LocalReleaseDate,
        Field::Media,
        Field::Photography,
        Field::Producer,
        Field::ProductionCompanies,
        Field::ProductionCountries,
        Field::Rating,
        Field::ReleaseDate,
        Field::Revenue,
        Field::Runtime,
        Field::SpokenLanguages,
        Field::Status,
        Field::Subtitles,
        Field::Writer,
        Field::Year,
    ];

    /// Canonical field name, as stored in movie metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Author => "author",
            Self::Budget => "budget",
            Self::Cast => "cast",
            Self::Certification => "certification",
            Self::Composer => "composer",
            Self::Director => "director",
            Self::Format => "format",
            Self::Genres => "genres",
            Self::Homepage => "homepage",
            Self::Language => "language",
            Self::LocalReleaseDate => "local_release_date",
            Self::Media => "media",
            Self::Photography => "photography",
            Self::Producer => "producer",
            Self::ProductionCompanies => "production_companies",
            Self::ProductionCountries => "production_countries",
            Self::Rating => "rating",
            Self::ReleaseDate => "release_date",
            Self::Revenue => "revenue",
            Self::Runtime => "runtime",
            Self::SpokenLanguages => "spoken_languages",
            Self::Status => "status",
            Self::Subtitles => "subtitles",
            Self::Writer => "writer",
            Self::Year => "year",
        }
    }

    /// Alternate names accepted for this field.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Cast => &["actors"],
            Self::ProductionCompanies => &["production"],
            Self::ProductionCountries => &["countries"],
            Self::ReleaseDate => &["date"],
            Self::SpokenLanguages => &["languages"],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == name || f.aliases().contains(&name.as_str()))
            .ok_or_else(|| Error::invalid_input(format!("unknown field '{s}'")))
    }
}

/// Formats raw movie metadata for display.
///
/// A `Formatter` is immutable once built and can be shared across threads;
/// every call renders from scratch.
///
/// ```
/// use wpmoly_format::{Formatter, FormatOptions, FormatSettings};
/// use wpmoly_common::MetaValue;
///
/// let formatter = Formatter::new(FormatSettings::default());
/// let out = formatter.format("writer", &MetaValue::from("Jim Uhls, Chuck Palahniuk"), &FormatOptions::new());
/// assert_eq!(out, "Jim Uhls, Chuck Palahniuk");
///
/// let out = formatter.format("budget", &MetaValue::from(""), &FormatOptions::new());
/// assert_eq!(out, "&mdash;");
/// ```
pub struct Formatter {
    settings: FormatSettings,
    catalog: Catalog,
    terms: Arc<dyn TermStore>,
    filters: Filters,
}

impl Formatter {
    /// Create a formatter with an empty term store and catalog.
    pub fn new(settings: FormatSettings) -> Self {
        let mut filters = Filters::new();
        install_default_filters(&mut filters);

        Self {
            settings,
            catalog: Catalog::new(),
            terms: Arc::new(MemoryTermStore::new()),
            filters,
        }
    }

    /// Use `catalog` for translations.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use `store` for taxonomy term lookups.
    pub fn with_terms(mut self, store: Arc<dyn TermStore>) -> Self {
        self.terms = store;
        self
    }

    /// Register a filter callback, builder style.
    pub fn with_filter<F>(mut self, hook: impl Into<String>, priority: i32, callback: F) -> Self
    where
        F: Fn(String, &FilterArgs<'_>) -> String + Send + Sync + 'static,
    {
        self.filters.add(hook, priority, callback);
        self
    }

    /// Mutable access to the filter registry.
    pub fn filters_mut(&mut self) -> &mut Filters {
        &mut self.filters
    }

    /// Active settings.
    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    /// Active catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Format a field by name. Unknown names yield the placeholder.
    pub fn format(&self, field: &str, value: &MetaValue, options: &FormatOptions) -> String {
        match field.parse::<Field>() {
            Ok(field) => self.format_field(field, value, options),
            Err(_) => {
                debug!(field, "no formatter for field");
                self.empty_value(String::new())
            }
        }
    }

    /// Format one field.
    pub fn format_field(&self, field: Field, value: &MetaValue, options: &FormatOptions) -> String {
        match field {
            Field::Adult => self.adult(value),
            Field::Author => self.meta_list("author", "author", value),
            Field::Budget | Field::Revenue => self.money(value),
            Field::Cast => self.terms_list(value, Taxonomy::Actor, options),
            Field::Certification => self.certification(value),
            Field::Composer => self.meta_list("composer", "composer", value),
            Field::Director => self.terms_list(value, Taxonomy::Collection, options),
            Field::Format => self.detail("format", value, options),
            Field::Genres => self.terms_list(value, Taxonomy::Genre, options),
            Field::Homepage => self.homepage(value),
            Field::Language => {
                let options = options.clone().variant("my_");
                self.spoken_languages(value, &options)
            }
            Field::LocalReleaseDate => {
                let options = options.clone().variant("local_");
                self.release_date(value, &options)
            }
            Field::Media => self.detail("media", value, options),
            Field::Photography => self.meta_list("photography", "photography", value),
            Field::Producer => self.meta_list("producer", "producer", value),
            Field::ProductionCompanies => {
                self.meta_list("production", "production_companies", value)
            }
            Field::ProductionCountries => self.production_countries(value, options),
            Field::Rating => self.rating(value, options),
            Field::ReleaseDate => self.release_date(value, options),
            Field::Runtime => self.runtime(value, options),
            Field::SpokenLanguages | Field::Subtitles => self.spoken_languages(value, options),
            Field::Status => self.detail("status", value, options),
            Field::Writer => self.meta_list("writer", "writer", value),
            Field::Year => {
                let options = options.clone().format("Y");
                self.release_date(value, &options)
            }
        }
    }

    /// Format every stored field of `record` that has a formatter, in field
    /// name order.
    pub fn format_record(
        &self,
        record: &MovieRecord,
        options: &FormatOptions,
    ) -> Vec<(Field, String)> {
        record
            .meta
            .iter()
            .filter_map(|(name, value)| {
                let field = name.parse::<Field>().ok()?;
                Some((field, self.format_field(field, value, options)))
            })
            .collect()
    }

    /// Replace an empty rendered value with the placeholder.
    ///
    /// `""` and `"0"` count as empty. The placeholder runs through the
    /// empty-value filter.
    pub fn empty_value(&self, value: String) -> String {
        if !value.is_empty() && value != "0" {
            return value;
        }
        self.filters.apply(
            hooks::EMPTY_VALUE,
            self.settings.placeholder.clone(),
            &FilterArgs::default(),
        )
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("settings", &self.settings)
            .field("catalog", &self.catalog.len())
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// Built-in callbacks every formatter starts with.
fn install_default_filters(filters: &mut Filters) {
    // Language names get their ISO badge in front.
    filters.add(hooks::LANGUAGE_SINGLE, hooks::DEFAULT_PRIORITY, |name, args| {
        format!("{}{}", args.icon.unwrap_or_default(), name)
    });
}
