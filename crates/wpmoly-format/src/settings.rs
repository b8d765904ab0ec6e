//! Library-wide formatting settings.
//!
//! These are the stored plugin options the formatters consult: which
//! taxonomies are enabled, how countries, languages, ratings, dates, and
//! runtimes are rendered, the details tables, and the permalink base.

use std::collections::BTreeMap;

use wpmoly_common::Taxonomy;

use crate::html::sanitize_title;

/// Slug to label, per detail (`status`, `media`, `format`, `rating`).
pub type DetailsTable = BTreeMap<String, BTreeMap<String, String>>;

/// Formatting settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatSettings {
    /// Taxonomies whose terms are looked up and linked.
    pub taxonomies: Vec<Taxonomy>,

    /// Render countries with `countries_format` instead of the plain name.
    pub translate_countries: bool,

    /// Country item formats: `flag`, `original`, `translated`,
    /// `ptranslated`, `poriginal`.
    pub countries_format: Vec<String>,

    /// Show localized language names.
    pub translate_languages: bool,

    /// Rating display base, 5 or 10.
    pub rating_base: u8,

    /// Release date pattern; empty means `j F Y`.
    pub date_format: String,

    /// Runtime pattern; empty means `G \h i \m\i\n`.
    pub time_format: String,

    /// Placeholder for empty values, before the empty-value filter runs.
    pub placeholder: String,

    /// Base path of meta and term permalinks.
    pub permalink_base: String,

    /// Detail slugs and labels.
    pub details: DetailsTable,
}

/// Date pattern used when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "j F Y";

/// Runtime pattern used when none is configured.
pub const DEFAULT_TIME_FORMAT: &str = r"G \h i \m\i\n";

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            taxonomies: Taxonomy::ALL.to_vec(),
            translate_countries: true,
            countries_format: vec!["flag".to_string(), "translated".to_string()],
            translate_languages: true,
            rating_base: 5,
            date_format: String::new(),
            time_format: String::new(),
            placeholder: "&mdash;".to_string(),
            permalink_base: "/movies".to_string(),
            details: default_details(),
        }
    }
}

impl FormatSettings {
    /// Whether term lookup is enabled for `taxonomy`.
    pub fn taxonomy_enabled(&self, taxonomy: Taxonomy) -> bool {
        self.taxonomies.contains(&taxonomy)
    }

    /// Enable or disable a taxonomy, builder style.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy, enabled: bool) -> Self {
        self.taxonomies.retain(|t| *t != taxonomy);
        if enabled {
            self.taxonomies.push(taxonomy);
        }
        self
    }

    /// Options of one detail.
    pub fn detail(&self, detail: &str) -> Option<&BTreeMap<String, String>> {
        self.details.get(detail)
    }

    /// Permalink of a meta value, e.g. `/movies/rating/4-5/`.
    pub fn meta_url(&self, meta: &str, value: &str) -> String {
        format!(
            "{}/{}/{}/",
            self.permalink_base.trim_end_matches('/'),
            meta,
            sanitize_title(value)
        )
    }

    /// Permalink of a term archive, e.g. `/movies/genre/drama/`.
    pub fn term_url(&self, taxonomy: Taxonomy, slug: &str) -> String {
        format!(
            "{}/{}/{}/",
            self.permalink_base.trim_end_matches('/'),
            taxonomy,
            slug
        )
    }
}

/// Built-in details tables.
pub fn default_details() -> DetailsTable {
    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(slug, label)| (slug.to_string(), label.to_string()))
            .collect()
    }

    let mut details = DetailsTable::new();
    details.insert(
        "status".to_string(),
        table(&[
            ("available", "Available"),
            ("loaned", "Loaned"),
            ("scheduled", "Scheduled"),
        ]),
    );
    details.insert(
        "media".to_string(),
        table(&[
            ("dvd", "DVD"),
            ("bluray", "Blu-ray"),
            ("vod", "VOD"),
            ("divx", "DivX"),
            ("vhs", "VHS"),
            ("cinema", "Cinema"),
            ("other", "Other"),
        ]),
    );
    details.insert(
        "format".to_string(),
        table(&[
            ("3d", "3D"),
            ("sd", "SD"),
            ("hd", "HD"),
            ("uhd", "Ultra HD"),
            ("cinemascope", "Cinemascope"),
        ]),
    );
    details.insert(
        "rating".to_string(),
        table(&[
            ("0.0", "Not rated"),
            ("0.5", "Junk"),
            ("1.0", "Very bad"),
            ("1.5", "Bad"),
            ("2.0", "Not that bad"),
            ("2.5", "Average"),
            ("3.0", "Not bad"),
            ("3.5", "Good"),
            ("4.0", "Very good"),
            ("4.5", "Excellent"),
            ("5.0", "Masterpiece"),
        ]),
    );
    details
}
