//! Core type definitions for movie records and their raw metadata.
//!
//! Stored metadata is loosely typed: the same field may hold a string, a
//! comma-delimited list, a number, a boolean, or an array depending on how it
//! was imported. [`MetaValue`] captures all of these and exposes the coercions
//! formatters rely on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ids::MovieId;

/// Taxonomy a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    /// Movie genres.
    Genre,
    /// Cast members.
    Actor,
    /// Collections, keyed by director name.
    Collection,
}

impl Taxonomy {
    /// Every taxonomy, in registration order.
    pub const ALL: [Taxonomy; 3] = [Taxonomy::Genre, Taxonomy::Actor, Taxonomy::Collection];

    /// Slug used in option keys and permalinks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Actor => "actor",
            Self::Collection => "collection",
        }
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of external image a picker session is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Backdrops and stills, imported in bulk.
    Image,
    /// Poster artwork, a single one becomes the featured image.
    Poster,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Poster => write!(f, "poster"),
        }
    }
}

impl std::str::FromStr for ImageKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "images" | "backdrop" | "backdrops" => Ok(Self::Image),
            "poster" | "posters" => Ok(Self::Poster),
            other => Err(crate::Error::invalid_input(format!(
                "unknown image kind '{other}'"
            ))),
        }
    }
}

/// A raw stored metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum MetaValue {
    /// No stored value.
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// An integral number.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string, possibly a comma-delimited list.
    Text(String),
    /// An array of strings.
    List(Vec<String>),
    /// Any other JSON shape: nested arrays, lists mixing strings with null
    /// or numbers, objects. Read through its string leaves.
    Other(serde_json::Value),
}

impl MetaValue {
    /// Loose emptiness: null, `false`, `0`, `0.0`, `""`, `"0"`, and the empty
    /// list are all empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Integer(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::Text(s) => s.is_empty() || s == "0",
            Self::List(items) => items.is_empty(),
            Self::Other(serde_json::Value::Array(items)) => items.is_empty(),
            Self::Other(serde_json::Value::Object(map)) => map.is_empty(),
            Self::Other(other) => other.is_null(),
        }
    }

    /// String form. Lists are joined back with a bare comma.
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(true) => "1".to_string(),
            Self::Bool(false) => String::new(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(","),
            Self::Other(_) => self.as_list().join(","),
        }
    }

    /// List form. Text is split on a literal comma with no escaping and no
    /// trimming, so `"Smith, Jr."` becomes two items.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            Self::Null => Vec::new(),
            Self::List(items) => items.clone(),
            Self::Other(value) => {
                let mut items = Vec::new();
                collect_leaves(value, &mut items);
                items
            }
            Self::Text(s) => s.split(',').map(str::to_string).collect(),
            other => vec![other.as_text()],
        }
    }

    /// Integer coercion: leading digits of text, truncation of floats,
    /// zero for anything else.
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Null | Self::List(_) | Self::Other(_) => 0,
            Self::Bool(b) => i64::from(*b),
            Self::Integer(i) => *i,
            Self::Float(f) => *f as i64,
            Self::Text(s) => leading_number(s)
                .and_then(|n| n.split('.').next().map(str::to_string))
                .and_then(|n| n.parse::<i64>().ok())
                .unwrap_or(0),
        }
    }

    /// Float coercion with the same leniency as [`MetaValue::as_int`].
    pub fn as_float(&self) -> f64 {
        match self {
            Self::Null | Self::List(_) | Self::Other(_) => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Integer(i) => *i as f64,
            Self::Float(f) => *f,
            Self::Text(s) => leading_number(s)
                .and_then(|n| n.parse::<f64>().ok())
                .unwrap_or(0.0),
        }
    }

    /// Truthiness the way option flags are stored: `true`, non-zero numbers,
    /// and the strings `1`, `true`, `yes`, `on`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            Self::Null | Self::List(_) | Self::Other(_) => false,
        }
    }
}

/// Flatten nested arrays into their leaves. Strings and numbers keep their
/// text; null, `false`, and objects become empty items.
fn collect_leaves(value: &serde_json::Value, out: &mut Vec<String>) {
    use serde_json::Value;

    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_leaves(item, out)),
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(true) => out.push("1".to_string()),
        Value::Bool(false) | Value::Null | Value::Object(_) => out.push(String::new()),
    }
}

/// Longest numeric prefix (optional sign, digits, one dot) after leading
/// whitespace.
fn leading_number(s: &str) -> Option<String> {
    let s = s.trim_start();
    let mut out = String::new();
    let mut seen_dot = false;
    for (i, c) in s.chars().enumerate() {
        match c {
            '-' | '+' if i == 0 => out.push(c),
            '0'..='9' => out.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                out.push(c);
            }
            _ => break,
        }
    }
    let digits = out.trim_start_matches(['-', '+']).trim_end_matches('.');
    if digits.is_empty() {
        None
    } else {
        Some(out.trim_end_matches('.').to_string())
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for MetaValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for MetaValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

/// A movie content item and its stored metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Host content-item id.
    pub id: MovieId,

    /// Post title, used for upload titles and alt text.
    #[serde(default)]
    pub title: Option<String>,

    /// TMDb id the record was imported from.
    #[serde(default)]
    pub tmdb_id: Option<u64>,

    /// Field name to raw value.
    #[serde(default)]
    pub meta: BTreeMap<String, MetaValue>,
}

impl MovieRecord {
    /// Create an empty record.
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Set a field, builder style.
    pub fn with_meta(mut self, field: &str, value: impl Into<MetaValue>) -> Self {
        self.meta.insert(field.to_string(), value.into());
        self
    }

    /// Raw value of a field; missing fields read as [`MetaValue::Null`].
    pub fn get(&self, field: &str) -> &MetaValue {
        static NULL: MetaValue = MetaValue::Null;
        self.meta.get(field).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(MetaValue::Null.is_empty());
        assert!(MetaValue::from("").is_empty());
        assert!(MetaValue::from("0").is_empty());
        assert!(MetaValue::from(0_i64).is_empty());
        assert!(MetaValue::from(0.0).is_empty());
        assert!(MetaValue::from(false).is_empty());
        assert!(MetaValue::List(vec![]).is_empty());

        assert!(!MetaValue::from(" ").is_empty());
        assert!(!MetaValue::from("0.0").is_empty());
        assert!(!MetaValue::from(vec![""]).is_empty());
    }

    #[test]
    fn test_irregular_shapes_deserialize() {
        let record: MovieRecord = serde_json::from_str(
            r#"{"id":1,"meta":{"genres":"Drama","crew":[["Director","David Fincher"]]}}"#,
        )
        .unwrap();
        assert_eq!(record.get("genres"), &MetaValue::from("Drama"));
        assert_eq!(record.get("crew").as_list(), vec!["Director", "David Fincher"]);
        assert_eq!(record.get("crew").as_text(), "Director,David Fincher");

        let record: MovieRecord =
            serde_json::from_str(r#"{"id":2,"meta":{"cast":["Brad Pitt",null]}}"#).unwrap();
        assert_eq!(record.get("cast").as_list(), vec!["Brad Pitt", ""]);
        assert!(!record.get("cast").is_empty());

        let record: MovieRecord = serde_json::from_str(
            r#"{"id":3,"meta":{"production_countries":[{"iso_3166_1":"US"}]}}"#,
        )
        .unwrap();
        let countries = record.get("production_countries");
        assert_eq!(countries.as_list(), vec![""]);
        assert_eq!(countries.as_int(), 0);
        assert!(!countries.is_truthy());
    }

    #[test]
    fn test_irregular_shape_emptiness() {
        let value = |json: &str| serde_json::from_str::<MetaValue>(json).unwrap();

        assert!(value("[[]]").as_list().is_empty());
        assert!(!value("[[]]").is_empty());
        assert!(value("{}").is_empty());
        assert_eq!(value("[1, [2.5, \"x\"]]").as_list(), vec!["1", "2.5", "x"]);
        assert_eq!(value("[\"a\", \"b\"]"), MetaValue::from(vec!["a", "b"]));
    }

    #[test]
    fn test_as_list_splits_on_bare_comma() {
        let value = MetaValue::from("Brad Pitt, Edward Norton,Helena Bonham Carter");
        assert_eq!(
            value.as_list(),
            vec!["Brad Pitt", " Edward Norton", "Helena Bonham Carter"]
        );

        let value = MetaValue::from("Smith, Jr.");
        assert_eq!(value.as_list().len(), 2);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(MetaValue::from("139").as_int(), 139);
        assert_eq!(MetaValue::from(" 63000000 USD").as_int(), 63_000_000);
        assert_eq!(MetaValue::from("1,000").as_int(), 1);
        assert_eq!(MetaValue::from("12.9").as_int(), 12);
        assert_eq!(MetaValue::from("abc").as_int(), 0);
        assert_eq!(MetaValue::from(-3.7).as_int(), -3);

        assert_eq!(MetaValue::from("3.5").as_float(), 3.5);
        assert_eq!(MetaValue::from("4.5 stars").as_float(), 4.5);
        assert_eq!(MetaValue::from("-1").as_float(), -1.0);
        assert_eq!(MetaValue::from(".").as_float(), 0.0);
        assert_eq!(MetaValue::from(7_i64).as_float(), 7.0);
    }

    #[test]
    fn test_truthiness() {
        assert!(MetaValue::from("1").is_truthy());
        assert!(MetaValue::from("Yes").is_truthy());
        assert!(MetaValue::from(true).is_truthy());
        assert!(!MetaValue::from("false").is_truthy());
        assert!(!MetaValue::from("0").is_truthy());
        assert!(!MetaValue::Null.is_truthy());
    }

    #[test]
    fn test_deserialize_untagged() {
        let record: MovieRecord = serde_json::from_str(
            r#"{
                "id": 12,
                "title": "Fight Club",
                "meta": {
                    "runtime": 139,
                    "rating": 4.5,
                    "genres": "Drama",
                    "status": ["available", "loaned"],
                    "adult": false,
                    "homepage": null
                }
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, MovieId::new(12));
        assert_eq!(record.get("runtime"), &MetaValue::Integer(139));
        assert_eq!(record.get("rating"), &MetaValue::Float(4.5));
        assert_eq!(record.get("genres"), &MetaValue::from("Drama"));
        assert_eq!(record.get("status"), &MetaValue::from(vec!["available", "loaned"]));
        assert_eq!(record.get("adult"), &MetaValue::Bool(false));
        assert_eq!(record.get("homepage"), &MetaValue::Null);
        assert_eq!(record.get("missing"), &MetaValue::Null);
    }

    #[test]
    fn test_image_kind_parse() {
        assert_eq!("poster".parse::<ImageKind>().unwrap(), ImageKind::Poster);
        assert_eq!("Backdrops".parse::<ImageKind>().unwrap(), ImageKind::Image);
        assert!("logo".parse::<ImageKind>().is_err());
    }
}
