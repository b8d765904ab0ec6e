//! Movie records and term stores read from JSON exports.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use wpmoly_common::MovieRecord;
use wpmoly_format::{Formatter, MemoryTermStore, Term};

use crate::config::Config;

/// A movie export holds one record or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum MovieFile {
    One(MovieRecord),
    Many(Vec<MovieRecord>),
}

/// Load every movie record in a JSON file.
pub fn load_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read movie file: {:?}", path))?;

    let movies = match serde_json::from_str::<MovieFile>(&content)
        .with_context(|| format!("Failed to parse movie file: {:?}", path))?
    {
        MovieFile::One(movie) => vec![movie],
        MovieFile::Many(movies) => movies,
    };

    tracing::debug!("Loaded {} movie record(s) from {:?}", movies.len(), path);
    Ok(movies)
}

/// Load a term store from a JSON array of terms.
pub fn load_terms(path: &Path) -> Result<MemoryTermStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read terms file: {:?}", path))?;

    let terms: Vec<Term> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse terms file: {:?}", path))?;

    Ok(terms.into_iter().collect())
}

/// Build a formatter from configuration and an optional term store.
pub fn build_formatter(config: &Config, terms: Option<MemoryTermStore>) -> Formatter {
    let formatter = Formatter::new(config.format.clone()).with_catalog(config.translations.clone());
    match terms {
        Some(terms) => formatter.with_terms(Arc::new(terms)),
        None => formatter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wpmoly_common::{MetaValue, MovieId, Taxonomy};
    use wpmoly_format::TermStore;

    fn write_json(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_single_movie() {
        let file = write_json(
            r#"{
                "id": 12,
                "title": "Fight Club",
                "tmdb_id": 550,
                "meta": {
                    "budget": 63000000,
                    "genres": "Drama",
                    "rating": 4.5,
                    "adult": false,
                    "cast": ["Edward Norton", "Brad Pitt"]
                }
            }"#,
        );

        let movies = load_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 1);

        let movie = &movies[0];
        assert_eq!(movie.id, MovieId::new(12));
        assert_eq!(movie.tmdb_id, Some(550));
        assert_eq!(movie.get("budget"), &MetaValue::Integer(63_000_000));
        assert_eq!(movie.get("rating"), &MetaValue::Float(4.5));
        assert_eq!(movie.get("adult"), &MetaValue::Bool(false));
        assert_eq!(movie.get("cast").as_list(), vec!["Edward Norton", "Brad Pitt"]);
        assert_eq!(movie.get("missing"), &MetaValue::Null);
    }

    #[test]
    fn test_load_movie_list() {
        let file = write_json(r#"[{"id": 1}, {"id": 2, "meta": {"year": "1999-10-15"}}]"#);
        let movies = load_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 2);
        assert!(movies[0].meta.is_empty());
    }

    #[test]
    fn test_irregular_values_do_not_reject_the_file() {
        let file = write_json(
            r#"[
                {"id": 1, "meta": {"genres": "Drama", "crew": [["Director", "David Fincher"]]}},
                {"id": 2, "meta": {"cast": ["Brad Pitt", null]}},
                {"id": 3, "meta": {"production_countries": [{"iso_3166_1": "US"}]}}
            ]"#,
        );

        let movies = load_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 3);

        let formatter = build_formatter(&Config::default(), None);
        let options = Default::default();
        assert_eq!(formatter.format("genres", movies[0].get("genres"), &options), "Drama");
        assert_eq!(
            formatter.format("writer", movies[0].get("crew"), &options),
            "Director, David Fincher"
        );
        assert!(formatter
            .format("cast", movies[1].get("cast"), &options)
            .starts_with("Brad Pitt"));
    }

    #[test]
    fn test_invalid_movie_file() {
        let file = write_json("{ not json");
        let err = load_movies(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse movie file"));
    }

    #[test]
    fn test_load_terms() {
        let file = write_json(
            r#"[
                {"id": 1, "name": "Science Fiction", "taxonomy": "genre"},
                {"id": 2, "name": "Brad Pitt", "slug": "brad", "taxonomy": "actor"}
            ]"#,
        );
        let store = load_terms(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.term_by_name(Taxonomy::Genre, "science fiction").unwrap().slug,
            "science-fiction"
        );
        assert!(store.term_by_slug(Taxonomy::Actor, "brad").is_some());
    }

    #[test]
    fn test_build_formatter_uses_translations() {
        let mut config = Config::default();
        config.translations.insert("Yes", "Oui");
        let formatter = build_formatter(&config, None);
        assert_eq!(
            formatter.format("adult", &MetaValue::from(true), &Default::default()),
            "Oui"
        );
    }
}
