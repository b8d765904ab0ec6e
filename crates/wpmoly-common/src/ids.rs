//! Typed ID wrappers for type safety across wpmovielibrary.
//!
//! The host CMS identifies content items, terms, and media attachments with
//! positive integers. These newtypes keep a post id from being passed where
//! an attachment id is expected.

use serde::{Deserialize, Serialize};

/// Content-item id of a movie record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(u64);

impl MovieId {
    /// Wrap a raw post id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id of a taxonomy term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(u64);

impl TermId {
    /// Wrap a raw term id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TermId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id of a media attachment created by an image upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(u64);

impl AttachmentId {
    /// Wrap a raw attachment id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for AttachmentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for AttachmentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl std::fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_roundtrip() {
        let id = MovieId::new(1337);
        assert_eq!(id.get(), 1337);
        assert_eq!(id.to_string(), "1337");
        assert_eq!(MovieId::from(1337), id);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&TermId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: MovieId = serde_json::from_str("42").unwrap();
        assert_eq!(id, MovieId::new(42));
    }

    #[test]
    fn test_attachment_id_from_response_body() {
        let id: AttachmentId = " 128\n".parse().unwrap();
        assert_eq!(id, AttachmentId::new(128));
        assert!("<html>".parse::<AttachmentId>().is_err());
        assert!("-1".parse::<AttachmentId>().is_err());
    }
}
