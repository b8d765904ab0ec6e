//! External-media picker.
//!
//! Two flows import remote artwork into a movie through the host's AJAX
//! endpoint:
//!
//! - [`ImageImporter`] uploads any number of images concurrently and
//!   reports progress as each upload succeeds.
//! - [`PosterPicker`] uploads a single poster and makes it the movie's
//!   featured image.
//!
//! Both work on a result set scoped by an [`ImageQuery`] and publish their
//! state on a [`Progress`] watch channel.

mod import;
mod poster;
mod progress;
mod upload;

pub use import::{ImageImporter, ImportReport};
pub use poster::{PosterPicker, PosterSelection};
pub use progress::{Progress, Session};
pub use upload::{AjaxUploader, UploadAction, UploadError, UploadRequest, Uploader};

use std::fmt;
use std::str::FromStr;

use wpmoly_common::{Error, ImageKind};

use crate::metadata::{ImageProvider, RemoteImage};

/// Search string scoping a picker to one movie's remote images, e.g.
/// `TMDb_ID=550,type=poster`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageQuery {
    pub tmdb_id: u64,
    pub kind: ImageKind,
}

impl ImageQuery {
    pub fn new(tmdb_id: u64, kind: ImageKind) -> Self {
        Self { tmdb_id, kind }
    }

    /// Fetch the result set from `provider`.
    pub async fn fetch(&self, provider: &dyn ImageProvider) -> anyhow::Result<Vec<RemoteImage>> {
        if !provider.is_available() {
            anyhow::bail!("{} provider is not configured", provider.name());
        }
        provider.movie_images(self.tmdb_id, self.kind).await
    }
}

impl fmt::Display for ImageQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TMDb_ID={},type={}", self.tmdb_id, self.kind)
    }
}

impl FromStr for ImageQuery {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tmdb_id = None;
        let mut kind = None;

        for part in s.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| Error::invalid_input(format!("malformed query part '{part}'")))?;
            match key.trim() {
                "TMDb_ID" => {
                    let id = value.trim().parse::<u64>().map_err(|_| {
                        Error::invalid_input(format!("invalid TMDb id '{}'", value.trim()))
                    })?;
                    tmdb_id = Some(id);
                }
                "type" => kind = Some(value.parse::<ImageKind>()?),
                other => {
                    return Err(Error::invalid_input(format!("unknown query key '{other}'")));
                }
            }
        }

        match (tmdb_id, kind) {
            (Some(tmdb_id), Some(kind)) => Ok(Self { tmdb_id, kind }),
            (None, _) => Err(Error::invalid_input("query has no TMDb_ID")),
            (_, None) => Err(Error::invalid_input("query has no type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_query_string() {
        assert_eq!(
            ImageQuery::new(550, ImageKind::Image).to_string(),
            "TMDb_ID=550,type=image"
        );
        assert_eq!(
            ImageQuery::new(550, ImageKind::Poster).to_string(),
            "TMDb_ID=550,type=poster"
        );
    }

    #[test]
    fn test_parse_query() {
        let query: ImageQuery = "TMDb_ID=550,type=poster".parse().unwrap();
        assert_eq!(query, ImageQuery::new(550, ImageKind::Poster));

        let query: ImageQuery = "type=image, TMDb_ID=603".parse().unwrap();
        assert_eq!(query, ImageQuery::new(603, ImageKind::Image));
    }

    #[test]
    fn test_parse_query_errors() {
        assert_matches!("TMDb_ID=550".parse::<ImageQuery>(), Err(Error::InvalidInput(_)));
        assert_matches!("type=poster".parse::<ImageQuery>(), Err(Error::InvalidInput(_)));
        assert_matches!("TMDb_ID=abc,type=poster".parse::<ImageQuery>(), Err(Error::InvalidInput(_)));
        assert_matches!("TMDb_ID=1,type=logo".parse::<ImageQuery>(), Err(Error::InvalidInput(_)));
        assert_matches!("s=fight club".parse::<ImageQuery>(), Err(Error::InvalidInput(_)));
    }
}
