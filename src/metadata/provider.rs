//! Trait definition and types for image providers.
//!
//! The media picker never browses the local attachment library; its result
//! set comes from an [`ImageProvider`] scoped to one movie and one
//! [`ImageKind`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wpmoly_common::ImageKind;

/// A remote image offered for import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteImage {
    /// Path fragment identifying the image at the provider (e.g. `/abc.jpg`).
    pub file_path: String,
    /// Fully-qualified URL to the original size.
    pub url: String,
    /// Image width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Image height in pixels.
    #[serde(default)]
    pub height: u32,
    /// ISO-639-1 language code for text in the image, if any.
    #[serde(default)]
    pub language: Option<String>,
    /// Community vote average (higher is better).
    #[serde(default)]
    pub vote_average: f64,
}

impl RemoteImage {
    /// An image known only by its path fragment.
    pub fn from_path(file_path: &str, image_base_url: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            url: format!("{}{}", image_base_url.trim_end_matches('/'), file_path),
            width: 0,
            height: 0,
            language: None,
            vote_average: 0.0,
        }
    }
}

/// Async trait that image sources implement.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider has credentials and can serve
    /// requests.
    fn is_available(&self) -> bool;

    /// Images of `kind` for the movie `tmdb_id`, best voted first.
    async fn movie_images(&self, tmdb_id: u64, kind: ImageKind) -> anyhow::Result<Vec<RemoteImage>>;
}
