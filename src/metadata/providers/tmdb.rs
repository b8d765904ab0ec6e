//! TMDb (The Movie Database) image provider.
//!
//! Implements [`ImageProvider`] by querying the TMDb v3 images endpoint.
//!
//! Features:
//! - Token-bucket rate limiting at 4 requests / second via [`governor`].
//! - Automatic retry on HTTP 429 with `Retry-After` header support (max 3 retries).
//! - 30-second request timeout.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use wpmoly_common::ImageKind;

use crate::config::TmdbConfig;
use crate::metadata::provider::{ImageProvider, RemoteImage};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: u32 = 3;
const REQUESTS_PER_SECOND: u32 = 4;

// ---------------------------------------------------------------------------
// TMDb API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbImagesResponse {
    posters: Option<Vec<TmdbImage>>,
    backdrops: Option<Vec<TmdbImage>>,
}

#[derive(Debug, Deserialize)]
struct TmdbImage {
    file_path: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    iso_639_1: Option<String>,
    #[serde(default)]
    vote_average: f64,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// TMDb image provider.
///
/// # Examples
///
/// ```no_run
/// use wpmovielibrary::config::TmdbConfig;
/// use wpmovielibrary::metadata::TmdbProvider;
///
/// let config = TmdbConfig {
///     api_key: "your-api-key".into(),
///     ..Default::default()
/// };
/// let provider = TmdbProvider::new(&config).unwrap();
/// ```
pub struct TmdbProvider {
    client: reqwest::Client,
    api_key: String,
    language: String,
    base_url: String,
    image_base_url: String,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl TmdbProvider {
    /// Create a provider from the `[tmdb]` configuration section.
    pub fn new(config: &TmdbConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        let quota =
            Quota::per_second(NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }

    /// Execute a GET request with rate limiting and 429-retry logic.
    async fn get(&self, url: &str) -> anyhow::Result<reqwest::Response> {
        let mut retries = 0u32;
        loop {
            self.rate_limiter.until_ready().await;

            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(reqwest::Error::without_url)
                .with_context(|| format!("TMDb request failed: {}", self.redact(url)))?;

            if resp.status() == StatusCode::TOO_MANY_REQUESTS && retries < MAX_RETRIES {
                retries += 1;
                let wait = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                warn!(
                    retry = retries,
                    wait_secs = wait,
                    "TMDb returned 429, backing off"
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            let resp = resp
                .error_for_status()
                .map_err(reqwest::Error::without_url)
                .with_context(|| format!("TMDb request returned error: {}", self.redact(url)))?;

            return Ok(resp);
        }
    }

    /// Build a full API URL with the API key and language query parameters.
    fn url(&self, path: &str, extra_params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{path}?api_key={}&language={}",
            self.base_url,
            urlencoded(&self.api_key),
            urlencoded(&self.language)
        );
        for (key, value) in extra_params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoded(value));
        }
        url
    }

    /// URL safe to log.
    fn redact(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            return url.to_string();
        }
        url.replace(&urlencoded(&self.api_key), "***")
    }

    fn to_remote(&self, img: TmdbImage) -> RemoteImage {
        RemoteImage {
            url: format!("{}{}", self.image_base_url, img.file_path),
            file_path: img.file_path,
            width: img.width,
            height: img.height,
            language: img.iso_639_1,
            vote_average: img.vote_average,
        }
    }
}

/// Minimal percent-encoding for query parameter values.
fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0f) as usize]));
            }
        }
    }
    out
}

const HEX: [u8; 16] = *b"0123456789ABCDEF";

/// Image languages to include: the configured one plus language-neutral
/// images, e.g. `en,null` for `en-US`.
fn image_languages(language: &str) -> String {
    let primary = language.split(['-', '_']).next().unwrap_or_default();
    if primary.is_empty() {
        "null".to_string()
    } else {
        format!("{},null", primary.to_ascii_lowercase())
    }
}

#[async_trait]
impl ImageProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn movie_images(&self, tmdb_id: u64, kind: ImageKind) -> anyhow::Result<Vec<RemoteImage>> {
        let languages = image_languages(&self.language);
        let url = self.url(
            &format!("/movie/{tmdb_id}/images"),
            &[("include_image_language", languages.as_str())],
        );
        debug!(url = %self.redact(&url), %kind, "TMDb get movie images");

        let resp: TmdbImagesResponse = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to parse TMDb movie images response")?;

        let images = match kind {
            ImageKind::Poster => resp.posters,
            ImageKind::Image => resp.backdrops,
        };

        let mut images: Vec<RemoteImage> = images
            .unwrap_or_default()
            .into_iter()
            .map(|img| self.to_remote(img))
            .collect();

        images.sort_by(|a, b| {
            b.vote_average
                .partial_cmp(&a.vote_average)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: &str) -> TmdbProvider {
        let config = TmdbConfig {
            api_key: api_key.into(),
            ..Default::default()
        };
        TmdbProvider::new(&config).unwrap()
    }

    #[test]
    fn url_construction() {
        let provider = provider("key");
        assert_eq!(
            provider.url("/movie/550/images", &[("include_image_language", "en,null")]),
            "https://api.themoviedb.org/3/movie/550/images?api_key=key&language=en-US&include_image_language=en%2Cnull"
        );
    }

    #[test]
    fn url_is_redacted() {
        let provider = provider("secret");
        let url = provider.url("/movie/550/images", &[]);
        assert!(!provider.redact(&url).contains("secret"));
    }

    #[test]
    fn url_encoding() {
        assert_eq!(urlencoded("hello world"), "hello+world");
        assert_eq!(urlencoded("foo&bar"), "foo%26bar");
        assert_eq!(urlencoded("simple"), "simple");
    }

    #[test]
    fn image_language_filter() {
        assert_eq!(image_languages("en-US"), "en,null");
        assert_eq!(image_languages("FR"), "fr,null");
        assert_eq!(image_languages(""), "null");
    }

    #[test]
    fn remote_image_url() {
        let provider = provider("key");
        let image = provider.to_remote(TmdbImage {
            file_path: "/abc123.jpg".into(),
            width: 1000,
            height: 1500,
            iso_639_1: None,
            vote_average: 5.2,
        });
        assert_eq!(image.url, "https://image.tmdb.org/t/p/original/abc123.jpg");
        assert_eq!(image.file_path, "/abc123.jpg");
    }

    #[test]
    fn provider_is_available() {
        assert!(provider("test-key").is_available());
        assert!(!provider("").is_available());
        assert_eq!(provider("key").name(), "tmdb");
    }
}
