use serde::{Deserialize, Serialize};
use wpmoly_format::{Catalog, FormatSettings};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub format: FormatSettings,

    /// English source text to translated text.
    #[serde(default)]
    pub translations: Catalog,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// Enable TMDb lookups
    #[serde(default)]
    pub enabled: bool,

    /// TMDb v3 API key
    #[serde(default)]
    pub api_key: String,

    /// Response language, e.g. `en-US`
    #[serde(default = "default_language")]
    pub language: String,

    /// API root; only changed to point at a mirror or a test server
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Prefix turning an image `file_path` into a full URL
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            language: default_language(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Host AJAX endpoint receiving uploads (e.g. `https://example.org/wp-admin/admin-ajax.php`)
    #[serde(default)]
    pub ajax_url: Option<String>,

    /// Value sent as the `wpml_check` nonce
    #[serde(default)]
    pub nonce: String,

    /// Delay between `Done!` and closing the session, in milliseconds
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
}

fn default_close_delay_ms() -> u64 {
    2000
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            ajax_url: None,
            nonce: String::new(),
            close_delay_ms: default_close_delay_ms(),
        }
    }
}

impl ImportConfig {
    pub fn close_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.close_delay_ms)
    }
}
