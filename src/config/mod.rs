mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./wpmoly.toml",
        "./config.toml",
        "~/.config/wpmoly/config.toml",
        "/etc/wpmoly/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if !matches!(config.format.rating_base, 5 | 10) {
        anyhow::bail!(
            "Rating base must be 5 or 10, got {}",
            config.format.rating_base
        );
    }

    for token in &config.format.countries_format {
        if !matches!(
            token.as_str(),
            "flag" | "original" | "translated" | "ptranslated" | "poriginal"
        ) {
            tracing::warn!("Unknown country format '{}' will render empty", token);
        }
    }

    if config.tmdb.enabled && config.tmdb.api_key.is_empty() {
        anyhow::bail!("TMDb is enabled but has no API key");
    }

    if let Some(url) = &config.import.ajax_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("Import AJAX URL must be http(s): {}", url);
        }
        if config.import.nonce.is_empty() {
            tracing::warn!("Import AJAX URL is set but no nonce is configured");
        }
    }

    Ok(())
}

/// AJAX endpoint, required by the import commands
pub fn require_ajax_url(config: &Config) -> Result<&str> {
    config
        .import
        .ajax_url
        .as_deref()
        .context("No import.ajax_url configured; uploads need the host AJAX endpoint")
}
