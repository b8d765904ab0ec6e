//! Per-call formatting options.
//!
//! Callers pass overrides; each formatter merges them over its own defaults
//! with [`FormatOptions::or`]. Nothing is persisted between calls.

use wpmoly_common::{Error, Result};

/// Formatting flags and parameters.
///
/// Every field is optional so "not given" can be told apart from an explicit
/// `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Prefix items with their icon (stars, detail icons, language codes).
    pub show_icon: Option<bool>,
    /// Include the text label.
    pub show_text: Option<bool>,
    /// Wrap values in permalinks.
    pub is_link: Option<bool>,
    /// Render an unrated movie as a row of empty stars instead of a label.
    pub include_empty: Option<bool>,
    /// Extra title attribute.
    pub attr_title: Option<String>,
    /// Date or time pattern overriding the configured one.
    pub format: Option<String>,
    /// Field variant (`local_`, `my_`).
    pub variant: Option<String>,
}

impl FormatOptions {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `show_icon`.
    pub fn show_icon(mut self, value: bool) -> Self {
        self.show_icon = Some(value);
        self
    }

    /// Set `show_text`.
    pub fn show_text(mut self, value: bool) -> Self {
        self.show_text = Some(value);
        self
    }

    /// Set `is_link`.
    pub fn is_link(mut self, value: bool) -> Self {
        self.is_link = Some(value);
        self
    }

    /// Set `include_empty`.
    pub fn include_empty(mut self, value: bool) -> Self {
        self.include_empty = Some(value);
        self
    }

    /// Set `format`.
    pub fn format(mut self, pattern: impl Into<String>) -> Self {
        self.format = Some(pattern.into());
        self
    }

    /// Set `variant`.
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Merge `self` over `defaults`: values set here win.
    pub fn or(&self, defaults: &FormatOptions) -> FormatOptions {
        FormatOptions {
            show_icon: self.show_icon.or(defaults.show_icon),
            show_text: self.show_text.or(defaults.show_text),
            is_link: self.is_link.or(defaults.is_link),
            include_empty: self.include_empty.or(defaults.include_empty),
            attr_title: self.attr_title.clone().or_else(|| defaults.attr_title.clone()),
            format: self.format.clone().or_else(|| defaults.format.clone()),
            variant: self.variant.clone().or_else(|| defaults.variant.clone()),
        }
    }

    /// Flag value, `false` when unset.
    pub fn flag(value: Option<bool>) -> bool {
        value.unwrap_or(false)
    }

    /// Apply a `key=value` override as given on a command line.
    ///
    /// Flags accept `1/0`, `true/false`, `yes/no`, `on/off`.
    pub fn set(&mut self, pair: &str) -> Result<()> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::invalid_input(format!("expected key=value, got '{pair}'")))?;
        let key = key.trim();
        let value = value.trim();

        match key {
            "show_icon" => self.show_icon = Some(parse_flag(value)?),
            "show_text" => self.show_text = Some(parse_flag(value)?),
            "is_link" => self.is_link = Some(parse_flag(value)?),
            "include_empty" => self.include_empty = Some(parse_flag(value)?),
            "attr_title" => self.attr_title = Some(value.to_string()),
            "format" => self.format = Some(value.to_string()),
            "variant" => self.variant = Some(value.to_string()),
            other => {
                return Err(Error::invalid_input(format!("unknown option '{other}'")));
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::invalid_input(format!("not a flag: '{other}'"))),
    }
}
