//! Star ratings.

use std::sync::LazyLock;

use regex::Regex;
use wpmoly_common::MetaValue;

use super::Formatter;
use crate::hooks::{self, FilterArgs};
use crate::html::{esc_attr, esc_url, trim_float};
use crate::options::FormatOptions;

static RATING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-5])(\.|_)(0|5)").expect("static regex"));

const FILLED_STAR: &str = r#"<span class="wpmolicon icon-star-filled"></span>"#;
const HALF_STAR: &str = r#"<span class="wpmolicon icon-star-half"></span>"#;
const EMPTY_STAR: &str = r#"<span class="wpmolicon icon-star-empty"></span>"#;

impl Formatter {
    /// Rating on a 0 to 5 scale, drawn as stars on the configured base.
    pub(super) fn rating(&self, value: &MetaValue, options: &FormatOptions) -> String {
        let absent = match value {
            MetaValue::Null => true,
            MetaValue::Text(s) => s.trim().is_empty(),
            MetaValue::List(items) => items.is_empty(),
            MetaValue::Other(_) => value.is_empty(),
            _ => false,
        };
        if absent {
            return self.empty_value(String::new());
        }

        let options = options.or(&FormatOptions::new()
            .show_icon(true)
            .show_text(true)
            .is_link(true)
            .include_empty(true));

        let base = if self.settings.rating_base == 10 { 10 } else { 5 };
        let rating = (value.as_float().clamp(0.0, 5.0) * 10.0).round() / 10.0;
        let key = format!("{rating:.1}");

        let label = self
            .settings
            .detail("rating")
            .and_then(|table| table.get(&key))
            .map(|label| self.catalog.tr(label).into_owned())
            .unwrap_or_default();

        let mut class = format!(
            "wpmoly-movie-rating wpmoly-movie-rating-{}",
            RATING_ID.replace(&key, "$1-$3")
        );
        let mut title = label.clone();

        let html = if FormatOptions::flag(options.show_icon) {
            let star_args = FilterArgs {
                number: Some(rating),
                ..Default::default()
            };
            let filled = self.filters.apply(hooks::FILLED_STAR, FILLED_STAR.into(), &star_args);
            let half = self.filters.apply(hooks::HALF_STAR, HALF_STAR.into(), &star_args);
            let empty = self.filters.apply(hooks::EMPTY_STAR, EMPTY_STAR.into(), &star_args);

            let stars = if rating == 0.0 {
                if FormatOptions::flag(options.include_empty) {
                    empty.repeat(base)
                } else {
                    class = "not-rated".to_string();
                    format!("<small><em>{}</em></small>", self.catalog.tr("Not rated yet!"))
                }
            } else if base == 10 {
                let filled_count = (rating * 2.0).floor() as usize;
                title = format!("{}/10 − {label}", trim_float(rating * 2.0));
                format!(
                    "{}{}",
                    filled.repeat(filled_count),
                    empty.repeat(10 - filled_count.min(10))
                )
            } else {
                let filled_count = rating.floor() as usize;
                let half_count = usize::from(rating.fract() > 0.0);
                title = format!("{key}/5 − {label}");
                format!(
                    "{}{}{}",
                    filled.repeat(filled_count),
                    half.repeat(half_count),
                    empty.repeat(5usize.saturating_sub(filled_count + half_count))
                )
            };

            let html = format!(
                r#"<span class="{class}" title="{}">{stars}</span> "#,
                esc_attr(&title)
            );
            let args = FilterArgs {
                raw: Some(value),
                number: Some(rating),
                title: Some(&title),
                class: Some(&class),
                ..Default::default()
            };
            self.filters.apply(hooks::RATING_STARS, html, &args)
        } else {
            title.clone()
        };

        if FormatOptions::flag(options.is_link) {
            let url = self.settings.meta_url("rating", &key);
            let link = format!(
                r#"<a href="{}" title="{}">{html}</a>"#,
                esc_url(&url),
                esc_attr(&title)
            );
            let args = FilterArgs {
                raw: Some(value),
                number: Some(rating),
                url: Some(&url),
                title: Some(&title),
                html: Some(&html),
                ..Default::default()
            };
            return self.filters.apply(hooks::RATING_LINK, link, &args);
        }

        // The label is already the html when no stars are drawn.
        let label = if FormatOptions::flag(options.show_icon) && FormatOptions::flag(options.show_text) {
            label
        } else {
            String::new()
        };
        let args = FilterArgs {
            raw: Some(value),
            number: Some(rating),
            title: Some(&title),
            html: Some(&html),
            label: Some(&label),
            ..Default::default()
        };
        self.filters.apply(hooks::RATING, format!("{html}{label}"), &args)
    }
}
