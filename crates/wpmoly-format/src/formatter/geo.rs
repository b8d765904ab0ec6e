//! Production countries and languages.

use wpmoly_common::MetaValue;

use super::Formatter;
use crate::hooks::{self, FilterArgs};
use crate::html::esc_attr;
use crate::model::{Country, Language};
use crate::options::FormatOptions;

impl Formatter {
    /// Country list; each country renders as its configured items joined
    /// with `&nbsp;`.
    pub(super) fn production_countries(&self, value: &MetaValue, options: &FormatOptions) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let formats: Vec<String> = if self.settings.translate_countries {
            self.settings.countries_format.clone()
        } else if options.show_icon == Some(true) {
            vec!["flag".to_string(), "original".to_string()]
        } else {
            vec!["original".to_string()]
        };

        let countries: Vec<String> = value
            .as_list()
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                let country = Country::lookup(raw, &self.catalog);
                let items: Vec<String> = formats
                    .iter()
                    .map(|format| {
                        let item = match format.as_str() {
                            "flag" => country.flag(),
                            "original" => country.standard_name.clone(),
                            "translated" => country.localized_name.clone(),
                            "ptranslated" => format!("({})", country.localized_name),
                            "poriginal" => format!("({})", country.standard_name),
                            _ => String::new(),
                        };
                        let args = FilterArgs {
                            raw: Some(value),
                            country: Some(&country),
                            format: Some(format),
                            ..Default::default()
                        };
                        self.filters.apply(hooks::COUNTRY_SINGLE, item, &args)
                    })
                    .collect();
                items.join("&nbsp;")
            })
            .collect();

        let args = FilterArgs {
            raw: Some(value),
            items: Some(&countries),
            options: Some(options),
            ..Default::default()
        };
        let joined = self
            .filters
            .apply(hooks::COUNTRIES, countries.join(", "), &args);
        self.empty_value(joined)
    }

    /// Spoken, subtitle, or original languages.
    ///
    /// The ISO badge is built here but only handed to the per-language
    /// filter; the default callback puts it in front of the name.
    pub(super) fn spoken_languages(&self, value: &MetaValue, options: &FormatOptions) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let options = options.or(&FormatOptions::new().show_text(true).show_icon(true));
        let show_text = FormatOptions::flag(options.show_text);
        let show_icon = FormatOptions::flag(options.show_icon);
        let variant = match options.variant.as_deref() {
            Some("my_") => "my_",
            _ => "",
        };

        let languages: Vec<String> = value
            .as_list()
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                let language = Language::lookup(raw, &self.catalog);

                let name = if !show_text {
                    String::new()
                } else if self.settings.translate_languages {
                    language.localized_name.clone()
                } else {
                    language.standard_name.clone()
                };

                let icon = show_icon.then(|| {
                    format!(
                        r#"<span class="wpmoly language iso icon" title="{} ({})">{}</span>&nbsp;"#,
                        esc_attr(&language.localized_name),
                        esc_attr(&language.standard_name),
                        esc_attr(&language.code)
                    )
                });

                let args = FilterArgs {
                    raw: Some(value),
                    language: Some(&language),
                    icon: icon.as_deref(),
                    variant: Some(variant),
                    ..Default::default()
                };
                self.filters.apply(hooks::LANGUAGE_SINGLE, name, &args)
            })
            .collect();

        let args = FilterArgs {
            raw: Some(value),
            items: Some(&languages),
            options: Some(&options),
            variant: Some(variant),
            ..Default::default()
        };
        let joined = self
            .filters
            .apply(hooks::LANGUAGES, languages.join(", "), &args);
        self.empty_value(joined)
    }
}
