//! Release dates and runtimes.

use wpmoly_common::MetaValue;

use super::Formatter;
use crate::datefmt;
use crate::hooks::{self, FilterArgs};
use crate::options::FormatOptions;
use crate::settings::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};

impl Formatter {
    /// Release date, local release date, or year.
    ///
    /// Unparseable dates are passed through as stored.
    pub(super) fn release_date(&self, value: &MetaValue, options: &FormatOptions) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let variant = match options.variant.as_deref() {
            Some("local_") => "local_",
            _ => "",
        };
        let pattern = [options.format.as_deref(), Some(self.settings.date_format.as_str())]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
            .unwrap_or(DEFAULT_DATE_FORMAT);

        let stored = value.as_text();
        let parsed = datefmt::parse_date(&stored);

        let mut parts = Vec::new();
        let date = match &parsed {
            Some(dt) if pattern == DEFAULT_DATE_FORMAT => {
                parts.push(datefmt::render("j F", dt, &self.catalog));
                parts.push(datefmt::render("Y", dt, &self.catalog));
                parts.join("&nbsp;")
            }
            Some(dt) => datefmt::render(pattern, dt, &self.catalog),
            None => stored.trim().to_string(),
        };

        let args = FilterArgs {
            raw: Some(value),
            items: Some(&parts),
            format: Some(pattern),
            timestamp: parsed.map(|dt| dt.and_utc().timestamp()),
            variant: Some(variant),
            ..Default::default()
        };
        self.filters
            .apply(&hooks::release_date(variant), self.empty_value(date), &args)
    }

    /// Runtime in minutes, rendered as a time of day.
    pub(super) fn runtime(&self, value: &MetaValue, options: &FormatOptions) -> String {
        let minutes = value.as_int();
        if minutes <= 0 {
            return self.empty_value(String::new());
        }

        let pattern = [options.format.as_deref(), Some(self.settings.time_format.as_str())]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
            .unwrap_or(DEFAULT_TIME_FORMAT);

        let dt = datefmt::minutes_after_midnight(minutes);
        let mut runtime = datefmt::render(pattern, &dt, &self.catalog);

        let lower = runtime.to_lowercase();
        if lower.contains("am") || lower.contains("pm") {
            runtime = datefmt::render("G:i", &dt, &self.catalog);
        }

        let args = FilterArgs {
            raw: Some(value),
            format: Some(pattern),
            number: Some(minutes as f64),
            ..Default::default()
        };
        let runtime = self.filters.apply(hooks::RUNTIME, runtime, &args);
        self.empty_value(runtime)
    }
}
