use wpmoly_common::MetaValue;

use super::Formatter;
use crate::hooks::{self, FilterArgs};
use crate::html::{esc_attr, esc_url};
use crate::options::FormatOptions;

impl Formatter {
    /// Status, media, and format details.
    ///
    /// Known slugs render as icon plus translated label, optionally linked
    /// to the detail archive. Unknown slugs are kept verbatim.
    pub(super) fn detail(&self, detail: &str, value: &MetaValue, options: &FormatOptions) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let Some(table) = self.settings.detail(detail) else {
            let args = FilterArgs {
                raw: Some(value),
                options: Some(options),
                ..Default::default()
            };
            return self.filters.apply(&hooks::detail(detail), String::new(), &args);
        };

        let options = options.or(&FormatOptions::new()
            .show_text(true)
            .show_icon(true)
            .is_link(true));
        let show_text = FormatOptions::flag(options.show_text);
        let show_icon = FormatOptions::flag(options.show_icon);
        let is_link = FormatOptions::flag(options.is_link);

        let single_hook = hooks::detail_single(detail);
        let link_hook = hooks::detail_single_link(detail);

        let items: Vec<String> = value
            .as_list()
            .iter()
            .map(|slug| slug.trim())
            .filter(|slug| !slug.is_empty())
            .map(|slug| {
                let Some(label) = table.get(slug) else {
                    return slug.to_string();
                };

                let text = if show_text {
                    self.catalog.tr(label).into_owned()
                } else {
                    String::new()
                };
                let args = FilterArgs {
                    raw: Some(value),
                    slug: Some(slug),
                    options: Some(&options),
                    ..Default::default()
                };
                let text = self.filters.apply(&single_hook, text, &args);

                let icon = if show_icon {
                    format!(r#"<span class="wpmolicon icon-{slug}"></span>&nbsp;"#)
                } else {
                    String::new()
                };

                if !is_link {
                    return format!("{icon}{text}");
                }

                let url = self.settings.meta_url(detail, slug);
                let title = self.catalog.trf("Movies filed as “%s”", &text);
                let link = format!(
                    r#"<a href="{}" title="{}">{}</a>"#,
                    esc_url(&url),
                    esc_attr(&title),
                    text
                );
                let args = FilterArgs {
                    raw: Some(value),
                    slug: Some(slug),
                    url: Some(&url),
                    title: Some(&title),
                    html: Some(&text),
                    ..Default::default()
                };
                let link = self.filters.apply(&link_hook, link, &args);
                format!("{icon}{link}")
            })
            .collect();

        let args = FilterArgs {
            raw: Some(value),
            items: Some(&items),
            options: Some(&options),
            ..Default::default()
        };
        let joined = self
            .filters
            .apply(&hooks::detail(detail), items.join(", "), &args);
        self.empty_value(joined)
    }
}

#[cfg(test)]
mod tests {
    use wpmoly_common::MetaValue;

    use crate::hooks;
    use crate::i18n::Catalog;
    use crate::options::FormatOptions;
    use crate::settings::FormatSettings;
    use crate::Formatter;

    #[test]
    fn test_linked_detail_with_icon() {
        let f = Formatter::new(FormatSettings::default());
        let out = f.detail("media", &MetaValue::from("bluray"), &FormatOptions::new());
        assert_eq!(
            out,
            "<span class=\"wpmolicon icon-bluray\"></span>&nbsp;\
             <a href=\"/movies/media/bluray/\" title=\"Movies filed as “Blu-ray”\">Blu-ray</a>"
        );
    }

    #[test]
    fn test_plain_detail_list() {
        let f = Formatter::new(FormatSettings::default());
        let options = FormatOptions::new().show_icon(false).is_link(false);
        let out = f.detail("format", &MetaValue::from("hd, 3d"), &options);
        assert_eq!(out, "HD, 3D");

        let out = f.detail("format", &MetaValue::from(vec!["uhd", "cinemascope"]), &options);
        assert_eq!(out, "Ultra HD, Cinemascope");
    }

    #[test]
    fn test_unknown_slug_passes_through() {
        let f = Formatter::new(FormatSettings::default());
        let options = FormatOptions::new().show_icon(false).is_link(false);
        assert_eq!(f.detail("status", &MetaValue::from("lost,loaned"), &options), "lost, Loaned");
    }

    #[test]
    fn test_unknown_detail_is_empty() {
        let f = Formatter::new(FormatSettings::default());
        assert_eq!(f.detail("shelf", &MetaValue::from("top"), &FormatOptions::new()), "");
    }

    #[test]
    fn test_unknown_detail_still_runs_its_filter() {
        let f = Formatter::new(FormatSettings::default())
            .with_filter(hooks::detail("shelf"), 10, |v, args| {
                format!("{v}[{}]", args.raw.map(MetaValue::as_text).unwrap_or_default())
            });
        assert_eq!(f.detail("shelf", &MetaValue::from("top"), &FormatOptions::new()), "[top]");
    }

    #[test]
    fn test_detail_translation_and_filters() {
        let f = Formatter::new(FormatSettings::default())
            .with_catalog(Catalog::new().with("Loaned", "Prêté"))
            .with_filter(hooks::detail_single_link("status"), 10, |_, args| {
                format!("[{}]", args.url.unwrap_or_default())
            })
            .with_filter(hooks::detail("status"), 10, |v, _| format!("<p>{v}</p>"));

        let options = FormatOptions::new().show_icon(false);
        let out = f.detail("status", &MetaValue::from("loaned"), &options);
        assert_eq!(out, "<p>[/movies/status/loaned/]</p>");

        let options = options.is_link(false);
        assert_eq!(f.detail("status", &MetaValue::from("loaned"), &options), "<p>Prêté</p>");
    }
}
