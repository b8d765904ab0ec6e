//! Plain text, money, link, and list formatters.

use wpmoly_common::{MetaValue, Taxonomy};

use super::Formatter;
use crate::hooks::{self, FilterArgs};
use crate::html::{esc_attr, esc_url, number_format, sanitize_title};
use crate::options::FormatOptions;

impl Formatter {
    /// `$` amount with thousands separators.
    pub(super) fn money(&self, value: &MetaValue) -> String {
        let amount = value.as_int();
        if amount == 0 {
            return self.empty_value(String::new());
        }

        let args = FilterArgs {
            raw: Some(value),
            number: Some(amount as f64),
            ..Default::default()
        };
        let money = self
            .filters
            .apply(hooks::MONEY, format!("${}", number_format(amount)), &args);
        self.empty_value(money)
    }

    /// Yes/No adult restriction.
    pub(super) fn adult(&self, value: &MetaValue) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let is_adult = value.is_truthy();
        let status = if is_adult {
            self.catalog.tr("Yes")
        } else {
            self.catalog.tr("No")
        };

        let args = FilterArgs {
            raw: Some(value),
            flag: Some(is_adult),
            ..Default::default()
        };
        let status = self.filters.apply(hooks::ADULT, status.into_owned(), &args);
        self.empty_value(status)
    }

    /// Certification passthrough.
    pub(super) fn certification(&self, value: &MetaValue) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let args = FilterArgs {
            raw: Some(value),
            ..Default::default()
        };
        let certification = self
            .filters
            .apply(hooks::CERTIFICATION, value.as_text().trim().to_string(), &args);
        self.empty_value(certification)
    }

    /// Link to the official website.
    pub(super) fn homepage(&self, value: &MetaValue) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let url = esc_url(&value.as_text());
        if url.is_empty() {
            return self.empty_value(String::new());
        }

        let link = format!(
            r#"<a href="{url}" title="{}">{url}</a>"#,
            esc_attr(&self.catalog.tr("Official Website"))
        );
        let args = FilterArgs {
            raw: Some(value),
            url: Some(&url),
            ..Default::default()
        };
        let link = self.filters.apply(hooks::HOMEPAGE, link, &args);
        self.empty_value(link)
    }

    /// Comma-separated people or company list.
    ///
    /// Each trimmed item goes through `meta/<single>/single`, the joined list
    /// through `meta/<list>`.
    pub(super) fn meta_list(&self, single: &str, list: &str, value: &MetaValue) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let single_hook = hooks::meta_single(single);
        let items: Vec<String> = value
            .as_list()
            .iter()
            .map(|item| {
                let item = item.trim();
                let args = FilterArgs {
                    raw: Some(value),
                    slug: Some(item),
                    ..Default::default()
                };
                self.filters.apply(&single_hook, item.to_string(), &args)
            })
            .collect();

        let args = FilterArgs {
            raw: Some(value),
            items: Some(&items),
            ..Default::default()
        };
        let joined = self.filters.apply(&hooks::meta(list), items.join(", "), &args);
        self.empty_value(joined)
    }

    /// List of labels resolved against a taxonomy.
    ///
    /// With the taxonomy disabled, or when no term matches, the raw label is
    /// kept as is. Matched terms are linked to their archive unless
    /// `is_link` is off.
    pub(super) fn terms_list(
        &self,
        value: &MetaValue,
        taxonomy: Taxonomy,
        options: &FormatOptions,
    ) -> String {
        if value.is_empty() {
            return self.empty_value(String::new());
        }

        let options = options.or(&FormatOptions::new().is_link(true));
        let is_link = FormatOptions::flag(options.is_link);
        let has_taxonomy = self.settings.taxonomy_enabled(taxonomy);
        let single_hook = hooks::terms_single(taxonomy.as_str());

        let items: Vec<String> = value
            .as_list()
            .iter()
            .map(|raw| {
                let label = raw.replace('’', "'").replace("&#039;", "'");
                let label = label.trim();

                let term = if has_taxonomy {
                    self.terms
                        .term_by_name(taxonomy, label)
                        .or_else(|| self.terms.term_by_slug(taxonomy, &sanitize_title(label)))
                } else {
                    None
                };

                let rendered = match &term {
                    Some(term) if !term.name.is_empty() => {
                        if is_link {
                            let url = self.settings.term_url(taxonomy, &term.slug);
                            let template = options
                                .attr_title
                                .as_deref()
                                .unwrap_or("More movies from %s");
                            let title = self.catalog.trf(template, &term.name);
                            format!(
                                r#"<a href="{}" title="{}">{}</a>"#,
                                esc_url(&url),
                                esc_attr(&title),
                                term.name
                            )
                        } else {
                            term.name.clone()
                        }
                    }
                    _ => label.to_string(),
                };

                let args = FilterArgs {
                    raw: Some(value),
                    slug: Some(label),
                    term: term.as_ref(),
                    options: Some(&options),
                    ..Default::default()
                };
                self.filters.apply(&single_hook, rendered, &args)
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
            .apply(&hooks::terms(taxonomy.as_str()), items.join(", "), &args);
        self.empty_value(joined)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wpmoly_common::{MetaValue, Taxonomy};

    use crate::hooks;
    use crate::i18n::Catalog;
    use crate::options::FormatOptions;
    use crate::settings::FormatSettings;
    use crate::taxonomy::{MemoryTermStore, Term};
    use crate::Formatter;

    fn formatter(settings: FormatSettings) -> Formatter {
        let terms: MemoryTermStore = [
            Term::new(1, Taxonomy::Genre, "Drama"),
            Term::new(2, Taxonomy::Genre, "Science Fiction"),
            Term::new(3, Taxonomy::Actor, "Brad Pitt"),
            Term::new(4, Taxonomy::Actor, "Helena Bonham Carter"),
            Term::new(5, Taxonomy::Collection, "David Fincher"),
        ]
        .into_iter()
        .collect();
        Formatter::new(settings).with_terms(Arc::new(terms))
    }

    #[test]
    fn test_money() {
        let f = formatter(FormatSettings::default());
        assert_eq!(f.money(&MetaValue::from(63_000_000_i64)), "$63,000,000");
        assert_eq!(f.money(&MetaValue::from("100853753")), "$100,853,753");
        assert_eq!(f.money(&MetaValue::from("unknown")), "&mdash;");
    }

    #[test]
    fn test_money_filter() {
        let f = formatter(FormatSettings::default()).with_filter(hooks::MONEY, 10, |_, args| {
            format!("{} €", args.number.unwrap_or_default())
        });
        assert_eq!(f.money(&MetaValue::from(1500_i64)), "1500 €");
    }

    #[test]
    fn test_adult() {
        let f = formatter(FormatSettings::default());
        assert_eq!(f.adult(&MetaValue::from(true)), "Yes");
        assert_eq!(f.adult(&MetaValue::from("1")), "Yes");
        assert_eq!(f.adult(&MetaValue::from("no")), "No");
        assert_eq!(f.adult(&MetaValue::from("")), "&mdash;");

        let f = formatter(FormatSettings::default()).with_catalog(Catalog::new().with("Yes", "Oui"));
        assert_eq!(f.adult(&MetaValue::from("yes")), "Oui");
    }

    #[test]
    fn test_certification_and_homepage() {
        let f = formatter(FormatSettings::default());
        assert_eq!(f.certification(&MetaValue::from(" R ")), "R");
        assert_eq!(
            f.homepage(&MetaValue::from("http://www.foxmovies.com/movies/fight-club")),
            "<a href=\"http://www.foxmovies.com/movies/fight-club\" title=\"Official Website\">http://www.foxmovies.com/movies/fight-club</a>"
        );
        assert_eq!(f.homepage(&MetaValue::from("javascript:alert(1)")), "&mdash;");
    }

    #[test]
    fn test_meta_list_keeps_order_and_trims() {
        let f = formatter(FormatSettings::default());
        let out = f.meta_list("producer", "producer", &MetaValue::from("Art Linson,  Ceán Chaffin ,Ross Grayson Bell"));
        assert_eq!(out, "Art Linson, Ceán Chaffin, Ross Grayson Bell");
    }

    #[test]
    fn test_meta_list_filters() {
        let f = formatter(FormatSettings::default())
            .with_filter(hooks::meta_single("writer"), 10, |v, _| format!("<b>{v}</b>"))
            .with_filter(hooks::meta("writer"), 10, |v, args| {
                format!("{v} ({})", args.items.map(<[String]>::len).unwrap_or_default())
            });

        let out = f.meta_list("writer", "writer", &MetaValue::from("Jim Uhls,Chuck Palahniuk"));
        assert_eq!(out, "<b>Jim Uhls</b>, <b>Chuck Palahniuk</b> (2)");
    }

    #[test]
    fn test_comma_in_value_is_split() {
        let f = formatter(FormatSettings::default());
        let out = f.meta_list("writer", "writer", &MetaValue::from("Smith, Jr., Jane Doe"));
        assert_eq!(out, "Smith, Jr., Jane Doe");
        let out = f.meta_list("writer", "writer", &MetaValue::from("Smith,Jr."));
        assert_eq!(out, "Smith, Jr.");
    }

    #[test]
    fn test_terms_list_links_known_terms() {
        let f = formatter(FormatSettings::default());
        let out = f.terms_list(
            &MetaValue::from("Drama, science fiction, Thriller"),
            Taxonomy::Genre,
            &FormatOptions::new(),
        );
        assert_eq!(
            out,
            "<a href=\"/movies/genre/drama/\" title=\"More movies from Drama\">Drama</a>, \
             <a href=\"/movies/genre/science-fiction/\" title=\"More movies from Science Fiction\">Science Fiction</a>, \
             Thriller"
        );
    }

    #[test]
    fn test_terms_list_matches_by_slug_and_normalizes_quotes() {
        let terms: MemoryTermStore = [Term {
            slug: "schindlers-list".to_string(),
            ..Term::new(9, Taxonomy::Collection, "Schindler's List")
        }]
        .into_iter()
        .collect();
        let f = Formatter::new(FormatSettings::default()).with_terms(Arc::new(terms));

        let out = f.terms_list(
            &MetaValue::from("Schindler’s List"),
            Taxonomy::Collection,
            &FormatOptions::new().is_link(false),
        );
        assert_eq!(out, "Schindler's List");
    }

    #[test]
    fn test_terms_list_without_links() {
        let f = formatter(FormatSettings::default());
        let out = f.terms_list(
            &MetaValue::from(vec!["brad pitt", "Edward Norton"]),
            Taxonomy::Actor,
            &FormatOptions::new().is_link(false),
        );
        assert_eq!(out, "Brad Pitt, Edward Norton");
    }

    #[test]
    fn test_terms_list_custom_link_title() {
        let f = formatter(FormatSettings::default());
        let options = FormatOptions {
            attr_title: Some("Films with %s".to_string()),
            ..Default::default()
        };
        let out = f.terms_list(&MetaValue::from("Brad Pitt"), Taxonomy::Actor, &options);
        assert_eq!(
            out,
            "<a href=\"/movies/actor/brad-pitt/\" title=\"Films with Brad Pitt\">Brad Pitt</a>"
        );
    }

    #[test]
    fn test_disabled_taxonomy_yields_raw_label() {
        let settings = FormatSettings::default().with_taxonomy(Taxonomy::Genre, false);
        let f = formatter(settings);
        let out = f.terms_list(&MetaValue::from("drama"), Taxonomy::Genre, &FormatOptions::new());
        assert_eq!(out, "drama");
        assert!(!out.contains("<a"));
    }
}
