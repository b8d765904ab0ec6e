//! HTML escaping, slugs, and number formatting helpers.

use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

/// Escape text for use inside an HTML attribute.
pub fn esc_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Clean a URL for output in an `href`.
///
/// Only `http`, `https`, protocol-relative, and root-relative URLs survive;
/// anything else (including `javascript:`) becomes the empty string. Spaces,
/// quotes, and angle brackets are percent-encoded and `&` is entity-encoded.
pub fn esc_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    let lower = url.to_ascii_lowercase();
    let allowed = lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with('/')
        || lower.starts_with('#')
        || lower.starts_with('?');
    let has_scheme = lower
        .split_once(':')
        .is_some_and(|(scheme, _)| !scheme.contains('/') && !scheme.contains('?'));
    if !allowed && has_scheme {
        return String::new();
    }

    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '&' => out.push_str("&amp;"),
            other => out.push(other),
        }
    }
    out
}

/// Lowercase, dash-separated slug of a label.
///
/// `"Science Fiction"` becomes `science-fiction`; apostrophes are dropped
/// rather than turned into dashes so `"Schindler's List"` reads
/// `schindlers-list`. A label with no Latin letters or digits keeps its
/// words, percent-encoded: `"東京"` becomes `%e6%9d%b1%e4%ba%ac`.
pub fn sanitize_title(title: &str) -> String {
    let lowered = title
        .replace("&#039;", "")
        .replace(['\'', '’'], "")
        .to_lowercase();
    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        fold_accent(c, &mut folded);
    }
    let slug = NON_SLUG.replace_all(&folded, "-").trim_matches('-').to_string();
    if slug.is_empty() {
        encoded_slug(&lowered)
    } else {
        slug
    }
}

fn fold_accent(c: char, out: &mut String) {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' | 'ð' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        'ß' => return out.push_str("ss"),
        'æ' => return out.push_str("ae"),
        'œ' => return out.push_str("oe"),
        'þ' => return out.push_str("th"),
        other => other,
    };
    out.push(folded);
}

/// Alphanumeric words joined by dashes, non-ASCII bytes percent-encoded.
fn encoded_slug(lowered: &str) -> String {
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut out = String::with_capacity(word.len() * 3);
            for b in word.bytes() {
                if b.is_ascii_alphanumeric() {
                    out.push(char::from(b));
                } else {
                    out.push_str(&format!("%{b:02x}"));
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Integer with `,` thousands separators.
pub fn number_format(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Float printed without a trailing `.0` when it is integral.
pub fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esc_attr() {
        assert_eq!(esc_attr(r#"Movies filed as "3D""#), "Movies filed as &quot;3D&quot;");
        assert_eq!(esc_attr("Tom & Jerry's <b>"), "Tom &amp; Jerry&#039;s &lt;b&gt;");
        assert_eq!(esc_attr("plain"), "plain");
    }

    #[test]
    fn test_esc_url() {
        assert_eq!(
            esc_url("http://www.foxmovies.com/movies/fight-club"),
            "http://www.foxmovies.com/movies/fight-club"
        );
        assert_eq!(esc_url("/movies/rating/4-5/"), "/movies/rating/4-5/");
        assert_eq!(esc_url("https://a.b/c d?x=1&y=2"), "https://a.b/c%20d?x=1&amp;y=2");
        assert_eq!(esc_url("javascript:alert(1)"), "");
        assert_eq!(esc_url("   "), "");
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Science Fiction"), "science-fiction");
        assert_eq!(sanitize_title("Schindler's List"), "schindlers-list");
        assert_eq!(sanitize_title("  Amélie  "), "amelie");
        assert_eq!(sanitize_title("4.5"), "4-5");
        assert_eq!(sanitize_title("--"), "");
    }

    #[test]
    fn test_sanitize_title_folds_more_letters() {
        assert_eq!(sanitize_title("Straße"), "strasse");
        assert_eq!(sanitize_title("Ærø"), "aero");
        assert_eq!(sanitize_title("Cœur"), "coeur");
        assert_eq!(sanitize_title("Łódź"), "lodz");
    }

    #[test]
    fn test_sanitize_title_without_latin_letters() {
        assert_eq!(sanitize_title("東京"), "%e6%9d%b1%e4%ba%ac");
        assert_eq!(sanitize_title("Кино Фильм"), "%d0%ba%d0%b8%d0%bd%d0%be-%d1%84%d0%b8%d0%bb%d1%8c%d0%bc");
        assert_eq!(sanitize_title(" -- "), "");
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number_format(0), "0");
        assert_eq!(number_format(999), "999");
        assert_eq!(number_format(1000), "1,000");
        assert_eq!(number_format(63_000_000), "63,000,000");
        assert_eq!(number_format(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_trim_float() {
        assert_eq!(trim_float(9.0), "9");
        assert_eq!(trim_float(6.4), "6.4");
        assert_eq!(trim_float(0.5), "0.5");
    }
}
