//! Production countries keyed by ISO 3166-1 alpha-2 code.

use phf::phf_map;

use crate::html::esc_attr;
use crate::i18n::Catalog;

/// Standard (English) country names by uppercase alpha-2 code.
static COUNTRIES: phf::Map<&'static str, &'static str> = phf_map! {
    "AD" => "Andorra",
    "AE" => "United Arab Emirates",
    "AF" => "Afghanistan",
    "AG" => "Antigua and Barbuda",
    "AL" => "Albania",
    "AM" => "Armenia",
    "AO" => "Angola",
    "AQ" => "Antarctica",
    "AR" => "Argentina",
    "AT" => "Austria",
    "AU" => "Australia",
    "AW" => "Aruba",
    "AZ" => "Azerbaijan",
    "BA" => "Bosnia and Herzegovina",
    "BB" => "Barbados",
    "BD" => "Bangladesh",
    "BE" => "Belgium",
    "BF" => "Burkina Faso",
    "BG" => "Bulgaria",
    "BH" => "Bahrain",
    "BI" => "Burundi",
    "BJ" => "Benin",
    "BM" => "Bermuda",
    "BN" => "Brunei Darussalam",
    "BO" => "Bolivia",
    "BR" => "Brazil",
    "BS" => "Bahamas",
    "BT" => "Bhutan",
    "BW" => "Botswana",
    "BY" => "Belarus",
    "BZ" => "Belize",
    "CA" => "Canada",
    "CD" => "Congo, the Democratic Republic of the",
    "CF" => "Central African Republic",
    "CG" => "Congo",
    "CH" => "Switzerland",
    "CI" => "Cote d'Ivoire",
    "CL" => "Chile",
    "CM" => "Cameroon",
    "CN" => "China",
    "CO" => "Colombia",
    "CR" => "Costa Rica",
    "CS" => "Serbia and Montenegro",
    "CU" => "Cuba",
    "CV" => "Cape Verde",
    "CY" => "Cyprus",
    "CZ" => "Czech Republic",
    "DE" => "Germany",
    "DJ" => "Djibouti",
    "DK" => "Denmark",
    "DM" => "Dominica",
    "DO" => "Dominican Republic",
    "DZ" => "Algeria",
    "EC" => "Ecuador",
    "EE" => "Estonia",
    "EG" => "Egypt",
    "ER" => "Eritrea",
    "ES" => "Spain",
    "ET" => "Ethiopia",
    "FI" => "Finland",
    "FJ" => "Fiji",
    "FO" => "Faroe Islands",
    "FR" => "France",
    "GA" => "Gabon",
    "GB" => "United Kingdom",
    "GD" => "Grenada",
    "GE" => "Georgia",
    "GH" => "Ghana",
    "GI" => "Gibraltar",
    "GL" => "Greenland",
    "GM" => "Gambia",
    "GN" => "Guinea",
    "GQ" => "Equatorial Guinea",
    "GR" => "Greece",
    "GT" => "Guatemala",
    "GW" => "Guinea-Bissau",
    "GY" => "Guyana",
    "HK" => "Hong Kong",
    "HN" => "Honduras",
    "HR" => "Croatia",
    "HT" => "Haiti",
    "HU" => "Hungary",
    "ID" => "Indonesia",
    "IE" => "Ireland",
    "IL" => "Israel",
    "IN" => "India",
    "IQ" => "Iraq",
    "IR" => "Iran, Islamic Republic of",
    "IS" => "Iceland",
    "IT" => "Italy",
    "JM" => "Jamaica",
    "JO" => "Jordan",
    "JP" => "Japan",
    "KE" => "Kenya",
    "KG" => "Kyrgyzstan",
    "KH" => "Cambodia",
    "KP" => "Korea, Democratic People's Republic of",
    "KR" => "South Korea",
    "KW" => "Kuwait",
    "KZ" => "Kazakhstan",
    "LA" => "Lao People's Democratic Republic",
    "LB" => "Lebanon",
    "LI" => "Liechtenstein",
    "LK" => "Sri Lanka",
    "LR" => "Liberia",
    "LT" => "Lithuania",
    "LU" => "Luxembourg",
    "LV" => "Latvia",
    "LY" => "Libyan Arab Jamahiriya",
    "MA" => "Morocco",
    "MC" => "Monaco",
    "MD" => "Moldova",
    "ME" => "Montenegro",
    "MG" => "Madagascar",
    "MK" => "Macedonia",
    "ML" => "Mali",
    "MM" => "Myanmar",
    "MN" => "Mongolia",
    "MO" => "Macao",
    "MR" => "Mauritania",
    "MT" => "Malta",
    "MU" => "Mauritius",
    "MV" => "Maldives",
    "MW" => "Malawi",
    "MX" => "Mexico",
    "MY" => "Malaysia",
    "MZ" => "Mozambique",
    "NA" => "Namibia",
    "NE" => "Niger",
    "NG" => "Nigeria",
    "NI" => "Nicaragua",
    "NL" => "Netherlands",
    "NO" => "Norway",
    "NP" => "Nepal",
    "NZ" => "New Zealand",
    "OM" => "Oman",
    "PA" => "Panama",
    "PE" => "Peru",
    "PG" => "Papua New Guinea",
    "PH" => "Philippines",
    "PK" => "Pakistan",
    "PL" => "Poland",
    "PR" => "Puerto Rico",
    "PS" => "Palestinian Territory",
    "PT" => "Portugal",
    "PY" => "Paraguay",
    "QA" => "Qatar",
    "RO" => "Romania",
    "RS" => "Serbia",
    "RU" => "Russia",
    "RW" => "Rwanda",
    "SA" => "Saudi Arabia",
    "SD" => "Sudan",
    "SE" => "Sweden",
    "SG" => "Singapore",
    "SI" => "Slovenia",
    "SK" => "Slovakia",
    "SL" => "Sierra Leone",
    "SN" => "Senegal",
    "SO" => "Somalia",
    "SU" => "Soviet Union",
    "SV" => "El Salvador",
    "SY" => "Syrian Arab Republic",
    "TD" => "Chad",
    "TG" => "Togo",
    "TH" => "Thailand",
    "TJ" => "Tajikistan",
    "TN" => "Tunisia",
    "TR" => "Turkey",
    "TT" => "Trinidad and Tobago",
    "TW" => "Taiwan",
    "TZ" => "Tanzania, United Republic of",
    "UA" => "Ukraine",
    "UG" => "Uganda",
    "US" => "United States of America",
    "UY" => "Uruguay",
    "UZ" => "Uzbekistan",
    "VE" => "Venezuela",
    "VN" => "Vietnam",
    "XC" => "Czechoslovakia",
    "XG" => "East Germany",
    "XK" => "Kosovo",
    "XY" => "Yugoslavia",
    "YE" => "Yemen",
    "ZA" => "South Africa",
    "ZM" => "Zambia",
    "ZW" => "Zimbabwe",
};

/// A production country.
///
/// Unknown input still yields a `Country`: its code is empty and both names
/// echo the raw text, so a formatter can always print something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Uppercase alpha-2 code, empty when the input matched nothing.
    pub code: String,
    /// English name.
    pub standard_name: String,
    /// Name translated through the catalog.
    pub localized_name: String,
}

impl Country {
    /// Look a country up by code or by English name, case-insensitively.
    pub fn lookup(input: &str, catalog: &Catalog) -> Self {
        let input = input.trim();
        let upper = input.to_ascii_uppercase();

        let found = COUNTRIES
            .get_entry(upper.as_str())
            .map(|(code, name)| (*code, *name))
            .or_else(|| {
                COUNTRIES
                    .entries()
                    .find(|(_, name)| name.eq_ignore_ascii_case(input))
                    .map(|(code, name)| (*code, *name))
            });

        match found {
            Some((code, name)) => Self {
                code: code.to_string(),
                standard_name: name.to_string(),
                localized_name: catalog.tr(name).into_owned(),
            },
            None => Self {
                code: String::new(),
                standard_name: input.to_string(),
                localized_name: catalog.tr(input).into_owned(),
            },
        }
    }

    /// Whether the input matched a known country.
    pub fn is_known(&self) -> bool {
        !self.code.is_empty()
    }

    /// Regional-indicator flag emoji, empty for unknown and historical codes.
    pub fn glyph(&self) -> String {
        if !self.is_known() || matches!(self.code.as_str(), "CS" | "SU" | "XC" | "XG" | "XY") {
            return String::new();
        }
        self.code
            .chars()
            .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32).checked_sub('A' as u32)?))
            .collect()
    }

    /// Flag markup: a CSS-addressable span wrapping the glyph.
    pub fn flag(&self) -> String {
        if !self.is_known() {
            return String::new();
        }
        format!(
            r#"<span class="wpmoly flag flag-{}" title="{}">{}</span>"#,
            self.code.to_ascii_lowercase(),
            esc_attr(&self.localized_name),
            self.glyph()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_code_and_name() {
        let catalog = Catalog::new();

        let fr = Country::lookup("fr", &catalog);
        assert_eq!(fr.code, "FR");
        assert_eq!(fr.standard_name, "France");

        let us = Country::lookup(" United States of America ", &catalog);
        assert_eq!(us.code, "US");
    }

    #[test]
    fn test_unknown_country_echoes_input() {
        let country = Country::lookup("Atlantis", &Catalog::new());
        assert!(!country.is_known());
        assert_eq!(country.standard_name, "Atlantis");
        assert_eq!(country.localized_name, "Atlantis");
        assert_eq!(country.flag(), "");
        assert_eq!(country.glyph(), "");
    }

    #[test]
    fn test_localized_name_and_flag() {
        let catalog = Catalog::new().with("Germany", "Allemagne");
        let de = Country::lookup("DE", &catalog);
        assert_eq!(de.localized_name, "Allemagne");
        assert_eq!(de.glyph(), "\u{1F1E9}\u{1F1EA}");
        assert_eq!(
            de.flag(),
            "<span class=\"wpmoly flag flag-de\" title=\"Allemagne\">\u{1F1E9}\u{1F1EA}</span>"
        );
    }

    #[test]
    fn test_historical_codes_have_no_glyph() {
        let su = Country::lookup("SU", &Catalog::new());
        assert!(su.is_known());
        assert_eq!(su.glyph(), "");
    }
}
