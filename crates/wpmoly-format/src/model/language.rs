//! Spoken and subtitle languages keyed by ISO 639-1 code.

use phf::phf_map;

use crate::i18n::Catalog;

/// `(English name, native name)` by lowercase ISO 639-1 code.
static LANGUAGES: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "af" => ("Afrikaans", "Afrikaans"),
    "ar" => ("Arabic", "العربية"),
    "bg" => ("Bulgarian", "български език"),
    "bn" => ("Bengali", "বাংলা"),
    "bs" => ("Bosnian", "Bosanski"),
    "ca" => ("Catalan", "Català"),
    "cn" => ("Cantonese", "广州话 / 廣州話"),
    "cs" => ("Czech", "Český"),
    "cy" => ("Welsh", "Cymraeg"),
    "da" => ("Danish", "Dansk"),
    "de" => ("German", "Deutsch"),
    "el" => ("Greek", "ελληνικά"),
    "en" => ("English", "English"),
    "eo" => ("Esperanto", "Esperanto"),
    "es" => ("Spanish", "Español"),
    "et" => ("Estonian", "Eesti"),
    "eu" => ("Basque", "Euskera"),
    "fa" => ("Persian", "فارسی"),
    "fi" => ("Finnish", "Suomi"),
    "fr" => ("French", "Français"),
    "ga" => ("Irish", "Gaeilge"),
    "gd" => ("Gaelic", "Gàidhlig"),
    "gl" => ("Galician", "Galego"),
    "he" => ("Hebrew", "עִבְרִית"),
    "hi" => ("Hindi", "हिन्दी"),
    "hr" => ("Croatian", "Hrvatski"),
    "hu" => ("Hungarian", "Magyar"),
    "hy" => ("Armenian", "Հայերեն"),
    "id" => ("Indonesian", "Bahasa indonesia"),
    "is" => ("Icelandic", "Íslenska"),
    "it" => ("Italian", "Italiano"),
    "ja" => ("Japanese", "日本語"),
    "ka" => ("Georgian", "ქართული"),
    "kk" => ("Kazakh", "қазақ"),
    "km" => ("Khmer", "ភាសាខ្មែរ"),
    "kn" => ("Kannada", "ಕನ್ನಡ"),
    "ko" => ("Korean", "한국어/조선말"),
    "ku" => ("Kurdish", "Kurdî"),
    "la" => ("Latin", "Latin"),
    "lb" => ("Luxembourgish", "Lëtzebuergesch"),
    "lt" => ("Lithuanian", "Lietuvių"),
    "lv" => ("Latvian", "Latviešu"),
    "mk" => ("Macedonian", "македонски јазик"),
    "ml" => ("Malayalam", "മലയാളം"),
    "mn" => ("Mongolian", "Монгол"),
    "mr" => ("Marathi", "मराठी"),
    "ms" => ("Malay", "Bahasa melayu"),
    "mt" => ("Maltese", "Malti"),
    "ne" => ("Nepali", "नेपाली"),
    "nl" => ("Dutch", "Nederlands"),
    "no" => ("Norwegian", "Norsk"),
    "pa" => ("Punjabi", "ਪੰਜਾਬੀ"),
    "pl" => ("Polish", "Polski"),
    "ps" => ("Pashto", "پښتو"),
    "pt" => ("Portuguese", "Português"),
    "ro" => ("Romanian", "Română"),
    "ru" => ("Russian", "Pусский"),
    "si" => ("Sinhalese", "සිංහල"),
    "sk" => ("Slovak", "Slovenčina"),
    "sl" => ("Slovenian", "Slovenščina"),
    "so" => ("Somali", "Somali"),
    "sq" => ("Albanian", "Shqip"),
    "sr" => ("Serbian", "Srpski"),
    "sv" => ("Swedish", "Svenska"),
    "sw" => ("Swahili", "Kiswahili"),
    "ta" => ("Tamil", "தமிழ்"),
    "te" => ("Telugu", "తెలుగు"),
    "th" => ("Thai", "ภาษาไทย"),
    "tl" => ("Tagalog", "Tagalog"),
    "tr" => ("Turkish", "Türkçe"),
    "uk" => ("Ukrainian", "Український"),
    "ur" => ("Urdu", "اردو"),
    "uz" => ("Uzbek", "Oʻzbek"),
    "vi" => ("Vietnamese", "Tiếng Việt"),
    "xh" => ("Xhosa", "isiXhosa"),
    "yi" => ("Yiddish", "ייִדיש"),
    "zh" => ("Mandarin", "普通话"),
    "zu" => ("Zulu", "isiZulu"),
};

/// A spoken or subtitle language.
///
/// As with countries, unknown input yields a value with an empty code whose
/// names echo the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Lowercase ISO 639-1 code, empty when nothing matched.
    pub code: String,
    /// English name.
    pub standard_name: String,
    /// Name in the language itself.
    pub native_name: String,
    /// English name translated through the catalog.
    pub localized_name: String,
}

impl Language {
    /// Look a language up by code, English name, or native name.
    pub fn lookup(input: &str, catalog: &Catalog) -> Self {
        let input = input.trim();
        let lower = input.to_lowercase();

        let found = LANGUAGES
            .get_entry(lower.as_str())
            .map(|(code, names)| (*code, *names))
            .or_else(|| {
                LANGUAGES
                    .entries()
                    .find(|(_, (standard, native))| {
                        standard.to_lowercase() == lower || native.to_lowercase() == lower
                    })
                    .map(|(code, names)| (*code, *names))
            });

        match found {
            Some((code, (standard, native))) => Self {
                code: code.to_string(),
                standard_name: standard.to_string(),
                native_name: native.to_string(),
                localized_name: catalog.tr(standard).into_owned(),
            },
            None => Self {
                code: String::new(),
                standard_name: input.to_string(),
                native_name: input.to_string(),
                localized_name: catalog.tr(input).into_owned(),
            },
        }
    }

    /// Whether the input matched a known language.
    pub fn is_known(&self) -> bool {
        !self.code.is_empty()
    }
}
