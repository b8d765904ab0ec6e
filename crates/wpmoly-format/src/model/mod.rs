//! Static reference tables resolved while formatting.
//!
//! - [`Country`]: production countries by ISO 3166-1 alpha-2 code
//! - [`Language`]: spoken/subtitle languages by ISO 639-1 code
//!
//! Both are immutable compile-time maps; localized names come from the
//! [`Catalog`](crate::i18n::Catalog) passed to the lookup.

mod country;
mod language;

pub use country::Country;
pub use language::Language;
