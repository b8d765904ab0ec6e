//! # wpmoly-format
//!
//! Display formatting for stored movie metadata.
//!
//! Movies keep their metadata as raw strings and numbers: comma-separated
//! people lists, ISO country codes, detail slugs, dates, minutes. This crate
//! turns each of those into the HTML fragment shown on a movie page, with
//! term links, flags, stars, and translated labels.
//!
//! ## Quick Start
//!
//! ```
//! use wpmoly_common::MetaValue;
//! use wpmoly_format::{Field, FormatOptions, FormatSettings, Formatter};
//!
//! let formatter = Formatter::new(FormatSettings::default());
//!
//! let budget = formatter.format_field(Field::Budget, &MetaValue::from(63_000_000_i64), &FormatOptions::new());
//! assert_eq!(budget, "$63,000,000");
//!
//! let runtime = formatter.format("runtime", &MetaValue::from("139"), &FormatOptions::new());
//! assert_eq!(runtime, "2 h 19 min");
//! ```
//!
//! ## Filters
//!
//! Every formatter passes its output through named filter hooks, see
//! [`hooks`]. Registering a callback changes the output of that field
//! without touching the formatter:
//!
//! ```
//! use wpmoly_common::MetaValue;
//! use wpmoly_format::{hooks, FormatOptions, FormatSettings, Formatter};
//!
//! let formatter = Formatter::new(FormatSettings::default())
//!     .with_filter(hooks::EMPTY_VALUE, 10, |_, _| "n/a".to_string());
//!
//! assert_eq!(formatter.format("budget", &MetaValue::Null, &FormatOptions::new()), "n/a");
//! ```

pub mod datefmt;
pub mod hooks;
pub mod html;
pub mod i18n;
pub mod model;
pub mod options;
pub mod settings;
pub mod taxonomy;

mod formatter;

pub use formatter::{Field, Formatter};
pub use hooks::{FilterArgs, Filters};
pub use i18n::Catalog;
pub use options::FormatOptions;
pub use settings::FormatSettings;
pub use taxonomy::{MemoryTermStore, Term, TermStore};
