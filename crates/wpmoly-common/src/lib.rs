//! Wpmoly-Common: Shared types, IDs, and errors.
//!
//! This crate provides the pieces every other wpmovielibrary crate agrees on:
//!
//! - **Typed IDs**: Integer wrappers for movies, terms, and attachments
//! - **Core Types**: Taxonomies, image kinds, raw metadata values, movie records
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use wpmoly_common::{MetaValue, MovieId, Error, Result};
//!
//! let id = MovieId::new(42);
//! assert_eq!(id.get(), 42);
//!
//! let genres = MetaValue::from("Drama, Crime");
//! assert_eq!(genres.as_list(), vec!["Drama", " Crime"]);
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("movie"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
