//! Remote image sources for the media picker.
//!
//! - [`provider`] -- Trait definition and shared data types.
//! - [`providers`] -- Concrete provider implementations (TMDb).

pub mod provider;
pub mod providers;

pub use provider::{ImageProvider, RemoteImage};
pub use providers::TmdbProvider;
