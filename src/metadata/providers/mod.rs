//! Concrete image provider implementations.
//!
//! Each submodule wraps a single external API and implements the
//! [`ImageProvider`](super::ImageProvider) trait.

pub mod tmdb;

pub use tmdb::TmdbProvider;
