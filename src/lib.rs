//! wpmovielibrary - Movie metadata formatting and remote media import
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod library;
pub mod media;
pub mod metadata;
