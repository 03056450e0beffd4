//! flag-importer
//!
//! Encodes 100x66 flag images as palette-coordinate strings and decodes them
//! back. This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
