//! Public API for the uv-codec crate.
//!
//! This module provides the [`CodecError`] unified error type.

mod error;

pub use error::CodecError;
