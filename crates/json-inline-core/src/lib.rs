//! Core types and configuration for json-inline.
//!
//! - [`types`] — import bindings, replacement records, and the transform error type
//! - [`config`] — configuration loading from `json-inline.json`

pub mod config;
pub mod types;
