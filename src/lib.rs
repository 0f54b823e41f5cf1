//! Library crate for synonym-store.
//!
//! This crate exposes the building blocks of the `synonyms` tool:
//! - Error and result types (`error`)
//! - The dictionary and its line format (`store`)
//! - Case-insensitive search helpers (`search`)
//! - Settings file handling for the binary (`config`)
//!
//! It is used by the `synonyms` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod search;
pub mod store;

// Re-export commonly used items at the crate root for convenience
pub use error::{Result, SynonymError};
pub use store::{Record, SynonymStore};
