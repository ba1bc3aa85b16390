//! askdocs-core
//!
//! Domain types, configuration, the sentence chunker and the narrow traits
//! shared by the text, vector and engine crates.

pub mod chunker;
pub mod config;
pub mod error;
pub mod loader;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
