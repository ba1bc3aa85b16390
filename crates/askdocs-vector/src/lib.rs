//! In-memory semantic index over whole documents and their chunks.
//!
//! Every mutation recomputes the IDF table and re-weighs every stored
//! vector, so callers must hold exclusive access while inserting or
//! removing and must not keep raw vectors across calls.

pub mod index;
pub mod similarity;

pub use index::{IndexEntry, RetrievedEntry, SemanticIndex};
pub use similarity::{cosine_similarity, pad_to_dimension};
