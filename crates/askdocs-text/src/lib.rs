//! askdocs-text
//!
//! Text analysis for retrieval: the tantivy-backed tokenizer, vocabulary and
//! IDF bookkeeping, TF-IDF vectors, and query analysis (type, intent,
//! entities, keywords).

pub mod entities;
pub mod keywords;
pub mod query;
pub mod tokenize;
pub mod vectorizer;

pub use query::QueryAnalyzer;
pub use tokenize::tokenize;
pub use vectorizer::{term_frequency, IdfTable, TermWeights, Vectorizer, Vocabulary};
