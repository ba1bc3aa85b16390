//! askdocs-engine
//!
//! Question answering over an owner's indexed documents: retrieval through
//! the semantic index, entity-aware re-ranking, extractive answer synthesis
//! per query type, and a confidence hint. `QaEngine` is the entry point.

pub mod confidence;
pub mod engine;
pub mod fallback;
pub mod ranker;
pub mod synthesis;

pub use confidence::{confidence, CONFIDENCE_CEILING, CONFIDENCE_FLOOR};
pub use engine::{DocumentInfo, IndexReport, QaEngine};
pub use fallback::{Fallback, NO_INFORMATION};
pub use ranker::{RankedPassage, Ranker};
pub use synthesis::Synthesizer;
