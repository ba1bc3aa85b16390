//! Domain types shared by the chunker, the index and the answer engine.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocumentId = String;
pub type EntryId = String;
pub type OwnerId = String;

/// Language tag used when nothing better is known.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub word_count: usize,
    pub char_count: usize,
    pub keywords: Vec<String>,
    pub language: String,
}

/// A cleaned plain-text document handed over by the extraction side.
///
/// - `id`: unique identifier assigned at ingestion
/// - `owner_id`: the user the document belongs to; queries and clears are scoped by it
/// - `chunks`: filled in by the engine when the document is indexed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub owner_id: OwnerId,
    pub filename: String,
    pub text: String,
    pub chunks: Vec<Chunk>,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(
        id: impl Into<DocumentId>,
        owner_id: impl Into<OwnerId>,
        filename: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let metadata = DocumentMetadata {
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
            keywords: Vec::new(),
            language: UNKNOWN_LANGUAGE.to_string(),
        };
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            filename: filename.into(),
            text,
            chunks: Vec::new(),
            metadata,
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.metadata.keywords = keywords;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.metadata.language = language.into();
        self
    }
}

/// A sentence-aligned slice of a document. `start`/`end` are byte offsets
/// into the parent document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: EntryId,
    pub document_id: DocumentId,
    pub ordinal: usize,
    pub text: String,
    pub word_count: usize,
    pub start: usize,
    pub end: usize,
}

/// Joins a document id and a chunk ordinal into a chunk id. Document ids
/// must not contain it, or `"x:0"` would name both a document and a chunk.
pub const CHUNK_ID_SEPARATOR: char = ':';

impl Chunk {
    pub fn chunk_id(document_id: &str, ordinal: usize) -> EntryId {
        format!("{document_id}{CHUNK_ID_SEPARATOR}{ordinal}")
    }
}

/// Whether an index entry covers a whole document or one of its chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Document,
    Chunk,
}

/// A value paired with a relevance score. Higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored<T> {
    pub value: T,
    pub score: f32,
}

impl<T> Scored<T> {
    pub fn new(value: T, score: f32) -> Self {
        Self { value, score }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Factual,
    Summary,
    List,
    Comparison,
    Temporal,
    Financial,
    Contact,
    Procedural,
    General,
    Unknown,
}

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::Factual => "factual",
            QueryType::Summary => "summary",
            QueryType::List => "list",
            QueryType::Comparison => "comparison",
            QueryType::Temporal => "temporal",
            QueryType::Financial => "financial",
            QueryType::Contact => "contact",
            QueryType::Procedural => "procedural",
            QueryType::General => "general",
            QueryType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which entity scan a list-style answer should run over the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Financial,
    Temporal,
    Contact,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub query_type: QueryType,
    pub intent: Intent,
    pub entities: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub filename: String,
    pub excerpt: String,
    /// Similarity of the passage to the query, clamped to `[0, 1]`.
    pub relevance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOrigin {
    Extractive,
    Generated,
    ExtractiveFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub confidence: f32,
    pub query_type: QueryType,
    pub sources: Vec<Source>,
    pub origin: AnswerOrigin,
}

/// The ranked passages of a query, flattened for a generative answerer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    pub question: String,
    pub query_type: QueryType,
    pub context: String,
    pub filenames: Vec<String>,
}

impl ContextBundle {
    pub fn is_empty(&self) -> bool {
        self.context.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub chunks: usize,
    pub vocabulary_size: usize,
    pub dimensions: usize,
}
