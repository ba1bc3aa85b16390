//! The question-answering entry point.
//!
//! `QaEngine` owns the semantic index and the document table behind one
//! read-write lock. Indexing, removal and clearing take the write lock;
//! queries take the read lock and therefore never see a half-recomputed IDF
//! table. Documents of every owner share the index and are filtered by
//! `owner_id` at query time.

use std::collections::{BTreeMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use askdocs_core::chunker::Chunker;
use askdocs_core::config::{RetrievalConfig, Settings};
use askdocs_core::traits::AnswerGenerator;
use askdocs_core::types::{
    AnswerOrigin, ContextBundle, Document, DocumentId, IndexStats, QueryAnalysis, QueryResponse, Source,
    CHUNK_ID_SEPARATOR,
};
use askdocs_core::{Error, Result};
use askdocs_text::QueryAnalyzer;
use askdocs_vector::SemanticIndex;

use crate::confidence::confidence;
use crate::ranker::{RankedPassage, Ranker};
use crate::synthesis::{distinct_sources, excerpt, join_context, Synthesizer};

const SOURCE_EXCERPT_CHARS: usize = 200;

/// Outcome of indexing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    pub document_id: DocumentId,
    pub chunks: usize,
    pub replaced: bool,
    pub stats: IndexStats,
}

/// Listing view of an indexed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub id: DocumentId,
    pub filename: String,
    pub word_count: usize,
    pub chunks: usize,
    pub language: String,
    pub keywords: Vec<String>,
}

impl From<&Document> for DocumentInfo {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            filename: doc.filename.clone(),
            word_count: doc.metadata.word_count,
            chunks: doc.chunks.len(),
            language: doc.metadata.language.clone(),
            keywords: doc.metadata.keywords.clone(),
        }
    }
}

#[derive(Default)]
struct EngineState {
    index: SemanticIndex,
    documents: BTreeMap<DocumentId, Document>,
}

pub struct QaEngine {
    state: RwLock<EngineState>,
    chunker: Chunker,
    analyzer: QueryAnalyzer,
    ranker: Ranker,
    synthesizer: Synthesizer,
    retrieval: RetrievalConfig,
}

impl QaEngine {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let state = EngineState {
            index: SemanticIndex::with_similarity_floor(settings.retrieval.similarity_floor),
            documents: BTreeMap::new(),
        };
        Ok(Self {
            state: RwLock::new(state),
            chunker: Chunker::new(settings.chunking.clone()),
            analyzer: QueryAnalyzer::new(),
            ranker: Ranker::new(settings.retrieval.clone()),
            synthesizer: Synthesizer::new(),
            retrieval: settings.retrieval.clone(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&Settings::default())
    }

    pub fn default_top_k(&self) -> usize {
        self.retrieval.top_k
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, EngineState>> {
        self.state.read().map_err(|_| Error::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, EngineState>> {
        self.state.write().map_err(|_| Error::LockPoisoned)
    }

    /// Chunk `document` and add it to the index, replacing any document with
    /// the same id. Empty text is indexed as a whole-document entry only.
    /// Ids that are empty or contain [`CHUNK_ID_SEPARATOR`] are rejected.
    pub fn index_document(&self, mut document: Document) -> Result<IndexReport> {
        if document.id.trim().is_empty() {
            return Err(Error::Operation("document id must not be empty".into()));
        }
        if document.id.contains(CHUNK_ID_SEPARATOR) {
            return Err(Error::Operation(format!(
                "document id {:?} must not contain '{CHUNK_ID_SEPARATOR}'",
                document.id
            )));
        }
        document.chunks = self.chunker.chunk(&document.id, &document.text);
        let chunks = document.chunks.len();

        let mut state = self.write()?;
        let replaced = state.documents.contains_key(&document.id);
        state.index.insert(&document);
        let stats = state.index.stats();
        let document_id = document.id.clone();
        info!(document = %document_id, owner = %document.owner_id, chunks, replaced, "indexed document");
        state.documents.insert(document_id.clone(), document);
        Ok(IndexReport { document_id, chunks, replaced, stats })
    }

    /// Remove a document and its chunks. Returns whether it was indexed.
    pub fn remove_document(&self, document_id: &str) -> Result<bool> {
        let mut state = self.write()?;
        let removed = state.documents.remove(document_id).is_some();
        let entries = state.index.remove(document_id);
        if removed {
            info!(document = %document_id, entries, "removed document");
        }
        Ok(removed)
    }

    /// Remove every document of `owner_id`. Returns how many documents were
    /// removed; other owners are untouched.
    pub fn clear_owner(&self, owner_id: &str) -> Result<usize> {
        let mut state = self.write()?;
        let before = state.documents.len();
        state.documents.retain(|_, doc| doc.owner_id != owner_id);
        let removed = before - state.documents.len();
        let entries = state.index.remove_owner(owner_id);
        info!(owner = %owner_id, documents = removed, entries, "cleared owner documents");
        Ok(removed)
    }

    pub fn stats(&self) -> Result<IndexStats> {
        Ok(self.read()?.index.stats())
    }

    pub fn documents(&self, owner_id: &str) -> Result<Vec<DocumentInfo>> {
        let state = self.read()?;
        Ok(state.documents.values().filter(|d| d.owner_id == owner_id).map(DocumentInfo::from).collect())
    }

    /// Answer `question` from the documents of `owner_id` using the
    /// extractive synthesizer.
    pub fn query(&self, question: &str, owner_id: &str, top_k: usize) -> Result<QueryResponse> {
        let (analysis, passages) = self.retrieve(question, owner_id, top_k)?;
        Ok(self.extractive_response(&analysis, &passages, AnswerOrigin::Extractive))
    }

    /// The ranked passages of `question`, flattened for a generative answerer.
    pub fn context_bundle(&self, question: &str, owner_id: &str, top_k: usize) -> Result<ContextBundle> {
        let (analysis, passages) = self.retrieve(question, owner_id, top_k)?;
        Ok(bundle(question, &analysis, &passages))
    }

    /// Answer with `generator`, falling back to the extractive answer when it
    /// fails or returns nothing. With no relevant passages the generator is
    /// not consulted.
    pub fn query_with_generator(
        &self,
        question: &str,
        owner_id: &str,
        top_k: usize,
        generator: &dyn AnswerGenerator,
    ) -> Result<QueryResponse> {
        let (analysis, passages) = self.retrieve(question, owner_id, top_k)?;
        if passages.is_empty() {
            return Ok(self.extractive_response(&analysis, &passages, AnswerOrigin::Extractive));
        }
        let context = bundle(question, &analysis, &passages);
        match generator.generate(question, &context) {
            Ok(answer) if !answer.trim().is_empty() => {
                let answer = answer.trim().to_string();
                Ok(QueryResponse {
                    confidence: confidence(&passages, &analysis.entities, &answer),
                    answer,
                    query_type: analysis.query_type,
                    sources: sources(&passages),
                    origin: AnswerOrigin::Generated,
                })
            }
            Ok(_) => {
                warn!("answer generator returned an empty answer; using extractive answer");
                Ok(self.extractive_response(&analysis, &passages, AnswerOrigin::ExtractiveFallback))
            }
            Err(err) => {
                warn!(error = %err, "answer generator failed; using extractive answer");
                Ok(self.extractive_response(&analysis, &passages, AnswerOrigin::ExtractiveFallback))
            }
        }
    }

    fn retrieve(&self, question: &str, owner_id: &str, top_k: usize) -> Result<(QueryAnalysis, Vec<RankedPassage>)> {
        let analysis = self.analyzer.analyze(question);
        let hits = {
            let state = self.read()?;
            state.index.search_filtered(question, top_k, |entry| entry.owner_id == owner_id)
        };
        let hit_count = hits.len();
        let passages = self.ranker.rank(hits, &analysis.entities);
        debug!(
            query_type = %analysis.query_type,
            owner = %owner_id,
            hits = hit_count,
            passages = passages.len(),
            "retrieved passages"
        );
        Ok((analysis, passages))
    }

    fn extractive_response(
        &self,
        analysis: &QueryAnalysis,
        passages: &[RankedPassage],
        origin: AnswerOrigin,
    ) -> QueryResponse {
        let answer = self.synthesizer.synthesize(analysis, passages);
        QueryResponse {
            confidence: confidence(passages, &analysis.entities, &answer),
            answer,
            query_type: analysis.query_type,
            sources: sources(passages),
            origin,
        }
    }
}

/// One source per document, at its best-ranked passage.
fn sources(passages: &[RankedPassage]) -> Vec<Source> {
    let mut seen = HashSet::new();
    passages
        .iter()
        .filter(|p| seen.insert(p.entry.document_id.as_str()))
        .map(|p| Source {
            filename: p.entry.filename.clone(),
            excerpt: excerpt(&p.entry.text, SOURCE_EXCERPT_CHARS),
            relevance: p.similarity.clamp(0.0, 1.0),
        })
        .collect()
}

fn bundle(question: &str, analysis: &QueryAnalysis, passages: &[RankedPassage]) -> ContextBundle {
    ContextBundle {
        question: question.to_string(),
        query_type: analysis.query_type,
        context: join_context(passages),
        filenames: distinct_sources(passages),
    }
}
