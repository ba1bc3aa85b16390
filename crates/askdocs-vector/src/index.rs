use serde::{Deserialize, Serialize};
use tracing::debug;

use askdocs_core::types::{Document, DocumentId, EntryId, EntryKind, IndexStats, OwnerId, Scored};
use askdocs_text::{TermWeights, Vectorizer};

use crate::similarity::{cosine_similarity, pad_to_dimension};

/// Similarity an entry must exceed to be returned by a search.
pub const DEFAULT_SIMILARITY_FLOOR: f32 = 0.1;

/// One stored unit: either a whole document or one of its chunks.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub id: EntryId,
    pub document_id: DocumentId,
    pub owner_id: OwnerId,
    pub filename: String,
    pub kind: EntryKind,
    pub chunk_ordinal: Option<usize>,
    pub text: String,
    weights: TermWeights,
    vector: Vec<f32>,
}

impl IndexEntry {
    pub fn weights(&self) -> &TermWeights {
        &self.weights
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    fn retrieved(&self) -> RetrievedEntry {
        RetrievedEntry {
            id: self.id.clone(),
            document_id: self.document_id.clone(),
            owner_id: self.owner_id.clone(),
            filename: self.filename.clone(),
            kind: self.kind,
            chunk_ordinal: self.chunk_ordinal,
            text: self.text.clone(),
        }
    }
}

/// A search hit, detached from the index so it survives later mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedEntry {
    pub id: EntryId,
    pub document_id: DocumentId,
    pub owner_id: OwnerId,
    pub filename: String,
    pub kind: EntryKind,
    pub chunk_ordinal: Option<usize>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SemanticIndex {
    entries: Vec<IndexEntry>,
    vectorizer: Vectorizer,
    similarity_floor: f32,
}

impl Default for SemanticIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticIndex {
    pub fn new() -> Self {
        Self::with_similarity_floor(DEFAULT_SIMILARITY_FLOOR)
    }

    pub fn with_similarity_floor(similarity_floor: f32) -> Self {
        Self { entries: Vec::new(), vectorizer: Vectorizer::new(), similarity_floor }
    }

    pub fn similarity_floor(&self) -> f32 {
        self.similarity_floor
    }

    /// Index `document` as one whole-document entry followed by one entry per
    /// chunk in `document.chunks`. An existing document with the same id is
    /// replaced. Recomputes IDF and every stored vector, which costs
    /// entries × vocabulary.
    pub fn insert(&mut self, document: &Document) {
        let replaced = self.detach(&document.id);
        if replaced > 0 {
            debug!(document = %document.id, replaced, "replacing indexed document");
        }

        let document_weights = TermWeights::with_keywords(&document.text, &document.metadata.keywords);
        self.vectorizer.register(&document_weights);
        self.entries.push(IndexEntry {
            id: document.id.clone(),
            document_id: document.id.clone(),
            owner_id: document.owner_id.clone(),
            filename: document.filename.clone(),
            kind: EntryKind::Document,
            chunk_ordinal: None,
            text: document.text.clone(),
            weights: document_weights,
            vector: Vec::new(),
        });

        for chunk in &document.chunks {
            let weights = TermWeights::with_keywords(&chunk.text, &[]);
            self.vectorizer.register(&weights);
            self.entries.push(IndexEntry {
                id: chunk.id.clone(),
                document_id: document.id.clone(),
                owner_id: document.owner_id.clone(),
                filename: document.filename.clone(),
                kind: EntryKind::Chunk,
                chunk_ordinal: Some(chunk.ordinal),
                text: chunk.text.clone(),
                weights,
                vector: Vec::new(),
            });
        }

        self.reweigh();
        debug!(
            document = %document.id,
            chunks = document.chunks.len(),
            dimensions = self.vectorizer.dimensions(),
            "indexed document"
        );
    }

    /// Remove a document and all of its chunks. Returns the number of entries
    /// removed; an unknown id removes nothing.
    pub fn remove(&mut self, document_id: &str) -> usize {
        let removed = self.detach(document_id);
        if removed > 0 {
            self.reweigh();
            debug!(document = %document_id, removed, "removed document");
        }
        removed
    }

    /// Remove every entry belonging to `owner_id`. Other owners are untouched.
    pub fn remove_owner(&mut self, owner_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner_id != owner_id);
        let removed = before - self.entries.len();
        if removed > 0 {
            self.reweigh();
            debug!(owner = %owner_id, removed, "cleared owner entries");
        }
        removed
    }

    pub fn contains_document(&self, document_id: &str) -> bool {
        self.entries.iter().any(|e| e.kind == EntryKind::Document && e.document_id == document_id)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn search(&self, query: &str, top_k: usize) -> Vec<Scored<RetrievedEntry>> {
        self.search_filtered(query, top_k, |_| true)
    }

    /// Search restricted to entries accepted by `predicate`.
    ///
    /// The query is vectorized against the current vocabulary without being
    /// added to it. Entries scoring at or below the similarity floor are
    /// dropped; ties keep insertion order.
    pub fn search_filtered<F>(&self, query: &str, top_k: usize, predicate: F) -> Vec<Scored<RetrievedEntry>>
    where
        F: Fn(&IndexEntry) -> bool,
    {
        if self.entries.is_empty() || top_k == 0 {
            return Vec::new();
        }
        let query_vector = self.vectorizer.query_vector(query);
        let hits = self.rank(&query_vector, top_k, predicate);
        debug!(query, hits = hits.len(), "search");
        hits
    }

    /// Entries most similar to an indexed entry, excluding the entry itself.
    /// An unknown id yields nothing.
    pub fn find_similar(&self, entry_id: &str, top_k: usize) -> Vec<Scored<RetrievedEntry>> {
        let Some(source) = self.entries.iter().find(|e| e.id == entry_id) else {
            return Vec::new();
        };
        self.rank(&source.vector, top_k, |e| e.id != entry_id)
    }

    pub fn stats(&self) -> IndexStats {
        let documents = self.entries.iter().filter(|e| e.kind == EntryKind::Document).count();
        IndexStats {
            documents,
            chunks: self.entries.len() - documents,
            vocabulary_size: self.vectorizer.vocabulary().len(),
            dimensions: self.vectorizer.dimensions(),
        }
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    fn rank<F>(&self, query_vector: &[f32], top_k: usize, keep: F) -> Vec<Scored<RetrievedEntry>>
    where
        F: Fn(&IndexEntry) -> bool,
    {
        let dimension = self.vectorizer.dimensions();
        let query_vector = pad_to_dimension(query_vector, dimension);
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| keep(e))
            .map(|(i, e)| (i, cosine_similarity(&query_vector, &pad_to_dimension(&e.vector, dimension))))
            .filter(|(_, score)| *score > self.similarity_floor)
            .collect();
        // sort_by is stable: equal scores stay in insertion order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);
        scored.into_iter().map(|(i, score)| Scored::new(self.entries[i].retrieved(), score)).collect()
    }

    fn detach(&mut self, document_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.document_id != document_id);
        before - self.entries.len()
    }

    /// Recompute IDF over the current entries and rebuild every vector at the
    /// current dimensionality.
    fn reweigh(&mut self) {
        self.vectorizer.recompute_idf(self.entries.iter().map(|e| &e.weights));
        for entry in &mut self.entries {
            entry.vector = self.vectorizer.weigh(&entry.weights);
        }
    }
}
