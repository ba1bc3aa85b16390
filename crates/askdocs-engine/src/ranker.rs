//! Re-ranking of raw index hits before synthesis.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use askdocs_core::config::RetrievalConfig;
use askdocs_core::types::{EntryKind, Scored};
use askdocs_vector::RetrievedEntry;

/// A passage that survived ranking. `similarity` is the raw cosine score,
/// `score` adds the entity boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPassage {
    pub entry: RetrievedEntry,
    pub similarity: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RetrievalConfig,
}

impl Ranker {
    pub fn new(config: RetrievalConfig) -> Self {
        Self { config }
    }

    /// Drop short chunks and hits at or below the similarity floor, add the
    /// entity boost, then keep the best `max_passages` (stable on ties).
    /// Whole-document entries are never dropped for length. A document and
    /// its own chunks never both survive.
    pub fn rank(&self, hits: Vec<Scored<RetrievedEntry>>, entities: &[String]) -> Vec<RankedPassage> {
        let entities: Vec<String> = entities.iter().map(|e| e.to_lowercase()).collect();
        let mut passages: Vec<RankedPassage> = hits
            .into_iter()
            .filter(|hit| hit.score > self.config.similarity_floor)
            .filter(|hit| {
                hit.value.kind == EntryKind::Document
                    || hit.value.text.trim().chars().count() >= self.config.min_chunk_chars
            })
            .map(|hit| {
                let mentions = entity_mentions(&hit.value.text, &entities);
                RankedPassage {
                    score: hit.score + self.config.entity_boost * mentions as f32,
                    similarity: hit.score,
                    entry: hit.value,
                }
            })
            .collect();
        passages.sort_by(|a, b| b.score.total_cmp(&a.score));
        let mut passages = drop_overlaps(passages);
        passages.truncate(self.config.max_passages);
        passages
    }
}

/// A whole-document entry holds the text of all its chunks. Walking in rank
/// order, the first of the two kinds seen for a document wins: chunks below
/// their document entry are dropped, as is a document entry below one of its
/// chunks. Several chunks of one document may all stay.
fn drop_overlaps(passages: Vec<RankedPassage>) -> Vec<RankedPassage> {
    let mut whole: HashSet<String> = HashSet::new();
    let mut chunked: HashSet<String> = HashSet::new();
    passages
        .into_iter()
        .filter(|p| {
            let document = &p.entry.document_id;
            if whole.contains(document) {
                return false;
            }
            match p.entry.kind {
                EntryKind::Document if chunked.contains(document) => false,
                EntryKind::Document => whole.insert(document.clone()),
                EntryKind::Chunk => {
                    chunked.insert(document.clone());
                    true
                }
            }
        })
        .collect()
}

/// How many of the (lower-cased) entities occur in `text`, ignoring case.
fn entity_mentions(text: &str, entities: &[String]) -> usize {
    if entities.is_empty() {
        return 0;
    }
    let text = text.to_lowercase();
    entities.iter().filter(|e| !e.is_empty() && text.contains(e.as_str())).count()
}
