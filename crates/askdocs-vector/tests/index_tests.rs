use askdocs_core::chunker::Chunker;
use askdocs_core::config::ChunkingConfig;
use askdocs_core::types::{Document, EntryKind, IndexStats};
use askdocs_vector::SemanticIndex;

fn document(id: &str, owner: &str, text: &str) -> Document {
    let mut doc = Document::new(id, owner, format!("{id}.txt"), text);
    doc.chunks = Chunker::new(ChunkingConfig { target_words: 12, overlap_sentences: 1 }).chunk(id, text);
    doc
}

fn report_a() -> Document {
    document(
        "report-a",
        "alice",
        "Budget notes for the quarter. The budget grew again. The budget was reviewed twice. \
         A new budget plan was drafted. The budget is final.",
    )
}

fn report_b() -> Document {
    document(
        "report-b",
        "alice",
        "Garden journal entry. Roses bloomed early this spring and tomatoes followed soon after.",
    )
}

#[test]
fn empty_index_returns_nothing() {
    let index = SemanticIndex::new();
    assert!(index.search("budget", 5).is_empty());
    assert!(index.find_similar("missing", 5).is_empty());
    assert_eq!(index.stats(), IndexStats::default());
}

#[test]
fn budget_report_ranks_and_unrelated_report_is_excluded() {
    let mut index = SemanticIndex::new();
    index.insert(&report_a());
    index.insert(&report_b());

    let hits = index.search("budget", 10);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|h| h.value.document_id == "report-a"), "{hits:?}");
    assert!(hits.iter().any(|h| h.value.kind == EntryKind::Document));
}

#[test]
fn results_respect_top_k_and_floor() {
    let mut index = SemanticIndex::new();
    index.insert(&report_a());
    index.insert(&report_b());
    index.insert(&document("plan", "alice", "The travel budget covers flights. Hotel costs come from the same budget."));

    for k in [1, 2, 3, 50] {
        let hits = index.search("budget flights", k);
        assert!(hits.len() <= k);
        assert!(hits.iter().all(|h| h.score > 0.1));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }
    assert!(index.search("budget", 0).is_empty());
}

#[test]
fn out_of_vocabulary_query_matches_nothing() {
    let mut index = SemanticIndex::new();
    index.insert(&report_a());
    let before = index.stats();
    assert!(index.search("xylophone zebra", 5).is_empty());
    assert_eq!(index.stats(), before);
}

#[test]
fn repeated_search_is_identical() {
    let mut index = SemanticIndex::new();
    index.insert(&report_a());
    index.insert(&report_b());
    let first = index.search("budget plan", 5);
    let second = index.search("budget plan", 5);
    assert_eq!(first, second);
}

#[test]
fn insert_then_remove_restores_counts() {
    let mut index = SemanticIndex::new();
    index.insert(&report_b());
    let before = index.stats();

    let a = report_a();
    index.insert(&a);
    let during = index.stats();
    assert_eq!(during.documents, before.documents + 1);
    assert_eq!(during.chunks, before.chunks + a.chunks.len());

    assert_eq!(index.remove("report-a"), 1 + a.chunks.len());
    let after = index.stats();
    assert_eq!((after.documents, after.chunks), (before.documents, before.chunks));
    assert!(index.search("budget", 10).iter().all(|h| h.value.document_id != "report-a"));
    assert_eq!(after.vocabulary_size, during.vocabulary_size, "vocabulary only grows");
    assert_eq!(index.remove("report-a"), 0);
}

#[test]
fn reinserting_replaces_previous_entries() {
    let mut index = SemanticIndex::new();
    index.insert(&report_a());
    let once = index.stats();
    index.insert(&report_a());
    assert_eq!(index.stats(), once);
}

#[test]
fn find_similar_excludes_the_source_entry() {
    let mut index = SemanticIndex::new();
    let a = report_a();
    index.insert(&a);
    index.insert(&report_b());
    for chunk in &a.chunks {
        let hits = index.find_similar(&chunk.id, 10);
        assert!(hits.iter().all(|h| h.value.id != chunk.id));
    }
    let from_doc = index.find_similar("report-a", 10);
    assert!(from_doc.iter().all(|h| h.value.id != "report-a"));
    assert!(from_doc.iter().any(|h| h.value.document_id == "report-a"));
}

#[test]
fn owners_are_isolated() {
    let mut index = SemanticIndex::new();
    index.insert(&report_a());
    index.insert(&document("bob-budget", "bob", "Budget for groceries. The budget is small."));

    let bob_only = index.search_filtered("budget", 10, |e| e.owner_id == "bob");
    assert!(!bob_only.is_empty());
    assert!(bob_only.iter().all(|h| h.value.owner_id == "bob"));

    let removed = index.remove_owner("bob");
    assert!(removed >= 2);
    assert!(index.contains_document("report-a"));
    assert!(!index.contains_document("bob-budget"));
    assert!(index.entries().iter().all(|e| e.owner_id == "alice"));
}

#[test]
fn stored_vectors_match_current_dimensionality() {
    let mut index = SemanticIndex::new();
    index.insert(&report_a());
    index.insert(&report_b());
    let dims = index.stats().dimensions;
    assert!(index.entries().iter().all(|e| e.vector().len() == dims));
}

#[test]
fn equal_scores_come_back_in_insertion_order() {
    let twin = "Solar panel maintenance checklist for the cabin.";
    let fillers = [
        "Goat feed inventory",
        "Rainwater barrel repair log",
        "Firewood stacking notes",
        "Garden seed catalogue",
        "Chicken coop cleaning routine",
    ];
    let mut index = SemanticIndex::new();
    index.insert(&Document::new("twin-c", "alice", "c.txt", twin));
    index.insert(&Document::new("filler-0", "alice", "f0.txt", fillers[0]));
    index.insert(&Document::new("twin-a", "alice", "a.txt", twin));
    for (i, text) in fillers.iter().enumerate().skip(1) {
        index.insert(&Document::new(format!("filler-{i}"), "alice", format!("f{i}.txt"), *text));
    }
    index.insert(&Document::new("twin-b", "alice", "b.txt", twin));
    assert_eq!(index.stats().documents, 8);
    assert!(index.vectorizer().idf().weight("solar") > 0.0);

    let hits = index.search("solar", 10);
    let ids: Vec<&str> = hits.iter().map(|h| h.value.id.as_str()).collect();
    assert_eq!(ids, vec!["twin-c", "twin-a", "twin-b"]);
    assert!(hits.iter().all(|h| h.score == hits[0].score));
}
