use std::fs;
use tempfile::TempDir;

use askdocs_core::loader::DocumentLoader;
use askdocs_core::types::{Chunk, Document, UNKNOWN_LANGUAGE};
use askdocs_core::Error;

#[test]
fn load_directory_reads_text_and_markdown_only() {
    let tmp = TempDir::new().expect("tmp");
    let dir = tmp.path();
    fs::create_dir_all(dir.join("reports")).expect("mkdir");
    fs::write(dir.join("a.txt"), "alpha bravo").expect("write");
    fs::write(dir.join("reports/b.md"), "charlie delta").expect("write");
    fs::write(dir.join("image.png"), [0u8, 1, 2]).expect("write");

    let docs = DocumentLoader::new("alice").load_directory(dir).expect("load");

    assert_eq!(docs.len(), 2, "png is skipped");
    assert_eq!(docs[0].id, "a.txt");
    assert_eq!(docs[0].filename, "a.txt");
    assert_eq!(docs[1].filename, "b.md");
    assert!(docs[1].id.ends_with("b.md") && docs[1].id.starts_with("reports"));
    assert!(docs.iter().all(|d| d.owner_id == "alice"));
    assert!(docs.iter().all(|d| d.chunks.is_empty()), "chunking happens at index time");
}

#[test]
fn load_directory_limited_keeps_first_files() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("a.txt"), "alpha").expect("write");
    fs::write(tmp.path().join("b.txt"), "bravo").expect("write");

    let docs = DocumentLoader::new("u").with_limit(1).load_directory(tmp.path()).expect("load");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].text, "alpha");
}

#[test]
fn load_directory_recovers_invalid_utf8() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("bad.txt"), [b'o', b'k', 0xff, b'!']).expect("write");

    let docs = DocumentLoader::new("u").load_directory(tmp.path()).expect("load");
    assert!(docs[0].text.starts_with("ok"));
}

#[test]
fn missing_directory_is_not_found() {
    let tmp = TempDir::new().expect("tmp");
    let err = DocumentLoader::new("u").load_directory(&tmp.path().join("nope")).expect_err("missing dir");
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn document_metadata_counts_words_and_chars() {
    let doc = Document::new("d1", "u", "d1.txt", "héllo big world").with_keywords(vec!["world".into()]);
    assert_eq!(doc.metadata.word_count, 3);
    assert_eq!(doc.metadata.char_count, 15);
    assert_eq!(doc.metadata.keywords, vec!["world".to_string()]);
    assert_eq!(doc.metadata.language, UNKNOWN_LANGUAGE);
    assert_eq!(doc.with_language("en").metadata.language, "en");
}

#[test]
fn chunk_ids_derive_from_document_and_ordinal() {
    assert_eq!(Chunk::chunk_id("report.txt", 3), "report.txt:3");
}

#[test]
fn responses_serialize_with_lowercase_tags() {
    use askdocs_core::types::{AnswerOrigin, QueryResponse, QueryType, Source};

    let response = QueryResponse {
        answer: "- $500".into(),
        confidence: 0.65,
        query_type: QueryType::Financial,
        sources: vec![Source { filename: "alice.txt".into(), excerpt: "Alice Smith will pay $500".into(), relevance: 0.5 }],
        origin: AnswerOrigin::ExtractiveFallback,
    };
    let value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(value["query_type"], "financial");
    assert_eq!(value["origin"], "extractive_fallback");
    assert_eq!(value["sources"][0]["filename"], "alice.txt");
}
