use askdocs_text::tokenize::{content_words, tokenize};
use askdocs_text::vectorizer::{KEYWORD_BOOST, KEYWORD_INJECT_WEIGHT};
use askdocs_text::{term_frequency, TermWeights, Vectorizer};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn tokenize_keeps_alphabetic_terms_longer_than_two() {
    let tokens = tokenize("The Budget, the budget! Q3 is up 12% at ACME-corp; ok?");
    assert_eq!(tokens, vec!["the", "budget", "the", "budget", "acme", "corp"]);
}

#[test]
fn content_words_drop_stop_words() {
    assert_eq!(content_words("What is the total budget for 2024?"), vec!["total", "budget", "2024"]);
}

#[test]
fn shared_analyzers_give_the_same_tokens_on_every_call() {
    let text = "The pump schedule for the well; the pump needs oil.";
    let first = (tokenize(text), content_words(text));
    for _ in 0..3 {
        assert_eq!((tokenize(text), content_words(text)), first);
    }
    assert_eq!(first.1, vec!["pump", "schedule", "well", "pump", "needs", "oil"]);

    let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(move || content_words(text))).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first.1);
    }
}

#[test]
fn term_frequency_is_relative() {
    let tf = term_frequency(&tokenize("budget budget report plan"));
    assert!(close(tf["budget"], 0.5));
    assert!(close(tf["report"], 0.25));
    assert!(close(tf.values().sum::<f32>(), 1.0));
    assert!(term_frequency(&[]).is_empty());
}

#[test]
fn keywords_boost_present_terms_and_inject_absent_ones() {
    let weights = TermWeights::with_keywords("budget report", &["Budget".to_string(), "finance".to_string()]);
    assert!(close(weights.get("budget").expect("budget"), 0.5 * KEYWORD_BOOST));
    assert!(close(weights.get("report").expect("report"), 0.5));
    assert!(close(weights.get("finance").expect("finance"), KEYWORD_INJECT_WEIGHT));
}

#[test]
fn repeated_keywords_boost_once() {
    let weights = TermWeights::with_keywords("budget", &["budget".to_string(), "budget".to_string()]);
    assert!(close(weights.get("budget").expect("budget"), KEYWORD_BOOST));
}

#[test]
fn vocabulary_growth_keeps_earlier_vectors_as_prefixes() {
    let mut vectorizer = Vectorizer::new();
    let first = vectorizer.vectorize("alpha beta", &[]);
    assert_eq!(first.len(), 2);
    let grown = vectorizer.vectorize("gamma delta alpha", &[]);
    assert_eq!(vectorizer.dimensions(), 4);
    assert_eq!(grown.len(), 4);

    let again = vectorizer.weigh(&TermWeights::from_tokens(&tokenize("alpha beta")));
    assert_eq!(&again[..first.len()], first.as_slice());
    assert!(again[first.len()..].iter().all(|x| *x == 0.0));
    assert_eq!(vectorizer.vocabulary().dimension("alpha"), Some(0));
    assert_eq!(vectorizer.vocabulary().dimension("delta"), Some(3));
}

#[test]
fn idf_follows_log_ratio_over_entries() {
    let mut vectorizer = Vectorizer::new();
    let entries: Vec<TermWeights> = ["budget plan", "budget", "travel", "travel notes"]
        .iter()
        .map(|t| TermWeights::from_tokens(&tokenize(t)))
        .collect();
    for e in &entries {
        vectorizer.register(e);
    }
    vectorizer.recompute_idf(&entries);

    let idf = vectorizer.idf();
    assert_eq!(idf.entry_count(), 4);
    assert!(close(idf.weight("budget"), (4.0f32 / 3.0).ln()));
    assert!(close(idf.weight("plan"), (4.0f32 / 2.0).ln()));
    assert!(close(idf.weight("unseen"), 1.0), "uncomputed terms default to 1");
}

#[test]
fn idf_counts_whole_terms_not_substrings() {
    let mut vectorizer = Vectorizer::new();
    let entries: Vec<TermWeights> =
        ["cat", "category"].iter().map(|t| TermWeights::from_tokens(&tokenize(t))).collect();
    for e in &entries {
        vectorizer.register(e);
    }
    vectorizer.recompute_idf(&entries);
    assert!(close(vectorizer.idf().weight("cat"), (2.0f32 / 2.0).ln()));
}

#[test]
fn query_vector_ignores_unknown_terms() {
    let mut vectorizer = Vectorizer::new();
    vectorizer.vectorize("budget report", &[]);
    let before = vectorizer.dimensions();
    let q = vectorizer.query_vector("zebra xylophone");
    assert_eq!(vectorizer.dimensions(), before, "queries never grow the vocabulary");
    assert!(q.iter().all(|x| *x == 0.0));
}
