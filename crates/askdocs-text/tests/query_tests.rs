use askdocs_core::types::{Intent, QueryType};
use askdocs_text::entities::{extract_entities, scan, EntityKind};
use askdocs_text::keywords::{detect_language, extract_keywords as document_keywords};
use askdocs_text::query::{classify, detect_intent, extract_keywords};
use askdocs_text::QueryAnalyzer;

#[test]
fn classification_follows_rule_precedence() {
    let cases = [
        ("Can you summarize the budget report?", QueryType::Summary),
        ("List all payments made in March", QueryType::List),
        ("Compare the 2023 budget with the 2024 budget", QueryType::Comparison),
        ("When is the contract deadline?", QueryType::Temporal),
        ("How much will be paid?", QueryType::Financial),
        ("What is the email for support?", QueryType::Contact),
        ("How do I reset the router", QueryType::Procedural),
        ("Who signed the lease?", QueryType::Factual),
        ("Tell me about the garden", QueryType::General),
        ("   ", QueryType::Unknown),
        ("?!", QueryType::Unknown),
    ];
    for (query, expected) in cases {
        assert_eq!(classify(query), expected, "query: {query}");
    }
}

#[test]
fn summary_wins_over_later_rules() {
    assert_eq!(classify("Give me an overview of the payment dates"), QueryType::Summary);
    assert_eq!(classify("List the differences in cost"), QueryType::List);
}

#[test]
fn intent_comes_from_type_or_query_words() {
    assert_eq!(detect_intent("How much will be paid?", QueryType::Financial), Intent::Financial);
    assert_eq!(detect_intent("List all payment amounts", QueryType::List), Intent::Financial);
    assert_eq!(detect_intent("List every phone number", QueryType::List), Intent::Contact);
    assert_eq!(detect_intent("List the rooms", QueryType::List), Intent::Generic);
}

#[test]
fn entities_cover_names_dates_money_email_phone() {
    let text = "Alice Smith will pay $1,250.50 on 2024-01-15 and again on March 3, 2024. \
                Write to alice@example.com or call (555) 123-4567.";
    let entities = extract_entities(text);
    for expected in ["Alice Smith", "2024-01-15", "March 3, 2024", "$1,250.50", "alice@example.com", "(555) 123-4567"] {
        assert!(entities.contains(&expected.to_string()), "missing {expected} in {entities:?}");
    }
}

#[test]
fn entity_scans_deduplicate_exact_matches() {
    assert_eq!(scan(EntityKind::Amount, "$500 now and $500 later, 20 dollars"), vec!["$500", "20 dollars"]);
    assert_eq!(scan(EntityKind::Date, "due 12/01/2024, again 12/01/2024"), vec!["12/01/2024"]);
}

#[test]
fn question_words_are_not_names() {
    assert_eq!(scan(EntityKind::Name, "What Alice Smith owes"), vec!["Alice Smith"]);
    assert!(scan(EntityKind::Name, "How much will be paid?").is_empty());
}

#[test]
fn query_keywords_skip_short_and_stop_words() {
    assert_eq!(extract_keywords("What is the total budget for the new office?"), vec!["total", "budget", "office"]);
}

#[test]
fn analyzer_never_fails_on_empty_input() {
    let analysis = QueryAnalyzer::new().analyze("");
    assert_eq!(analysis.query_type, QueryType::Unknown);
    assert_eq!(analysis.intent, Intent::Generic);
    assert!(analysis.entities.is_empty());
    assert!(analysis.keywords.is_empty());
}

#[test]
fn document_keywords_rank_by_frequency() {
    let text = "Budget review. The budget covers travel. Travel budget approved by finance.";
    assert_eq!(document_keywords(text, 2), vec!["budget", "travel"]);
}

#[test]
fn language_guess_uses_stop_word_share() {
    assert_eq!(detect_language("The report is about the budget and the plan for this year."), "en");
    assert_eq!(detect_language("Zebra xylophone quantum"), "unknown");
    assert_eq!(detect_language("hi"), "unknown");
}
