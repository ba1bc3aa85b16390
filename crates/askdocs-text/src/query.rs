//! Query classification, intent and keyword extraction.
//!
//! Classification walks an ordered rule list and the first matching rule
//! wins: summary, list, comparison, temporal, financial, contact, procedural,
//! factual (wh-questions), then general. A query with no words at all is
//! `Unknown`.

use std::sync::OnceLock;

use regex::Regex;

use askdocs_core::types::{Intent, QueryAnalysis, QueryType};

use crate::entities::extract_entities;
use crate::tokenize::content_words;

struct Rules {
    summary: Regex,
    list: Regex,
    comparison: Regex,
    temporal: Regex,
    financial: Regex,
    contact: Regex,
    procedural: Regex,
    factual: Regex,
}

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| Rules {
        summary: rule(
            r"(?i)\b(summar(y|ize|ise|ies)|overview|main (points|ideas)|key (points|takeaways)|gist|tl;?dr|what('s| is) (this|the) (document|file|report|text) about)\b",
        ),
        list: rule(
            r"(?i)^\s*(list|enumerate|name)\b|\b(list (all|the|of|every)|show (me )?(all|every)|give me (all|every|a list)|what are (all|the different)|which are all)\b",
        ),
        comparison: rule(
            r"(?i)\b(compare|compared|comparing|comparison|difference|differences|differ|versus|vs|contrast|similarities|better than|worse than)\b",
        ),
        temporal: rule(
            r"(?i)\b(when|what (date|time|day|year|month)|deadline|deadlines|due date|due|schedule|scheduled|dates?|how long ago|expires?|expired|expiration)\b",
        ),
        financial: rule(
            r"(?i)\b(how much|costs?|prices?|priced|pricing|amounts?|pay|paid|payments?|budgets?|fees?|salary|salaries|expenses?|revenue|invoices?|invoiced|spend|spent|money|dollars?|owed?|owes)\b|\$",
        ),
        contact: rule(r"(?i)\b(e-?mails?|phone|telephone|contacts?|call|reach|address|fax|mobile)\b"),
        procedural: rule(
            r"(?i)\b(how (do|does|can|should|would) (i|we|you|one)|how to|steps?|procedures?|process|instructions?|walk me through)\b",
        ),
        factual: rule(r"(?i)^\s*(who|what|where|which|why|how|whom|whose|is|are|was|were|does|do|did|can|could)\b|\?\s*$"),
    })
}

/// Classify `query` into exactly one type; the first matching rule wins.
pub fn classify(query: &str) -> QueryType {
    if !query.chars().any(char::is_alphanumeric) {
        return QueryType::Unknown;
    }
    let r = rules();
    let ordered: [(&Regex, QueryType); 8] = [
        (&r.summary, QueryType::Summary),
        (&r.list, QueryType::List),
        (&r.comparison, QueryType::Comparison),
        (&r.temporal, QueryType::Temporal),
        (&r.financial, QueryType::Financial),
        (&r.contact, QueryType::Contact),
        (&r.procedural, QueryType::Procedural),
        (&r.factual, QueryType::Factual),
    ];
    ordered
        .iter()
        .find(|(re, _)| re.is_match(query))
        .map_or(QueryType::General, |(_, query_type)| *query_type)
}

/// The entity scan a list-style answer should use. Temporal, financial and
/// contact types carry their own intent; other types take the first of
/// those patterns that matches the query.
pub fn detect_intent(query: &str, query_type: QueryType) -> Intent {
    match query_type {
        QueryType::Temporal => return Intent::Temporal,
        QueryType::Financial => return Intent::Financial,
        QueryType::Contact => return Intent::Contact,
        _ => {}
    }
    let r = rules();
    if r.temporal.is_match(query) {
        Intent::Temporal
    } else if r.financial.is_match(query) {
        Intent::Financial
    } else if r.contact.is_match(query) {
        Intent::Contact
    } else {
        Intent::Generic
    }
}

/// Query words longer than three characters that are not stop words.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in content_words(query) {
        if word.chars().count() > 3 && !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryAnalyzer;

impl QueryAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let query_type = classify(query);
        QueryAnalysis {
            query_type,
            intent: detect_intent(query, query_type),
            entities: extract_entities(query),
            keywords: extract_keywords(query),
        }
    }
}
