//! Extractive answers, one strategy per query type.
//!
//! Every strategy works on the ranked passages only. With no passages the
//! answer is always [`Fallback::NoInformation`].

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use askdocs_core::chunker::split_sentences;
use askdocs_core::types::{Intent, QueryAnalysis, QueryType};
use askdocs_text::entities::{scan, EntityKind};
use askdocs_text::tokenize::content_words;

use crate::fallback::Fallback;
use crate::ranker::RankedPassage;

const SUMMARY_SENTENCES: usize = 5;
const MIN_SUMMARY_SENTENCE_CHARS: usize = 20;
const COMPARISON_SECTIONS: usize = 3;
const GENERAL_EXCERPT_CHARS: usize = 500;
const SECTION_CHARS: usize = 400;
const FALLBACK_EXCERPT_CHARS: usize = 300;

fn bullet_line() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| Regex::new(r"^\s*(?:[-*•+]|\d{1,3}[.)])\s+(\S.*)$").expect("static regex"))
}

fn blank_line() -> &'static Regex {
    static BLANK: OnceLock<Regex> = OnceLock::new();
    BLANK.get_or_init(|| Regex::new(r"\n[ \t]*\n").expect("static regex"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize(&self, analysis: &QueryAnalysis, passages: &[RankedPassage]) -> String {
        if passages.is_empty() {
            return Fallback::NoInformation.message().to_string();
        }
        let context = join_context(passages);
        match analysis.query_type {
            QueryType::Summary => summary(&context, passages),
            QueryType::List
            | QueryType::Procedural
            | QueryType::Financial
            | QueryType::Temporal
            | QueryType::Contact => list(&context, analysis.intent),
            QueryType::Factual => factual(&context, analysis),
            QueryType::Comparison => comparison(&context),
            QueryType::General | QueryType::Unknown => general(&context, passages),
        }
    }
}

/// Passage texts in rank order, separated by blank lines.
pub fn join_context(passages: &[RankedPassage]) -> String {
    passages.iter().map(|p| p.entry.text.trim()).collect::<Vec<_>>().join("\n\n")
}

/// Filenames of `passages` in rank order, each once.
pub fn distinct_sources(passages: &[RankedPassage]) -> Vec<String> {
    let mut seen = HashSet::new();
    passages
        .iter()
        .filter(|p| seen.insert(p.entry.filename.as_str()))
        .map(|p| p.entry.filename.clone())
        .collect()
}

/// At most `max_chars` characters of `text`, cut back to a word boundary and
/// marked with an ellipsis when shortened.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    let head = &text[..cut];
    let head = match head.rfind(char::is_whitespace) {
        Some(space) if space > 0 => &head[..space],
        _ => head,
    };
    format!("{}...", head.trim_end())
}

fn sources_line(passages: &[RankedPassage]) -> String {
    format!("Sources: {}", distinct_sources(passages).join(", "))
}

fn summary(context: &str, passages: &[RankedPassage]) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let picked: Vec<&str> = split_sentences(context)
        .into_iter()
        .map(|s| s.text)
        .filter(|s| s.chars().count() > MIN_SUMMARY_SENTENCE_CHARS)
        .filter(|s| seen.insert(*s))
        .take(SUMMARY_SENTENCES)
        .collect();
    if picked.is_empty() {
        return general(context, passages);
    }
    let mut answer = String::from("Summary of the relevant passages:\n");
    for (i, sentence) in picked.iter().enumerate() {
        answer.push_str(&format!("{}. {}\n", i + 1, collapse_whitespace(sentence)));
    }
    answer.push('\n');
    answer.push_str(&sources_line(passages));
    answer
}

fn list(context: &str, intent: Intent) -> String {
    let (heading, kinds): (&str, &[EntityKind]) = match intent {
        Intent::Financial => ("Amounts mentioned in the relevant passages:", &[EntityKind::Amount]),
        Intent::Temporal => ("Dates mentioned in the relevant passages:", &[EntityKind::Date]),
        Intent::Contact => {
            ("Contact details in the relevant passages:", &[EntityKind::Email, EntityKind::Phone])
        }
        Intent::Generic => return bullet_list(context),
    };
    let mut found: Vec<String> = Vec::new();
    for kind in kinds {
        for value in scan(*kind, context) {
            if !found.contains(&value) {
                found.push(value);
            }
        }
    }
    if found.is_empty() {
        return Fallback::NoEntities(intent).with_excerpt(&excerpt(context, FALLBACK_EXCERPT_CHARS));
    }
    let items: Vec<String> = found.iter().map(|v| format!("- {v}")).collect();
    format!("{heading}\n{}", items.join("\n"))
}

fn bullet_list(context: &str) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let items: Vec<&str> = context
        .lines()
        .filter_map(|line| bullet_line().captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .filter(|item| seen.insert(*item))
        .collect();
    if items.is_empty() {
        return Fallback::NoListItems.with_excerpt(&excerpt(context, FALLBACK_EXCERPT_CHARS));
    }
    items.iter().enumerate().map(|(i, item)| format!("{}. {item}", i + 1)).collect::<Vec<_>>().join("\n")
}

/// The sentence with the highest keyword overlap plus twice its entity
/// overlap; the earliest sentence wins ties.
fn factual(context: &str, analysis: &QueryAnalysis) -> String {
    let entities: Vec<String> = analysis.entities.iter().map(|e| e.to_lowercase()).collect();
    let mut best: Option<(usize, &str)> = None;
    for sentence in split_sentences(context) {
        let words: HashSet<String> = content_words(sentence.text).into_iter().collect();
        let lowered = sentence.text.to_lowercase();
        let keyword_hits = analysis.keywords.iter().filter(|k| words.contains(k.as_str())).count();
        let entity_hits = entities.iter().filter(|e| lowered.contains(e.as_str())).count();
        let score = keyword_hits + 2 * entity_hits;
        if score > 0 && best.map_or(true, |(top, _)| score > top) {
            best = Some((score, sentence.text));
        }
    }
    match best {
        Some((_, sentence)) => collapse_whitespace(sentence),
        None => excerpt(context, FALLBACK_EXCERPT_CHARS),
    }
}

fn comparison(context: &str) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let sections: Vec<&str> = blank_line()
        .split(context)
        .map(str::trim)
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .take(COMPARISON_SECTIONS)
        .collect();
    let mut answer = String::from("Relevant sections to compare:");
    for (i, section) in sections.iter().enumerate() {
        answer.push_str(&format!("\n\n{}. {}", i + 1, excerpt(section, SECTION_CHARS)));
    }
    answer
}

fn general(context: &str, passages: &[RankedPassage]) -> String {
    format!("{}\n\n{}", excerpt(context, GENERAL_EXCERPT_CHARS), sources_line(passages))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
