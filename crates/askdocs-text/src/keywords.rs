//! Document-level keyword and language guesses, used when no upstream
//! extractor supplies them.

use std::collections::HashMap;

use askdocs_core::types::UNKNOWN_LANGUAGE;

use crate::tokenize::{content_words, is_stop_word, words};

/// Share of stop words above which a text is taken to be English.
const ENGLISH_STOP_RATIO: f32 = 0.15;
const MIN_WORDS_FOR_LANGUAGE: usize = 3;

/// The `limit` most frequent non-stop words longer than three characters,
/// ties broken by first occurrence.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in content_words(text).into_iter().enumerate() {
        if word.chars().count() <= 3 || !word.chars().all(char::is_alphabetic) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }
    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}

/// `"en"` when enough of the words are English stop words, otherwise
/// `"unknown"`.
pub fn detect_language(text: &str) -> String {
    let all = words(text);
    if all.len() < MIN_WORDS_FOR_LANGUAGE {
        return UNKNOWN_LANGUAGE.to_string();
    }
    let stops = all.iter().filter(|w| is_stop_word(w)).count();
    if stops as f32 / all.len() as f32 >= ENGLISH_STOP_RATIO {
        "en".to_string()
    } else {
        UNKNOWN_LANGUAGE.to_string()
    }
}
