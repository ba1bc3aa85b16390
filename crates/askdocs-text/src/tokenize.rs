use std::sync::OnceLock;

use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

/// Words that carry no retrieval signal in questions or documents.
pub const STOP_WORDS: &[&str] = &[
	"a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
	"about","also","all","any","been","being","each","into","just","me","more","most","much","my","our","over","some","such","tell","very","were","we","you","your","i","please","give","show","find","there's","here",
];

const MAX_TOKEN_BYTES: usize = 40;

fn term_analyzer() -> &'static TextAnalyzer {
	static TERM: OnceLock<TextAnalyzer> = OnceLock::new();
	TERM.get_or_init(|| {
		TextAnalyzer::builder(SimpleTokenizer::default())
			.filter(RemoveLongFilter::limit(MAX_TOKEN_BYTES))
			.filter(LowerCaser)
			.build()
	})
}

fn content_analyzer() -> &'static TextAnalyzer {
	static CONTENT: OnceLock<TextAnalyzer> = OnceLock::new();
	CONTENT.get_or_init(|| {
		TextAnalyzer::builder(SimpleTokenizer::default())
			.filter(RemoveLongFilter::limit(MAX_TOKEN_BYTES))
			.filter(LowerCaser)
			.filter(StopWordFilter::remove(STOP_WORDS.iter().map(|s| s.to_string())))
			.build()
	})
}

// token_stream needs &mut, so each call works on a clone of the shared analyzer
fn collect_tokens(prototype: &TextAnalyzer, text: &str, keep: impl Fn(&str) -> bool) -> Vec<String> {
	let mut analyzer = prototype.clone();
	let mut stream = analyzer.token_stream(text);
	let mut tokens = Vec::new();
	while stream.advance() {
		let token = &stream.token().text;
		if keep(token) { tokens.push(token.clone()); }
	}
	tokens
}

/// A vocabulary term: purely alphabetic and longer than two characters.
pub fn is_term(token: &str) -> bool {
	token.chars().count() > 2 && token.chars().all(char::is_alphabetic)
}

/// Lower-cased vocabulary terms of `text` in order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
	collect_tokens(term_analyzer(), text, is_term)
}

/// Lower-cased alphanumeric tokens of `text` with stop words removed.
pub fn content_words(text: &str) -> Vec<String> {
	collect_tokens(content_analyzer(), text, |_| true)
}

/// Every lower-cased word of `text`, stop words included.
pub fn words(text: &str) -> Vec<String> {
	collect_tokens(term_analyzer(), text, |t| t.chars().all(char::is_alphabetic))
}

pub fn is_stop_word(word: &str) -> bool {
	STOP_WORDS.contains(&word)
}
