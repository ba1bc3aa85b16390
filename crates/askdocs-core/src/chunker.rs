//! Sentence-aligned chunking with sentence overlap.
//!
//! Chunks never cut a sentence. Each chunk after the first repeats the last
//! `overlap_sentences` sentences of its predecessor so an answer that spans a
//! cut point is still retrievable from one chunk.

use crate::config::ChunkingConfig;
use crate::types::Chunk;

/// One sentence of a source text, trimmed, with byte offsets into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Sentence<'_> {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    is_terminator(c) || matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

/// Split text into sentences. A sentence ends after a run of `.`, `!` or `?`
/// (plus closing quotes/brackets) followed by whitespace or the end of text,
/// or at a blank line.
pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut start: Option<usize> = None;
    let mut last_end = 0usize;
    let mut newlines = 0usize;

    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() {
            if c == '\n' {
                newlines += 1;
                if newlines >= 2 {
                    if let Some(s) = start.take() {
                        push_sentence(&mut sentences, text, s, last_end);
                    }
                }
            }
            continue;
        }
        newlines = 0;
        if start.is_none() {
            start = Some(i);
        }
        last_end = i + c.len_utf8();
        if is_terminator(c) {
            while let Some(&(j, next)) = chars.peek() {
                if !is_closer(next) {
                    break;
                }
                last_end = j + next.len_utf8();
                chars.next();
            }
            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                if let Some(s) = start.take() {
                    push_sentence(&mut sentences, text, s, last_end);
                }
            }
        }
    }
    if let Some(s) = start {
        push_sentence(&mut sentences, text, s, last_end);
    }
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<Sentence<'a>>, text: &'a str, start: usize, end: usize) {
    if end > start {
        sentences.push(Sentence { text: &text[start..end], start, end });
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk `text` for document `document_id`.
    ///
    /// Empty or whitespace-only text yields no chunks. The carried overlap is
    /// capped so at least one sentence of the previous chunk is left behind,
    /// which keeps chunk sizes bounded when single sentences exceed the target.
    pub fn chunk(&self, document_id: &str, text: &str) -> Vec<Chunk> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Vec::new();
            }
            let start = text.len() - text.trim_start().len();
            return vec![build_chunk(document_id, 0, text, start, start + trimmed.len())];
        }

        let target = self.config.target_words.max(1);
        let mut chunks = Vec::new();
        let mut current: Vec<Sentence<'_>> = Vec::new();
        let mut current_words = 0usize;
        let mut fresh = 0usize;

        for sentence in sentences {
            let words = sentence.word_count();
            if fresh > 0 && current_words + words > target {
                chunks.push(chunk_from(document_id, chunks.len(), text, &current));
                let carried = self.config.overlap_sentences.min(current.len().saturating_sub(1));
                let cut = current.len() - carried;
                current.drain(..cut);
                current_words = current.iter().map(Sentence::word_count).sum();
                fresh = 0;
            }
            current.push(sentence);
            current_words += words;
            fresh += 1;
        }
        if fresh > 0 {
            chunks.push(chunk_from(document_id, chunks.len(), text, &current));
        }
        chunks
    }
}

fn chunk_from(document_id: &str, ordinal: usize, text: &str, sentences: &[Sentence<'_>]) -> Chunk {
    let start = sentences.first().map_or(0, |s| s.start);
    let end = sentences.last().map_or(start, |s| s.end);
    build_chunk(document_id, ordinal, text, start, end)
}

fn build_chunk(document_id: &str, ordinal: usize, text: &str, start: usize, end: usize) -> Chunk {
    let content = &text[start..end];
    Chunk {
        id: Chunk::chunk_id(document_id, ordinal),
        document_id: document_id.to_string(),
        ordinal,
        text: content.to_string(),
        word_count: content.split_whitespace().count(),
        start,
        end,
    }
}
