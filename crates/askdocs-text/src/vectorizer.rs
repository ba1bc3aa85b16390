//! Vocabulary, IDF table and TF-IDF vectors.
//!
//! The vocabulary is append-only: a term keeps its dimension forever, so a
//! vector built before the vocabulary grew is a prefix of the same vector
//! built afterwards. Dense vectors are sized to the vocabulary at call time;
//! compare vectors of different lengths only after zero-padding them.

use std::collections::{HashMap, HashSet};

use crate::tokenize::tokenize;

/// Multiplier for a document keyword that already occurs in the text.
pub const KEYWORD_BOOST: f32 = 1.5;
/// Weight given to a document keyword that does not occur in the text.
pub const KEYWORD_INJECT_WEIGHT: f32 = 0.5;

/// Normalized term frequency: occurrences divided by the token count.
pub fn term_frequency(tokens: &[String]) -> HashMap<String, f32> {
    TermWeights::from_tokens(tokens).into_iter().collect()
}

/// Per-term weights of one text unit, kept in first-occurrence order so
/// new terms get dimensions deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermWeights {
    terms: Vec<(String, f32)>,
}

impl TermWeights {
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut terms: Vec<(String, f32)> = Vec::new();
        for token in tokens {
            match positions.get(token.as_str()) {
                Some(&pos) => terms[pos].1 += 1.0,
                None => {
                    positions.insert(token.as_str(), terms.len());
                    terms.push((token.clone(), 1.0));
                }
            }
        }
        let total = tokens.len() as f32;
        for (_, weight) in &mut terms {
            *weight /= total;
        }
        Self { terms }
    }

    /// Term frequency of `text` with document keywords applied as a prior:
    /// keyword terms already present are multiplied by [`KEYWORD_BOOST`],
    /// absent ones are injected at [`KEYWORD_INJECT_WEIGHT`].
    pub fn with_keywords(text: &str, keywords: &[String]) -> Self {
        let mut weights = Self::from_tokens(&tokenize(text));
        let mut applied: HashSet<String> = HashSet::new();
        for term in keywords.iter().flat_map(|k| tokenize(k)) {
            if !applied.insert(term.clone()) {
                continue;
            }
            match weights.terms.iter_mut().find(|(t, _)| *t == term) {
                Some((_, weight)) => *weight *= KEYWORD_BOOST,
                None => weights.terms.push((term, KEYWORD_INJECT_WEIGHT)),
            }
        }
        weights
    }

    pub fn get(&self, term: &str) -> Option<f32> {
        self.terms.iter().find(|(t, _)| t == term).map(|(_, w)| *w)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|(t, _)| t == term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.terms.iter().map(|(t, w)| (t.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl IntoIterator for TermWeights {
    type Item = (String, f32);
    type IntoIter = std::vec::IntoIter<(String, f32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

/// Append-only mapping from term to dimension.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    dimensions: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn register(&mut self, term: &str) -> usize {
        if let Some(&dim) = self.dimensions.get(term) {
            return dim;
        }
        let dim = self.terms.len();
        self.dimensions.insert(term.to_string(), dim);
        self.terms.push(term.to_string());
        dim
    }

    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.dimensions.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// `idf(t) = ln(N / (df(t) + 1))` over the current entry set. Terms that were
/// never computed weigh 1.0.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    weights: HashMap<String, f32>,
    entries: usize,
}

impl IdfTable {
    /// Rebuild the table from the term sets of every indexed entry. A term
    /// counts towards `df` when it is a member of an entry's term set.
    pub fn recompute<'a, I>(&mut self, vocabulary: &Vocabulary, entries: I)
    where
        I: IntoIterator<Item = &'a TermWeights>,
    {
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;
        for weights in entries {
            total += 1;
            for (term, _) in weights.iter() {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }
        self.weights.clear();
        self.entries = total;
        if total == 0 {
            return;
        }
        let n = total as f32;
        for term in vocabulary.terms() {
            let df = document_frequency.get(term.as_str()).copied().unwrap_or(0);
            self.weights.insert(term.clone(), (n / (df as f32 + 1.0)).ln());
        }
    }

    pub fn weight(&self, term: &str) -> f32 {
        self.weights.get(term).copied().unwrap_or(1.0)
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    vocabulary: Vocabulary,
    idf: IdfTable,
}

impl Vectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register any unseen terms of `weights`, in order.
    pub fn register(&mut self, weights: &TermWeights) {
        for (term, _) in weights.iter() {
            self.vocabulary.register(term);
        }
    }

    /// Dense TF-IDF vector of `weights` at the current dimensionality.
    /// Terms missing from the vocabulary are skipped.
    pub fn weigh(&self, weights: &TermWeights) -> Vec<f32> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for (term, tf) in weights.iter() {
            if let Some(dim) = self.vocabulary.dimension(term) {
                vector[dim] = tf * self.idf.weight(term);
            }
        }
        vector
    }

    /// Term weights with keyword prior, registered into the vocabulary, as a
    /// dense vector. May grow the dimensionality.
    pub fn vectorize(&mut self, text: &str, keywords: &[String]) -> Vec<f32> {
        let weights = TermWeights::with_keywords(text, keywords);
        self.register(&weights);
        self.weigh(&weights)
    }

    /// Vector for a query. Read-only: out-of-vocabulary terms are dropped, so
    /// a query made only of unknown terms is the zero vector.
    pub fn query_vector(&self, text: &str) -> Vec<f32> {
        self.weigh(&TermWeights::from_tokens(&tokenize(text)))
    }

    pub fn recompute_idf<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'a TermWeights>,
    {
        self.idf.recompute(&self.vocabulary, entries);
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}
