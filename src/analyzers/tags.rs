use indexmap::IndexMap;

use super::stemmer::{SnowballStemmer, Stemmer, stemmer_for};
use super::stopwords::StopWordSet;
use super::tokenizer::{Tokenizer, WordTokenizer};
use crate::config::{AnalysisConfig, StopWordsConfig};
use crate::models::{Conversation, Message, Term};

pub const DEFAULT_MAX_TERMS: usize = 10;

/// Tokens this short (in characters) or shorter are never keywords
const MAX_IGNORED_TOKEN_CHARS: usize = 3;

/// Frequency-ranked keyword stems
///
/// Pipeline: join message text, tokenize, drop short tokens and stop words, stem, count, then
/// rank by descending count. Ties keep first-seen order, so the output is deterministic for a
/// given input. Tokenizer and stemmer are swappable without touching the rest.
pub struct TagExtractor {
    tokenizer: Box<dyn Tokenizer>,
    stemmer: Box<dyn Stemmer>,
    stop_words: StopWordSet,
    max_terms: usize,
}

impl TagExtractor {
    /// Word tokenizer and Russian stemmer over the given stop words
    pub fn new(stop_words: StopWordSet, max_terms: usize) -> Self {
        Self {
            tokenizer: Box::new(WordTokenizer),
            stemmer: Box::new(SnowballStemmer::russian()),
            stop_words,
            max_terms,
        }
    }

    pub fn from_config(analysis: &AnalysisConfig, stop_words: &StopWordsConfig) -> Self {
        Self::new(StopWordSet::new(stop_words.merged()), analysis.max_terms)
            .with_stemmer(stemmer_for(analysis.stemmer))
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_stemmer(mut self, stemmer: Box<dyn Stemmer>) -> Self {
        self.stemmer = stemmer;
        self
    }

    pub fn max_terms(&self) -> usize {
        self.max_terms
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn add_stop_words<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        self.stop_words.extend(words);
    }

    pub fn extract(&self, messages: &[Message]) -> Vec<Term> {
        let text = Conversation::joined_text(messages);

        // Insertion order doubles as first-seen order for ties
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for token in self.tokenizer.tokenize(&text) {
            if !self.is_candidate(&token) {
                continue;
            }
            let stem = self.stemmer.stem(&token);
            if stem.is_empty() {
                continue;
            }
            *counts.entry(stem).or_insert(0) += 1;
        }

        let mut terms: Vec<Term> =
            counts.into_iter().map(|(stem, count)| Term { stem, count }).collect();
        // Stable: equal counts stay in first-seen order
        terms.sort_by(|a, b| b.count.cmp(&a.count));
        terms.truncate(self.max_terms);
        terms
    }

    fn is_candidate(&self, token: &str) -> bool {
        !token.is_empty()
            && token.chars().count() > MAX_IGNORED_TOKEN_CHARS
            && !self.stop_words.contains(token)
    }
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new(StopWordSet::builtin(), DEFAULT_MAX_TERMS)
    }
}
