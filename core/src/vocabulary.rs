use crate::TermIndex;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_MIN_DOCUMENT_COUNT: u32 = 5;

/// Number of articles each token appears in.
#[derive(Debug, Default)]
pub struct DocumentFrequencies {
    counts: HashMap<String, u32>,
    documents: usize,
}

impl DocumentFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one article's distinct tokens.
    pub fn observe(&mut self, tokens: &HashSet<String>) {
        self.documents += 1;
        for token in tokens {
            *self.counts.entry(token.clone()).or_insert(0) += 1;
        }
    }

    pub fn count(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub const fn documents(&self) -> usize {
        self.documents
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Keep tokens seen in at least `min_count` articles, indexed alphabetically.
    pub fn build(self, min_count: u32) -> Vocabulary {
        let mut tokens: Vec<String> = self
            .counts
            .into_iter()
            .filter(|(_, count)| *count >= min_count)
            .map(|(token, _)| token)
            .collect();
        tokens.sort_unstable();
        Vocabulary::from_sorted(tokens)
    }
}

/// Retained tokens and their column indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, TermIndex>,
}

impl Vocabulary {
    fn from_sorted(tokens: Vec<String>) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (token.clone(), i as TermIndex))
            .collect();
        Self { tokens, index }
    }

    /// Accepts tokens in any order; duplicates collapse.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        tokens.sort_unstable();
        tokens.dedup();
        Self::from_sorted(tokens)
    }

    pub fn index_of(&self, token: &str) -> Option<TermIndex> {
        self.index.get(token).copied()
    }

    /// Tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
