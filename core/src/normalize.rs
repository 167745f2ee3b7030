use crate::stoplist::Stoplist;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

/// Turns article text into stemmed tokens.
///
/// Non-ASCII characters are removed, everything that is not an ASCII letter or
/// digit becomes a separator, and the remaining words are lowercased. Empty
/// words, all-digit words and stopwords are dropped before stemming.
pub struct TextNormalizer {
    stemmer: Stemmer,
    stoplist: Stoplist,
}

impl TextNormalizer {
    pub fn new(stoplist: Stoplist) -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stoplist,
        }
    }

    pub const fn stoplist(&self) -> &Stoplist {
        &self.stoplist
    }

    /// Every surviving token in text order, repeats included.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let cleaned = clean(text);
        cleaned
            .split_whitespace()
            .filter(|word| self.keep(word))
            .map(|word| self.stemmer.stem(word).into_owned())
            .collect()
    }

    /// Distinct stems of the text.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        let cleaned = clean(text);
        let words: HashSet<&str> = cleaned
            .split_whitespace()
            .filter(|word| self.keep(word))
            .collect();

        words
            .into_iter()
            .map(|word| self.stemmer.stem(word).into_owned())
            .collect()
    }

    fn keep(&self, word: &str) -> bool {
        !word.is_empty() && !is_numeric(word) && !self.stoplist.contains(word)
    }
}

fn clean(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect()
}

fn is_numeric(word: &str) -> bool {
    word.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(stop: &[&str]) -> TextNormalizer {
        TextNormalizer::new(Stoplist::from_words(stop.iter().copied()))
    }

    #[test]
    fn strips_punctuation_and_case() {
        let n = normalizer(&[]);
        assert_eq!(n.tokens("Cocoa,SHIPMENTS!"), vec!["cocoa", "shipment"]);
    }

    #[test]
    fn non_ascii_is_removed_not_split() {
        let n = normalizer(&[]);
        // the accented letter disappears, joining the remaining halves
        assert_eq!(n.tokens("caf\u{e9}s"), vec!["caf"]);
    }

    #[test]
    fn numbers_are_dropped_but_mixed_words_kept() {
        let n = normalizer(&[]);
        assert_eq!(n.tokens("1987 tons 3.5 pct q1"), vec!["ton", "pct", "q1"]);
    }

    #[test]
    fn stopwords_match_before_stemming() {
        let n = normalizer(&["was"]);
        assert!(n.tokens("it was raining").iter().all(|t| t != "was" && t != "wa"));
    }

    #[test]
    fn set_deduplicates_stems() {
        let n = normalizer(&[]);
        let set = n.token_set("market markets Market");
        assert_eq!(set.len(), 1);
        assert!(set.contains("market"));
    }
}
