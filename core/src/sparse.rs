use crate::vocabulary::Vocabulary;
use crate::TermIndex;
use std::fmt;

/// How a raw term count is turned into a feature value before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weighting {
    Raw,
    Sqrt,
    Log2,
}

impl Weighting {
    pub const ALL: [Self; 3] = [Self::Raw, Self::Sqrt, Self::Log2];

    pub fn weight(self, count: u32) -> f64 {
        let count = f64::from(count);
        match self {
            Self::Raw => count,
            Self::Sqrt => 1.0 + count.sqrt(),
            Self::Log2 => 1.0 + count.log2(),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "freq",
            Self::Sqrt => "sqrtfreq",
            Self::Log2 => "log2freq",
        })
    }
}

/// In-vocabulary term counts of one article, ordered by vocabulary index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequencies {
    indices: Vec<TermIndex>,
    counts: Vec<u32>,
}

impl TermFrequencies {
    /// Count repeated tokens after sorting; tokens outside the vocabulary are
    /// dropped.
    pub fn from_tokens(mut tokens: Vec<String>, vocabulary: &Vocabulary) -> Self {
        tokens.sort_unstable();

        let mut entries: Vec<(TermIndex, u32)> = Vec::new();
        let mut start = 0;
        while start < tokens.len() {
            let token = &tokens[start];
            let run = tokens[start..].iter().take_while(|t| *t == token).count();
            if let Some(index) = vocabulary.index_of(token) {
                entries.push((index, run as u32));
            }
            start += run;
        }
        // Indices follow token order already; sorting keeps that true for any
        // vocabulary.
        entries.sort_unstable_by_key(|&(index, _)| index);

        let (indices, counts) = entries.into_iter().unzip();
        Self { indices, counts }
    }

    pub fn indices(&self) -> &[TermIndex] {
        &self.indices
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Weighted and normalized values, or `None` when there is nothing to
    /// normalize.
    pub fn weighted(&self, weighting: Weighting) -> Option<SparseVector> {
        let weighted: Vec<f64> = self.counts.iter().map(|&c| weighting.weight(c)).collect();
        let values = normalize(&weighted)?;
        Some(SparseVector {
            indices: self.indices.clone(),
            values,
        })
    }
}

/// Divide each value by the sum of squares of all values.
pub fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let sum_squares: f64 = values.iter().map(|v| v * v).sum();
    if sum_squares == 0.0 || !sum_squares.is_finite() {
        return None;
    }
    Some(values.iter().map(|v| v / sum_squares).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<TermIndex>,
    pub values: Vec<f64>,
}

impl SparseVector {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermIndex, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}
