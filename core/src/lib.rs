pub mod article;
pub mod corpus;
pub mod error;
pub mod normalize;
pub mod persist;
pub mod pipeline;
pub mod sgml;
pub mod sparse;
pub mod stoplist;
pub mod topics;
pub mod vocabulary;

pub use article::Article;
pub use corpus::{ArticleSource, CorpusScanner, InMemoryCorpus};
pub use error::{Error, Result};
pub use normalize::TextNormalizer;
pub use persist::{OutputPaths, OutputSet, RunSummary};
pub use pipeline::{EmitStats, Pipeline, PipelineConfig};
pub use sparse::{SparseVector, TermFrequencies, Weighting};
pub use stoplist::Stoplist;
pub use topics::{PopularTopics, TopicCounter};
pub use vocabulary::{DocumentFrequencies, Vocabulary};

/// Column index of a token in the emitted feature matrix.
pub type TermIndex = u32;
