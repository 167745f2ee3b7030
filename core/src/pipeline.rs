use crate::article::Article;
use crate::corpus::ArticleSource;
use crate::error::Result;
use crate::normalize::TextNormalizer;
use crate::persist::{now_rfc3339, OutputPaths, OutputSet, RunSummary};
use crate::sparse::{SparseVector, TermFrequencies, Weighting};
use crate::topics::{PopularTopics, TopicCounter, DEFAULT_TOP_TOPICS};
use crate::vocabulary::{DocumentFrequencies, Vocabulary, DEFAULT_MIN_DOCUMENT_COUNT};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many of the most frequent topics to keep.
    pub top_topics: usize,
    /// Articles a token must appear in to enter the vocabulary.
    pub min_document_count: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_topics: DEFAULT_TOP_TOPICS,
            min_document_count: DEFAULT_MIN_DOCUMENT_COUNT,
        }
    }
}

/// Result of the topic-counting pass.
#[derive(Debug)]
pub struct TopicSelection {
    pub popular: PopularTopics,
    pub counts: TopicCounter,
    pub scanned: usize,
    pub candidates: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub written: usize,
    pub skipped: usize,
    pub entries: usize,
}

/// Three passes over a source: count topics, count tokens, emit vectors.
/// Each pass pulls a fresh iterator, so nothing but the accumulators is held
/// between passes.
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: TextNormalizer,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, normalizer: TextNormalizer) -> Self {
        Self { config, normalizer }
    }

    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn select_topics(&self, source: &dyn ArticleSource) -> Result<TopicSelection> {
        let mut counts = TopicCounter::new();
        let mut scanned = 0;
        let mut candidates = 0;

        for article in source.articles() {
            let article = article?;
            scanned += 1;
            if let Some(topic) = article.topic().filter(|_| article.has_body()) {
                counts.observe(topic);
                candidates += 1;
            }
        }

        let scanned = source.articles_scanned().unwrap_or(scanned);
        let popular = counts.top(self.config.top_topics);
        tracing::info!(
            scanned,
            candidates,
            distinct_topics = counts.distinct(),
            selected = popular.len(),
            "counted topics"
        );

        Ok(TopicSelection {
            popular,
            counts,
            scanned,
            candidates,
        })
    }

    pub fn build_vocabulary(
        &self,
        source: &dyn ArticleSource,
        popular: &PopularTopics,
    ) -> Result<Vocabulary> {
        let mut frequencies = DocumentFrequencies::new();

        for article in qualifying(source, popular) {
            let article = article?;
            if let Some(body) = article.body.as_deref() {
                frequencies.observe(&self.normalizer.token_set(body));
            }
        }

        let articles = frequencies.documents();
        let candidates = frequencies.distinct();
        let vocabulary = frequencies.build(self.config.min_document_count);
        tracing::info!(
            articles,
            candidates,
            retained = vocabulary.len(),
            min_document_count = self.config.min_document_count,
            "built vocabulary"
        );
        Ok(vocabulary)
    }

    /// Write the label file and one row group per qualifying article.
    ///
    /// Articles without a single vocabulary term are left out of every file,
    /// class file included, so all files describe the same rows.
    pub fn emit(
        &self,
        source: &dyn ArticleSource,
        popular: &PopularTopics,
        vocabulary: &Vocabulary,
        outputs: &mut OutputSet,
    ) -> Result<EmitStats> {
        outputs.write_labels(vocabulary)?;

        let mut stats = EmitStats::default();
        for article in qualifying(source, popular) {
            let article = article?;
            let (Some(body), Some(topic)) = (article.body.as_deref(), article.topic()) else {
                continue;
            };

            let frequencies =
                TermFrequencies::from_tokens(self.normalizer.tokens(body), vocabulary);
            let Some(vectors) = weighted_vectors(&frequencies) else {
                tracing::warn!(article = %article.id, "no vocabulary terms, skipping article");
                stats.skipped += 1;
                continue;
            };

            for (weighting, vector) in &vectors {
                outputs.write_vector(*weighting, &article.id, vector)?;
            }
            outputs.write_class(&article.id, topic)?;

            stats.written += 1;
            stats.entries += frequencies.len();
        }

        tracing::info!(
            written = stats.written,
            skipped = stats.skipped,
            entries = stats.entries,
            "emitted feature vectors"
        );
        Ok(stats)
    }

    /// Run all passes and move the outputs into place.
    ///
    /// Every output file is opened before the first pass and nothing is
    /// renamed into place unless all of them, summary included, were written.
    pub fn run(&self, source: &dyn ArticleSource, paths: &OutputPaths) -> Result<RunSummary> {
        let mut outputs = OutputSet::create(paths)?;

        let selection = self.select_topics(source)?;
        let vocabulary = self.build_vocabulary(source, &selection.popular)?;
        let stats = self.emit(source, &selection.popular, &vocabulary, &mut outputs)?;

        let ranked = selection.counts.ranked();
        let summary = RunSummary {
            created_at: now_rfc3339(),
            articles_scanned: selection.scanned,
            candidate_articles: selection.candidates,
            topics: ranked
                .into_iter()
                .filter(|tc| selection.popular.contains(&tc.topic))
                .collect(),
            qualifying_articles: stats.written + stats.skipped,
            vocabulary_size: vocabulary.len(),
            articles_written: stats.written,
            articles_skipped: stats.skipped,
            entries_written: stats.entries,
        };

        outputs.write_summary(&summary)?;
        outputs.commit()?;
        if let Some(path) = paths.summary() {
            tracing::debug!(path = %path.display(), "wrote run summary");
        }
        Ok(summary)
    }
}

/// Candidates whose topic was selected. Errors pass through untouched.
fn qualifying<'a>(
    source: &'a dyn ArticleSource,
    popular: &'a PopularTopics,
) -> impl Iterator<Item = Result<Article>> + 'a {
    source.articles().filter(move |article| match article {
        Ok(article) => {
            article.is_candidate() && article.topic().is_some_and(|t| popular.contains(t))
        }
        Err(_) => true,
    })
}

fn weighted_vectors(frequencies: &TermFrequencies) -> Option<Vec<(Weighting, SparseVector)>> {
    Weighting::ALL
        .iter()
        .map(|&weighting| frequencies.weighted(weighting).map(|v| (weighting, v)))
        .collect()
}
