use crate::error::{Error, Result};
use crate::sparse::{SparseVector, Weighting};
use crate::topics::TopicCount;
use crate::vocabulary::Vocabulary;
use serde::Serialize;
use std::fs::create_dir_all;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use time::format_description::well_known::Rfc3339;

/// Where each output of a run lands. File names are joined onto `dir`.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub freq_file: PathBuf,
    pub sqrt_file: PathBuf,
    pub log2_file: PathBuf,
    pub class_file: PathBuf,
    pub label_file: PathBuf,
    pub summary_file: Option<PathBuf>,
}

impl OutputPaths {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            freq_file: "freq.csv".into(),
            sqrt_file: "sqrtfreq.csv".into(),
            log2_file: "log2freq.csv".into(),
            class_file: "reuters21578.class".into(),
            label_file: "reuters21578.clabel".into(),
            summary_file: None,
        }
    }

    pub fn features(&self, weighting: Weighting) -> PathBuf {
        self.dir.join(match weighting {
            Weighting::Raw => &self.freq_file,
            Weighting::Sqrt => &self.sqrt_file,
            Weighting::Log2 => &self.log2_file,
        })
    }

    pub fn class(&self) -> PathBuf {
        self.dir.join(&self.class_file)
    }

    pub fn label(&self) -> PathBuf {
        self.dir.join(&self.label_file)
    }

    pub fn summary(&self) -> Option<PathBuf> {
        self.summary_file.as_ref().map(|f| self.dir.join(f))
    }
}

struct StagedFile {
    target: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl StagedFile {
    fn create(target: PathBuf) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = tempfile::Builder::new()
            .prefix(".featurize-")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| Error::io(&dir, e))?;
        Ok(Self {
            target,
            writer: BufWriter::new(file),
        })
    }

    fn write_line(&mut self, line: std::fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|e| Error::io(&self.target, e))
    }

    fn commit(self) -> Result<()> {
        let file = self
            .writer
            .into_inner()
            .map_err(|e| Error::io(&self.target, e.into_error()))?;
        file.persist(&self.target)
            .map_err(|e| Error::io(&self.target, e.error))?;
        Ok(())
    }
}

/// The feature, class and label files of one run, plus the summary when one
/// was asked for.
///
/// Everything is written to temporary files beside the targets and only
/// renamed into place by [`OutputSet::commit`]. Dropping the set instead
/// deletes the temporary files.
pub struct OutputSet {
    freq: StagedFile,
    sqrt: StagedFile,
    log2: StagedFile,
    class: StagedFile,
    label: StagedFile,
    summary: Option<StagedFile>,
}

impl OutputSet {
    pub fn create(paths: &OutputPaths) -> Result<Self> {
        create_dir_all(&paths.dir).map_err(|e| Error::io(&paths.dir, e))?;
        Ok(Self {
            freq: StagedFile::create(paths.features(Weighting::Raw))?,
            sqrt: StagedFile::create(paths.features(Weighting::Sqrt))?,
            log2: StagedFile::create(paths.features(Weighting::Log2))?,
            class: StagedFile::create(paths.class())?,
            label: StagedFile::create(paths.label())?,
            summary: paths.summary().map(StagedFile::create).transpose()?,
        })
    }

    fn features_mut(&mut self, weighting: Weighting) -> &mut StagedFile {
        match weighting {
            Weighting::Raw => &mut self.freq,
            Weighting::Sqrt => &mut self.sqrt,
            Weighting::Log2 => &mut self.log2,
        }
    }

    /// One `id, index, value` line per entry.
    pub fn write_vector(
        &mut self,
        weighting: Weighting,
        article_id: &str,
        vector: &SparseVector,
    ) -> Result<()> {
        let file = self.features_mut(weighting);
        for (index, value) in vector.iter() {
            file.write_line(format_args!("{article_id}, {index}, {value}"))?;
        }
        Ok(())
    }

    pub fn write_class(&mut self, article_id: &str, topic: &str) -> Result<()> {
        self.class.write_line(format_args!("{article_id}, {topic}"))
    }

    /// Line `n` holds the token with index `n`, counting from zero.
    pub fn write_labels(&mut self, vocabulary: &Vocabulary) -> Result<()> {
        for token in vocabulary.tokens() {
            self.label.write_line(format_args!("{token}"))?;
        }
        Ok(())
    }

    /// Does nothing unless the paths named a summary file.
    pub fn write_summary(&mut self, summary: &RunSummary) -> Result<()> {
        if let Some(staged) = self.summary.as_mut() {
            serde_json::to_writer_pretty(&mut staged.writer, summary)?;
        }
        Ok(())
    }

    pub fn commit(self) -> Result<()> {
        let staged = [self.freq, self.sqrt, self.log2, self.class, self.label];
        for file in staged.into_iter().chain(self.summary) {
            file.commit()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub created_at: String,
    pub articles_scanned: usize,
    pub candidate_articles: usize,
    pub topics: Vec<TopicCount>,
    pub qualifying_articles: usize,
    pub vocabulary_size: usize,
    pub articles_written: usize,
    pub articles_skipped: usize,
    pub entries_written: usize,
}

pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
