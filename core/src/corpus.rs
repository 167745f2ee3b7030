use crate::article::Article;
use crate::error::{Error, Result};
use crate::sgml::parse_articles;
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;
use walkdir::WalkDir;

pub const DEFAULT_EXTENSION: &str = "sgm";

/// Something every pipeline pass can draw a fresh run of articles from.
pub trait ArticleSource {
    fn articles(&self) -> Box<dyn Iterator<Item = Result<Article>> + '_>;

    /// Articles seen in the underlying corpus, when that differs from what
    /// [`ArticleSource::articles`] yields.
    fn articles_scanned(&self) -> Option<usize> {
        None
    }
}

/// Walks a corpus directory and parses its markup files one at a time.
///
/// Files are visited in file-name order, so two scans of the same directory
/// yield the same articles in the same order.
#[derive(Debug, Clone)]
pub struct CorpusScanner {
    root: PathBuf,
    extension: String,
    skip_malformed: bool,
}

impl CorpusScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
            skip_malformed: false,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Log and skip files with malformed records instead of failing the scan.
    #[must_use]
    pub fn skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Corpus files under the root, in traversal order.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::io(
                &self.root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "corpus directory not found"),
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

impl ArticleSource for CorpusScanner {
    fn articles(&self) -> Box<dyn Iterator<Item = Result<Article>> + '_> {
        match self.files() {
            Ok(files) => Box::new(ScanArticles {
                files: files.into_iter(),
                current: Vec::new().into_iter(),
                skip_malformed: self.skip_malformed,
            }),
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }
}

struct ScanArticles {
    files: vec::IntoIter<PathBuf>,
    current: vec::IntoIter<Article>,
    skip_malformed: bool,
}

impl Iterator for ScanArticles {
    type Item = Result<Article>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(article) = self.current.next() {
                return Some(Ok(article));
            }

            let path = self.files.next()?;
            match read_file(&path) {
                Ok(articles) => {
                    tracing::debug!(path = %path.display(), articles = articles.len(), "parsed corpus file");
                    self.current = articles.into_iter();
                }
                Err(e) if self.skip_malformed && e.is_malformed() => {
                    tracing::warn!(error = %e, "skipping malformed corpus file");
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<Article>> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let markup = String::from_utf8_lossy(&bytes);
    parse_articles(&markup, path)
}

/// Candidate articles of one scan, kept in memory so later passes skip the
/// re-parse.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    articles: Vec<Article>,
    scanned: usize,
}

impl InMemoryCorpus {
    pub fn load(source: &dyn ArticleSource) -> Result<Self> {
        let mut articles = Vec::new();
        let mut scanned = 0;
        for article in source.articles() {
            let article = article?;
            scanned += 1;
            if article.is_candidate() {
                articles.push(article);
            }
        }
        tracing::info!(scanned, articles = articles.len(), "cached candidate articles");
        Ok(Self { articles, scanned })
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl From<Vec<Article>> for InMemoryCorpus {
    fn from(articles: Vec<Article>) -> Self {
        let scanned = articles.len();
        Self { articles, scanned }
    }
}

impl ArticleSource for InMemoryCorpus {
    fn articles(&self) -> Box<dyn Iterator<Item = Result<Article>> + '_> {
        Box::new(self.articles.iter().cloned().map(Ok))
    }

    fn articles_scanned(&self) -> Option<usize> {
        Some(self.scanned)
    }
}
