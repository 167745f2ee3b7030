use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Words dropped before stemming.
#[derive(Debug, Clone, Default)]
pub struct Stoplist {
    words: HashSet<String>,
}

impl Stoplist {
    /// Read a whitespace-separated word list.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let stoplist = Self::from_words(text.split_whitespace());
        tracing::debug!(path = %path.display(), words = stoplist.len(), "loaded stoplist");
        Ok(stoplist)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_any_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a about\nabove\t after\n\n").unwrap();

        let stoplist = Stoplist::load(file.path()).unwrap();
        assert_eq!(stoplist.len(), 4);
        assert!(stoplist.contains("above"));
        assert!(!stoplist.contains(""));
    }

    #[test]
    fn missing_file_names_path() {
        let err = Stoplist::load(Path::new("/nonexistent/stoplist.txt")).unwrap_err();
        assert!(err.to_string().contains("stoplist.txt"));
    }
}
