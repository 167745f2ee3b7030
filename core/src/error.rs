use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: article #{position}: {reason}", .path.display())]
    MalformedArticle {
        path: PathBuf,
        position: usize,
        reason: String,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Summary(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedArticle { .. })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
