use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Not cached: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Corrupt cache file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stale asset {}: expected {expected}, cached {}", path.display(), cached.as_deref().unwrap_or("nothing"))]
    StaleVersion {
        path: PathBuf,
        expected: String,
        cached: Option<String>,
    },

    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{failed} of {total} items failed to save")]
    PartialBatch { failed: usize, total: usize },
}

impl CacheError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            CacheError::NotFound(path.to_path_buf())
        } else {
            CacheError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for conditions a caller treats as a cache miss rather than a failure.
    pub fn is_miss(&self) -> bool {
        matches!(
            self,
            CacheError::NotFound(_) | CacheError::Corrupt { .. } | CacheError::StaleVersion { .. }
        )
    }
}

pub type CacheResult<T> = Result<T, CacheError>;
