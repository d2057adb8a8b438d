use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("tracks directory {} is not readable: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("tracks directory {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to list tracks directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("track {0:?} not found")]
    NotFound(String),
}
