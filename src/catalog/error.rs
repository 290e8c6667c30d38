use std::path::PathBuf;
use thiserror::Error;

/// The error type for template catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read template directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode template image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}
