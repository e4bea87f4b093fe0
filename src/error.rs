use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while detecting lines or moving images on and off disk
///
/// Every variant is fatal for a run; nothing is retried.
#[derive(Error, Debug)]
pub enum HoughError {
    /// The tool was invoked with the wrong arguments
    #[error("usage: {0}")]
    Usage(String),

    /// A surface could not be created
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// The input image could not be read or decoded
    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        /// Path that was being read
        path: PathBuf,
        /// Underlying decoder error
        source: image::ImageError,
    },

    /// An output image could not be encoded or written
    #[error("failed to save image '{path}': {source}")]
    ImageSave {
        /// Path that was being written
        path: PathBuf,
        /// Underlying encoder error
        source: image::ImageError,
    },

    /// Exclusive access to a surface could not be acquired
    #[error("cannot lock surface: {0}")]
    ResourceLock(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, HoughError>;
