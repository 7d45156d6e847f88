//! Error types for the outline library.
//!
//! Extraction itself never fails; these cover reading the input and choosing
//! an extractor for it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Reading or decoding the line source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No extractor for this file type or language name.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
