//! Error types for document ingestion
//!
//! Ingestion fails in exactly two ways: the submitted file is not a PDF
//! ([`ValidationError`]) or its text could not be extracted ([`ExtractionError`]).
//! Parsing engines report their own failures as [`EngineError`], which the
//! extractor collapses into an `ExtractionError`.

use thiserror::Error;

/// Boxed cause kept on an [`ExtractionError`] for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The submitted file's declared type is not the accepted document type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid file type: expected {expected}, got {}",
    .declared.as_deref().unwrap_or("no type")
)]
pub struct ValidationError {
    pub expected: &'static str,
    pub declared: Option<String>,
}

/// Text could not be extracted from the document.
///
/// Corrupt, encrypted and image-only documents all end up here. The
/// underlying cause is only reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("could not extract text from document")]
pub struct ExtractionError {
    #[source]
    source: BoxError,
}

impl ExtractionError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl From<EngineError> for ExtractionError {
    fn from(err: EngineError) -> Self {
        Self::new(err)
    }
}

impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err)
    }
}

/// Failure raised by a document parsing engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct EngineError(String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
