//! wordtally: PDF text extraction and word counting
//!
//! This library validates a submitted PDF, extracts its text page by page,
//! counts its words and exposes every outcome as an [`IngestionState`].

pub mod config;
pub mod document;
pub mod error;
pub mod ingest;
pub mod report;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use document::{
    DocumentParser, ExtractedDocument, LocalFile, LopdfParser, MemoryFile, SelectedFile,
};
pub use error::{EngineError, ExtractionError, ValidationError};
pub use ingest::{IngestionState, Ingestor};
