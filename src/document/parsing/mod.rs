//! Document parsing engines
//!
//! Text extraction talks to a parsing engine only through these traits, so the
//! ingestion pipeline can run against a real PDF backend or a deterministic
//! fake in tests.

pub mod pdf;

use async_trait::async_trait;

use super::models::TextItem;
use crate::error::EngineError;

pub use pdf::LopdfParser;

/// Opens raw document bytes.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn open(&self, bytes: &[u8]) -> Result<Box<dyn ParsedDocument>, EngineError>;
}

/// An opened document with numbered pages, starting at 1.
#[async_trait]
pub trait ParsedDocument: Send + Sync {
    fn page_count(&self) -> u32;

    async fn page(&self, number: u32) -> Result<Box<dyn DocumentPage>, EngineError>;
}

/// One page of an opened document.
#[async_trait]
pub trait DocumentPage: Send + Sync {
    async fn text_content(&self) -> Result<Vec<TextItem>, EngineError>;
}
