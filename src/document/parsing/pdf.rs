//! PDF parsing engine backed by `lopdf`

use std::sync::Arc;

use async_trait::async_trait;
use lopdf::Document;

use super::{DocumentPage, DocumentParser, ParsedDocument};
use crate::document::models::TextItem;
use crate::error::EngineError;

/// Parses PDF bytes with `lopdf`.
///
/// Each non-blank line of a page's extracted text is reported as one token.
/// `lopdf` opens documents whose user password is empty. Documents that still
/// need a password after loading are rejected since none can be supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfParser;

impl LopdfParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for LopdfParser {
    async fn open(&self, bytes: &[u8]) -> Result<Box<dyn ParsedDocument>, EngineError> {
        let document = Document::load_mem(bytes)
            .map_err(|e| EngineError::new(format!("failed to load PDF: {e}")))?;

        if document.is_encrypted() {
            return Err(EngineError::new("PDF is encrypted and no password was supplied"));
        }

        let page_count = document.get_pages().len() as u32;
        tracing::debug!(page_count, "opened PDF document");

        Ok(Box::new(LopdfDocument {
            document: Arc::new(document),
            page_count,
        }))
    }
}

struct LopdfDocument {
    document: Arc<Document>,
    page_count: u32,
}

#[async_trait]
impl ParsedDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    async fn page(&self, number: u32) -> Result<Box<dyn DocumentPage>, EngineError> {
        if !self.document.get_pages().contains_key(&number) {
            return Err(EngineError::new(format!(
                "page {number} is out of range (document has {} pages)",
                self.page_count
            )));
        }

        Ok(Box::new(LopdfPage {
            document: Arc::clone(&self.document),
            number,
        }))
    }
}

struct LopdfPage {
    document: Arc<Document>,
    number: u32,
}

#[async_trait]
impl DocumentPage for LopdfPage {
    async fn text_content(&self) -> Result<Vec<TextItem>, EngineError> {
        let text = self.document.extract_text(&[self.number]).map_err(|e| {
            EngineError::new(format!("failed to extract text from page {}: {e}", self.number))
        })?;

        Ok(split_into_items(&text))
    }
}

fn split_into_items(text: &str) -> Vec<TextItem> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(TextItem::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_into_items_skips_blank_lines() {
        let items = split_into_items("  Title  \n\n body text \r\n\t\nend");
        let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["Title", "body text", "end"]);
    }

    #[test]
    fn test_split_into_items_of_empty_page() {
        assert!(split_into_items("").is_empty());
        assert!(split_into_items("\n \n").is_empty());
    }

    #[tokio::test]
    async fn test_open_rejects_garbage() {
        let result = LopdfParser::new().open(b"definitely not a pdf").await;
        assert!(result.is_err());
    }
}
