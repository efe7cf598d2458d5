//! Core data structures for extracted documents
//!
//! This module defines the values produced by text extraction: the ordered
//! page texts of a document and the statistics computed from its full text.

use serde::{Deserialize, Serialize};

/// A single piece of text returned by a parsing engine for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
}

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Text of every page of a document, in page order (page 1 first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub pages: Vec<String>,
}

impl ExtractedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Raw concatenation: each page's text followed by a newline.
    pub fn raw_text(&self) -> String {
        let capacity = self.pages.iter().map(|page| page.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for page in &self.pages {
            text.push_str(page);
            text.push('\n');
        }
        text
    }
}

/// Statistics computed once over the trimmed full text of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_keeps_page_order() {
        let document = ExtractedDocument {
            pages: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        };
        assert_eq!(document.raw_text(), "A\nB\nC\n");
        assert_eq!(document.page_count(), 3);
    }

    #[test]
    fn test_raw_text_of_empty_pages() {
        let document = ExtractedDocument {
            pages: vec![String::new(), String::new()],
        };
        assert_eq!(document.raw_text(), "\n\n");
        assert_eq!(ExtractedDocument::default().raw_text(), "");
    }
}
