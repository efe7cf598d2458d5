//! Page-by-page text extraction
//!
//! This module contains `extract_text()`, which drives a [`DocumentParser`]
//! over every page of a document and collects the page texts in order.

use super::models::ExtractedDocument;
use super::parsing::DocumentParser;
use crate::error::ExtractionError;

/// Extract the text of every page of the document in `bytes`.
///
/// Pages are visited strictly in ascending order, one at a time; page `n` is
/// requested only after page `n - 1` has been appended. Each page's tokens are
/// joined with a single space. Any engine failure aborts the whole extraction
/// and no partial text is returned.
pub async fn extract_text<P>(
    parser: &P,
    bytes: &[u8],
) -> Result<ExtractedDocument, ExtractionError>
where
    P: DocumentParser + ?Sized,
{
    let document = parser.open(bytes).await?;
    let page_count = document.page_count();

    let mut pages = Vec::with_capacity(page_count as usize);
    for number in 1..=page_count {
        let page = document.page(number).await?;
        let items = page.text_content().await?;
        tracing::debug!(page = number, tokens = items.len(), "extracted page text");

        let text = items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        pages.push(text);
    }

    Ok(ExtractedDocument { pages })
}
