//! Post-processing of extracted text
//!
//! Trimming, word segmentation and the statistics derived from them. These
//! run once over the fully joined document, never per page.

use unicode_segmentation::UnicodeSegmentation;

use super::models::{ExtractedDocument, TextStats};

/// Whitespace for trimming and word splitting: Unicode `White_Space`, plus
/// the byte order mark U+FEFF, minus NEXT LINE U+0085.
pub fn is_text_whitespace(c: char) -> bool {
    match c {
        '\u{feff}' => true,
        '\u{85}' => false,
        c => c.is_whitespace(),
    }
}

/// `text` without leading and trailing whitespace.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(is_text_whitespace)
}

/// Number of words in `text`, split on runs of whitespace.
pub fn count_words(text: &str) -> usize {
    text.split(is_text_whitespace)
        .filter(|word| !word.is_empty())
        .count()
}

/// Number of user-perceived characters (extended grapheme clusters).
pub fn count_characters(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Trim the joined document text and compute its statistics.
pub fn finalize_text(document: &ExtractedDocument) -> (String, TextStats) {
    let text = trim_text(&document.raw_text()).to_string();
    let stats = TextStats {
        word_count: count_words(&text),
        character_count: count_characters(&text),
        page_count: document.page_count(),
    };
    (text, stats)
}

/// Whole minutes needed to read `word_count` words, rounded up.
pub fn estimate_reading_minutes(word_count: usize, words_per_minute: u32) -> usize {
    if word_count == 0 || words_per_minute == 0 {
        return 0;
    }
    word_count.div_ceil(words_per_minute as usize)
}
