//! Document text extraction module
//!
//! This module turns the bytes of a submitted PDF into its page texts and the
//! statistics shown to the user.

pub mod cleanup;
pub mod io;
pub mod loader;
pub mod models;
pub mod parsing;

pub use cleanup::{count_characters, count_words, estimate_reading_minutes, finalize_text};
pub use io::{
    content_type_for_path, validate_content_type, LocalFile, MemoryFile, SelectedFile,
    PDF_MIME_TYPE,
};
pub use loader::extract_text;
pub use models::*;
pub use parsing::{DocumentPage, DocumentParser, LopdfParser, ParsedDocument};
