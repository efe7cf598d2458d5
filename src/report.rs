//! Rendering of ingestion states for the terminal

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::config::{Config, OutputFormat};
use crate::document::estimate_reading_minutes;
use crate::ingest::IngestionState;

pub struct ReportOptions {
    pub format: OutputFormat,
    pub show_text: bool,
    pub preview_chars: usize,
    pub words_per_minute: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ReportOptions {
    fn from(config: &Config) -> Self {
        Self {
            format: config.output.format,
            show_text: config.output.show_text,
            preview_chars: config.output.preview_chars,
            words_per_minute: config.reading.words_per_minute,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    state: &'a IngestionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    reading_minutes: Option<usize>,
}

pub fn render(state: &IngestionState, options: &ReportOptions) -> Result<String> {
    match options.format {
        OutputFormat::Text => render_text(state, options),
        OutputFormat::Json => render_json(state, options),
    }
}

fn render_json(state: &IngestionState, options: &ReportOptions) -> Result<String> {
    let reading_minutes = state
        .word_count()
        .map(|words| estimate_reading_minutes(words, options.words_per_minute));

    let report = JsonReport {
        state,
        reading_minutes,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_text(state: &IngestionState, options: &ReportOptions) -> Result<String> {
    let mut output = String::new();

    match state {
        IngestionState::Idle => writeln!(output, "No document loaded.")?,
        IngestionState::Loading { file_name } => writeln!(output, "Processing {file_name}...")?,
        IngestionState::Error { message } => writeln!(output, "Error: {message}")?,
        IngestionState::Success {
            file_name,
            text,
            word_count,
            character_count,
            page_count,
        } => {
            writeln!(output, "File: {file_name}")?;
            writeln!(output, "Pages: {page_count}")?;
            writeln!(output, "Words: {word_count}")?;
            writeln!(output, "Characters: {character_count}")?;
            let minutes = estimate_reading_minutes(*word_count, options.words_per_minute);
            writeln!(output, "Reading time: {minutes} min")?;

            if options.show_text {
                output.push('\n');
                if text.is_empty() {
                    writeln!(output, "(no text found)")?;
                } else {
                    writeln!(output, "{}", preview(text, options.preview_chars))?;
                }
            }
        }
    }

    Ok(output)
}

fn preview(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.to_string();
    }

    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
