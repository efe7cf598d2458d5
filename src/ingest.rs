//! Ingestion state machine
//!
//! [`Ingestor`] owns the lifecycle of one submitted document:
//!
//! ```text
//! Idle --submit(non-PDF)--> Error
//! Idle --submit(PDF)------> Loading --extracted--> Success
//!                                   \--failed----> Error
//! Success | Error --reset--> Idle
//! ```
//!
//! The current [`IngestionState`] lives in a `tokio::sync::watch` channel so a
//! presentation layer can re-render on every transition.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;

use crate::document::{
    extract_text, finalize_text, validate_content_type, DocumentParser, ExtractedDocument,
    SelectedFile,
};
use crate::error::ExtractionError;

/// Shown when the submitted file is not a PDF.
pub const INVALID_FILE_TYPE_MESSAGE: &str = "Please upload a valid PDF file.";

/// Shown for every extraction failure, whatever the cause.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract text from PDF. \
     The file may be corrupted, encrypted, or contain only images.";

/// What the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestionState {
    #[default]
    Idle,
    Loading {
        file_name: String,
    },
    Success {
        file_name: String,
        text: String,
        word_count: usize,
        character_count: usize,
        page_count: usize,
    },
    Error {
        message: String,
    },
}

impl IngestionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, IngestionState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, IngestionState::Loading { .. })
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            IngestionState::Loading { file_name } | IngestionState::Success { file_name, .. } => {
                Some(file_name)
            }
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            IngestionState::Success { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn word_count(&self) -> Option<usize> {
        match self {
            IngestionState::Success { word_count, .. } => Some(*word_count),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            IngestionState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Drives submitted files through validation, extraction and word counting.
///
/// Only one submission is processed at a time. `submit` and `reset` never
/// fail; every outcome is a state transition.
pub struct Ingestor<P> {
    parser: P,
    state: watch::Sender<IngestionState>,
    // Bumped by every accepted submission and every reset, so the result of a
    // submission that was reset mid-flight is dropped.
    generation: AtomicU64,
}

impl<P: DocumentParser> Ingestor<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            state: watch::Sender::new(IngestionState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> IngestionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<IngestionState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Submit a file for ingestion.
    ///
    /// Validation and the move to `Loading` (or straight to `Error` for a
    /// non-PDF) happen before this returns. The returned future reads the
    /// file, extracts its text and commits `Success` or `Error`. Dropping the
    /// future before it finishes commits `Error`, so `Loading` always ends.
    /// A submission made while another one is loading is ignored.
    pub fn submit<F: SelectedFile>(&self, file: F) -> impl Future<Output = ()> {
        let in_flight = self.begin(&file);

        async move {
            if let Some(in_flight) = in_flight {
                self.complete(&file, in_flight).await;
            }
        }
    }

    /// Return to `Idle`, discarding any payload. Idempotent.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|state| {
            if state.is_idle() {
                false
            } else {
                *state = IngestionState::Idle;
                true
            }
        });
    }

    fn begin<F: SelectedFile>(&self, file: &F) -> Option<InFlight<'_>> {
        if self.is_loading() {
            tracing::warn!(file = file.name(), "submission ignored while another file is loading");
            return None;
        }

        if let Err(err) = validate_content_type(file.content_type()) {
            tracing::info!(file = file.name(), error = %err, "rejected submitted file");
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.state.send_replace(IngestionState::Error {
                message: INVALID_FILE_TYPE_MESSAGE.to_string(),
            });
            return None;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let file_name = file.name().to_string();
        self.state.send_replace(IngestionState::Loading {
            file_name: file_name.clone(),
        });

        Some(InFlight {
            state: &self.state,
            generation: &self.generation,
            id: generation,
            file_name,
            settled: false,
        })
    }

    async fn complete<F: SelectedFile>(&self, file: &F, in_flight: InFlight<'_>) {
        let next = match self.ingest(file).await {
            Ok(document) => {
                let (text, stats) = finalize_text(&document);
                tracing::info!(
                    file = %in_flight.file_name,
                    pages = stats.page_count,
                    words = stats.word_count,
                    "extracted document text"
                );
                IngestionState::Success {
                    file_name: in_flight.file_name.clone(),
                    text,
                    word_count: stats.word_count,
                    character_count: stats.character_count,
                    page_count: stats.page_count,
                }
            }
            Err(err) => {
                tracing::error!(
                    file = %in_flight.file_name,
                    error = ?err,
                    "text extraction failed"
                );
                IngestionState::Error {
                    message: EXTRACTION_FAILED_MESSAGE.to_string(),
                }
            }
        };

        in_flight.commit(next);
    }

    async fn ingest<F: SelectedFile>(
        &self,
        file: &F,
    ) -> Result<ExtractedDocument, ExtractionError> {
        let bytes = file.read_bytes().await?;
        extract_text(&self.parser, &bytes).await
    }
}

/// An accepted submission that still owes a final state.
///
/// Dropped without a commit (the submission future was cancelled), it
/// settles the submission as `Error`.
struct InFlight<'a> {
    state: &'a watch::Sender<IngestionState>,
    generation: &'a AtomicU64,
    id: u64,
    file_name: String,
    settled: bool,
}

impl InFlight<'_> {
    fn commit(mut self, next: IngestionState) {
        self.settled = true;
        self.settle(next);
    }

    // A reset or newer submission since `begin` makes this result stale.
    fn settle(&self, next: IngestionState) {
        let id = self.id;
        let generation = self.generation;
        let committed = self.state.send_if_modified(|state| {
            if generation.load(Ordering::SeqCst) != id {
                return false;
            }
            *state = next;
            true
        });

        if !committed {
            tracing::debug!(
                file = %self.file_name,
                "dropping result of a submission that was reset"
            );
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        tracing::warn!(file = %self.file_name, "submission cancelled before it finished");
        self.settle(IngestionState::Error {
            message: EXTRACTION_FAILED_MESSAGE.to_string(),
        });
    }
}
