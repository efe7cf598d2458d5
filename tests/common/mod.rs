#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use wordtally::document::{DocumentPage, ParsedDocument, TextItem};
use wordtally::{DocumentParser, EngineError, MemoryFile, SelectedFile};

/// Deterministic parser serving fixed page tokens.
#[derive(Clone, Default)]
pub struct FakeParser {
    pages: Vec<Vec<String>>,
    fail_open: bool,
    fail_page: Option<u32>,
    opened: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<u32>>>,
}

impl FakeParser {
    pub fn with_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|tokens| tokens.iter().map(|token| token.to_string()).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn failing_page(mut self, number: u32) -> Self {
        self.fail_page = Some(number);
        self
    }

    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentParser for FakeParser {
    async fn open(&self, _bytes: &[u8]) -> Result<Box<dyn ParsedDocument>, EngineError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.fail_open {
            return Err(EngineError::new("malformed document"));
        }

        Ok(Box::new(FakeDocument {
            pages: self.pages.clone(),
            fail_page: self.fail_page,
            requested: Arc::clone(&self.requested),
        }))
    }
}

struct FakeDocument {
    pages: Vec<Vec<String>>,
    fail_page: Option<u32>,
    requested: Arc<Mutex<Vec<u32>>>,
}

#[async_trait]
impl ParsedDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page(&self, number: u32) -> Result<Box<dyn DocumentPage>, EngineError> {
        self.requested.lock().unwrap().push(number);
        tokio::task::yield_now().await;

        if self.fail_page == Some(number) {
            return Err(EngineError::new(format!("page {number} has no text layer")));
        }

        let tokens = self.pages[(number - 1) as usize].clone();
        Ok(Box::new(FakePage { tokens }))
    }
}

struct FakePage {
    tokens: Vec<String>,
}

#[async_trait]
impl DocumentPage for FakePage {
    async fn text_content(&self) -> Result<Vec<TextItem>, EngineError> {
        tokio::task::yield_now().await;
        Ok(self.tokens.iter().map(TextItem::new).collect())
    }
}

/// File whose bytes are only handed out once the gate is opened.
pub struct GatedFile {
    inner: MemoryFile,
    gate: Arc<Notify>,
}

impl GatedFile {
    pub fn new(inner: MemoryFile) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let file = Self {
            inner,
            gate: Arc::clone(&gate),
        };
        (file, gate)
    }
}

#[async_trait]
impl SelectedFile for GatedFile {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn content_type(&self) -> Option<&str> {
        self.inner.content_type()
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        self.gate.notified().await;
        self.inner.read_bytes().await
    }
}

/// PDF-typed file whose bytes cannot be read.
pub struct UnreadableFile;

#[async_trait]
impl SelectedFile for UnreadableFile {
    fn name(&self) -> &str {
        "unreadable.pdf"
    }

    fn content_type(&self) -> Option<&str> {
        Some("application/pdf")
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ))
    }
}

pub fn pdf_file(name: &str) -> MemoryFile {
    MemoryFile::pdf(name, b"%PDF-1.5 fake".to_vec())
}
