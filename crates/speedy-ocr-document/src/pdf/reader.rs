// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open and validate existing PDF documents using the `lopdf`
// crate, and hand out pages for rasterization.

use std::collections::BTreeMap;
use std::path::Path;

use image::DynamicImage;
use lopdf::{Document, ObjectId};
use speedy_ocr_core::error::{OcrError, RenderError, Result};
use speedy_ocr_core::ports::{DocumentLoader, PageSource};
use tracing::{debug, instrument};

use super::raster;

/// Opens PDF files for the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    type Document = PdfDocument;

    fn open(&self, path: &Path) -> Result<PdfDocument> {
        PdfDocument::open(path)
    }
}

/// An open, non-empty PDF document.
///
/// Wraps `lopdf::Document`. The parsed object graph is immutable after
/// loading, so one instance is shared by reference across all workers.
pub struct PdfDocument {
    /// The underlying lopdf document.
    document: Document,
    /// Page number (1-indexed) to page object.
    pages: BTreeMap<u32, ObjectId>,
    /// Source path, for diagnostics.
    source_path: String,
}

/// Handle to one page of a [`PdfDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfPage {
    /// 1-based page number.
    pub number: usize,
    id: ObjectId,
}

impl PdfDocument {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    ///
    /// Fails with `FileNotFound` if nothing exists at `path`, `InvalidDocument`
    /// if it cannot be parsed, and `EmptyDocument` if it has no pages.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let shown = path_ref.display().to_string();

        if !path_ref.exists() {
            return Err(OcrError::FileNotFound(shown));
        }

        debug!("Opening PDF: {}", shown);

        let document = Document::load(path_ref).map_err(|err| {
            debug!(%err, "lopdf rejected the file");
            OcrError::InvalidDocument(shown.clone())
        })?;

        Self::from_document(document, shown)
    }

    /// Create a document from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let source = "<memory>".to_string();
        let document = Document::load_mem(data).map_err(|err| {
            debug!(%err, "lopdf rejected the buffer");
            OcrError::InvalidDocument(source.clone())
        })?;

        Self::from_document(document, source)
    }

    fn from_document(document: Document, source_path: String) -> Result<Self> {
        let pages = document.get_pages();
        if pages.is_empty() {
            return Err(OcrError::EmptyDocument(source_path));
        }

        debug!(pages = pages.len(), "PDF loaded");

        Ok(Self {
            document,
            pages,
            source_path,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Path the document was opened from (`<memory>` for in-memory buffers).
    pub fn source_path(&self) -> &str {
        &self.source_path
    }
}

impl PageSource for PdfDocument {
    type Page = PdfPage;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, page_number: usize) -> Option<PdfPage> {
        let key = u32::try_from(page_number).ok()?;
        self.pages.get(&key).map(|id| PdfPage {
            number: page_number,
            id: *id,
        })
    }

    #[instrument(skip_all, fields(page = page.number, dpi))]
    fn render(&self, page: &PdfPage, dpi: u32) -> std::result::Result<DynamicImage, RenderError> {
        raster::rasterize_page(&self.document, page.id, dpi)
            .map_err(|err| RenderError::Failed(err.to_string()))
    }
}
