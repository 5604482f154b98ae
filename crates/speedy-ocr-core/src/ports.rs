// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits consumed by the pipeline.
//
// Opening a document, rendering a page, and recognizing text are capabilities
// the pipeline drives but does not implement. The concrete PDF and OCR
// implementations live in `speedy-ocr-document`; tests plug in fakes.

use std::path::Path;

use image::DynamicImage;

use crate::error::{RenderError, Result};

/// Opens a document and validates that it has at least one page.
pub trait DocumentLoader {
    type Document: PageSource;

    /// Open the document at `path`.
    ///
    /// Fails with `FileNotFound`, `InvalidDocument`, or `EmptyDocument`.
    fn open(&self, path: &Path) -> Result<Self::Document>;
}

impl<T: DocumentLoader + ?Sized> DocumentLoader for &T {
    type Document = T::Document;

    fn open(&self, path: &Path) -> Result<Self::Document> {
        (**self).open(path)
    }
}

/// Read-only access to the pages of an open document.
///
/// Shared by reference across all workers, so it must be `Sync`.
/// Implementations that cannot serve concurrent reads must lock internally.
pub trait PageSource: Sync {
    /// Handle to one page, valid for the lifetime of the document.
    type Page;

    /// Total number of pages in the document.
    fn page_count(&self) -> usize;

    /// Look up a page by 1-based number. `None` if it cannot be obtained.
    fn page(&self, page_number: usize) -> Option<Self::Page>;

    /// Render `page` to a bitmap at `dpi` dots per inch.
    fn render(&self, page: &Self::Page, dpi: u32) -> std::result::Result<DynamicImage, RenderError>;

    /// Look up and render in one step, distinguishing a missing page from a
    /// failed render.
    fn render_page(
        &self,
        page_number: usize,
        dpi: u32,
    ) -> std::result::Result<DynamicImage, RenderError> {
        let page = self
            .page(page_number)
            .ok_or(RenderError::PageUnavailable(page_number))?;
        self.render(&page, dpi)
    }
}

/// Per-run recognition settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    /// BCP 47 language identifiers, highest priority first.
    pub languages: Vec<String>,
    pub uses_language_correction: bool,
}

/// Turns a rendered page into text.
///
/// Called concurrently from every worker; must be `Sync`.
pub trait TextRecognizer: Sync {
    /// One-time setup (e.g. model loading) before any page is processed.
    ///
    /// A failure here aborts the run.
    fn prepare(&self, _options: &RecognitionOptions) -> Result<()> {
        Ok(())
    }

    /// Recognize the text in `image`. Lines are joined with `\n`, top to bottom.
    fn recognize(&self, image: &DynamicImage, options: &RecognitionOptions) -> Result<String>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for &T {
    fn prepare(&self, options: &RecognitionOptions) -> Result<()> {
        (**self).prepare(options)
    }

    fn recognize(&self, image: &DynamicImage, options: &RecognitionOptions) -> Result<String> {
        (**self).recognize(image, options)
    }
}
