// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for speedy-ocr.

use thiserror::Error;

/// Top-level error type for all speedy-ocr operations.
///
/// Every variant that reaches the caller of a pipeline run is fatal. Page-local
/// failures are turned into warning strings inside the pipeline and never
/// surface as an `OcrError`.
#[derive(Debug, Error)]
pub enum OcrError {
    // -- Document errors --
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Cannot open PDF file: {0}")]
    InvalidDocument(String),

    #[error("PDF has no pages: {0}")]
    EmptyDocument(String),

    // -- Selection / configuration --
    #[error(transparent)]
    PageSelection(#[from] PageSelectionError),

    #[error("No pages to process (check --pages range)")]
    NoPagesToProcess,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Per-page processing --
    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("Text recognition failed: {0}")]
    Recognition(String),

    // -- OCR engine --
    #[error("failed to load OCR models: {0}")]
    ModelLoad(String),

    #[error("OCR support is not compiled in (rebuild with the `ocr` feature)")]
    OcrUnavailable,

    #[error("worker pool error: {0}")]
    WorkerPool(String),

    // -- I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while parsing a `--pages` specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageSelectionError {
    #[error("Invalid page range: '{0}'")]
    InvalidRange(String),

    #[error("Invalid page number: '{0}'")]
    InvalidPage(String),

    #[error("Empty page selection")]
    Empty,
}

/// Failure of the render collaborator for a single page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The page object itself could not be obtained from the document.
    #[error("Cannot get page {0}")]
    PageUnavailable(usize),

    /// The page exists but rendering it to an image failed.
    #[error("{0}")]
    Failed(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OcrError>;
