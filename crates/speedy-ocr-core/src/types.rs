// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for an OCR run.

use serde::{Deserialize, Serialize};

/// Recognized text for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-based page number within the source document.
    pub page_number: usize,
    /// Recognized text. May be empty, never absent.
    pub text: String,
}

impl PageResult {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// Complete OCR result for a document.
///
/// `processed_pages` is strictly ascending by page number. Pages that failed
/// to render or recognize are absent; their failure is recorded in
/// `warnings` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Base name of the input file (e.g. `report.pdf`).
    pub source_file_name: String,
    /// Page count of the whole source document, not just the selection.
    pub total_pages: usize,
    pub processed_pages: Vec<PageResult>,
    pub dpi: u32,
    pub languages: Vec<String>,
    /// Wall-clock time spent in the parallel section.
    pub elapsed_seconds: f64,
    /// Page-local failures, one human-readable line each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl OcrResult {
    /// Number of pages that produced text.
    pub fn processed_count(&self) -> usize {
        self.processed_pages.len()
    }
}
