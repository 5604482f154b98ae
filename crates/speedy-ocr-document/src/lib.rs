// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// speedy-ocr-document — Concrete collaborators for the OCR pipeline.
//
// Provides PDF opening and page lookup, page rasterization at a target DPI,
// and (behind the `ocr` feature) text recognition with the `ocrs` engine.

pub mod image;
pub mod pdf;
pub mod scan;

// Re-export the primary structs so callers can use `speedy_ocr_document::PdfLoader` etc.
pub use self::image::processor::ImageProcessor;
pub use pdf::reader::{PdfDocument, PdfLoader, PdfPage};

#[cfg(feature = "ocr")]
pub use scan::ocr::{OcrsConfig, OcrsRecognizer};
