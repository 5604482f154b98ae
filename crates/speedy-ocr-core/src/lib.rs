// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// speedy-ocr — Core types, page selection, collaborator traits, error
// definitions, and output formatters shared across all crates.

pub mod config;
pub mod error;
pub mod format;
pub mod pages;
pub mod ports;
pub mod types;

pub use config::OcrConfig;
pub use error::{OcrError, PageSelectionError, RenderError, Result};
pub use pages::{PageRange, PageSelection};
pub use ports::{DocumentLoader, PageSource, RecognitionOptions, TextRecognizer};
pub use types::*;
