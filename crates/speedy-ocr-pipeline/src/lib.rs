// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// speedy-ocr-pipeline — Parallel OCR orchestration.
//
// Resolves the page selection, fans pages out over a rayon worker pool, and
// folds the per-page outcomes into an ordered `OcrResult`.

pub mod pipeline;
pub mod progress;

pub use pipeline::{PageOutcome, Pipeline, fold_outcomes};
pub use progress::{ProgressReporter, progress_message};
