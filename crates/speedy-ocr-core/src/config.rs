// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OcrError, Result};
use crate::format::OutputFormat;
use crate::pages::PageSelection;
use crate::ports::RecognitionOptions;

/// Default rendering resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 150;

/// Default recognition languages, in priority order.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["ja", "en"];

/// Settings for one OCR run.
///
/// Constructed once from external input and handed to the pipeline by
/// reference; nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Path of the PDF to read.
    pub input_path: PathBuf,
    /// Where to write the formatted result (`None` = stdout).
    pub output_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub pages: PageSelection,
    /// Rendering resolution. Must be positive.
    pub dpi: u32,
    /// Recognition languages (BCP 47), highest priority first. Must be non-empty.
    pub languages: Vec<String>,
    pub uses_language_correction: bool,
    /// Suppress progress and log output.
    pub quiet: bool,
    /// Upper bound on worker threads (`None` = available parallelism).
    pub workers: Option<usize>,
}

impl OcrConfig {
    /// Create a config for `input_path` with every other setting at its default.
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            format: OutputFormat::Txt,
            pages: PageSelection::All,
            dpi: DEFAULT_DPI,
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            uses_language_correction: true,
            quiet: false,
            workers: None,
        }
    }

    // -- Builder --------------------------------------------------------------

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language_correction(mut self, enabled: bool) -> Self {
        self.uses_language_correction = enabled;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    // -- Derived values -------------------------------------------------------

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(OcrError::InvalidConfig(
                "resolution must be a positive number of DPI".into(),
            ));
        }
        if self.languages.is_empty() {
            return Err(OcrError::InvalidConfig(
                "at least one recognition language is required".into(),
            ));
        }
        if self.languages.iter().any(|l| l.trim().is_empty()) {
            return Err(OcrError::InvalidConfig(
                "recognition languages must not be blank".into(),
            ));
        }
        if self.workers == Some(0) {
            return Err(OcrError::InvalidConfig(
                "worker count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Base name of the input file, as reported in results.
    pub fn source_file_name(&self) -> String {
        file_name_of(&self.input_path)
    }

    /// Options forwarded to the text recognizer for every page.
    pub fn recognition_options(&self) -> RecognitionOptions {
        RecognitionOptions {
            languages: self.languages.clone(),
            uses_language_correction: self.uses_language_correction,
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
