// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline — open the document, resolve the page selection, then render and
// recognize every selected page on a bounded worker pool.
//
// Document, selection, and recognizer-setup failures are fatal and happen
// before any page is touched. Failures while rendering or recognizing a single
// page only drop that page from the result and add a warning.

use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use speedy_ocr_core::error::{OcrError, RenderError, Result};
use speedy_ocr_core::ports::{DocumentLoader, PageSource, RecognitionOptions, TextRecognizer};
use speedy_ocr_core::{OcrConfig, OcrResult, PageResult};
use tracing::{Span, debug, instrument};

use crate::progress::ProgressReporter;

/// What one work unit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Recognized(PageResult),
    /// Page-local failure, already phrased as a user-facing warning.
    Failed(String),
}

/// Drives a [`DocumentLoader`] and a [`TextRecognizer`] over a document.
///
/// ```ignore
/// let pipeline = Pipeline::new(PdfLoader, OcrsRecognizer::default());
/// let result = pipeline.run(&OcrConfig::new("scan.pdf"))?;
/// ```
pub struct Pipeline<L, R> {
    loader: L,
    recognizer: R,
}

impl<L, R> Pipeline<L, R>
where
    L: DocumentLoader,
    R: TextRecognizer,
{
    pub fn new(loader: L, recognizer: R) -> Self {
        Self { loader, recognizer }
    }

    /// Run OCR over the pages `config` selects.
    ///
    /// Returns the recognized pages in ascending order. Only fatal errors are
    /// returned as `Err`; per-page failures end up in `OcrResult::warnings`.
    #[instrument(skip_all, fields(input = %config.input_path.display(), dpi = config.dpi))]
    pub fn run(&self, config: &OcrConfig) -> Result<OcrResult> {
        config.validate()?;

        let document = self.loader.open(&config.input_path)?;
        let total_pages = document.page_count();

        let pages = config.pages.resolve(total_pages);
        if pages.is_empty() {
            return Err(OcrError::NoPagesToProcess);
        }

        let options = config.recognition_options();
        self.recognizer.prepare(&options)?;

        let source_file_name = config.source_file_name();
        let reporter = ProgressReporter::new(pages.len(), config.quiet);
        reporter.log(&format!(
            "Processing {} pages from {} ({} total)",
            pages.len(),
            source_file_name,
            total_pages
        ));

        let pool = build_pool(config.workers)?;
        debug!(threads = pool.current_num_threads(), "Worker pool ready");

        let start = Instant::now();
        let recognizer = &self.recognizer;
        let document = &document;
        let run_span = Span::current();
        let outcomes: Vec<PageOutcome> = pool.install(|| {
            pages
                .par_iter()
                .map(|&page_number| {
                    let _entered = run_span.enter();
                    process_page(
                        document,
                        recognizer,
                        page_number,
                        config.dpi,
                        &options,
                        &reporter,
                    )
                })
                .collect()
        });
        let elapsed_seconds = start.elapsed().as_secs_f64();

        let (processed_pages, warnings) = fold_outcomes(outcomes);

        reporter.log(&format!("Completed in {:.1} seconds", elapsed_seconds));
        for warning in &warnings {
            reporter.log(&format!("Warning: {}", warning));
        }
        debug!(
            recognized = processed_pages.len(),
            failed = warnings.len(),
            "OCR run finished"
        );

        Ok(OcrResult {
            source_file_name,
            total_pages,
            processed_pages,
            dpi: config.dpi,
            languages: config.languages.clone(),
            elapsed_seconds,
            warnings,
        })
    }
}

/// A dedicated pool; `None` sizes it to the available parallelism.
fn build_pool(workers: Option<usize>) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .thread_name(|index| format!("speedy-ocr-{}", index))
        .build()
        .map_err(|err| OcrError::WorkerPool(err.to_string()))
}

/// Render then recognize one page.
fn process_page<D, R>(
    document: &D,
    recognizer: &R,
    page_number: usize,
    dpi: u32,
    options: &RecognitionOptions,
    reporter: &ProgressReporter,
) -> PageOutcome
where
    D: PageSource,
    R: TextRecognizer,
{
    let image = match document.render_page(page_number, dpi) {
        Ok(image) => image,
        Err(err @ RenderError::PageUnavailable(_)) => {
            debug!(page = page_number, "Page unavailable");
            return PageOutcome::Failed(err.to_string());
        }
        Err(RenderError::Failed(message)) => {
            debug!(page = page_number, %message, "Render failed");
            return PageOutcome::Failed(format!("Page {}: {}", page_number, message));
        }
    };

    match recognizer.recognize(&image, options) {
        Ok(text) => {
            reporter.report_page(page_number);
            PageOutcome::Recognized(PageResult::new(page_number, text))
        }
        Err(err) => {
            debug!(page = page_number, %err, "Recognition failed");
            PageOutcome::Failed(format!("Page {}: {}", page_number, err))
        }
    }
}

/// Split outcomes into pages sorted by number and warnings in arrival order.
pub fn fold_outcomes(
    outcomes: impl IntoIterator<Item = PageOutcome>,
) -> (Vec<PageResult>, Vec<String>) {
    let (mut pages, warnings) = outcomes.into_iter().fold(
        (Vec::new(), Vec::new()),
        |(mut pages, mut warnings), outcome| {
            match outcome {
                PageOutcome::Recognized(page) => pages.push(page),
                PageOutcome::Failed(warning) => warnings.push(warning),
            }
            (pages, warnings)
        },
    );
    pages.sort_by_key(|page: &PageResult| page.page_number);
    (pages, warnings)
}
