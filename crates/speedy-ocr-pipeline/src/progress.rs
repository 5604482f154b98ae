// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Progress reporting shared by all pipeline workers.

use std::sync::Mutex;

use tracing::{debug, info};

/// Emit a progress line every this many completed pages.
pub const PROGRESS_INTERVAL: usize = 25;

/// Thread-safe page counter and run logger.
///
/// Lines are emitted as INFO events on the `speedy_ocr::progress` target.
/// A quiet reporter does nothing at all, including counting.
#[derive(Debug)]
pub struct ProgressReporter {
    total: usize,
    quiet: bool,
    processed: Mutex<usize>,
}

impl ProgressReporter {
    pub fn new(total: usize, quiet: bool) -> Self {
        Self {
            total,
            quiet,
            processed: Mutex::new(0),
        }
    }

    /// Record one recognized page.
    pub fn report_page(&self, page_number: usize) {
        if self.quiet {
            return;
        }

        let message = {
            // A poisoned counter only means another worker panicked mid-update.
            let mut processed = self
                .processed
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *processed += 1;
            progress_message(*processed, self.total)
        };

        debug!(page = page_number, "Page recognized");
        if let Some(message) = message {
            info!(target: "speedy_ocr::progress", "{}", message);
        }
    }

    /// Write a plain diagnostic line.
    pub fn log(&self, message: &str) {
        if !self.quiet {
            info!(target: "speedy_ocr::progress", "{}", message);
        }
    }

    /// Pages reported so far.
    pub fn processed(&self) -> usize {
        *self
            .processed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// The progress line for `count` of `total`, if one is due.
pub fn progress_message(count: usize, total: usize) -> Option<String> {
    (count % PROGRESS_INTERVAL == 0 || count == total)
        .then(|| format!("Progress: {}/{} pages", count, total))
}
