// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page selection — parse a user-supplied spec such as "1,3,5-7" and resolve it
// against the document length.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PageSelectionError;

/// Which pages of a document to process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    #[default]
    All,
    /// Never empty when produced by [`PageSelection::parse`].
    Ranges(Vec<PageRange>),
}

/// A single element of a page selection. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageRange {
    Single(usize),
    /// Inclusive on both ends, `start <= end`.
    Range { start: usize, end: usize },
}

impl PageSelection {
    /// Parse a page specification like `"5"`, `"1-10"` or `"1,3,5-7"`.
    ///
    /// Whitespace around commas and hyphens is ignored. No upper bound is
    /// checked here; out-of-document pages are dropped by [`resolve`](Self::resolve).
    pub fn parse(spec: &str) -> Result<Self, PageSelectionError> {
        let mut ranges = Vec::new();

        for part in spec.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start, end)) = part.split_once('-') {
                let bounds = parse_number(start).zip(parse_number(end));
                match bounds {
                    Some((start, end)) if start >= 1 && end >= start => {
                        ranges.push(PageRange::Range { start, end });
                    }
                    _ => return Err(PageSelectionError::InvalidRange(part.to_string())),
                }
            } else {
                match parse_number(part) {
                    Some(page) if page >= 1 => ranges.push(PageRange::Single(page)),
                    _ => return Err(PageSelectionError::InvalidPage(part.to_string())),
                }
            }
        }

        if ranges.is_empty() {
            return Err(PageSelectionError::Empty);
        }

        Ok(Self::Ranges(ranges))
    }

    /// Resolve to concrete 1-based page numbers for a document of
    /// `total_pages` pages: ascending, deduplicated, all within
    /// `1..=total_pages`. Pages past the end are silently dropped.
    pub fn resolve(&self, total_pages: usize) -> Vec<usize> {
        match self {
            Self::All => (1..=total_pages).collect(),
            Self::Ranges(ranges) => {
                let mut pages = BTreeSet::new();
                for range in ranges {
                    match *range {
                        PageRange::Single(page) => {
                            if (1..=total_pages).contains(&page) {
                                pages.insert(page);
                            }
                        }
                        PageRange::Range { start, end } => {
                            let low = start.max(1);
                            let high = end.min(total_pages);
                            if low <= high {
                                pages.extend(low..=high);
                            }
                        }
                    }
                }
                pages.into_iter().collect()
            }
        }
    }
}

impl FromStr for PageSelection {
    type Err = PageSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_number(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}
