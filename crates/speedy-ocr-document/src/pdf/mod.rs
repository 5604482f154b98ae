// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — opening documents and rasterizing their pages.

pub mod raster;
pub mod reader;

#[cfg(test)]
pub(crate) mod fixture;

pub use reader::{PdfDocument, PdfLoader, PdfPage};
