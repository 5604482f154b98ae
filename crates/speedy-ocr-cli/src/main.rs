// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// speedy-ocr — OCR scanned PDFs from the command line.

mod cli;

use clap::Parser;
use speedy_ocr_core::Result;
use speedy_ocr_document::PdfLoader;
use speedy_ocr_pipeline::Pipeline;
use tracing::info;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over the default level.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.to_config()?;

    let pipeline = Pipeline::new(PdfLoader, recognizer(cli));
    let result = pipeline.run(&config)?;
    let output = config.format.format(&result);

    match &config.output_path {
        Some(path) => {
            std::fs::write(path, output)?;
            if !config.quiet {
                info!(target: "speedy_ocr::progress", "Output written to {}", path.display());
            }
        }
        None => println!("{}", output),
    }
    Ok(())
}

#[cfg(feature = "ocr")]
fn recognizer(cli: &Cli) -> speedy_ocr_document::OcrsRecognizer {
    use speedy_ocr_document::{OcrsConfig, OcrsRecognizer};

    match &cli.model_dir {
        Some(dir) => OcrsRecognizer::new(OcrsConfig::from_dir(dir)),
        None => OcrsRecognizer::default(),
    }
}

#[cfg(not(feature = "ocr"))]
fn recognizer(_cli: &Cli) -> unavailable::UnavailableRecognizer {
    unavailable::UnavailableRecognizer
}

#[cfg(not(feature = "ocr"))]
mod unavailable {
    use image::DynamicImage;
    use speedy_ocr_core::ports::{RecognitionOptions, TextRecognizer};
    use speedy_ocr_core::{OcrError, Result};

    /// Stands in for the OCR engine in builds without the `ocr` feature.
    pub struct UnavailableRecognizer;

    impl TextRecognizer for UnavailableRecognizer {
        fn prepare(&self, _options: &RecognitionOptions) -> Result<()> {
            Err(OcrError::OcrUnavailable)
        }

        fn recognize(&self, _image: &DynamicImage, _options: &RecognitionOptions) -> Result<String> {
            Err(OcrError::OcrUnavailable)
        }
    }
}
