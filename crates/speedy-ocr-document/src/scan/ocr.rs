// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text recognition backed by the `ocrs` engine.
//
// `ocrs` is a pure-Rust OCR engine running neural network models through
// `rten`. It needs two model files:
//
// - **Detection model** (`text-detection.rten`) locates words in the image.
// - **Recognition model** (`text-recognition.rten`) decodes each text line.
//
// Running `ocrs-cli` once downloads both into `$XDG_CACHE_HOME/ocrs`
// (typically `~/.cache/ocrs`), which is where they are looked for by default.
//
// The engine recognizes Latin script only. Requested languages are logged and
// used to warn when none of them is English; the language-correction flag has
// no equivalent in `ocrs` and is ignored.
//
// **Performance:** `ocrs` and `rten` must be built in release mode. Debug
// builds are 10-100x slower.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use speedy_ocr_core::error::{OcrError, Result};
use speedy_ocr_core::ports::{RecognitionOptions, TextRecognizer};
use tracing::{debug, instrument, warn};

/// Environment variable overriding the model directory.
pub const MODEL_DIR_ENV: &str = "SPEEDY_OCR_MODEL_DIR";

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs`.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Locations of the two `ocrs` model files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrsConfig {
    pub detection_model_path: PathBuf,
    pub recognition_model_path: PathBuf,
}

impl Default for OcrsConfig {
    /// Models from `$SPEEDY_OCR_MODEL_DIR` if set, else the `ocrs` cache.
    fn default() -> Self {
        match std::env::var_os(MODEL_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::from_dir(dir),
            _ => Self::from_dir(default_model_dir()),
        }
    }
}

impl OcrsConfig {
    /// Expects `dir` to contain `text-detection.rten` and `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<()> {
        for (kind, path) in [
            ("detection", &self.detection_model_path),
            ("recognition", &self.recognition_model_path),
        ] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "{} model not found at {}; run `ocrs-cli` once to download models \
                     or pass --model-dir",
                    kind,
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// [`TextRecognizer`] running the `ocrs` engine.
///
/// Models are loaded on the first call to `prepare` (or `recognize`) and the
/// engine is then shared by every worker.
pub struct OcrsRecognizer {
    config: OcrsConfig,
    engine: OnceLock<OcrsEngine>,
}

impl OcrsRecognizer {
    pub fn new(config: OcrsConfig) -> Self {
        Self {
            config,
            engine: OnceLock::new(),
        }
    }

    fn engine(&self) -> Result<&OcrsEngine> {
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }
        let engine = load_engine(&self.config)?;
        // A concurrent loader may have won; either engine is equivalent.
        Ok(self.engine.get_or_init(|| engine))
    }
}

impl Default for OcrsRecognizer {
    fn default() -> Self {
        Self::new(OcrsConfig::default())
    }
}

#[instrument(skip_all, fields(
    detection = %config.detection_model_path.display(),
    recognition = %config.recognition_model_path.display(),
))]
fn load_engine(config: &OcrsConfig) -> Result<OcrsEngine> {
    config.validate()?;

    let load = |path: &Path| {
        Model::load_file(path).map_err(|err| {
            OcrError::ModelLoad(format!("cannot load {}: {}", path.display(), err))
        })
    };

    debug!("Loading OCR detection model");
    let detection_model = load(&config.detection_model_path)?;
    debug!("Loading OCR recognition model");
    let recognition_model = load(&config.recognition_model_path)?;

    let engine = OcrsEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        ..Default::default()
    })
    .map_err(|err| OcrError::ModelLoad(format!("cannot initialise OCR engine: {}", err)))?;

    debug!("OCR engine initialised");
    Ok(engine)
}

impl TextRecognizer for OcrsRecognizer {
    fn prepare(&self, options: &RecognitionOptions) -> Result<()> {
        debug!(languages = ?options.languages, "Recognition languages");
        if !options.languages.iter().any(|lang| is_english(lang)) {
            warn!(
                languages = ?options.languages,
                "OCR engine only recognizes Latin script; results for these languages may be poor"
            );
        }
        if options.uses_language_correction {
            debug!("Language correction is not supported by the OCR engine; ignoring");
        }
        self.engine().map(|_| ())
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &DynamicImage, _options: &RecognitionOptions) -> Result<String> {
        let engine = self.engine()?;

        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            OcrError::Recognition(format!(
                "invalid image ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = engine
            .prepare_input(source)
            .map_err(|err| OcrError::Recognition(format!("preprocessing failed: {}", err)))?;

        let words = engine
            .detect_words(&input)
            .map_err(|err| OcrError::Recognition(format!("word detection failed: {}", err)))?;
        let lines = engine.find_text_lines(&input, &words);
        let texts = engine
            .recognize_text(&input, &lines)
            .map_err(|err| OcrError::Recognition(format!("line recognition failed: {}", err)))?;

        let text = join_lines(texts.iter().flatten().map(|line| line.to_string()));
        debug!(words = words.len(), lines = lines.len(), "Page recognized");
        Ok(text)
    }
}

/// Join recognized lines top to bottom, dropping blank ones.
fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_english(tag: &str) -> bool {
    let primary = tag.split(['-', '_']).next().unwrap_or_default();
    primary.eq_ignore_ascii_case("en")
}
