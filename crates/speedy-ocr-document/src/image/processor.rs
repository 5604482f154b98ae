// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, scale to the target resolution, rotate by quarter
// turns, and flatten transparency onto white. Operates on in-memory images
// using the `image` crate.

use image::{DynamicImage, RgbImage};
use speedy_ocr_core::OcrError;
use tracing::{debug, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// Each method consumes `self` and returns a new `ImageProcessor` wrapping the
/// transformed image, enabling method chaining.
///
/// ```ignore
/// let page = ImageProcessor::from_bytes(&jpeg)?
///     .flatten_onto_white()
///     .resize_exact(1275, 1650)
///     .rotate(90)
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, OcrError> {
        let img = image::load_from_memory(data)
            .map_err(|err| OcrError::Render(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    ///
    /// No-op when the image already has that size.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        if self.image.width() == width && self.image.height() == height {
            return self;
        }
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Resizing image"
        );
        let resized =
            self.image
                .resize_exact(width, height, image::imageops::FilterType::Triangle);
        Self { image: resized }
    }

    /// Rotate clockwise by `degrees`, which must be a multiple of 90.
    ///
    /// Other angles leave the image untouched.
    pub fn rotate(self, degrees: i64) -> Self {
        match degrees.rem_euclid(360) {
            90 => Self {
                image: self.image.rotate90(),
            },
            180 => Self {
                image: self.image.rotate180(),
            },
            270 => Self {
                image: self.image.rotate270(),
            },
            0 => self,
            other => {
                debug!(degrees = other, "Ignoring non-quarter-turn rotation");
                self
            }
        }
    }

    /// Composite any alpha channel onto a white background.
    ///
    /// Images without alpha are returned unchanged.
    pub fn flatten_onto_white(self) -> Self {
        if !self.image.color().has_alpha() {
            return self;
        }

        let rgba = self.image.to_rgba8();
        let flattened = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let image::Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
            let blend = |channel: u8| -> u8 {
                let alpha = a as u32;
                ((channel as u32 * alpha + 255 * (255 - alpha)) / 255) as u8
            };
            image::Rgb([blend(r), blend(g), blend(b)])
        });
        Self {
            image: DynamicImage::ImageRgb8(flattened),
        }
    }
}
