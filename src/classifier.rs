//! Structural pre-check deciding whether an image is worth the arithmetic
//! strategy.

use std::io::Cursor;

use image::ImageReader;

use crate::consts::{ARITHMETIC_MAX_HEIGHT, ARITHMETIC_MAX_WIDTH};
use crate::error::DecodeError;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Read the image header and return its dimensions. The format is guessed
/// from the content, not from any declared type.
pub fn probe_dimensions(bytes: &[u8]) -> Result<Dimensions, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let (width, height) = reader.into_dimensions()?;
    Ok(Dimensions { width, height })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_arithmetic_candidate: bool,
}

/// Coarse size heuristic: arithmetic challenges are small, low-resolution
/// strips. Both bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            max_width: ARITHMETIC_MAX_WIDTH,
            max_height: ARITHMETIC_MAX_HEIGHT,
        }
    }
}

impl Classifier {
    pub fn classify(&self, dims: Dimensions) -> Classification {
        Classification {
            is_arithmetic_candidate: dims.width < self.max_width && dims.height < self.max_height,
        }
    }
}
