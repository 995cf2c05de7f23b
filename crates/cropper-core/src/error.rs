//! Error types for cropper configuration and pixel input.
//!
//! Interaction never fails: a rejected move simply leaves the markers where
//! they were. Errors are only raised when configuration or input sizes are
//! unusable.

use thiserror::Error;

/// Error types for engine configuration and image setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropperError {
    /// The requested crop width/height cannot define an aspect ratio.
    #[error("Invalid crop size {width}x{height}: both sides must be finite and positive")]
    InvalidCropSize { width: f64, height: f64 },

    /// The drawing surface has no area.
    #[error("Invalid canvas size {width}x{height}: both sides must be finite and positive")]
    InvalidCanvasSize { width: f64, height: f64 },

    /// A setting that must be non-negative was negative or not finite.
    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: &'static str, value: f64 },

    /// The image has no pixels.
    #[error("Image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// An RGB buffer whose length does not match its dimensions.
    #[error("Pixel buffer of {len} bytes does not hold a {width}x{height} RGB image")]
    PixelBufferMismatch { width: u32, height: u32, len: usize },
}
