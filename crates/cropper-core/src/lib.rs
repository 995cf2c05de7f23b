//! Cropper Core - crop-region geometry and interaction engine
//!
//! This crate holds everything an interactive image cropper needs short of
//! drawing: mapping between a display surface and the source image, the
//! four-corner marker graph, aspect-locked and free resizing, translation,
//! multi-touch routing, pinch gestures, and pixel extraction of the result.
//!
//! Rendering and input capture live in the host; the engine takes
//! coordinates and returns cursor hints.

pub mod engine;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod marker;
pub mod pool;
pub mod settings;
pub mod viewport;

pub use engine::{CropPlan, CropTouch, Cursor, ImageCropper};
pub use error::CropperError;
pub use extract::{extract_crop, rgb_image_from_raw, FilterType};
pub use geometry::{Bounds, ClampRect, PixelRect, Point};
pub use marker::{Corner, Handle, Marker, MarkerSet};
pub use pool::PointPool;
pub use settings::CropperSettings;
pub use viewport::{ImageSize, Viewport};
