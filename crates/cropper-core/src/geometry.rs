//! Plain geometric value types shared by the engine.
//!
//! # Coordinate System
//!
//! - Display space: pixels of the drawing surface, origin top-left
//! - Source space: pixels of the natural image, origin top-left
//! - y grows downward in both spaces

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing derived floating-point coordinates.
pub const EPSILON: f64 = 1e-9;

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Signed area test of `c` against the directed line `a -> b`.
///
/// Returns `1.0` if `c` lies to the left (positive cross product),
/// `-1.0` to the right and `0.0` when the three points are collinear.
#[inline]
pub fn side(a: Point, b: Point, c: Point) -> f64 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > 0.0 {
        1.0
    } else if cross < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build bounds from an origin and a size.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Midpoint of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Height over width. Zero-width bounds report `None`.
    pub fn aspect(&self) -> Option<f64> {
        let w = self.width();
        if w.abs() < EPSILON {
            None
        } else {
            Some(self.height() / w)
        }
    }
}

/// The display-space rectangle of the visible image.
///
/// Every marker position is kept inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClampRect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ClampRect {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether the point lies inside, allowing [`EPSILON`] of slack.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x - EPSILON
            && x <= self.max_x + EPSILON
            && y >= self.min_y - EPSILON
            && y <= self.max_y + EPSILON
    }

    /// Whether the whole rectangle lies inside, allowing [`EPSILON`] of slack.
    pub fn contains_bounds(&self, bounds: &Bounds) -> bool {
        self.contains(bounds.left, bounds.top) && self.contains(bounds.right, bounds.bottom)
    }

    /// Move (and if necessary shrink) `bounds` so it fits inside.
    ///
    /// With `aspect` set, shrinking scales both axes so the ratio survives.
    pub fn fit(&self, bounds: Bounds, aspect: Option<f64>) -> Bounds {
        let mut width = bounds.width().max(0.0);
        let mut height = bounds.height().max(0.0);

        match aspect {
            Some(aspect) => {
                if width > self.width() {
                    width = self.width();
                    height = width * aspect;
                }
                if height > self.height() {
                    height = self.height();
                    width = height / aspect;
                }
            }
            None => {
                width = width.min(self.width());
                height = height.min(self.height());
            }
        }

        // max() keeps the range ordered when rounding makes `max - width < min`
        let left = bounds
            .left
            .clamp(self.min_x, (self.max_x - width).max(self.min_x));
        let top = bounds
            .top
            .clamp(self.min_y, (self.max_y - height).max(self.min_y));
        Bounds::from_origin_size(left, top, width, height)
    }
}

/// Integer rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
