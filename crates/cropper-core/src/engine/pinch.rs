//! Two-finger grow and shrink.
//!
//! Each frame compares the squared distance between the two contacts with the
//! previous frame and moves the crop by one unit. Per axis, the unit is split
//! between the two edges depending on which of them already touch the clamp
//! rectangle:
//!
//! | touching   | grow                  | shrink                |
//! |------------|-----------------------|-----------------------|
//! | neither    | both edges out by 1   | both edges in by 1    |
//! | one edge   | other edge out by 2   | other edge in by 2    |
//! | both edges | no change             | both edges in by 1    |
//!
//! With the aspect lock the vertical unit is `aspect_ratio`, so width and
//! height change in proportion. A locked step that crosses the clamp
//! rectangle is shifted (and if needed scaled) back inside; one that would
//! break the ratio is rejected.

use super::ImageCropper;
use crate::geometry::Bounds;

/// How close an edge must be to the clamp rectangle to count as touching it.
const EDGE_TOLERANCE: f64 = 1e-6;

/// Allowed drift of height/width from the locked ratio.
const RATIO_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pinch {
    Grow,
    Shrink,
}

/// New `(low, high)` edges of one axis.
fn step_axis(low: f64, high: f64, min: f64, max: f64, unit: f64, pinch: Pinch) -> (f64, f64) {
    let at_low = (low - min).abs() < EDGE_TOLERANCE;
    let at_high = (high - max).abs() < EDGE_TOLERANCE;

    match (pinch, at_low, at_high) {
        (Pinch::Grow, true, true) => (low, high),
        (Pinch::Grow, true, false) => (low, high + 2.0 * unit),
        (Pinch::Grow, false, true) => (low - 2.0 * unit, high),
        (Pinch::Grow, false, false) => (low - unit, high + unit),
        (Pinch::Shrink, true, false) => (low, high - 2.0 * unit),
        (Pinch::Shrink, false, true) => (low + 2.0 * unit, high),
        (Pinch::Shrink, _, _) => (low + unit, high - unit),
    }
}

impl ImageCropper {
    /// Two contacts at `(x0, y0)` and `(x1, y1)`.
    ///
    /// Returns whether the crop changed. The first frame of a gesture only
    /// records the distance.
    pub fn on_pinch(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        let Some(clamp) = self.clamp_rect() else {
            return false;
        };

        let a = self.pool.borrow_point(x0, y0);
        let b = self.pool.borrow_point(x1, y1);
        let (pa, pb) = (self.pool.get(&a), self.pool.get(&b));
        let distance = (pa.x - pb.x) * (pa.x - pb.x) + (pa.y - pb.y) * (pa.y - pb.y);
        self.pool.return_point(b);
        self.pool.return_point(a);

        let previous = self.previous_distance.replace(distance);
        self.interacting = true;

        let pinch = match previous {
            Some(prev) if distance < prev => Pinch::Shrink,
            Some(prev) if distance > prev => Pinch::Grow,
            _ => return false,
        };

        let current = self.markers.bounds();
        let unit_y = if self.keep_aspect {
            self.aspect_ratio
        } else {
            1.0
        };
        let (left, right) = step_axis(
            current.left,
            current.right,
            clamp.min_x,
            clamp.max_x,
            1.0,
            pinch,
        );
        let (top, bottom) = step_axis(
            current.top,
            current.bottom,
            clamp.min_y,
            clamp.max_y,
            unit_y,
            pinch,
        );
        let mut next = Bounds::new(left, top, right, bottom);

        if self.keep_aspect {
            // An edge closer to the clamp than one step slides back inside
            next = clamp.fit(next, Some(self.aspect_ratio));
            let ratio_drift = next
                .aspect()
                .map_or(f64::INFINITY, |r| (r - self.aspect_ratio).abs());
            if !clamp.contains_bounds(&next) || ratio_drift > RATIO_TOLERANCE {
                log::trace!("rejecting {:?} pinch: {:?} breaks clamp or ratio", pinch, next);
                return false;
            }
        } else {
            next.left = next.left.max(clamp.min_x);
            next.top = next.top.max(clamp.min_y);
            next.right = next.right.min(clamp.max_x);
            next.bottom = next.bottom.min(clamp.max_y);
        }

        let (min_w, min_h) = self.min_size(&clamp);
        if next.width() < min_w || next.height() < min_h {
            log::trace!("rejecting {:?} pinch: below minimum size", pinch);
            return false;
        }
        if next == current {
            return false;
        }

        self.markers.set_bounds(next);
        true
    }
}
