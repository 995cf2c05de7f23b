//! Corner dragging.
//!
//! A corner drag keeps the diagonally opposite corner (the anchor) fixed.
//! Without an aspect lock the dragged corner follows the pointer, subject to
//! the minimum size. With the lock, the pointer position is projected onto
//! the locked ratio: a side test against a reference line through the anchor
//! decides whether the width or the height of the pointer's box drives the
//! other dimension.

use super::ImageCropper;
use crate::geometry::{side, Point};
use crate::marker::Corner;

/// Distance from the anchor to the probe point of the side test.
const PROBE_LENGTH: f64 = 100.0;

impl ImageCropper {
    /// Drag `corner` towards `(x, y)` in display space.
    pub fn drag_corner(&mut self, x: f64, y: f64, corner: Corner) {
        if !self.is_image_set() {
            return;
        }

        let target = if self.keep_aspect {
            self.aspect_target(x, y, corner)
        } else {
            Some((x, y))
        };

        if let Some((x, y)) = target {
            let p = self.enforce_min_size(x, y, corner);
            self.markers.move_corner(corner, p.x, p.y);
        }
        self.markers.recenter();
    }

    /// Where `corner` should go for a pointer at `(x, y)` under the aspect lock.
    ///
    /// Returns `None` when the pointer sits exactly on the reference line.
    fn aspect_target(&mut self, x: f64, y: f64, corner: Corner) -> Option<(f64, f64)> {
        let anchor = self.markers.corner(corner.diagonal()).position;
        let aspect = self.aspect_ratio;

        let left = x <= anchor.x;
        let above = y <= anchor.y;
        let sx = if left { -1.0 } else { 1.0 };
        let sy = if above { -1.0 } else { 1.0 };

        let probe = self.pool.borrow_point(
            anchor.x + sx * PROBE_LENGTH / aspect,
            anchor.y + sy * PROBE_LENGTH,
        );
        let pointer = self.pool.borrow_point(x, y);
        let fold = side(self.pool.get(&probe), anchor, self.pool.get(&pointer));
        self.pool.return_point(pointer);
        self.pool.return_point(probe);

        if fold == 0.0 {
            return None;
        }

        // Above-left and below-right take the height on a positive fold,
        // the mixed quadrants on a negative one
        let height_driven = if left == above { fold > 0.0 } else { fold < 0.0 };
        let (width, height) = if height_driven {
            let height = (anchor.y - y).abs();
            (height / aspect, height)
        } else {
            let width = (anchor.x - x).abs();
            (width, width * aspect)
        };

        Some((anchor.x + sx * width, anchor.y + sy * height))
    }

    /// Push a candidate corner position out to the minimum size.
    ///
    /// Returns the corner's current position instead when the candidate
    /// collapses the rectangle to zero width or height, or when the corrected
    /// candidate leaves the clamp rectangle.
    pub fn enforce_min_size(&mut self, x: f64, y: f64, corner: Corner) -> Point {
        let current = self.markers.corner(corner).position;
        let Some(clamp) = self.clamp_rect() else {
            return current;
        };

        let candidate = self.pool.borrow_point(x, y);
        let x_len = x - self.markers.corner(corner.horizontal_neighbor()).position.x;
        let y_len = y - self.markers.corner(corner.vertical_neighbor()).position.y;

        if x_len == 0.0 || y_len == 0.0 {
            log::trace!("rejecting {:?} move: zero-length side", corner);
            self.pool.set(&candidate, current.x, current.y);
            return self.pool.return_point(candidate);
        }

        let (min_w, min_h) = self.min_size(&clamp);
        let x_over = min_w - x_len.abs();
        let y_over = min_h - y_len.abs();
        let sx = x_len.signum();
        let sy = y_len.signum();
        let (mut nx, mut ny) = (x, y);

        if self.keep_aspect {
            let aspect = self.aspect_ratio;
            // Deficit of the height expressed as a width
            let y_over_w = y_over / aspect;
            let by_width = if x_over > 0.0 && y_over_w > 0.0 {
                Some(x_over > y_over_w)
            } else if x_over > 0.0 {
                Some(true)
            } else if y_over > 0.0 {
                Some(false)
            } else {
                None
            };

            match by_width {
                Some(true) => {
                    nx += sx * x_over;
                    ny += sy * x_over * aspect;
                }
                Some(false) => {
                    ny += sy * y_over;
                    nx += sx * y_over / aspect;
                }
                None => {}
            }
        } else {
            if x_over > 0.0 {
                nx += sx * x_over;
            }
            if y_over > 0.0 {
                ny += sy * y_over;
            }
        }

        if !clamp.contains(nx, ny) {
            log::trace!("rejecting {:?} move: ({}, {}) outside clamp", corner, nx, ny);
            nx = current.x;
            ny = current.y;
        }

        self.pool.set(&candidate, nx, ny);
        self.pool.return_point(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assert_close, engine};
    use crate::geometry::{Bounds, Point};
    use crate::marker::Corner;

    #[test]
    fn test_free_drag_follows_pointer() {
        let mut cropper = engine(false, 30.0, 30.0);
        cropper.drag_corner(100.0, 80.0, Corner::TopLeft);
        assert_eq!(cropper.display_bounds(), Bounds::new(100.0, 80.0, 400.0, 250.0));
        assert_eq!(
            cropper.center().position,
            Bounds::new(100.0, 80.0, 400.0, 250.0).center()
        );
    }

    #[test]
    fn test_free_drag_enforces_min_width() {
        let mut cropper = engine(false, 30.0, 30.0);
        // Right edge sits at 400: pointer implies width 10
        cropper.drag_corner(390.0, 100.0, Corner::TopLeft);
        let b = cropper.display_bounds();
        assert_eq!(b.width(), 30.0);
        assert_eq!(b.right, 400.0);
        assert_eq!(b.left, 370.0);
        assert_eq!(b.top, 100.0);
    }

    #[test]
    fn test_free_drag_enforces_min_height() {
        let mut cropper = engine(false, 30.0, 30.0);
        cropper.drag_corner(100.0, 240.0, Corner::TopLeft);
        let b = cropper.display_bounds();
        assert_eq!(b.height(), 30.0);
        assert_eq!(b.bottom, 250.0);
    }

    #[test]
    fn test_zero_length_side_rejected() {
        let mut cropper = engine(false, 0.0, 0.0);
        let before = cropper.display_bounds();
        // x equal to the right edge: zero width
        cropper.drag_corner(400.0, 100.0, Corner::TopLeft);
        assert_eq!(cropper.display_bounds(), before);
    }

    #[test]
    fn test_out_of_clamp_rejected() {
        let mut cropper = engine(false, 30.0, 30.0);
        let before = cropper.display_bounds();
        cropper.drag_corner(-20.0, 100.0, Corner::TopLeft);
        assert_eq!(cropper.display_bounds(), before);
    }

    #[test]
    fn test_min_size_push_outside_clamp_rejected() {
        let mut cropper = engine(false, 30.0, 30.0);
        // Shrink to a crop hugging the top edge
        cropper.drag_corner(100.0, 0.0, Corner::TopLeft);
        cropper.drag_corner(300.0, 100.0, Corner::BottomRight);
        assert_eq!(cropper.display_bounds(), Bounds::new(100.0, 0.0, 300.0, 100.0));
        // Bottom edge towards the top: min height would push it above y=0
        let before = cropper.display_bounds();
        cropper.drag_corner(300.0, -10.0, Corner::BottomRight);
        assert_eq!(cropper.display_bounds(), before);
    }

    #[test]
    fn test_aspect_drag_short_box_height_drives() {
        let mut cropper = engine(true, 10.0, 10.0);
        // Anchor (TopLeft's diagonal) is BottomRight at (400, 250).
        // Pointer box 300 wide, 50 tall: the tighter height drives
        cropper.drag_corner(100.0, 200.0, Corner::TopLeft);
        let b = cropper.display_bounds();
        assert_close(b.height(), 50.0);
        assert_close(b.width(), 100.0);
        assert_eq!(b.right, 400.0);
        assert_eq!(b.bottom, 250.0);
    }

    #[test]
    fn test_aspect_drag_narrow_box_width_drives() {
        let mut cropper = engine(true, 10.0, 10.0);
        // Pointer box 100 wide, 150 tall: the tighter width drives
        cropper.drag_corner(300.0, 100.0, Corner::TopLeft);
        let b = cropper.display_bounds();
        assert_close(b.width(), 100.0);
        assert_close(b.height(), 50.0);
        assert_eq!(b.right, 400.0);
    }

    #[test]
    fn test_aspect_drag_every_quadrant_keeps_ratio() {
        let mut cropper = engine(true, 10.0, 10.0);
        cropper.update_crop_position(Bounds::new(200.0, 200.0, 600.0, 400.0));
        for (corner, x, y) in [
            (Corner::TopLeft, 120.0, 90.0),
            (Corner::TopRight, 330.0, 80.0),
            (Corner::BottomLeft, 50.0, 240.0),
            (Corner::BottomRight, 390.0, 220.0),
        ] {
            cropper.drag_corner(x, y, corner);
            let b = cropper.display_bounds();
            assert_close(b.height() / b.width(), 0.5);
        }
    }

    #[test]
    fn test_aspect_drag_on_reference_line_is_noop() {
        let mut cropper = engine(true, 10.0, 10.0);
        let before = cropper.display_bounds();
        // Anchor (400, 250); probe direction (-200, -100) for ratio 0.5
        cropper.drag_corner(200.0, 150.0, Corner::TopLeft);
        assert_eq!(cropper.display_bounds(), before);
    }

    #[test]
    fn test_aspect_min_size_keeps_ratio() {
        let mut cropper = engine(true, 60.0, 20.0);
        // Pointer box 8x5 is width-driven to 8x4, then pushed out to 60x30
        cropper.drag_corner(392.0, 245.0, Corner::TopLeft);
        let b = cropper.display_bounds();
        assert_close(b.width(), 60.0);
        assert_close(b.height(), 30.0);
        assert_eq!(b.right, 400.0);
    }

    #[test]
    fn test_anchor_never_moves() {
        let mut cropper = engine(true, 10.0, 10.0);
        let anchor = cropper.markers().corner(Corner::BottomRight).position;
        for (x, y) in [(10.0, 10.0), (350.0, 240.0), (-50.0, 500.0), (399.0, 0.0)] {
            cropper.drag_corner(x, y, Corner::TopLeft);
            assert_eq!(cropper.markers().corner(Corner::BottomRight).position, anchor);
        }
    }

    #[test]
    fn test_enforce_min_size_without_image() {
        let mut cropper =
            crate::ImageCropper::new(crate::CropperSettings::default()).unwrap();
        let p = cropper.enforce_min_size(5.0, 5.0, Corner::TopLeft);
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_drag_returns_all_points() {
        let mut cropper = engine(true, 10.0, 10.0);
        cropper.drag_corner(120.0, 90.0, Corner::TopLeft);
        cropper.drag_corner(200.0, 150.0, Corner::TopLeft);
        assert_eq!(cropper.pool().outstanding(), 0);
        assert_eq!(cropper.pool().borrowed(), cropper.pool().returned());
        assert!(cropper.pool().borrowed() > 0);
    }
}
