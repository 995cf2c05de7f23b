//! Routing pointer and touch events to markers.
//!
//! Every contact is tracked by its identifier (0 for a mouse, one per finger
//! for multi-touch). A contact goes through
//!
//! ```text
//! idle --press--> pressed --hit--> dragging --release--> idle
//!                    |                                    ^
//!                    +---------------release--------------+
//! ```
//!
//! A press that misses every marker stays `pressed` and keeps hit-testing
//! while it moves, so a finger can slide onto a marker and pick it up.

use super::ImageCropper;
use crate::geometry::Point;
use crate::marker::{Corner, Handle};
use serde::{Deserialize, Serialize};

/// An active contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropTouch {
    pub id: u32,
    /// Last reported pointer position
    pub x: f64,
    pub y: f64,
    /// Marker being dragged, if the contact has hit one
    pub handle: Option<Handle>,
    /// Pointer position relative to the marker when it was picked up
    pub offset: Point,
}

impl CropTouch {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            handle: None,
            offset: Point::default(),
        }
    }
}

/// Cursor the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    /// Diagonal from top-left to bottom-right
    ResizeNwse,
    /// Diagonal from top-right to bottom-left
    ResizeNesw,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Default => "initial",
            Cursor::Move => "move",
            Cursor::ResizeNwse => "nwse-resize",
            Cursor::ResizeNesw => "nesw-resize",
        }
    }
}

impl ImageCropper {
    /// Contact `id` went down at `(x, y)`.
    pub fn on_press(&mut self, id: u32, x: f64, y: f64) -> Cursor {
        if !self.is_image_set() {
            return Cursor::Default;
        }

        // A repeated press for a live id replaces the old contact
        self.release_touch(id);

        let mut touch = CropTouch::new(id, x, y);
        if let Some(handle) = self.hit_test(x, y) {
            self.pick_up(&mut touch, handle);
        }
        self.touches.push(touch);
        self.cursor_for(&touch)
    }

    /// Contact `id` moved to `(x, y)`. Unknown ids are ignored.
    pub fn on_move(&mut self, id: u32, x: f64, y: f64) -> Cursor {
        if !self.is_image_set() {
            return Cursor::Default;
        }
        let Some(index) = self.touches.iter().position(|t| t.id == id) else {
            return Cursor::Default;
        };

        let mut touch = self.touches[index];
        touch.x = x;
        touch.y = y;

        match touch.handle {
            Some(handle) => {
                let target = self.clamp_position(x - touch.offset.x, y - touch.offset.y);
                let target = self.pool.return_point(target);
                match handle {
                    Handle::Corner(corner) => self.drag_corner(target.x, target.y, corner),
                    Handle::Center => self.drag_center(target.x, target.y),
                }
                self.interacting = true;
            }
            None => {
                if let Some(handle) = self.hit_test(x, y) {
                    self.pick_up(&mut touch, handle);
                }
            }
        }

        self.touches[index] = touch;
        self.cursor_for(&touch)
    }

    /// Contact `id` was lifted.
    pub fn on_release(&mut self, id: u32) {
        if !self.is_image_set() {
            return;
        }
        self.release_touch(id);
        if self.touches.is_empty() {
            self.interacting = false;
            self.previous_distance = None;
        }
    }

    /// Pointer hovering at `(x, y)` with no button down.
    ///
    /// Updates hover flags and reports the matching cursor.
    pub fn on_hover(&mut self, x: f64, y: f64) -> Cursor {
        if !self.is_image_set() {
            return Cursor::Default;
        }
        self.hover_cursor(x, y)
    }

    /// Touch record for `id`, if the contact is down.
    pub fn touch(&self, id: u32) -> Option<&CropTouch> {
        self.touches.iter().find(|t| t.id == id)
    }

    /// First marker under `(x, y)`: corners in order, then the center.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Handle> {
        Corner::ALL
            .into_iter()
            .find(|&corner| self.markers.corner(corner).touch_in_bounds(x, y))
            .map(Handle::Corner)
            .or_else(|| {
                self.markers
                    .center()
                    .touch_in_bounds(x, y)
                    .then_some(Handle::Center)
            })
    }

    /// Cursor for a dragged corner, from which side its neighbors lie on.
    pub fn corner_cursor(&self, corner: Corner) -> Cursor {
        let p = self.markers.corner(corner).position;
        let h = self.markers.corner(corner.horizontal_neighbor()).position;
        let v = self.markers.corner(corner.vertical_neighbor()).position;

        match (h.x > p.x, v.y > p.y) {
            (true, true) | (false, false) => Cursor::ResizeNwse,
            (true, false) | (false, true) => Cursor::ResizeNesw,
        }
    }

    fn pick_up(&mut self, touch: &mut CropTouch, handle: Handle) {
        let marker = self.markers.get_mut(handle);
        marker.set_drag(true);
        touch.offset = Point::new(touch.x - marker.position.x, touch.y - marker.position.y);
        touch.handle = Some(handle);
        log::trace!("touch {} picked up {:?}", touch.id, handle);
    }

    fn release_touch(&mut self, id: u32) {
        let Some(index) = self.touches.iter().position(|t| t.id == id) else {
            return;
        };
        let touch = self.touches.remove(index);
        if let Some(handle) = touch.handle {
            let marker = self.markers.get_mut(handle);
            marker.set_drag(false);
            marker.set_hover(false);
            log::trace!("touch {} released {:?}", id, handle);
        }
    }

    /// Clamp a display position into the visible image. Caller returns the point.
    fn clamp_position(&mut self, x: f64, y: f64) -> crate::pool::PooledPoint {
        let (x, y) = match self.viewport {
            Some(vp) => vp.clamp_position(x, y),
            None => (x, y),
        };
        self.pool.borrow_point(x, y)
    }

    fn cursor_for(&mut self, touch: &CropTouch) -> Cursor {
        match touch.handle {
            Some(Handle::Center) => Cursor::Move,
            Some(Handle::Corner(corner)) => {
                self.markers.corner_mut(corner).set_hover(true);
                self.corner_cursor(corner)
            }
            None => self.hover_cursor(touch.x, touch.y),
        }
    }

    fn hover_cursor(&mut self, x: f64, y: f64) -> Cursor {
        let mut cursor = None;
        for corner in Corner::ALL {
            let over = self.markers.corner(corner).touch_in_bounds(x, y);
            self.markers.corner_mut(corner).set_hover(over);
            if over && cursor.is_none() {
                cursor = Some(self.corner_cursor(corner));
            }
        }

        let over_center = cursor.is_none() && self.markers.center().touch_in_bounds(x, y);
        self.markers.center_mut().set_hover(over_center);
        if over_center {
            return Cursor::Move;
        }
        cursor.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::engine;
    use super::*;
    use crate::geometry::Bounds;

    #[test]
    fn test_handlers_inert_without_image() {
        let mut cropper = crate::ImageCropper::new(crate::CropperSettings::default()).unwrap();
        assert_eq!(cropper.on_press(0, 0.0, 0.0), Cursor::Default);
        assert_eq!(cropper.on_move(0, 10.0, 10.0), Cursor::Default);
        cropper.on_release(0);
        assert!(cropper.touches().is_empty());
        assert_eq!(cropper.display_bounds(), Bounds::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_press_on_corner_starts_drag() {
        let mut cropper = engine(false, 10.0, 10.0);
        // TopLeft sits at (0, 50)
        let cursor = cropper.on_press(0, 4.0, 53.0);
        assert_eq!(cursor, Cursor::ResizeNwse);
        let touch = cropper.touch(0).unwrap();
        assert_eq!(touch.handle, Some(Handle::Corner(Corner::TopLeft)));
        assert_eq!(touch.offset, Point::new(4.0, 3.0));
        assert!(cropper.markers().corner(Corner::TopLeft).dragging);
    }

    #[test]
    fn test_move_uses_offset() {
        let mut cropper = engine(false, 10.0, 10.0);
        cropper.on_press(0, 4.0, 53.0);
        cropper.on_move(0, 104.0, 83.0);
        assert_eq!(cropper.display_bounds(), Bounds::new(100.0, 80.0, 400.0, 250.0));
        assert!(cropper.is_interacting());
    }

    #[test]
    fn test_move_clamps_pointer() {
        let mut cropper = engine(false, 10.0, 10.0);
        cropper.on_press(0, 0.0, 50.0);
        cropper.on_move(0, -80.0, -40.0);
        assert_eq!(cropper.display_bounds(), Bounds::new(0.0, 0.0, 400.0, 250.0));
    }

    #[test]
    fn test_press_on_center_moves_region() {
        let mut cropper = engine(false, 10.0, 10.0);
        cropper.update_crop_position(Bounds::new(200.0, 200.0, 400.0, 300.0));
        // Center marker at (150, 125)
        assert_eq!(cropper.on_press(7, 152.0, 125.0), Cursor::Move);
        assert_eq!(cropper.on_move(7, 202.0, 175.0), Cursor::Move);
        assert_eq!(cropper.display_bounds(), Bounds::new(150.0, 150.0, 250.0, 200.0));
    }

    #[test]
    fn test_corners_win_over_center() {
        let mut cropper = engine(false, 0.0, 0.0);
        // A tiny crop puts all markers inside each other's hit regions
        cropper.update_crop_position(Bounds::new(200.0, 200.0, 210.0, 210.0));
        assert_eq!(
            cropper.hit_test(102.0, 102.0),
            Some(Handle::Corner(Corner::TopLeft))
        );
    }

    #[test]
    fn test_miss_then_slide_onto_marker() {
        let mut cropper = engine(false, 10.0, 10.0);
        assert_eq!(cropper.on_press(1, 200.0, 20.0), Cursor::Default);
        assert_eq!(cropper.touch(1).unwrap().handle, None);

        cropper.on_move(1, 398.0, 48.0);
        assert_eq!(
            cropper.touch(1).unwrap().handle,
            Some(Handle::Corner(Corner::TopRight))
        );
        // Pick-up itself does not move anything
        assert_eq!(cropper.display_bounds(), Bounds::new(0.0, 50.0, 400.0, 250.0));
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut cropper = engine(false, 10.0, 10.0);
        cropper.on_press(0, 0.0, 50.0);
        assert_eq!(cropper.on_move(42, 100.0, 100.0), Cursor::Default);
        cropper.on_release(42);
        assert_eq!(cropper.touches().len(), 1);
        assert_eq!(cropper.display_bounds(), Bounds::new(0.0, 50.0, 400.0, 250.0));
    }

    #[test]
    fn test_release_clears_flags() {
        let mut cropper = engine(false, 10.0, 10.0);
        cropper.on_press(0, 0.0, 50.0);
        cropper.on_move(0, 20.0, 60.0);
        cropper.on_release(0);
        let marker = cropper.markers().corner(Corner::TopLeft);
        assert!(!marker.dragging);
        assert!(!marker.hovered);
        assert!(cropper.touches().is_empty());
        assert!(!cropper.is_interacting());
    }

    #[test]
    fn test_two_fingers_drag_two_corners() {
        let mut cropper = engine(false, 10.0, 10.0);
        cropper.on_press(1, 0.0, 50.0);
        cropper.on_press(2, 400.0, 250.0);
        cropper.on_move(1, 50.0, 60.0);
        cropper.on_move(2, 350.0, 240.0);
        assert_eq!(cropper.display_bounds(), Bounds::new(50.0, 60.0, 350.0, 240.0));

        cropper.on_release(1);
        assert!(cropper.is_interacting());
        cropper.on_release(2);
        assert!(!cropper.is_interacting());
    }

    #[test]
    fn test_hover_cursors() {
        let mut cropper = engine(false, 10.0, 10.0);
        assert_eq!(cropper.on_hover(0.0, 50.0), Cursor::ResizeNwse);
        assert!(cropper.markers().corner(Corner::TopLeft).hovered);
        assert_eq!(cropper.on_hover(400.0, 50.0), Cursor::ResizeNesw);
        assert!(!cropper.markers().corner(Corner::TopLeft).hovered);
        assert_eq!(cropper.on_hover(0.0, 250.0), Cursor::ResizeNesw);
        assert_eq!(cropper.on_hover(400.0, 250.0), Cursor::ResizeNwse);
        assert_eq!(cropper.on_hover(200.0, 150.0), Cursor::Move);
        assert!(cropper.center().hovered);
        assert_eq!(cropper.on_hover(100.0, 100.0), Cursor::Default);
        assert!(!cropper.center().hovered);
    }

    #[test]
    fn test_cursor_css_names() {
        assert_eq!(Cursor::Default.css_name(), "initial");
        assert_eq!(Cursor::ResizeNesw.css_name(), "nesw-resize");
    }

    #[test]
    fn test_gestures_return_every_point() {
        let mut cropper = engine(true, 10.0, 10.0);
        cropper.on_press(0, 0.0, 50.0);
        for step in 0..20 {
            let t = step as f64;
            cropper.on_move(0, t * 5.0, 50.0 + t * 3.0);
        }
        cropper.on_release(0);
        assert_eq!(cropper.pool().outstanding(), 0);
        assert_eq!(cropper.pool().borrowed(), cropper.pool().returned());
    }
}

#[cfg(test)]
mod proptests {
    use super::super::test_support::engine;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Press(u32, f64, f64),
        Move(u32, f64, f64),
        Release(u32),
        Pinch(f64, f64, f64, f64),
        Hover(f64, f64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let coord_x = -20.0f64..420.0;
        let coord_y = -20.0f64..320.0;
        prop_oneof![
            (0u32..3, coord_x.clone(), coord_y.clone()).prop_map(|(i, x, y)| Op::Press(i, x, y)),
            (0u32..3, coord_x.clone(), coord_y.clone()).prop_map(|(i, x, y)| Op::Move(i, x, y)),
            (0u32..3).prop_map(Op::Release),
            (coord_x.clone(), coord_y.clone(), coord_x.clone(), coord_y.clone())
                .prop_map(|(a, b, c, d)| Op::Pinch(a, b, c, d)),
            (coord_x, coord_y).prop_map(|(x, y)| Op::Hover(x, y)),
        ]
    }

    proptest! {
        /// Property: no public operation leaves points borrowed, and the
        /// crop stays a contained rectangle of at least the minimum size.
        #[test]
        fn prop_gestures_keep_invariants(
            ops in prop::collection::vec(op_strategy(), 1..60),
            keep_aspect in any::<bool>(),
        ) {
            let mut cropper = engine(keep_aspect, 25.0, 12.0);
            let clamp = cropper.clamp_rect().unwrap();
            for op in ops {
                match op {
                    Op::Press(id, x, y) => { cropper.on_press(id, x, y); }
                    Op::Move(id, x, y) => { cropper.on_move(id, x, y); }
                    Op::Release(id) => cropper.on_release(id),
                    Op::Pinch(x0, y0, x1, y1) => { cropper.on_pinch(x0, y0, x1, y1); }
                    Op::Hover(x, y) => { cropper.on_hover(x, y); }
                }
                let b = cropper.display_bounds();
                prop_assert_eq!(cropper.pool().outstanding(), 0);
                prop_assert_eq!(cropper.pool().borrowed(), cropper.pool().returned());
                prop_assert!(clamp.contains_bounds(&b));
                prop_assert!(b.width() >= 25.0 - 1e-6);
                prop_assert!(b.height() >= 12.0 - 1e-6);
                prop_assert_eq!(cropper.center().position, b.center());
                if keep_aspect {
                    prop_assert!((b.height() / b.width() - 0.5).abs() < 1e-6);
                }
            }
        }
    }
}
