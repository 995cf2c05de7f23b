//! Draggable handles: four corner markers and one center marker.
//!
//! Corners are stored in a fixed array and linked by index. The horizontal
//! neighbor of a corner shares its y coordinate, the vertical neighbor
//! shares its x coordinate, and together they form the 4-cycle
//! `TL - TR - BR - BL - TL`. The links never change after construction.

use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};

/// Identity of a corner marker.
///
/// The names describe where the corner starts out; a free resize may drag a
/// corner past its neighbors, after which the name is only an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    /// All corners in hit-test priority order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    const HORIZONTAL: [Corner; 4] = [
        Corner::TopRight,
        Corner::TopLeft,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    const VERTICAL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopLeft,
        Corner::TopRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The corner sharing this corner's y coordinate.
    #[inline]
    pub fn horizontal_neighbor(self) -> Corner {
        Self::HORIZONTAL[self.index()]
    }

    /// The corner sharing this corner's x coordinate.
    #[inline]
    pub fn vertical_neighbor(self) -> Corner {
        Self::VERTICAL[self.index()]
    }

    /// The diagonally opposite corner: the anchor of a resize.
    #[inline]
    pub fn diagonal(self) -> Corner {
        self.horizontal_neighbor().vertical_neighbor()
    }
}

/// What a touch is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    Corner(Corner),
    Center,
}

/// A positioned, touchable handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Point,
    pub touch_radius: f64,
    pub dragging: bool,
    pub hovered: bool,
}

impl Marker {
    pub fn new(x: f64, y: f64, touch_radius: f64) -> Self {
        Self {
            position: Point::new(x, y),
            touch_radius,
            dragging: false,
            hovered: false,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    pub fn move_x(&mut self, x: f64) {
        self.position.x = x;
    }

    pub fn move_y(&mut self, y: f64) {
        self.position.y = y;
    }

    /// Whether `(x, y)` lies in the square hit region around the marker.
    pub fn touch_in_bounds(&self, x: f64, y: f64) -> bool {
        (x - self.position.x).abs() <= self.touch_radius
            && (y - self.position.y).abs() <= self.touch_radius
    }

    pub fn set_drag(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn set_hover(&mut self, hovered: bool) {
        self.hovered = hovered;
    }
}

/// The four corner markers plus the center marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSet {
    corners: [Marker; 4],
    center: Marker,
}

impl MarkerSet {
    /// Place the markers on `bounds`.
    pub fn new(bounds: Bounds, touch_radius: f64, center_touch_radius: f64) -> Self {
        let c = bounds.center();
        Self {
            corners: [
                Marker::new(bounds.left, bounds.top, touch_radius),
                Marker::new(bounds.right, bounds.top, touch_radius),
                Marker::new(bounds.left, bounds.bottom, touch_radius),
                Marker::new(bounds.right, bounds.bottom, touch_radius),
            ],
            center: Marker::new(c.x, c.y, center_touch_radius),
        }
    }

    #[inline]
    pub fn corner(&self, corner: Corner) -> &Marker {
        &self.corners[corner.index()]
    }

    #[inline]
    pub fn corner_mut(&mut self, corner: Corner) -> &mut Marker {
        &mut self.corners[corner.index()]
    }

    pub fn corners(&self) -> &[Marker; 4] {
        &self.corners
    }

    pub fn center(&self) -> &Marker {
        &self.center
    }

    pub fn center_mut(&mut self) -> &mut Marker {
        &mut self.center
    }

    pub fn get_mut(&mut self, handle: Handle) -> &mut Marker {
        match handle {
            Handle::Corner(corner) => self.corner_mut(corner),
            Handle::Center => &mut self.center,
        }
    }

    /// Axis-aligned extents of the four corners.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for marker in &self.corners {
            bounds.left = bounds.left.min(marker.position.x);
            bounds.right = bounds.right.max(marker.position.x);
            bounds.top = bounds.top.min(marker.position.y);
            bounds.bottom = bounds.bottom.max(marker.position.y);
        }
        bounds
    }

    /// Move a corner and carry the shared coordinates to its neighbors.
    pub fn move_corner(&mut self, corner: Corner, x: f64, y: f64) {
        self.corner_mut(corner).set_position(x, y);
        self.corner_mut(corner.vertical_neighbor()).move_x(x);
        self.corner_mut(corner.horizontal_neighbor()).move_y(y);
    }

    /// Put the center marker on the midpoint of the corners.
    pub fn recenter(&mut self) {
        let c = self.bounds().center();
        self.center.set_position(c.x, c.y);
    }

    /// Reset every corner to the side its name describes.
    pub fn place(&mut self, bounds: Bounds) {
        self.corner_mut(Corner::TopLeft)
            .set_position(bounds.left, bounds.top);
        self.corner_mut(Corner::TopRight)
            .set_position(bounds.right, bounds.top);
        self.corner_mut(Corner::BottomLeft)
            .set_position(bounds.left, bounds.bottom);
        self.corner_mut(Corner::BottomRight)
            .set_position(bounds.right, bounds.bottom);
        let c = bounds.center();
        self.center.set_position(c.x, c.y);
    }

    /// Move the corners onto `bounds`, keeping each corner on its side.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        let current = self.bounds();
        for marker in &mut self.corners {
            let x = if marker.position.x == current.left {
                bounds.left
            } else {
                bounds.right
            };
            let y = if marker.position.y == current.top {
                bounds.top
            } else {
                bounds.bottom
            };
            marker.set_position(x, y);
        }
        let c = bounds.center();
        self.center.set_position(c.x, c.y);
    }

    /// Update hit radii without touching positions.
    pub fn set_touch_radii(&mut self, touch_radius: f64, center_touch_radius: f64) {
        for marker in &mut self.corners {
            marker.touch_radius = touch_radius;
        }
        self.center.touch_radius = center_touch_radius;
    }

    /// Drop every drag and hover flag.
    pub fn clear_flags(&mut self) {
        for marker in self.corners.iter_mut().chain(std::iter::once(&mut self.center)) {
            marker.set_drag(false);
            marker.set_hover(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_set() -> MarkerSet {
        MarkerSet::new(Bounds::new(0.0, 0.0, 100.0, 50.0), 10.0, 20.0)
    }

    #[test]
    fn test_neighbor_graph_is_symmetric_cycle() {
        for corner in Corner::ALL {
            assert_eq!(corner.horizontal_neighbor().horizontal_neighbor(), corner);
            assert_eq!(corner.vertical_neighbor().vertical_neighbor(), corner);
            assert_ne!(corner.horizontal_neighbor(), corner.vertical_neighbor());
            assert_ne!(corner.diagonal(), corner);
        }
        assert_eq!(Corner::TopLeft.diagonal(), Corner::BottomRight);
        assert_eq!(Corner::TopRight.diagonal(), Corner::BottomLeft);
    }

    #[test]
    fn test_neighbors_share_coordinates() {
        let set = unit_set();
        for corner in Corner::ALL {
            let p = set.corner(corner).position;
            assert_eq!(set.corner(corner.horizontal_neighbor()).position.y, p.y);
            assert_eq!(set.corner(corner.vertical_neighbor()).position.x, p.x);
        }
    }

    #[test]
    fn test_bounds_and_center() {
        let set = unit_set();
        assert_eq!(set.bounds(), Bounds::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(set.center().position, Point::new(50.0, 25.0));
    }

    #[test]
    fn test_move_corner_keeps_rectangle() {
        let mut set = unit_set();
        set.move_corner(Corner::TopLeft, 20.0, 10.0);
        assert_eq!(set.corner(Corner::TopLeft).position, Point::new(20.0, 10.0));
        assert_eq!(set.corner(Corner::BottomLeft).position, Point::new(20.0, 50.0));
        assert_eq!(set.corner(Corner::TopRight).position, Point::new(100.0, 10.0));
        assert_eq!(set.corner(Corner::BottomRight).position, Point::new(100.0, 50.0));
        assert_eq!(set.bounds(), Bounds::new(20.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn test_touch_in_bounds_square_region() {
        let marker = Marker::new(50.0, 50.0, 10.0);
        assert!(marker.touch_in_bounds(60.0, 40.0));
        assert!(!marker.touch_in_bounds(60.1, 50.0));
    }

    #[test]
    fn test_set_bounds_keeps_sides() {
        let mut set = unit_set();
        set.set_bounds(Bounds::new(10.0, 5.0, 90.0, 45.0));
        assert_eq!(set.corner(Corner::TopLeft).position, Point::new(10.0, 5.0));
        assert_eq!(set.corner(Corner::BottomRight).position, Point::new(90.0, 45.0));
        assert_eq!(set.center().position, Point::new(50.0, 25.0));
    }

    #[test]
    fn test_handle_lookup() {
        let mut set = unit_set();
        set.get_mut(Handle::Center).set_drag(true);
        assert!(set.center().dragging);
        assert_eq!(set.get_mut(Handle::Corner(Corner::TopRight)).position.x, 100.0);
        set.clear_flags();
        assert!(!set.center().dragging);
    }
}
