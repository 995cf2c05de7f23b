//! Translating the whole crop region by its center marker.

use super::ImageCropper;
use crate::geometry::Bounds;

impl ImageCropper {
    /// Move the crop so its center lands on `(x, y)`, stopping at the clamp edges.
    ///
    /// Width, height and ratio are never changed.
    pub fn drag_center(&mut self, x: f64, y: f64) {
        let Some(clamp) = self.clamp_rect() else {
            return;
        };

        let bounds = self.markers.bounds();
        let half_w = bounds.width() / 2.0;
        let half_h = bounds.height() / 2.0;

        let center = self.pool.borrow_point(x, y);
        let mut c = self.pool.get(&center);
        if c.x + half_w >= clamp.max_x {
            c.x = clamp.max_x - half_w;
        }
        if c.x - half_w <= clamp.min_x {
            c.x = clamp.min_x + half_w;
        }
        if c.y - half_h < clamp.min_y {
            c.y = clamp.min_y + half_h;
        }
        if c.y + half_h >= clamp.max_y {
            c.y = clamp.max_y - half_h;
        }
        self.pool.set(&center, c.x, c.y);
        let c = self.pool.return_point(center);

        self.markers.set_bounds(Bounds::new(
            c.x - half_w,
            c.y - half_h,
            c.x + half_w,
            c.y + half_h,
        ));
    }
}
