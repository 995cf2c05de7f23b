//! Reusable storage for intermediate points.
//!
//! Every drag frame produces a handful of temporary points (probe points,
//! clamped pointer positions, min-size candidates). The pool keeps their
//! slots alive between frames so the hot path does not allocate.
//!
//! # Discipline
//!
//! Borrowing is strictly LIFO inside one synchronous call chain: a point is
//! returned before the function that borrowed it returns, and never kept
//! across event handlers. [`PooledPoint`] is neither `Clone` nor `Copy`, and
//! [`PointPool::return_point`] consumes it, so reading a point after
//! returning it does not compile. Slot generations add a debug-build check
//! against handles that leak in from another pool.

use crate::geometry::Point;

/// Default number of pre-allocated slots.
pub const DEFAULT_CAPACITY: usize = 200;

/// Handle to a borrowed point. Must be handed back with [`PointPool::return_point`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "borrowed points must be returned to the pool"]
pub struct PooledPoint {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    point: Point,
    generation: u32,
    in_use: bool,
}

/// Growable pool of [`Point`] slots.
#[derive(Debug)]
pub struct PointPool {
    slots: Vec<Slot>,
    /// Indices of free slots; the most recently returned is reused first
    free: Vec<usize>,
    borrowed: u64,
    returned: u64,
}

impl Default for PointPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PointPool {
    /// Create a pool with `capacity` pre-allocated slots.
    pub fn new(capacity: usize) -> Self {
        let slots = vec![
            Slot {
                point: Point::default(),
                generation: 0,
                in_use: false,
            };
            capacity
        ];
        // Reverse so slot 0 is handed out first
        let free = (0..capacity).rev().collect();
        Self {
            slots,
            free,
            borrowed: 0,
            returned: 0,
        }
    }

    /// Borrow a point initialized to `(x, y)`.
    ///
    /// Reuses a free slot when one exists, otherwise grows the pool.
    pub fn borrow_point(&mut self, x: f64, y: f64) -> PooledPoint {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    point: Point::default(),
                    generation: 0,
                    in_use: false,
                });
                log::trace!("point pool grew to {} slots", self.slots.len());
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[index];
        slot.point = Point::new(x, y);
        slot.in_use = true;
        self.borrowed += 1;
        PooledPoint {
            index,
            generation: slot.generation,
        }
    }

    /// Read the current value of a borrowed point.
    #[inline]
    pub fn get(&self, handle: &PooledPoint) -> Point {
        let slot = &self.slots[handle.index];
        debug_assert!(
            slot.in_use && slot.generation == handle.generation,
            "stale point handle"
        );
        slot.point
    }

    /// Overwrite a borrowed point.
    #[inline]
    pub fn set(&mut self, handle: &PooledPoint, x: f64, y: f64) {
        let slot = &mut self.slots[handle.index];
        debug_assert!(
            slot.in_use && slot.generation == handle.generation,
            "stale point handle"
        );
        slot.point = Point::new(x, y);
    }

    /// Give a point back, returning its final value.
    pub fn return_point(&mut self, handle: PooledPoint) -> Point {
        let slot = &mut self.slots[handle.index];
        debug_assert!(
            slot.in_use && slot.generation == handle.generation,
            "point returned twice"
        );
        slot.in_use = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.returned += 1;
        slot.point
    }

    /// Total slots, free or borrowed.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of `borrow_point` calls so far.
    pub fn borrowed(&self) -> u64 {
        self.borrowed
    }

    /// Number of `return_point` calls so far.
    pub fn returned(&self) -> u64 {
        self.returned
    }

    /// Points currently out of the pool.
    pub fn outstanding(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
