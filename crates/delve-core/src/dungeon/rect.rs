//! Rectangular regions for space partitioning
//!
//! A region is a block of the grid the partitioner may split further or
//! turn into a room. Coordinates follow [`Room`]: `(x, y)` is the lower-left
//! corner and the extent is exclusive.

use serde::{Deserialize, Serialize};

use super::Room;

/// Split direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitAxis {
    /// Cut with a horizontal line, giving a lower and an upper half
    Horizontal,
    /// Cut with a vertical line, giving a left and a right half
    Vertical,
}

/// A rectangle of grid space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Create a new region
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Side length along the axis a split would cut
    pub fn extent(&self, axis: SplitAxis) -> i32 {
        match axis {
            SplitAxis::Horizontal => self.height,
            SplitAxis::Vertical => self.width,
        }
    }

    /// Check if the region has room for two halves of at least `min`
    pub fn can_split(&self, axis: SplitAxis, min: i32) -> bool {
        self.extent(axis) >= min.saturating_mul(2)
    }

    /// Cut the region `offset` cells from its lower or left edge
    ///
    /// Returns `None` if either half would be empty.
    pub fn split(&self, axis: SplitAxis, offset: i32) -> Option<(Region, Region)> {
        if offset <= 0 || offset >= self.extent(axis) {
            return None;
        }
        Some(match axis {
            SplitAxis::Horizontal => (
                Region::new(self.x, self.y, self.width, offset),
                Region::new(self.x, self.y + offset, self.width, self.height - offset),
            ),
            SplitAxis::Vertical => (
                Region::new(self.x, self.y, offset, self.height),
                Region::new(self.x + offset, self.y, self.width - offset, self.height),
            ),
        })
    }

    /// Shrink every side by `offset` and turn the rest into a room
    ///
    /// Returns `None` if nothing is left.
    pub fn inset(&self, offset: i32) -> Option<Room> {
        let width = self.width.saturating_sub(offset.saturating_mul(2));
        let height = self.height.saturating_sub(offset.saturating_mul(2));
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Room::new(self.x + offset, self.y + offset, width, height))
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }
}
