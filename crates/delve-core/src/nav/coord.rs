//! Grid and world coordinates
//!
//! Cell `(x, y)` covers world space `[x, x+1) x [y, y+1)`. Paths are made of
//! cell centres.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

pub use crate::dungeon::GridPos;
use crate::dungeon::Dungeon;

/// Continuous position in dungeon space; also used for direction vectors
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const ZERO: WorldPos = WorldPos::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: WorldPos) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero or
    /// non-finite vector
    pub fn normalize(self) -> Option<WorldPos> {
        let len = self.length();
        if len > f32::EPSILON && len.is_finite() {
            Some(WorldPos::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// The cell containing this point, without clamping
    pub fn cell(self) -> GridPos {
        GridPos::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Add for WorldPos {
    type Output = WorldPos;

    fn add(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPos {
    type Output = WorldPos;

    fn sub(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for WorldPos {
    type Output = WorldPos;

    fn mul(self, rhs: f32) -> WorldPos {
        WorldPos::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Centre of a cell
pub fn grid_to_world(cell: GridPos) -> WorldPos {
    WorldPos::new(cell.x as f32 + 0.5, cell.y as f32 + 0.5)
}

/// Cell containing a point, clamped onto the grid
pub fn world_to_grid(pos: WorldPos, dungeon: &Dungeon) -> GridPos {
    let cell = pos.cell();
    let max_x = dungeon.width() as i32 - 1;
    let max_y = dungeon.height() as i32 - 1;
    GridPos::new(cell.x.min(max_x).max(0), cell.y.min(max_y).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_world_is_cell_centre() {
        assert_eq!(grid_to_world(GridPos::new(3, 4)), WorldPos::new(3.5, 4.5));
        assert_eq!(grid_to_world(GridPos::new(0, 0)), WorldPos::new(0.5, 0.5));
    }

    #[test]
    fn test_world_to_grid_floors_and_clamps() {
        let dungeon = Dungeon::new(10, 8);
        assert_eq!(world_to_grid(WorldPos::new(3.9, 4.1), &dungeon), GridPos::new(3, 4));
        assert_eq!(world_to_grid(WorldPos::new(-0.2, 2.0), &dungeon), GridPos::new(0, 2));
        assert_eq!(world_to_grid(WorldPos::new(25.0, 99.0), &dungeon), GridPos::new(9, 7));
        assert_eq!(world_to_grid(WorldPos::new(-3.0, -3.0), &dungeon), GridPos::new(0, 0));
    }

    #[test]
    fn test_round_trip_through_centre() {
        let dungeon = Dungeon::new(10, 10);
        for x in 0..10 {
            for y in 0..10 {
                let cell = GridPos::new(x, y);
                assert_eq!(world_to_grid(grid_to_world(cell), &dungeon), cell);
            }
        }
    }

    #[test]
    fn test_vector_ops() {
        let a = WorldPos::new(1.0, 2.0);
        let b = WorldPos::new(4.0, 6.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b - a, WorldPos::new(3.0, 4.0));
        assert_eq!(a + a * 2.0, WorldPos::new(3.0, 6.0));
        let unit = (b - a).normalize().unwrap();
        assert!((unit.length() - 1.0).abs() < 1e-6);
        assert!(WorldPos::ZERO.normalize().is_none());
        assert!(WorldPos::new(f32::NAN, 0.0).normalize().is_none());
    }
}
