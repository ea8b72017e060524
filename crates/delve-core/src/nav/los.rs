//! Line of sight through the grid
//!
//! [`GridRaycaster`] visits every cell a ray passes through, in order, using
//! the voxel traversal of Amanatides and Woo ("A Fast Voxel Traversal
//! Algorithm for Ray Tracing", 1987) reduced to two dimensions.

use super::coord::{GridPos, WorldPos};
use crate::dungeon::Dungeon;

/// Answers whether a straight segment is obstructed
pub trait ObstacleOracle {
    /// Check if anything blocks the ray from `origin` along `direction`
    /// within `max_distance`
    ///
    /// `direction` need not be normalized.
    fn raycast_blocked(&self, origin: WorldPos, direction: WorldPos, max_distance: f32) -> bool;

    /// Check if the straight segment between two points is unobstructed
    fn line_clear(&self, from: WorldPos, to: WorldPos) -> bool {
        !self.raycast_blocked(from, to - from, from.distance(to))
    }
}

/// One cell visited by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastStep {
    pub cell: GridPos,
    /// Distance along the ray at which the cell is entered; 0 for the origin
    /// cell
    pub t_enter: f32,
}

/// Iterates over the cells a ray passes through
///
/// The iterator is unbounded; callers stop it by distance or by leaving the
/// area they care about. A zero or non-finite direction yields only the
/// origin cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRaycaster {
    /// Have we not yet produced the origin cell itself?
    emit_current: bool,
    /// Cell we're in; always the next cell to return from the iterator.
    cell: GridPos,
    /// Which way to move `cell` when stepping; signum of the direction.
    step: (i32, i32),
    // t at which the ray next crosses a cell boundary on each axis; the
    // smaller one is the next boundary crossed.
    t_max: (f32, f32),
    /// Change in t for a full cell step on each axis. Always positive.
    t_delta: (f32, f32),
    /// t at which the current cell was entered
    t_enter: f32,
}

fn signum(x: f32) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Smallest positive t such that `s + t * ds` is an integer
fn scale_to_integer_step(s: f32, ds: f32) -> f32 {
    if ds < 0.0 {
        scale_to_integer_step(-s, -ds)
    } else if ds > 0.0 {
        let s = s.rem_euclid(1.0);
        (1.0 - s) / ds
    } else {
        f32::INFINITY
    }
}

impl GridRaycaster {
    /// Start a ray; `direction` is normalized so that t is a distance
    pub fn new(origin: WorldPos, direction: WorldPos) -> Self {
        let dir = direction.normalize().unwrap_or(WorldPos::ZERO);
        Self {
            emit_current: true,
            cell: origin.cell(),
            step: (signum(dir.x), signum(dir.y)),
            t_max: (
                scale_to_integer_step(origin.x, dir.x),
                scale_to_integer_step(origin.y, dir.y),
            ),
            t_delta: (dir.x.abs().recip(), dir.y.abs().recip()),
            t_enter: 0.0,
        }
    }

    fn valid_for_stepping(&self) -> bool {
        self.step != (0, 0) && (self.t_max.0.is_finite() || self.t_max.1.is_finite())
    }

    fn step(&mut self) {
        if self.t_max.0 < self.t_max.1 {
            self.cell.x += self.step.0;
            self.t_enter = self.t_max.0;
            self.t_max.0 += self.t_delta.0;
        } else {
            self.cell.y += self.step.1;
            self.t_enter = self.t_max.1;
            self.t_max.1 += self.t_delta.1;
        }
    }
}

impl Iterator for GridRaycaster {
    type Item = RaycastStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emit_current {
            self.emit_current = false;
        } else {
            if !self.valid_for_stepping() {
                return None;
            }
            self.step();
        }
        Some(RaycastStep {
            cell: self.cell,
            t_enter: self.t_enter,
        })
    }
}

/// Walls and the space off the grid block rays
impl ObstacleOracle for Dungeon {
    fn raycast_blocked(&self, origin: WorldPos, direction: WorldPos, max_distance: f32) -> bool {
        if !max_distance.is_finite() || max_distance < 0.0 {
            return false;
        }
        for step in GridRaycaster::new(origin, direction) {
            if step.t_enter > max_distance {
                return false;
            }
            if !self.is_walkable(step.cell.x, step.cell.y) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Room;

    fn cells(origin: WorldPos, direction: WorldPos, n: usize) -> Vec<GridPos> {
        GridRaycaster::new(origin, direction)
            .take(n)
            .map(|s| s.cell)
            .collect()
    }

    #[test]
    fn test_axis_aligned_ray() {
        assert_eq!(
            cells(WorldPos::new(0.5, 0.5), WorldPos::new(1.0, 0.0), 4),
            vec![
                GridPos::new(0, 0),
                GridPos::new(1, 0),
                GridPos::new(2, 0),
                GridPos::new(3, 0)
            ]
        );
        assert_eq!(
            cells(WorldPos::new(2.5, 2.5), WorldPos::new(0.0, -3.0), 3),
            vec![GridPos::new(2, 2), GridPos::new(2, 1), GridPos::new(2, 0)]
        );
    }

    #[test]
    fn test_shallow_diagonal_ray() {
        let visited = cells(WorldPos::new(0.5, 0.5), WorldPos::new(2.0, 1.0), 5);
        assert_eq!(
            visited,
            vec![
                GridPos::new(0, 0),
                GridPos::new(1, 0),
                GridPos::new(1, 1),
                GridPos::new(2, 1),
                GridPos::new(3, 1),
            ]
        );
    }

    #[test]
    fn test_zero_direction_only_origin() {
        assert_eq!(
            cells(WorldPos::new(3.2, 4.7), WorldPos::ZERO, 10),
            vec![GridPos::new(3, 4)]
        );
        assert_eq!(
            cells(WorldPos::new(3.2, 4.7), WorldPos::new(f32::NAN, 1.0), 10),
            vec![GridPos::new(3, 4)]
        );
    }

    #[test]
    fn test_entry_distances_increase() {
        let steps: Vec<RaycastStep> =
            GridRaycaster::new(WorldPos::new(0.3, 0.7), WorldPos::new(-1.0, 3.0))
                .take(10)
                .collect();
        assert_eq!(steps[0].t_enter, 0.0);
        for pair in steps.windows(2) {
            assert!(pair[1].t_enter >= pair[0].t_enter);
        }
    }

    #[test]
    fn test_dungeon_line_of_sight() {
        let mut dungeon = Dungeon::new(10, 5);
        dungeon.add_room(Room::new(0, 0, 10, 5));
        let a = WorldPos::new(1.5, 2.5);
        let b = WorldPos::new(8.5, 2.5);
        assert!(dungeon.line_clear(a, b));

        let mut blocked = Dungeon::new(10, 5);
        blocked.add_room(Room::new(0, 0, 5, 5));
        blocked.add_room(Room::new(6, 0, 4, 5));
        assert!(!blocked.line_clear(a, b));
        assert!(blocked.raycast_blocked(a, WorldPos::new(1.0, 0.0), 10.0));
        assert!(!blocked.raycast_blocked(a, WorldPos::new(1.0, 0.0), 2.0));
    }

    #[test]
    fn test_leaving_grid_blocks() {
        let mut dungeon = Dungeon::new(4, 4);
        dungeon.add_room(Room::new(0, 0, 4, 4));
        let origin = WorldPos::new(2.5, 2.5);
        assert!(dungeon.raycast_blocked(origin, WorldPos::new(0.0, 1.0), 5.0));
        assert!(!dungeon.raycast_blocked(origin, WorldPos::new(0.0, 1.0), 1.0));
    }
}
