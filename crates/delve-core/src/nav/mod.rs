//! Grid navigation
//!
//! A* pathfinding over a generated [`Dungeon`](crate::dungeon::Dungeon),
//! coordinate conversion, line-of-sight queries, and a per-agent path
//! follower that limits how often paths are recomputed.

mod coord;
mod follower;
mod los;
mod pathfinding;

pub use coord::{grid_to_world, world_to_grid, GridPos, WorldPos};
pub use follower::{PathFollower, Steering};
pub use los::{GridRaycaster, ObstacleOracle, RaycastStep};
pub use pathfinding::{nearest_walkable, Path, Pathfinder};
