//! Dungeon generation
//!
//! Contains the cell grid, rooms, the two room layout strategies, corridor
//! routing, start/exit selection and spawn placement.

mod cell;
mod corridor;
mod generation;
mod grid;
mod layout;
mod partition;
mod placement;
mod rect;
mod room;
mod spawn;
pub mod wall;

pub use cell::CellKind;
pub use corridor::{
    carve_corridor, connect_nearest_with_loops, connect_sequential, corridor_cells,
    route_corridors, Bend, ConnectivityTracker, CorridorStyle,
};
pub use generation::{generate_dungeon, LevelSequence};
pub use grid::{Dungeon, GridPos};
pub use layout::{LayoutKind, LayoutStrategy, RejectionSampler};
pub use partition::SpacePartitioner;
pub use placement::{exit_candidates, select_start_and_exit, ExitPlacement};
pub use rect::{Region, SplitAxis};
pub use room::{Room, RoomId};
pub use spawn::{spawn_positions, SpawnRules, SpawnStrategy, NEARBY_RADIUS};
pub use wall::{classify, is_straight_wall, neighbor_mask, NeighborMask, WallShape};
