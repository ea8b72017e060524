//! Start and exit selection
//!
//! The start is the centre of a random room. The exit is cut into a straight
//! stretch of wall around a room chosen to be away from the start: a room
//! with no direct corridor to the start room if there is one, else any other
//! room, else the start room itself.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::wall::is_straight_wall;
use super::{Dungeon, GridPos, RoomId};
use crate::rng::DungeonRng;

/// Outcome of exit anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitPlacement {
    /// Exit marked on a straight wall next to `room`
    Anchored { room: RoomId, cell: GridPos },
    /// `room` has no straight wall cell around it; no exit was marked
    NoWallCandidate { room: RoomId },
    /// The dungeon has no rooms
    NoRooms,
}

impl ExitPlacement {
    pub fn is_anchored(&self) -> bool {
        matches!(self, ExitPlacement::Anchored { .. })
    }
}

/// Rooms the exit may go in, most preferred group first
fn exit_room_candidates(dungeon: &Dungeon, start_room: RoomId) -> Vec<RoomId> {
    let Some(start) = dungeon.room(start_room) else {
        return Vec::new();
    };
    let others: Vec<RoomId> = (0..dungeon.rooms().len())
        .map(RoomId)
        .filter(|&id| id != start_room)
        .collect();
    let unconnected: Vec<RoomId> = others
        .iter()
        .copied()
        .filter(|&id| !start.is_connected_to(id))
        .collect();

    if !unconnected.is_empty() {
        unconnected
    } else if !others.is_empty() {
        others
    } else {
        vec![start_room]
    }
}

/// Straight wall cells in the one-cell ring around a room
pub fn exit_candidates(dungeon: &Dungeon, room: RoomId) -> Vec<GridPos> {
    let Some(room) = dungeon.room(room) else {
        return Vec::new();
    };
    let mut cells = Vec::new();
    for x in room.x - 1..=room.right() {
        for y in room.y - 1..=room.top() {
            let on_ring = x == room.x - 1 || x == room.right() || y == room.y - 1 || y == room.top();
            let pos = GridPos::new(x, y);
            if on_ring && is_straight_wall(dungeon, pos) {
                cells.push(pos);
            }
        }
    }
    cells
}

/// Mark the start and exit cells
///
/// The outcome is also recorded on the dungeon.
pub fn select_start_and_exit(dungeon: &mut Dungeon, rng: &mut DungeonRng) -> ExitPlacement {
    let room_count = dungeon.rooms().len();
    if room_count == 0 {
        warn!("no rooms to place a start or exit in");
        dungeon.set_exit_placement(ExitPlacement::NoRooms);
        return ExitPlacement::NoRooms;
    }

    let start_room = RoomId(rng.below(room_count));
    if let Some(center) = dungeon.room(start_room).map(|r| r.center()) {
        dungeon.set_start(center.x, center.y);
    }
    dungeon.set_start_room(Some(start_room));

    let candidates = exit_room_candidates(dungeon, start_room);
    let exit_room = rng.choose(&candidates).copied().unwrap_or(start_room);
    dungeon.set_exit_room(Some(exit_room));

    let walls = exit_candidates(dungeon, exit_room);
    let placement = match rng.choose(&walls) {
        Some(&cell) => {
            dungeon.set_exit(cell.x, cell.y);
            ExitPlacement::Anchored {
                room: exit_room,
                cell,
            }
        }
        None => {
            warn!("room {exit_room} has no straight wall for an exit");
            ExitPlacement::NoWallCandidate { room: exit_room }
        }
    };
    debug!(
        "start {:?} in room {start_room}, exit {placement:?}",
        dungeon.start()
    );
    dungeon.set_exit_placement(placement);
    placement
}
