//! Corridor routing
//!
//! Corridors are L-shaped runs of floor between two room centres. Two
//! routers decide which rooms to join:
//! - Sequential: room i to room i-1, random bend
//! - Nearest with loops: grow a connected set from a random room, joining
//!   each new room to its nearest connected neighbour plus a few random
//!   extra edges for cycles
//!
//! Both leave every room reachable from every other.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Dungeon, GridPos, RoomId};
use crate::config::GenerationConfig;
use crate::rng::DungeonRng;

/// Tracks room connectivity using equivalence classes
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    /// Each room's equivalence class (rooms in same class are connected)
    classes: Vec<usize>,
}

impl ConnectivityTracker {
    /// Create a new tracker for the given number of rooms
    pub fn new(num_rooms: usize) -> Self {
        Self {
            classes: (0..num_rooms).collect(),
        }
    }

    /// Check if two rooms are connected (in same equivalence class)
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        if a >= self.classes.len() || b >= self.classes.len() {
            return false;
        }
        self.classes[a] == self.classes[b]
    }

    /// Merge equivalence classes when rooms are connected
    pub fn merge(&mut self, a: usize, b: usize) {
        if a >= self.classes.len() || b >= self.classes.len() {
            return;
        }

        let old_class = self.classes[b];
        let new_class = self.classes[a];

        for eq in &mut self.classes {
            if *eq == old_class {
                *eq = new_class;
            }
        }
    }

    /// Check if all rooms are connected
    pub fn all_connected(&self) -> bool {
        match self.classes.first() {
            None => true,
            Some(&first) => self.classes.iter().all(|&c| c == first),
        }
    }

    /// Number of separate groups
    pub fn component_count(&self) -> usize {
        let mut classes = self.classes.clone();
        classes.sort_unstable();
        classes.dedup();
        classes.len()
    }
}

/// Which leg of an L-shaped corridor comes first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Bend {
    /// Walk the start column, then the end row
    VerticalFirst,
    /// Walk the start row, then the end column
    HorizontalFirst,
}

impl Bend {
    fn random(rng: &mut DungeonRng) -> Self {
        if rng.coin() {
            Bend::HorizontalFirst
        } else {
            Bend::VerticalFirst
        }
    }

    /// The corner cell where the two legs meet
    pub fn corner(&self, from: GridPos, to: GridPos) -> GridPos {
        match self {
            Bend::VerticalFirst => GridPos::new(from.x, to.y),
            Bend::HorizontalFirst => GridPos::new(to.x, from.y),
        }
    }
}

/// Which rooms get joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum CorridorStyle {
    /// Each room to the one placed before it
    Sequential,
    /// Nearest connected room, plus random extra edges
    NearestWithLoops,
}

fn carve_column(dungeon: &mut Dungeon, x: i32, y0: i32, y1: i32) {
    for y in y0.min(y1)..=y0.max(y1) {
        dungeon.add_floor(x, y);
    }
}

fn carve_row(dungeon: &mut Dungeon, y: i32, x0: i32, x1: i32) {
    for x in x0.min(x1)..=x0.max(x1) {
        dungeon.add_floor(x, y);
    }
}

/// Carve an L-shaped corridor, both endpoints included
pub fn carve_corridor(dungeon: &mut Dungeon, from: GridPos, to: GridPos, bend: Bend) {
    match bend {
        Bend::VerticalFirst => {
            carve_column(dungeon, from.x, from.y, to.y);
            carve_row(dungeon, to.y, from.x, to.x);
        }
        Bend::HorizontalFirst => {
            carve_row(dungeon, from.y, from.x, to.x);
            carve_column(dungeon, to.x, from.y, to.y);
        }
    }
}

/// Every cell an L-shaped corridor covers, corner counted once
pub fn corridor_cells(from: GridPos, to: GridPos, bend: Bend) -> Vec<GridPos> {
    let corner = bend.corner(from, to);
    let mut cells = Vec::new();
    let mut leg = |a: GridPos, b: GridPos| {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                let p = GridPos::new(x, y);
                if !cells.contains(&p) {
                    cells.push(p);
                }
            }
        }
    };
    leg(from, corner);
    leg(corner, to);
    cells
}

/// Carve a corridor between two room centres and record the edge
fn join(dungeon: &mut Dungeon, a: RoomId, b: RoomId, bend: Bend) -> bool {
    let (Some(from), Some(to)) = (
        dungeon.room(a).map(|r| r.center()),
        dungeon.room(b).map(|r| r.center()),
    ) else {
        return false;
    };
    trace!("corridor {a} {from} -> {b} {to} ({bend})");
    carve_corridor(dungeon, from, to, bend);
    dungeon.connect_rooms(a, b);
    true
}

/// Join each room to the one before it
///
/// Returns the number of corridors carved.
pub fn connect_sequential(dungeon: &mut Dungeon, rng: &mut DungeonRng) -> usize {
    let mut carved = 0;
    for i in 1..dungeon.rooms().len() {
        let bend = Bend::random(rng);
        if join(dungeon, RoomId(i - 1), RoomId(i), bend) {
            carved += 1;
        }
    }
    carved
}

/// Nearest connected room to `room` by centre distance; first one wins ties
fn nearest_connected(dungeon: &Dungeon, room: RoomId, connected: &[RoomId]) -> Option<RoomId> {
    let here = dungeon.room(room)?;
    let mut best: Option<(RoomId, f32)> = None;
    for &candidate in connected {
        let Some(other) = dungeon.room(candidate) else {
            continue;
        };
        let distance = here.center_distance(other);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Grow a connected set from a random room, adding loops as it goes
///
/// Returns the number of corridors carved.
pub fn connect_nearest_with_loops(
    dungeon: &mut Dungeon,
    max_extra_connections: usize,
    rng: &mut DungeonRng,
) -> usize {
    let mut pending: Vec<RoomId> = (0..dungeon.rooms().len()).map(RoomId).collect();
    rng.shuffle(&mut pending);
    let mut pending = pending.into_iter();

    let Some(first) = pending.next() else {
        return 0;
    };
    let mut connected = vec![first];
    let mut carved = 0;

    for current in pending {
        let Some(nearest) = nearest_connected(dungeon, current, &connected) else {
            continue;
        };
        if join(dungeon, nearest, current, Bend::VerticalFirst) {
            carved += 1;
        }

        let extra = rng.below(max_extra_connections + 1);
        if extra > 0 && connected.len() > 1 {
            for _ in 0..extra {
                let Some(&other) = rng.choose(&connected) else {
                    break;
                };
                if other != nearest && join(dungeon, other, current, Bend::VerticalFirst) {
                    carved += 1;
                }
            }
        }
        connected.push(current);
    }
    carved
}

/// Route corridors with the configured style
pub fn route_corridors(
    dungeon: &mut Dungeon,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> usize {
    let style = config.corridor_style();
    let carved = match style {
        CorridorStyle::Sequential => connect_sequential(dungeon, rng),
        CorridorStyle::NearestWithLoops => {
            connect_nearest_with_loops(dungeon, config.max_extra_connections, rng)
        }
    };
    debug!(
        "{style} routing carved {carved} corridors between {} rooms",
        dungeon.rooms().len()
    );
    carved
}
