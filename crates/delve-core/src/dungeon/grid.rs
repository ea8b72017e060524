//! The dungeon grid
//!
//! A dense `width x height` array of [`CellKind`] indexed `[x][y]`, with `y`
//! growing upward, plus the room registry and the start/exit markers. Every
//! accessor is bounds-checked: queries outside the grid answer `false` or
//! `None`, and writes outside the grid are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::corridor::ConnectivityTracker;
use super::placement::ExitPlacement;
use super::room::{Room, RoomId};
use super::CellKind;
use crate::error::GridError;

/// Integer cell coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `(dx, dy)` away
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between cells
    pub fn distance(self, other: GridPos) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A generated dungeon level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDungeon")]
pub struct Dungeon {
    width: usize,
    height: usize,
    /// Cell kinds indexed `[x][y]`
    cells: Vec<Vec<CellKind>>,
    rooms: Vec<Room>,
    start: Option<GridPos>,
    exit: Option<GridPos>,
    start_room: Option<RoomId>,
    exit_room: Option<RoomId>,
    /// Outcome of exit anchoring; `None` until entry/exit selection runs
    exit_placement: Option<ExitPlacement>,
}

/// Unchecked wire form of [`Dungeon`]
#[derive(Deserialize)]
struct RawDungeon {
    width: usize,
    height: usize,
    cells: Vec<Vec<CellKind>>,
    rooms: Vec<Room>,
    start: Option<GridPos>,
    exit: Option<GridPos>,
    start_room: Option<RoomId>,
    exit_room: Option<RoomId>,
    exit_placement: Option<ExitPlacement>,
}

impl TryFrom<RawDungeon> for Dungeon {
    type Error = GridError;

    fn try_from(raw: RawDungeon) -> Result<Self, Self::Error> {
        if raw.cells.len() != raw.width {
            return Err(GridError::ColumnCount {
                columns: raw.cells.len(),
                width: raw.width,
            });
        }
        if let Some((column, cells)) = raw
            .cells
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != raw.height)
        {
            return Err(GridError::ColumnHeight {
                column,
                len: cells.len(),
                height: raw.height,
            });
        }
        for (room, r) in raw.rooms.iter().enumerate() {
            if let Some(other) = r.connected.iter().find(|id| id.0 >= raw.rooms.len()) {
                return Err(GridError::UnknownRoom {
                    room,
                    other: other.0,
                });
            }
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
            rooms: raw.rooms,
            start: raw.start,
            exit: raw.exit,
            start_room: raw.start_room,
            exit_room: raw.exit_room,
            exit_placement: raw.exit_placement,
        })
    }
}

impl Dungeon {
    /// Create a solid-wall grid with no rooms
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![CellKind::Wall; height]; width],
            rooms: Vec::new(),
            start: None,
            exit: None,
            start_room: None,
            exit_room: None,
            exit_placement: None,
        }
    }

    /// Build a grid from text rows, top row first
    ///
    /// Uses the [`CellKind::symbol`] characters. Rooms are not recovered;
    /// `S` and `E` set the start and exit. Returns `None` for ragged rows or
    /// unknown characters.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut dungeon = Self::new(width, height);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            let y = (height - 1 - row_idx) as i32;
            for (x, c) in row.chars().enumerate() {
                let x = x as i32;
                match CellKind::from_symbol(c)? {
                    CellKind::Wall => {}
                    CellKind::Floor => dungeon.add_floor(x, y),
                    CellKind::Start => dungeon.set_start(x, y),
                    CellKind::Exit => dungeon.set_exit(x, y),
                }
            }
        }
        Some(dungeon)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if self.is_in_bounds(x, y) {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Check if a coordinate lies on the grid
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Get the kind of a cell
    pub fn cell(&self, x: i32, y: i32) -> Option<CellKind> {
        self.index(x, y).map(|(x, y)| self.cells[x][y])
    }

    fn set_cell(&mut self, x: i32, y: i32, kind: CellKind) {
        if let Some((x, y)) = self.index(x, y) {
            self.cells[x][y] = kind;
        }
    }

    fn is_kind(&self, x: i32, y: i32, kind: CellKind) -> bool {
        self.cell(x, y) == Some(kind)
    }

    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.is_kind(x, y, CellKind::Floor)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.is_kind(x, y, CellKind::Wall)
    }

    pub fn is_start(&self, x: i32, y: i32) -> bool {
        self.is_kind(x, y, CellKind::Start)
    }

    pub fn is_exit(&self, x: i32, y: i32) -> bool {
        self.is_kind(x, y, CellKind::Exit)
    }

    /// Check if an agent can stand on a cell; false off the grid
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|k| k.is_walkable())
    }

    /// Carve a cell to floor
    pub fn add_floor(&mut self, x: i32, y: i32) {
        self.set_cell(x, y, CellKind::Floor);
    }

    /// Mark the start cell
    pub fn set_start(&mut self, x: i32, y: i32) {
        if self.is_in_bounds(x, y) {
            self.set_cell(x, y, CellKind::Start);
            self.start = Some(GridPos::new(x, y));
        }
    }

    /// Mark the exit cell
    pub fn set_exit(&mut self, x: i32, y: i32) {
        if self.is_in_bounds(x, y) {
            self.set_cell(x, y, CellKind::Exit);
            self.exit = Some(GridPos::new(x, y));
        }
    }

    /// Every cell of the given kind, column by column
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = GridPos> + '_ {
        self.cells.iter().enumerate().flat_map(move |(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(move |(_, k)| **k == kind)
                .map(move |(y, _)| GridPos::new(x as i32, y as i32))
        })
    }

    /// Register a room and paint its rectangle as floor
    pub fn add_room(&mut self, room: Room) -> RoomId {
        for p in room.floor_cells() {
            self.add_floor(p.x, p.y);
        }
        self.rooms.push(room);
        RoomId(self.rooms.len() - 1)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// Room containing a cell, if any
    pub fn room_at(&self, x: i32, y: i32) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|r| r.contains(x, y))
            .map(RoomId)
    }

    /// Record a corridor between two rooms on both of them
    ///
    /// Self-connections and unknown ids are ignored.
    pub fn connect_rooms(&mut self, a: RoomId, b: RoomId) {
        if a == b || a.0 >= self.rooms.len() || b.0 >= self.rooms.len() {
            return;
        }
        self.rooms[a.0].connected.insert(b);
        self.rooms[b.0].connected.insert(a);
    }

    /// Check if two rooms are reachable through the connection graph
    pub fn rooms_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.connectivity().are_connected(a.0, b.0)
    }

    /// Check if every room reaches every other room
    pub fn is_fully_connected(&self) -> bool {
        self.connectivity().all_connected()
    }

    /// Equivalence classes induced by the current connections
    pub fn connectivity(&self) -> ConnectivityTracker {
        let mut tracker = ConnectivityTracker::new(self.rooms.len());
        for (idx, room) in self.rooms.iter().enumerate() {
            for other in &room.connected {
                tracker.merge(idx, other.0);
            }
        }
        tracker
    }

    pub fn start(&self) -> Option<GridPos> {
        self.start
    }

    pub fn exit(&self) -> Option<GridPos> {
        self.exit
    }

    pub fn start_room(&self) -> Option<RoomId> {
        self.start_room
    }

    pub fn exit_room(&self) -> Option<RoomId> {
        self.exit_room
    }

    /// How exit anchoring went; `None` before entry/exit selection
    pub fn exit_placement(&self) -> Option<&ExitPlacement> {
        self.exit_placement.as_ref()
    }

    pub(crate) fn set_start_room(&mut self, id: Option<RoomId>) {
        self.start_room = id;
    }

    pub(crate) fn set_exit_room(&mut self, id: Option<RoomId>) {
        self.exit_room = id;
    }

    pub(crate) fn set_exit_placement(&mut self, placement: ExitPlacement) {
        self.exit_placement = Some(placement);
    }
}

impl fmt::Display for Dungeon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for column in &self.cells {
                write!(f, "{}", column[y].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
