//! Rooms placed by the layout strategies
//!
//! A room is an axis-aligned rectangle of floor with its lower-left corner at
//! `(x, y)`. Rooms remember which other rooms a corridor joins them to; the
//! set is kept symmetric by [`Dungeon::connect_rooms`](super::Dungeon::connect_rooms).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::GridPos;
use crate::rng::DungeonRng;

/// Index of a room in its dungeon's room list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rectangular room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Rooms joined to this one by a corridor
    #[serde(default)]
    pub connected: BTreeSet<RoomId>,
}

impl Room {
    /// Create a new unconnected room
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            connected: BTreeSet::new(),
        }
    }

    /// One past the right edge
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the top edge
    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    /// Check if the two rectangles overlap
    ///
    /// Rooms that only share an edge do not intersect.
    pub fn intersects(&self, other: &Room) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Centre cell, rounded toward the lower-left corner
    pub fn center(&self) -> GridPos {
        GridPos::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a cell lies inside the room
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.top()
    }

    /// Number of floor cells
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Every cell inside the room, column by column
    pub fn floor_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        (self.x..self.right()).flat_map(move |x| (self.y..self.top()).map(move |y| GridPos::new(x, y)))
    }

    /// A uniformly chosen cell inside the room
    pub fn random_cell(&self, rng: &mut DungeonRng) -> GridPos {
        GridPos::new(
            rng.range(self.x, self.right()),
            rng.range(self.y, self.top()),
        )
    }

    /// Check if a corridor joins this room directly to `other`
    pub fn is_connected_to(&self, other: RoomId) -> bool {
        self.connected.contains(&other)
    }

    /// Euclidean distance between room centres
    pub fn center_distance(&self, other: &Room) -> f32 {
        self.center().distance(other.center())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}
