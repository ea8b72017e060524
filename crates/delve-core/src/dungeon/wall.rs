//! Wall shape classification from 8-neighbour floor patterns
//!
//! Each wall cell gets an 8-bit mask with one bit per neighbour, set when that
//! neighbour is floor. Neighbours are visited clockwise starting at the top,
//! and the top neighbour is the most significant bit:
//!
//! ```text
//!   TL  T  TR        0x01 0x80 0x40
//!   L   .  R    ->   0x02  .   0x20
//!   BL  B  BR        0x04 0x08 0x10
//! ```
//!
//! A wall above a room sees floor below it, so its mask is one of the
//! bottom-row patterns. Renderers can use the same masks to pick wall tiles.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Dungeon, GridPos};

bitflags! {
    /// Which of the eight neighbours are floor
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NeighborMask: u8 {
        const TOP = 0b1000_0000;
        const TOP_RIGHT = 0b0100_0000;
        const RIGHT = 0b0010_0000;
        const BOTTOM_RIGHT = 0b0001_0000;
        const BOTTOM = 0b0000_1000;
        const BOTTOM_LEFT = 0b0000_0100;
        const LEFT = 0b0000_0010;
        const TOP_LEFT = 0b0000_0001;
    }
}

/// Neighbour offsets in mask order, most significant bit first
pub const NEIGHBOR_OFFSETS: [(i32, i32, NeighborMask); 8] = [
    (0, 1, NeighborMask::TOP),
    (1, 1, NeighborMask::TOP_RIGHT),
    (1, 0, NeighborMask::RIGHT),
    (1, -1, NeighborMask::BOTTOM_RIGHT),
    (0, -1, NeighborMask::BOTTOM),
    (-1, -1, NeighborMask::BOTTOM_LEFT),
    (-1, 0, NeighborMask::LEFT),
    (-1, 1, NeighborMask::TOP_LEFT),
];

const TOP_WALL: [u8; 3] = [0b0001_1000, 0b0001_1100, 0b0000_1100];
const LEFT_WALL: [u8; 3] = [0b0011_0000, 0b0111_0000, 0b0110_0000];
const BOTTOM_WALL: [u8; 3] = [0b1100_0000, 0b1100_0001, 0b1000_0001];
const RIGHT_WALL: [u8; 3] = [0b0000_0011, 0b0000_0111, 0b0000_0110];

const TOP_LEFT_CORNER: u8 = 0b0001_0000;
const TOP_RIGHT_CORNER: u8 = 0b0000_0100;
const BOTTOM_LEFT_CORNER: u8 = 0b0100_0000;
const BOTTOM_RIGHT_CORNER: u8 = 0b0000_0001;

// Manual serde impl for NeighborMask
impl Serialize for NeighborMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NeighborMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(NeighborMask::from_bits_truncate(bits))
    }
}

/// Shape of a wall cell relative to the floor around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum WallShape {
    /// Wall along the top edge of a room
    Top,
    Right,
    Bottom,
    Left,
    /// Outer corner above and left of a room
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,
    /// Anything else: isolated, interior, or next to a corridor
    Other,
}

impl WallShape {
    /// Check if this is a straight run of wall
    pub const fn is_straight(&self) -> bool {
        matches!(
            self,
            WallShape::Top | WallShape::Right | WallShape::Bottom | WallShape::Left
        )
    }

    pub const fn is_corner(&self) -> bool {
        matches!(
            self,
            WallShape::TopLeftCorner
                | WallShape::TopRightCorner
                | WallShape::BottomLeftCorner
                | WallShape::BottomRightCorner
        )
    }
}

/// Floor pattern around a cell; off-grid neighbours count as non-floor
pub fn neighbor_mask(dungeon: &Dungeon, pos: GridPos) -> NeighborMask {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dx, dy, _)| dungeon.is_floor(pos.x + dx, pos.y + dy))
        .fold(NeighborMask::empty(), |mask, (_, _, bit)| mask | *bit)
}

/// Classify a neighbour mask
pub fn classify(mask: NeighborMask) -> WallShape {
    let bits = mask.bits();
    if TOP_WALL.contains(&bits) {
        WallShape::Top
    } else if LEFT_WALL.contains(&bits) {
        WallShape::Left
    } else if BOTTOM_WALL.contains(&bits) {
        WallShape::Bottom
    } else if RIGHT_WALL.contains(&bits) {
        WallShape::Right
    } else {
        match bits {
            TOP_LEFT_CORNER => WallShape::TopLeftCorner,
            TOP_RIGHT_CORNER => WallShape::TopRightCorner,
            BOTTOM_LEFT_CORNER => WallShape::BottomLeftCorner,
            BOTTOM_RIGHT_CORNER => WallShape::BottomRightCorner,
            _ => WallShape::Other,
        }
    }
}

/// Check if a cell is a wall on a straight wall segment
pub fn is_straight_wall(dungeon: &Dungeon, pos: GridPos) -> bool {
    dungeon.is_wall(pos.x, pos.y) && classify(neighbor_mask(dungeon, pos)).is_straight()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Room;

    fn room_dungeon() -> Dungeon {
        let mut dungeon = Dungeon::new(10, 10);
        dungeon.add_room(Room::new(3, 3, 4, 3));
        dungeon
    }

    #[test]
    fn test_mask_bit_order() {
        let mut dungeon = Dungeon::new(3, 3);
        dungeon.add_floor(1, 2);
        assert_eq!(neighbor_mask(&dungeon, GridPos::new(1, 1)), NeighborMask::TOP);
        assert_eq!(NeighborMask::TOP.bits(), 0b1000_0000);

        let mut dungeon = Dungeon::new(3, 3);
        dungeon.add_floor(0, 2);
        assert_eq!(
            neighbor_mask(&dungeon, GridPos::new(1, 1)).bits(),
            0b0000_0001
        );
    }

    #[test]
    fn test_off_grid_neighbors_are_not_floor() {
        let mut dungeon = Dungeon::new(2, 2);
        dungeon.add_floor(1, 0);
        dungeon.add_floor(1, 1);
        dungeon.add_floor(0, 1);
        let mask = neighbor_mask(&dungeon, GridPos::new(0, 0));
        assert_eq!(
            mask,
            NeighborMask::TOP | NeighborMask::TOP_RIGHT | NeighborMask::RIGHT
        );
    }

    #[test]
    fn test_room_ring_shapes() {
        let dungeon = room_dungeon();
        // room covers x 3..=6, y 3..=5
        let shape = |x, y| classify(neighbor_mask(&dungeon, GridPos::new(x, y)));
        assert_eq!(shape(4, 6), WallShape::Top);
        assert_eq!(shape(3, 6), WallShape::Top);
        assert_eq!(shape(6, 6), WallShape::Top);
        assert_eq!(shape(4, 2), WallShape::Bottom);
        assert_eq!(shape(2, 4), WallShape::Left);
        assert_eq!(shape(7, 4), WallShape::Right);
        assert_eq!(shape(2, 6), WallShape::TopLeftCorner);
        assert_eq!(shape(7, 6), WallShape::TopRightCorner);
        assert_eq!(shape(2, 2), WallShape::BottomLeftCorner);
        assert_eq!(shape(7, 2), WallShape::BottomRightCorner);
        assert_eq!(shape(0, 0), WallShape::Other);
    }

    #[test]
    fn test_corridor_breaks_straight_wall() {
        let mut dungeon = room_dungeon();
        // corridor leaving the top of the room
        dungeon.add_floor(5, 6);
        dungeon.add_floor(5, 7);
        assert!(!is_straight_wall(&dungeon, GridPos::new(4, 6)));
        assert!(!is_straight_wall(&dungeon, GridPos::new(6, 6)));
        assert!(is_straight_wall(&dungeon, GridPos::new(3, 6)));
        assert!(!is_straight_wall(&dungeon, GridPos::new(5, 6)));
    }

    #[test]
    fn test_straight_and_corner_are_exclusive() {
        use strum::IntoEnumIterator;
        for shape in WallShape::iter() {
            assert!(!(shape.is_straight() && shape.is_corner()), "{shape}");
        }
    }

    #[test]
    fn test_every_mask_classifies() {
        let straight = (0..=u8::MAX)
            .filter(|&b| classify(NeighborMask::from_bits_truncate(b)).is_straight())
            .count();
        assert_eq!(straight, 12);
    }
}
