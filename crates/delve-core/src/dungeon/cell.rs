//! Map cell kinds

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell kind
///
/// Every grid cell holds exactly one of these. A fresh grid is solid `Wall`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Wall = 0,
    Floor = 1,
    Start = 2,
    Exit = 3,
}

impl CellKind {
    /// Check if agents can stand on this cell
    pub const fn is_walkable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Get the display character for this cell kind
    pub const fn symbol(&self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Floor => '.',
            CellKind::Start => 'S',
            CellKind::Exit => 'E',
        }
    }

    /// Parse a display character back into a cell kind
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' => Some(CellKind::Wall),
            '.' => Some(CellKind::Floor),
            'S' => Some(CellKind::Start),
            'E' => Some(CellKind::Exit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_wall_blocks() {
        for kind in CellKind::iter() {
            assert_eq!(kind.is_walkable(), kind != CellKind::Wall, "{kind}");
        }
    }

    #[test]
    fn test_symbols_are_distinct_and_parse_back() {
        let symbols: Vec<char> = CellKind::iter().map(|k| k.symbol()).collect();
        assert_eq!(symbols, vec!['#', '.', 'S', 'E']);
        for kind in CellKind::iter() {
            assert_eq!(CellKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(CellKind::from_symbol('x'), None);
    }

    #[test]
    fn test_default_is_wall() {
        assert_eq!(CellKind::default(), CellKind::Wall);
    }
}
