//! Configuration errors
//!
//! Generation and navigation never fail at run time: short room counts,
//! missing exits and unreachable goals are reported through sentinel values.
//! The only things rejected up front are parameter sets that cannot describe
//! a dungeon at all.

use thiserror::Error;

/// Invalid generation or navigation parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid {width}x{height} exceeds the largest supported side")]
    GridTooLarge { width: usize, height: usize },

    #[error("room sizes must satisfy 1 <= min <= max, got min {min} max {max}")]
    InvalidRoomSizes { min: i32, max: i32 },

    #[error("{field} must not be negative, got {value}")]
    NegativeSpacing { field: &'static str, value: i32 },

    #[error("{field} must not exceed the grid side {limit}, got {value}")]
    SpacingTooLarge {
        field: &'static str,
        value: i32,
        limit: i32,
    },

    #[error("placement attempts must be at least 1")]
    ZeroPlacementAttempts,

    #[error("pathfinding iteration cap must be at least 1")]
    ZeroIterationCap,

    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidDistance { field: &'static str, value: f32 },

    #[error("could not parse configuration: {reason}")]
    InvalidJson { reason: String },
}

/// A deserialized dungeon whose parts disagree with each other
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has {columns} columns, expected width {width}")]
    ColumnCount { columns: usize, width: usize },

    #[error("column {column} has {len} cells, expected height {height}")]
    ColumnHeight {
        column: usize,
        len: usize,
        height: usize,
    },

    #[error("room #{room} links to unknown room #{other}")]
    UnknownRoom { room: usize, other: usize },
}
