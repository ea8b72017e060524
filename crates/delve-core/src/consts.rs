//! Default generation and navigation constants

/// Default grid dimensions
pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_HEIGHT: usize = 30;

/// Largest accepted grid side; keeps room and margin arithmetic inside `i32`
pub const MAX_GRID_SIDE: usize = 1 << 16;

/// Default number of rooms a generation request asks for
pub const DEFAULT_ROOM_COUNT: usize = 10;

/// Default room side limits (inclusive)
pub const DEFAULT_MIN_ROOM_SIZE: i32 = 3;
pub const DEFAULT_MAX_ROOM_SIZE: i32 = 7;

/// Cells kept clear between a sampled room and the grid edge
pub const DEFAULT_BORDER_MARGIN: i32 = 2;

/// Inset applied to every side of a partition leaf before it becomes a room
pub const DEFAULT_ROOM_OFFSET: i32 = 1;

/// Placement attempts per room before the rejection sampler gives up on it
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Upper bound on extra loop corridors added after each forced connection
pub const MAX_EXTRA_CONNECTIONS: usize = 2;

/// A* expansions before a search is abandoned as NoPath
pub const DEFAULT_ITERATION_CAP: usize = 20_000;

/// Seconds between path recomputations for one agent
pub const DEFAULT_REPLAN_INTERVAL: f32 = 0.5;

/// Distance at which a waypoint counts as reached
pub const DEFAULT_REACH_THRESHOLD: f32 = 0.5;

/// Goal displacement that forces a replan once the interval has elapsed
pub const DEFAULT_GOAL_SHIFT_THRESHOLD: f32 = 1.0;

/// Orthogonal and diagonal step costs
pub const ORTHOGONAL_COST: f32 = 1.0;
pub const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;
