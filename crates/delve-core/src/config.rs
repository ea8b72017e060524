//! Generation and navigation parameters
//!
//! Plain value structs supplied by the caller at generation or query time.
//! Every field has a default, so a partial JSON object deserializes into a
//! usable configuration.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::dungeon::{CorridorStyle, LayoutKind};
use crate::error::ConfigError;

/// Parameters for one dungeon generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Number of rooms to aim for; fewer may be placed
    pub room_count: usize,
    /// Smallest room side (inclusive)
    pub min_room_size: i32,
    /// Largest room side for the rejection sampler (inclusive)
    pub max_room_size: i32,
    /// Cells kept clear between a sampled room and the grid edge
    pub border_margin: i32,
    /// Inset applied to each side of a partition leaf
    pub room_offset: i32,
    /// Attempts per room before the rejection sampler skips it
    pub max_placement_attempts: usize,
    /// Upper bound on extra loop corridors per forced connection
    pub max_extra_connections: usize,
    /// Room layout algorithm
    pub layout: LayoutKind,
    /// Corridor routing; `None` uses the layout's natural pairing
    pub corridor_style: Option<CorridorStyle>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            room_count: DEFAULT_ROOM_COUNT,
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            max_room_size: DEFAULT_MAX_ROOM_SIZE,
            border_margin: DEFAULT_BORDER_MARGIN,
            room_offset: DEFAULT_ROOM_OFFSET,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            max_extra_connections: MAX_EXTRA_CONNECTIONS,
            layout: LayoutKind::RejectionSampling,
            corridor_style: None,
        }
    }
}

impl GenerationConfig {
    /// Default parameters on a grid of the given size
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter sets that cannot describe a dungeon
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_GRID_SIDE || self.height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_room_size < 1 || self.min_room_size > self.max_room_size {
            return Err(ConfigError::InvalidRoomSizes {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.border_margin < 0 {
            return Err(ConfigError::NegativeSpacing {
                field: "border_margin",
                value: self.border_margin,
            });
        }
        if self.room_offset < 0 {
            return Err(ConfigError::NegativeSpacing {
                field: "room_offset",
                value: self.room_offset,
            });
        }
        let limit = self.width.max(self.height) as i32;
        for (field, value) in [
            ("max_room_size", self.max_room_size),
            ("border_margin", self.border_margin),
            ("room_offset", self.room_offset),
        ] {
            if value > limit {
                return Err(ConfigError::SpacingTooLarge {
                    field,
                    value,
                    limit,
                });
            }
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }
        Ok(())
    }

    /// Corridor routing to use, honouring the override
    pub fn corridor_style(&self) -> CorridorStyle {
        self.corridor_style
            .unwrap_or_else(|| self.layout.default_corridor_style())
    }

    /// Smallest region the space partitioner keeps as a leaf
    ///
    /// A leaf this size still yields a room of `min_room_size` after the
    /// inset is taken off both sides.
    pub fn partition_minimum(&self) -> i32 {
        self.room_offset
            .saturating_mul(2)
            .saturating_add(self.min_room_size)
    }
}

/// Parameters for pathfinding and path following
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// A* expansions before giving up
    pub iteration_cap: usize,
    /// Minimum seconds between path recomputations
    pub replan_interval: f32,
    /// Distance at which a waypoint is popped
    pub reach_threshold: f32,
    /// Goal movement that makes a cached path stale
    pub goal_shift_threshold: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            iteration_cap: DEFAULT_ITERATION_CAP,
            replan_interval: DEFAULT_REPLAN_INTERVAL,
            reach_threshold: DEFAULT_REACH_THRESHOLD,
            goal_shift_threshold: DEFAULT_GOAL_SHIFT_THRESHOLD,
        }
    }
}

impl NavigationConfig {
    /// Reject caps and distances that would stall or never trigger
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iteration_cap == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        for (field, value) in [
            ("replan_interval", self.replan_interval),
            ("reach_threshold", self.reach_threshold),
            ("goal_shift_threshold", self.goal_shift_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { field, value });
            }
        }
        Ok(())
    }
}
