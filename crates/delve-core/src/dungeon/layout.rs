//! Room layout strategies
//!
//! A layout strategy places non-overlapping rooms on a fresh grid and paints
//! them as floor. Falling short of the requested room count is a normal
//! outcome; the return value says how many rooms were placed.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::partition::SpacePartitioner;
use super::{CorridorStyle, Dungeon, Room};
use crate::config::GenerationConfig;
use crate::rng::DungeonRng;

/// Places rooms on a dungeon grid
pub trait LayoutStrategy {
    /// Add rooms to `dungeon`, returning how many were placed
    fn place_rooms(
        &self,
        dungeon: &mut Dungeon,
        config: &GenerationConfig,
        rng: &mut DungeonRng,
    ) -> usize;
}

/// Which layout algorithm to run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LayoutKind {
    /// Random rectangles, rejected on overlap
    #[default]
    RejectionSampling,
    /// Recursive binary space partitioning
    SpacePartitioning,
}

impl LayoutKind {
    /// Corridor routing that goes with this layout unless overridden
    pub const fn default_corridor_style(&self) -> CorridorStyle {
        match self {
            LayoutKind::RejectionSampling => CorridorStyle::Sequential,
            LayoutKind::SpacePartitioning => CorridorStyle::NearestWithLoops,
        }
    }

    /// The strategy implementing this layout
    pub fn strategy(&self) -> &'static dyn LayoutStrategy {
        match self {
            LayoutKind::RejectionSampling => &RejectionSampler,
            LayoutKind::SpacePartitioning => &SpacePartitioner,
        }
    }
}

/// Rejection sampling room placement
///
/// Each target room gets up to `max_placement_attempts` random rectangles;
/// the first one clear of every accepted room wins. A room whose attempts all
/// collide is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectionSampler;

impl RejectionSampler {
    /// One random rectangle inside the border margin, or `None` if the
    /// sampled size cannot fit
    fn sample(config: &GenerationConfig, rng: &mut DungeonRng) -> Option<Room> {
        let width = rng.range_inclusive(config.min_room_size, config.max_room_size);
        let height = rng.range_inclusive(config.min_room_size, config.max_room_size);
        let margin = config.border_margin;
        let max_x = config.width as i32 - width - margin;
        let max_y = config.height as i32 - height - margin;
        if max_x < margin || max_y < margin {
            return None;
        }
        let x = rng.range_inclusive(margin, max_x);
        let y = rng.range_inclusive(margin, max_y);
        Some(Room::new(x, y, width, height))
    }
}

impl LayoutStrategy for RejectionSampler {
    fn place_rooms(
        &self,
        dungeon: &mut Dungeon,
        config: &GenerationConfig,
        rng: &mut DungeonRng,
    ) -> usize {
        let mut placed = 0;
        for target in 0..config.room_count {
            let mut accepted = None;
            for _ in 0..config.max_placement_attempts {
                let Some(candidate) = Self::sample(config, rng) else {
                    continue;
                };
                if !dungeon.rooms().iter().any(|r| r.intersects(&candidate)) {
                    accepted = Some(candidate);
                    break;
                }
            }
            match accepted {
                Some(room) => {
                    trace!("placed {room}");
                    dungeon.add_room(room);
                    placed += 1;
                }
                None => trace!(
                    "skipped room {target} after {} attempts",
                    config.max_placement_attempts
                ),
            }
        }
        debug!(
            "rejection sampling placed {placed} of {} rooms",
            config.room_count
        );
        placed
    }
}
