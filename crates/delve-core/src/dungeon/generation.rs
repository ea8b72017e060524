//! Dungeon generation pipeline
//!
//! Runs layout, corridor routing and start/exit selection on a fresh grid.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::corridor::route_corridors;
use super::placement::select_start_and_exit;
use super::Dungeon;
use crate::config::GenerationConfig;
use crate::error::ConfigError;
use crate::rng::DungeonRng;

/// Run every stage on an already validated configuration
fn build(config: &GenerationConfig, rng: &mut DungeonRng) -> Dungeon {
    let mut dungeon = Dungeon::new(config.width, config.height);
    let placed = config
        .layout
        .strategy()
        .place_rooms(&mut dungeon, config, rng);
    let corridors = route_corridors(&mut dungeon, config, rng);
    let exit = select_start_and_exit(&mut dungeon, rng);
    debug!(
        "generated {}x{} dungeon ({}): {placed}/{} rooms, {corridors} corridors, exit {exit:?}",
        config.width, config.height, config.layout, config.room_count
    );
    dungeon
}

/// Generate a dungeon
///
/// Fails only on an invalid configuration. A dungeon with fewer rooms than
/// requested, or without an exit, is still returned; check
/// [`Dungeon::rooms`] and [`Dungeon::exit_placement`].
pub fn generate_dungeon(
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Result<Dungeon, ConfigError> {
    config.validate()?;
    Ok(build(config, rng))
}

/// Successive levels generated from one configuration and RNG stream
///
/// Each call to [`next_level`](Self::next_level) builds a brand-new dungeon;
/// nothing carries over from the previous level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSequence {
    config: GenerationConfig,
    rng: DungeonRng,
    level: u32,
}

impl LevelSequence {
    /// Validate the configuration and start before the first level
    pub fn new(config: GenerationConfig, rng: DungeonRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            level: 0,
        })
    }

    /// Current level number; 0 before the first dungeon is built
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Advance to the next level and build its dungeon
    pub fn next_level(&mut self) -> Dungeon {
        self.level += 1;
        info!("entering level {}", self.level);
        build(&self.config, &mut self.rng)
    }
}
