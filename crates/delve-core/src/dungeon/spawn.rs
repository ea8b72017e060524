//! Agent spawn positions
//!
//! Spreads agents over room floor away from the player, or scatters them
//! around the player when the dungeon has no rooms. Returning fewer
//! positions than requested is normal.

use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Dungeon, GridPos};
use crate::nav::{grid_to_world, WorldPos};
use crate::rng::DungeonRng;

/// Half-width of the square searched around the player, in cells
pub const NEARBY_RADIUS: i32 = 5;

/// Tries per requested agent
const DISTRIBUTED_TRIES_PER_AGENT: usize = 20;
const NEARBY_TRIES_PER_AGENT: usize = 10;

/// Where spawn candidates come from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SpawnStrategy {
    /// Any room floor cell
    #[default]
    Distributed,
    /// Floor cells within a few cells of the player
    Nearby,
}

/// Spawn constraints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    pub count: usize,
    pub min_distance_from_player: f32,
    pub min_distance_between: f32,
    /// Maximum random offset added on each axis
    pub jitter: f32,
    pub strategy: SpawnStrategy,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            count: 5,
            min_distance_from_player: 5.0,
            min_distance_between: 3.0,
            jitter: 0.5,
            strategy: SpawnStrategy::Distributed,
        }
    }
}

impl SpawnRules {
    fn far_enough(&self, candidate: WorldPos, player: WorldPos, chosen: &[WorldPos]) -> bool {
        candidate.distance(player) >= self.min_distance_from_player
            && chosen
                .iter()
                .all(|p| p.distance(candidate) >= self.min_distance_between)
    }

    fn jittered(&self, pos: WorldPos, rng: &mut DungeonRng) -> WorldPos {
        WorldPos::new(
            pos.x + rng.range_f32(-self.jitter, self.jitter),
            pos.y + rng.range_f32(-self.jitter, self.jitter),
        )
    }
}

/// Pick spawn positions for agents
///
/// Spacing is checked on cell centres; jitter is applied afterwards.
pub fn spawn_positions(
    dungeon: &Dungeon,
    player: WorldPos,
    rules: &SpawnRules,
    rng: &mut DungeonRng,
) -> Vec<WorldPos> {
    let centres = match rules.strategy {
        SpawnStrategy::Distributed if !dungeon.rooms().is_empty() => {
            distributed(dungeon, player, rules, rng)
        }
        _ => nearby(dungeon, player, rules, rng),
    };
    if centres.len() < rules.count {
        debug!("placed {} of {} spawn positions", centres.len(), rules.count);
    }
    centres
        .into_iter()
        .map(|p| rules.jittered(p, rng))
        .collect()
}

fn distributed(
    dungeon: &Dungeon,
    player: WorldPos,
    rules: &SpawnRules,
    rng: &mut DungeonRng,
) -> Vec<WorldPos> {
    let mut candidates: Vec<WorldPos> = dungeon
        .rooms()
        .iter()
        .flat_map(|room| room.floor_cells())
        .map(grid_to_world)
        .filter(|p| p.distance(player) >= rules.min_distance_from_player)
        .collect();

    let mut chosen = Vec::new();
    let max_tries = rules.count * DISTRIBUTED_TRIES_PER_AGENT;
    let mut tries = 0;
    while chosen.len() < rules.count && tries < max_tries && !candidates.is_empty() {
        tries += 1;
        let candidate = candidates.swap_remove(rng.below(candidates.len()));
        if rules.far_enough(candidate, player, &chosen) {
            chosen.push(candidate);
        }
    }
    chosen
}

fn nearby(
    dungeon: &Dungeon,
    player: WorldPos,
    rules: &SpawnRules,
    rng: &mut DungeonRng,
) -> Vec<WorldPos> {
    let origin: GridPos = player.cell();
    let mut chosen = Vec::new();
    let max_tries = rules.count * NEARBY_TRIES_PER_AGENT;
    let mut tries = 0;
    while chosen.len() < rules.count && tries < max_tries {
        tries += 1;
        let cell = origin.offset(
            rng.range_inclusive(-NEARBY_RADIUS, NEARBY_RADIUS),
            rng.range_inclusive(-NEARBY_RADIUS, NEARBY_RADIUS),
        );
        if !dungeon.is_floor(cell.x, cell.y) {
            continue;
        }
        let candidate = grid_to_world(cell);
        if rules.far_enough(candidate, player, &chosen) {
            chosen.push(candidate);
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Room;

    fn two_rooms() -> Dungeon {
        let mut dungeon = Dungeon::new(40, 20);
        dungeon.add_room(Room::new(2, 2, 6, 6));
        dungeon.add_room(Room::new(25, 8, 8, 8));
        dungeon
    }

    #[test]
    fn test_distributed_respects_distances() {
        let dungeon = two_rooms();
        let player = WorldPos::new(5.0, 5.0);
        let rules = SpawnRules {
            count: 6,
            jitter: 0.0,
            ..SpawnRules::default()
        };
        let mut rng = DungeonRng::new(42);
        let spawns = spawn_positions(&dungeon, player, &rules, &mut rng);
        assert!(!spawns.is_empty());
        assert!(spawns.len() <= 6);
        for (i, p) in spawns.iter().enumerate() {
            assert!(p.distance(player) >= rules.min_distance_from_player);
            let cell = p.cell();
            assert!(dungeon.room_at(cell.x, cell.y).is_some(), "{p} not in a room");
            for q in &spawns[i + 1..] {
                assert!(p.distance(*q) >= rules.min_distance_between);
            }
        }
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let dungeon = two_rooms();
        let rules = SpawnRules {
            count: 4,
            jitter: 0.25,
            ..SpawnRules::default()
        };
        let mut rng = DungeonRng::new(8);
        for p in spawn_positions(&dungeon, WorldPos::new(0.0, 0.0), &rules, &mut rng) {
            let centre = grid_to_world(p.cell());
            assert!((p.x - centre.x).abs() <= 0.5 && (p.y - centre.y).abs() <= 0.5);
        }
    }

    #[test]
    fn test_no_rooms_falls_back_to_nearby() {
        let mut dungeon = Dungeon::new(20, 20);
        for x in 0..20 {
            dungeon.add_floor(x, 10);
        }
        let player = WorldPos::new(10.5, 10.5);
        let rules = SpawnRules {
            count: 3,
            min_distance_from_player: 2.0,
            min_distance_between: 1.0,
            jitter: 0.0,
            ..SpawnRules::default()
        };
        let mut rng = DungeonRng::new(42);
        let spawns = spawn_positions(&dungeon, player, &rules, &mut rng);
        for p in &spawns {
            let cell = p.cell();
            assert_eq!(cell.y, 10);
            assert!((cell.x - 10).abs() <= NEARBY_RADIUS);
            assert!(p.distance(player) >= 2.0);
        }
    }

    #[test]
    fn test_impossible_constraints_give_nothing() {
        let dungeon = two_rooms();
        let rules = SpawnRules {
            min_distance_from_player: 1000.0,
            ..SpawnRules::default()
        };
        let mut rng = DungeonRng::new(42);
        assert!(spawn_positions(&dungeon, WorldPos::ZERO, &rules, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_count() {
        let dungeon = two_rooms();
        let rules = SpawnRules {
            count: 0,
            ..SpawnRules::default()
        };
        let mut rng = DungeonRng::new(42);
        assert!(spawn_positions(&dungeon, WorldPos::ZERO, &rules, &mut rng).is_empty());
    }
}
