//! Path following with rate-limited replanning
//!
//! A [`PathFollower`] belongs to one agent. Each tick the agent reports its
//! position, the goal and the current time, and gets back a [`Steering`]
//! decision. The follower heads straight for the goal when nothing blocks
//! the line between them and otherwise walks a cached waypoint queue. The
//! queue is replanned at most once per `replan_interval`, and only when it
//! has run dry or the goal has moved more than `goal_shift_threshold` since
//! the last plan.

use std::collections::VecDeque;

use log::trace;
use serde::{Deserialize, Serialize};

use super::coord::WorldPos;
use super::los::ObstacleOracle;
use super::pathfinding::Pathfinder;
use crate::config::NavigationConfig;

/// What an agent should do this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Steering {
    /// Goal in plain sight; move along this unit vector
    Direct(WorldPos),
    /// Move along this unit vector toward the next waypoint
    Follow(WorldPos),
    /// Within reach of the goal
    Arrived,
    /// No usable path; stand still until the next replan
    Idle,
}

/// Per-agent waypoint queue and replanning state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathFollower {
    config: NavigationConfig,
    waypoints: VecDeque<WorldPos>,
    /// Goal the current waypoints were planned for
    planned_goal: Option<WorldPos>,
    last_plan_time: Option<f32>,
}

impl PathFollower {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Waypoints still to visit, next first
    pub fn waypoints(&self) -> impl Iterator<Item = &WorldPos> {
        self.waypoints.iter()
    }

    pub fn has_path(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// Drop the cached path and replan on the next update
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.planned_goal = None;
        self.last_plan_time = None;
    }

    /// Check if a new path should be computed now
    pub fn needs_replan(&self, goal: WorldPos, now: f32) -> bool {
        let interval_elapsed = self
            .last_plan_time
            .is_none_or(|t| now - t >= self.config.replan_interval);
        if !interval_elapsed {
            return false;
        }
        self.waypoints.is_empty()
            || self
                .planned_goal
                .is_none_or(|g| g.distance(goal) > self.config.goal_shift_threshold)
    }

    /// Recompute the waypoint queue; returns false on NoPath
    pub fn replan(
        &mut self,
        pathfinder: &Pathfinder<'_>,
        position: WorldPos,
        goal: WorldPos,
        now: f32,
    ) -> bool {
        self.last_plan_time = Some(now);
        self.planned_goal = Some(goal);
        match pathfinder.find_path(position, goal) {
            Some(path) => {
                trace!("planned {} waypoints to {goal}", path.len());
                self.waypoints = path.waypoints.into();
                true
            }
            None => {
                trace!("no path from {position} to {goal}");
                self.waypoints.clear();
                false
            }
        }
    }

    fn pop_reached(&mut self, position: WorldPos) {
        while self
            .waypoints
            .front()
            .is_some_and(|w| w.distance(position) <= self.config.reach_threshold)
        {
            self.waypoints.pop_front();
        }
    }

    /// Decide how to move this tick
    pub fn update<O: ObstacleOracle + ?Sized>(
        &mut self,
        position: WorldPos,
        goal: WorldPos,
        now: f32,
        pathfinder: &Pathfinder<'_>,
        oracle: &O,
    ) -> Steering {
        if position.distance(goal) <= self.config.reach_threshold {
            self.waypoints.clear();
            return Steering::Arrived;
        }
        if oracle.line_clear(position, goal) {
            return match (goal - position).normalize() {
                Some(dir) => Steering::Direct(dir),
                None => Steering::Arrived,
            };
        }

        self.pop_reached(position);
        if self.needs_replan(goal, now) {
            self.replan(pathfinder, position, goal, now);
            self.pop_reached(position);
        }

        match self
            .waypoints
            .front()
            .and_then(|&w| (w - position).normalize())
        {
            Some(dir) => Steering::Follow(dir),
            None => Steering::Idle,
        }
    }
}
