//! Binary space partitioning layout
//!
//! Splits the whole grid breadth-first until regions are too small to halve,
//! then insets each leaf by `room_offset` to make a room. Leaves are taken in
//! queue order until the target room count is reached.

use std::collections::VecDeque;

use log::{debug, trace};

use super::layout::LayoutStrategy;
use super::rect::{Region, SplitAxis};
use super::Dungeon;
use crate::config::GenerationConfig;
use crate::rng::DungeonRng;

/// Recursive space partitioner
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacePartitioner;

impl SpacePartitioner {
    /// Pick a split axis, or `None` if the region is a leaf
    ///
    /// A coin picks the preferred axis; the other one is used when the
    /// preferred axis is too short.
    fn choose_axis(region: &Region, min: i32, rng: &mut DungeonRng) -> Option<SplitAxis> {
        let (preferred, fallback) = if rng.coin() {
            (SplitAxis::Horizontal, SplitAxis::Vertical)
        } else {
            (SplitAxis::Vertical, SplitAxis::Horizontal)
        };
        if region.can_split(preferred, min) {
            Some(preferred)
        } else if region.can_split(fallback, min) {
            Some(fallback)
        } else {
            None
        }
    }

    /// Split offset in `[size/4 + 1, size/4 + size/2)`, clamped so both
    /// halves keep at least `min` cells
    fn split_offset(size: i32, min: i32, rng: &mut DungeonRng) -> i32 {
        let offset = rng.range(1, size / 2) + size / 4;
        offset.clamp(min, size - min)
    }

    /// Partition `bounds` and return the accepted leaves in queue order
    pub fn partition(
        bounds: Region,
        min: i32,
        target: usize,
        rng: &mut DungeonRng,
    ) -> Vec<Region> {
        let mut leaves = Vec::new();
        let mut queue = VecDeque::from([bounds]);

        while let Some(region) = queue.pop_front() {
            if let Some(axis) = Self::choose_axis(&region, min, rng) {
                let offset = Self::split_offset(region.extent(axis), min, rng);
                if let Some((a, b)) = region.split(axis, offset) {
                    queue.push_back(a);
                    queue.push_back(b);
                }
                continue;
            }
            if leaves.len() >= target {
                break;
            }
            if region.width >= min && region.height >= min {
                leaves.push(region);
            } else {
                trace!("region {region:?} below partition minimum {min}");
            }
        }
        leaves
    }
}

impl LayoutStrategy for SpacePartitioner {
    fn place_rooms(
        &self,
        dungeon: &mut Dungeon,
        config: &GenerationConfig,
        rng: &mut DungeonRng,
    ) -> usize {
        let bounds = Region::new(0, 0, config.width as i32, config.height as i32);
        let min = config.partition_minimum();
        let leaves = Self::partition(bounds, min, config.room_count, rng);

        let mut placed = 0;
        for leaf in leaves {
            if let Some(room) = leaf.inset(config.room_offset) {
                trace!("placed {room} in leaf {leaf:?}");
                dungeon.add_room(room);
                placed += 1;
            }
        }
        debug!(
            "space partitioning placed {placed} of {} rooms",
            config.room_count
        );
        placed
    }
}
