//! A* pathfinding over the dungeon grid
//!
//! Moves are the eight neighbours of a cell: orthogonal steps cost 1 and
//! diagonal steps cost sqrt(2). A diagonal step is refused when either of
//! the two orthogonal cells it passes between is a wall, so paths never
//! squeeze through a corner. The heuristic is straight-line distance, which
//! never overestimates under these costs.
//!
//! Each search keeps its own node arena; a node's parent is an index into
//! that arena. The open set is a `BinaryHeap` ordered by `f` with `total_cmp`,
//! and entries with equal `f` come out in insertion order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use log::trace;
use serde::{Deserialize, Serialize};

use super::coord::{grid_to_world, world_to_grid, GridPos, WorldPos};
use crate::config::NavigationConfig;
use crate::consts::{DEFAULT_ITERATION_CAP, DIAGONAL_COST, ORTHOGONAL_COST};
use crate::dungeon::Dungeon;

/// 8-directional movement
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A route through the dungeon
///
/// Waypoints are cell centres from the first step after the start cell up
/// to and including the goal cell. An empty path means the start and goal
/// resolve to the same cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub waypoints: Vec<WorldPos>,
    pub cells: Vec<GridPos>,
    /// Total step cost
    pub cost: f32,
}

impl Path {
    /// The "already there" path
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Last cell of the path
    pub fn goal(&self) -> Option<GridPos> {
        self.cells.last().copied()
    }
}

/// Search node stored in the per-query arena
#[derive(Debug, Clone, Copy)]
struct Node {
    pos: GridPos,
    g: f32,
    parent: Option<usize>,
}

/// Entry in the open set (min-heap via reversed ordering)
struct OpenEntry {
    f: f32,
    /// Insertion counter; lower wins among equal `f`
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Closest walkable cell to `from`, by breadth-first search over
/// 8-connectivity
///
/// `from` is clamped onto the grid first. Returns `None` when the grid has
/// no walkable cell.
pub fn nearest_walkable(dungeon: &Dungeon, from: GridPos) -> Option<GridPos> {
    if dungeon.width() == 0 || dungeon.height() == 0 {
        return None;
    }
    let from = GridPos::new(
        from.x.clamp(0, dungeon.width() as i32 - 1),
        from.y.clamp(0, dungeon.height() as i32 - 1),
    );
    let height = dungeon.height();
    let index = |p: GridPos| p.x as usize * height + p.y as usize;

    let mut seen = vec![false; dungeon.width() * height];
    let mut queue = VecDeque::from([from]);
    seen[index(from)] = true;
    while let Some(p) = queue.pop_front() {
        if dungeon.is_walkable(p.x, p.y) {
            return Some(p);
        }
        for (dx, dy) in DIRECTIONS {
            let next = p.offset(dx, dy);
            if dungeon.is_in_bounds(next.x, next.y) && !seen[index(next)] {
                seen[index(next)] = true;
                queue.push_back(next);
            }
        }
    }
    None
}

/// Grid A* search bound to one dungeon
#[derive(Debug, Clone, Copy)]
pub struct Pathfinder<'a> {
    dungeon: &'a Dungeon,
    iteration_cap: usize,
}

impl<'a> Pathfinder<'a> {
    pub fn new(dungeon: &'a Dungeon) -> Self {
        Self {
            dungeon,
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }

    /// Pathfinder using the configured iteration cap
    pub fn from_config(dungeon: &'a Dungeon, config: &NavigationConfig) -> Self {
        Self::new(dungeon).with_iteration_cap(config.iteration_cap)
    }

    /// Limit node expansions per search (at least 1)
    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        self.iteration_cap = cap.max(1);
        self
    }

    pub fn dungeon(&self) -> &'a Dungeon {
        self.dungeon
    }

    /// Find a path between two world positions
    ///
    /// Both ends are snapped to their cells, and then to the nearest walkable
    /// cell if they land on a wall. Returns `None` when no route exists or
    /// the search runs out of iterations.
    pub fn find_path(&self, start: WorldPos, goal: WorldPos) -> Option<Path> {
        let start = world_to_grid(start, self.dungeon);
        let goal = world_to_grid(goal, self.dungeon);
        self.find_cell_path(start, goal)
    }

    /// Find a path between two cells
    pub fn find_cell_path(&self, start: GridPos, goal: GridPos) -> Option<Path> {
        let start = self.snap(start)?;
        let goal = self.snap(goal)?;
        if start == goal {
            return Some(Path::empty());
        }
        self.astar(start, goal)
    }

    fn snap(&self, cell: GridPos) -> Option<GridPos> {
        if self.dungeon.is_walkable(cell.x, cell.y) {
            Some(cell)
        } else {
            let snapped = nearest_walkable(self.dungeon, cell);
            trace!("snapped {cell} to {snapped:?}");
            snapped
        }
    }

    /// Check if a step from `from` by `(dx, dy)` is allowed
    fn can_step(&self, from: GridPos, dx: i32, dy: i32) -> bool {
        let to = from.offset(dx, dy);
        if !self.dungeon.is_walkable(to.x, to.y) {
            return false;
        }
        if dx != 0 && dy != 0 {
            // no corner cutting
            return self.dungeon.is_walkable(from.x + dx, from.y)
                && self.dungeon.is_walkable(from.x, from.y + dy);
        }
        true
    }

    fn astar(&self, start: GridPos, goal: GridPos) -> Option<Path> {
        let height = self.dungeon.height();
        let cell_count = self.dungeon.width() * height;
        let index = |p: GridPos| p.x as usize * height + p.y as usize;
        let heuristic = |p: GridPos| p.distance(goal);

        let mut arena = vec![Node {
            pos: start,
            g: 0.0,
            parent: None,
        }];
        // best arena node per cell
        let mut best: Vec<Option<usize>> = vec![None; cell_count];
        let mut closed = vec![false; cell_count];
        best[index(start)] = Some(0);

        let mut seq = 0u64;
        let mut open = BinaryHeap::new();
        open.push(OpenEntry {
            f: heuristic(start),
            seq,
            node: 0,
        });

        let mut iterations = 0;
        while let Some(entry) = open.pop() {
            let current = arena[entry.node];
            let ci = index(current.pos);
            if closed[ci] || best[ci] != Some(entry.node) {
                continue;
            }
            if current.pos == goal {
                trace!("path {start} -> {goal} found after {iterations} expansions");
                return Some(Self::reconstruct(&arena, entry.node));
            }

            iterations += 1;
            if iterations > self.iteration_cap {
                trace!(
                    "path {start} -> {goal} abandoned at cap {}",
                    self.iteration_cap
                );
                return None;
            }
            closed[ci] = true;

            for (dx, dy) in DIRECTIONS {
                if !self.can_step(current.pos, dx, dy) {
                    continue;
                }
                let next = current.pos.offset(dx, dy);
                let ni = index(next);
                if closed[ni] {
                    continue;
                }
                let step = if dx != 0 && dy != 0 {
                    DIAGONAL_COST
                } else {
                    ORTHOGONAL_COST
                };
                let g = current.g + step;
                if best[ni].is_some_and(|b| arena[b].g <= g) {
                    continue;
                }

                arena.push(Node {
                    pos: next,
                    g,
                    parent: Some(entry.node),
                });
                let node = arena.len() - 1;
                best[ni] = Some(node);
                seq += 1;
                open.push(OpenEntry {
                    f: g + heuristic(next),
                    seq,
                    node,
                });
            }
        }

        trace!("no path {start} -> {goal}");
        None
    }

    /// Walk parents back to the start, excluding it
    fn reconstruct(arena: &[Node], end: usize) -> Path {
        let mut cells = Vec::new();
        let mut current = end;
        while let Some(parent) = arena[current].parent {
            cells.push(arena[current].pos);
            current = parent;
        }
        cells.reverse();

        Path {
            waypoints: cells.iter().copied().map(grid_to_world).collect(),
            cells,
            cost: arena[end].g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Room;

    fn open_room(width: usize, height: usize) -> Dungeon {
        let mut dungeon = Dungeon::new(width, height);
        dungeon.add_room(Room::new(0, 0, width as i32, height as i32));
        dungeon
    }

    fn assert_valid_steps(dungeon: &Dungeon, start: GridPos, path: &Path) {
        let mut prev = start;
        for &cell in &path.cells {
            let (dx, dy) = (cell.x - prev.x, cell.y - prev.y);
            assert!(dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0));
            assert!(dungeon.is_walkable(cell.x, cell.y), "{cell} is a wall");
            if dx != 0 && dy != 0 {
                assert!(dungeon.is_walkable(prev.x + dx, prev.y), "corner cut at {prev}");
                assert!(dungeon.is_walkable(prev.x, prev.y + dy), "corner cut at {prev}");
            }
            prev = cell;
        }
    }

    #[test]
    fn test_straight_line() {
        let dungeon = open_room(10, 10);
        let path = Pathfinder::new(&dungeon)
            .find_cell_path(GridPos::new(1, 5), GridPos::new(8, 5))
            .unwrap();
        assert_eq!(path.len(), 7);
        assert!((path.cost - 7.0).abs() < 1e-4);
        assert_eq!(path.goal(), Some(GridPos::new(8, 5)));
        assert_eq!(path.waypoints[0], WorldPos::new(2.5, 5.5));
    }

    #[test]
    fn test_diagonal_cost_is_octile() {
        let dungeon = open_room(12, 12);
        let start = GridPos::new(1, 1);
        let goal = GridPos::new(9, 4);
        let path = Pathfinder::new(&dungeon).find_cell_path(start, goal).unwrap();
        let expected = 3.0 * DIAGONAL_COST + 5.0;
        assert!((path.cost - expected).abs() < 1e-4, "{} vs {expected}", path.cost);
        assert_eq!(path.len(), 8);
        assert_valid_steps(&dungeon, start, &path);
    }

    #[test]
    fn test_same_cell_is_empty_path() {
        let dungeon = open_room(5, 5);
        let path = Pathfinder::new(&dungeon)
            .find_path(WorldPos::new(2.1, 2.2), WorldPos::new(2.9, 2.8))
            .unwrap();
        assert!(path.is_empty());
        assert_eq!(path, Path::empty());
    }

    #[test]
    fn test_no_corner_cutting() {
        // .#
        // S.   the diagonal from S to the top-right is blocked by the wall
        let dungeon = Dungeon::from_rows(&["...", ".#.", "S.."]).unwrap();
        let start = GridPos::new(0, 0);
        let path = Pathfinder::new(&dungeon)
            .find_cell_path(start, GridPos::new(2, 2))
            .unwrap();
        assert_valid_steps(&dungeon, start, &path);
        assert!((path.cost - 4.0).abs() < 1e-4);

        let pinched = Dungeon::from_rows(&[".#", "#."]).unwrap();
        assert!(Pathfinder::new(&pinched)
            .find_cell_path(GridPos::new(0, 1), GridPos::new(1, 0))
            .is_none());
    }

    #[test]
    fn test_goal_in_wall_snaps_to_nearest_walkable() {
        let dungeon = Dungeon::from_rows(&["#####", "#...#", "#####"]).unwrap();
        let path = Pathfinder::new(&dungeon)
            .find_cell_path(GridPos::new(1, 1), GridPos::new(4, 2))
            .unwrap();
        assert_eq!(path.goal(), Some(GridPos::new(3, 1)));
    }

    #[test]
    fn test_walled_off_goal_has_no_path() {
        let dungeon = Dungeon::from_rows(&[".##.", ".##.", ".##."]).unwrap();
        assert!(Pathfinder::new(&dungeon)
            .find_cell_path(GridPos::new(0, 0), GridPos::new(3, 2))
            .is_none());
    }

    #[test]
    fn test_all_wall_has_no_path() {
        let dungeon = Dungeon::new(6, 6);
        assert!(nearest_walkable(&dungeon, GridPos::new(3, 3)).is_none());
        assert!(Pathfinder::new(&dungeon)
            .find_path(WorldPos::new(1.0, 1.0), WorldPos::new(4.0, 4.0))
            .is_none());
    }

    #[test]
    fn test_iteration_cap() {
        let dungeon = open_room(40, 40);
        let start = GridPos::new(0, 0);
        let goal = GridPos::new(39, 39);
        assert!(Pathfinder::new(&dungeon)
            .with_iteration_cap(5)
            .find_cell_path(start, goal)
            .is_none());
        assert!(Pathfinder::new(&dungeon).find_cell_path(start, goal).is_some());
    }

    #[test]
    fn test_nearest_walkable_prefers_closest_ring() {
        let mut dungeon = Dungeon::new(9, 9);
        dungeon.add_floor(7, 7);
        dungeon.add_floor(3, 4);
        assert_eq!(nearest_walkable(&dungeon, GridPos::new(4, 4)), Some(GridPos::new(3, 4)));
        assert_eq!(nearest_walkable(&dungeon, GridPos::new(3, 4)), Some(GridPos::new(3, 4)));
        assert_eq!(nearest_walkable(&dungeon, GridPos::new(50, 50)), Some(GridPos::new(7, 7)));
    }

    #[test]
    fn test_from_config_uses_cap() {
        let dungeon = open_room(30, 30);
        let config = NavigationConfig {
            iteration_cap: 3,
            ..NavigationConfig::default()
        };
        assert!(Pathfinder::from_config(&dungeon, &config)
            .find_cell_path(GridPos::new(0, 0), GridPos::new(29, 29))
            .is_none());
    }
}
