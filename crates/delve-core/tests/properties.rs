//! Property tests over random seeds and configurations

use delve_core::dungeon::{
    corridor_cells, generate_dungeon, Bend, Dungeon, ExitPlacement, LayoutKind, RoomId,
};
use delve_core::nav::{grid_to_world, Pathfinder};
use delve_core::{DungeonRng, GenerationConfig, DIAGONAL_COST};
use proptest::prelude::*;

fn layout() -> impl Strategy<Value = LayoutKind> {
    prop_oneof![
        Just(LayoutKind::RejectionSampling),
        Just(LayoutKind::SpacePartitioning),
    ]
}

prop_compose! {
    fn config()(
        width in 20usize..80,
        height in 20usize..60,
        room_count in 0usize..15,
        min_room_size in 2i32..5,
        extra in 0i32..5,
        room_offset in 0i32..3,
        layout in layout(),
    ) -> GenerationConfig {
        GenerationConfig {
            width,
            height,
            room_count,
            min_room_size,
            max_room_size: min_room_size + extra,
            room_offset,
            layout,
            ..GenerationConfig::default()
        }
    }
}

fn generate(config: &GenerationConfig, seed: u64) -> Dungeon {
    let mut rng = DungeonRng::new(seed);
    generate_dungeon(config, &mut rng).unwrap()
}

fn octile(dx: i32, dy: i32) -> f32 {
    let (dx, dy) = (dx.abs(), dy.abs());
    let diagonal = dx.min(dy) as f32;
    let straight = (dx.max(dy) - dx.min(dy)) as f32;
    diagonal * DIAGONAL_COST + straight
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rooms_never_overlap(config in config(), seed in any::<u64>()) {
        let dungeon = generate(&config, seed);
        let rooms = dungeon.rooms();
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                prop_assert!(!a.intersects(b), "{} overlaps {}", a, b);
            }
        }
    }

    #[test]
    fn prop_rooms_in_bounds_and_sized(config in config(), seed in any::<u64>()) {
        let dungeon = generate(&config, seed);
        prop_assert!(dungeon.rooms().len() <= config.room_count);
        for room in dungeon.rooms() {
            prop_assert!(room.x >= 0 && room.y >= 0);
            prop_assert!(room.right() <= config.width as i32);
            prop_assert!(room.top() <= config.height as i32);
            prop_assert!(room.width >= config.min_room_size);
            prop_assert!(room.height >= config.min_room_size);
        }
    }

    #[test]
    fn prop_all_rooms_connected(config in config(), seed in any::<u64>()) {
        let dungeon = generate(&config, seed);
        prop_assert!(dungeon.is_fully_connected());
        for i in 0..dungeon.rooms().len() {
            prop_assert!(dungeon.rooms_connected(RoomId(0), RoomId(i)));
        }
    }

    #[test]
    fn prop_corridors_are_carved(config in config(), seed in any::<u64>()) {
        let dungeon = generate(&config, seed);
        for (i, room) in dungeon.rooms().iter().enumerate() {
            for other in &room.connected {
                let (Some(a), Some(b)) = (dungeon.room(RoomId(i)), dungeon.room(*other)) else {
                    continue;
                };
                let carved = [Bend::VerticalFirst, Bend::HorizontalFirst].iter().any(|&bend| {
                    corridor_cells(a.center(), b.center(), bend)
                        .iter()
                        .all(|p| dungeon.is_walkable(p.x, p.y))
                });
                prop_assert!(carved, "no corridor between {} and {}", a, b);
            }
        }
    }

    #[test]
    fn prop_start_and_exit_placement(config in config(), seed in any::<u64>()) {
        let dungeon = generate(&config, seed);
        if dungeon.rooms().is_empty() {
            prop_assert_eq!(dungeon.exit_placement(), Some(&ExitPlacement::NoRooms));
            prop_assert!(dungeon.start().is_none());
            return Ok(());
        }

        let start = dungeon.start().unwrap();
        let start_room = dungeon.room(dungeon.start_room().unwrap()).unwrap();
        prop_assert!(start_room.contains(start.x, start.y));
        prop_assert!(dungeon.is_start(start.x, start.y));

        match dungeon.exit_placement() {
            Some(ExitPlacement::Anchored { room, cell }) => {
                let room = dungeon.room(*room).unwrap();
                prop_assert_eq!(dungeon.exit(), Some(*cell));
                prop_assert!(!room.contains(cell.x, cell.y));
                prop_assert!(cell.x >= room.x - 1 && cell.x <= room.right());
                prop_assert!(cell.y >= room.y - 1 && cell.y <= room.top());
                if dungeon.rooms().len() > 1 {
                    prop_assert_ne!(Some(start), dungeon.exit());
                }
            }
            Some(ExitPlacement::NoWallCandidate { .. }) => prop_assert!(dungeon.exit().is_none()),
            other => prop_assert!(false, "unexpected exit placement {:?}", other),
        }
    }

    #[test]
    fn prop_paths_are_valid(config in config(), seed in any::<u64>()) {
        let dungeon = generate(&config, seed);
        let (Some(start), Some(exit)) = (dungeon.start(), dungeon.exit()) else {
            return Ok(());
        };
        let path = Pathfinder::new(&dungeon)
            .find_path(grid_to_world(start), grid_to_world(exit))
            .unwrap();

        prop_assert!(path.cost + 1e-3 >= octile(exit.x - start.x, exit.y - start.y));
        let mut prev = start;
        for &cell in &path.cells {
            let (dx, dy) = (cell.x - prev.x, cell.y - prev.y);
            prop_assert!(dx.abs() <= 1 && dy.abs() <= 1);
            prop_assert!(dungeon.is_walkable(cell.x, cell.y));
            if dx != 0 && dy != 0 {
                prop_assert!(dungeon.is_walkable(prev.x + dx, prev.y));
                prop_assert!(dungeon.is_walkable(prev.x, prev.y + dy));
            }
            prev = cell;
        }
        prop_assert_eq!(prev, exit);
    }
}
