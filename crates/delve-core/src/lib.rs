//! delve-core: procedural grid dungeons and grid navigation
//!
//! Builds 2-D dungeons out of rooms and L-shaped corridors, marks a start and
//! an exit, and answers A* path queries over the result. This crate has no
//! I/O dependencies; every random decision draws from a caller-supplied
//! [`DungeonRng`], so a seed reproduces a dungeon exactly.
//!
//! ```
//! use delve_core::dungeon::generate_dungeon;
//! use delve_core::nav::{grid_to_world, Pathfinder};
//! use delve_core::{DungeonRng, GenerationConfig};
//!
//! let mut rng = DungeonRng::new(42);
//! let dungeon = generate_dungeon(&GenerationConfig::default(), &mut rng).unwrap();
//! if let (Some(start), Some(exit)) = (dungeon.start(), dungeon.exit()) {
//!     let path = Pathfinder::new(&dungeon).find_path(grid_to_world(start), grid_to_world(exit));
//!     assert!(path.is_some());
//! }
//! ```

pub mod config;
pub mod dungeon;
pub mod nav;

mod consts;
mod error;
mod rng;

pub use config::{GenerationConfig, NavigationConfig};
pub use consts::*;
pub use error::{ConfigError, GridError};
pub use rng::DungeonRng;
