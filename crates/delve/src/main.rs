//! delve: generate a dungeon and query paths through it
//!
//! Prints the dungeon as text (or JSON), optionally followed by the
//! waypoints of one path query.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use delve_core::dungeon::{generate_dungeon, Dungeon, LayoutKind};
use delve_core::nav::{Path, Pathfinder, WorldPos};
use delve_core::{DungeonRng, GenerationConfig};

/// Room layout algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// Random rooms rejected on overlap
    Rejection,
    /// Binary space partitioning
    Partition,
}

impl From<Layout> for LayoutKind {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Rejection => LayoutKind::RejectionSampling,
            Layout::Partition => LayoutKind::SpacePartitioning,
        }
    }
}

/// A path query between two world positions
#[derive(Debug, Clone, Copy, PartialEq)]
struct PathQuery {
    from: WorldPos,
    to: WorldPos,
}

fn parse_point(s: &str) -> Result<WorldPos, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(WorldPos::new(x, y))
}

fn parse_path_query(s: &str) -> Result<PathQuery, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FX,FY:TX,TY, got {s:?}"))?;
    Ok(PathQuery {
        from: parse_point(from)?,
        to: parse_point(to)?,
    })
}

/// Procedural grid dungeon generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a grid dungeon and find paths through it", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Number of rooms to aim for
    #[arg(long)]
    rooms: Option<usize>,

    /// Smallest room side
    #[arg(long = "min-room")]
    min_room: Option<i32>,

    /// Largest room side
    #[arg(long = "max-room")]
    max_room: Option<i32>,

    /// Room layout algorithm
    #[arg(long, value_enum)]
    layout: Option<Layout>,

    /// RNG seed; random if omitted
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// JSON file with generation parameters; flags override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Find a path, e.g. `--path 3.5,4.5:20.5,10.5`
    #[arg(long, value_parser = parse_path_query)]
    path: Option<PathQuery>,

    /// More log output on stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// File configuration (or defaults) with command-line overrides applied
    fn generation_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                GenerationConfig::from_json(&text)
                    .with_context(|| format!("loading {}", path.display()))?
            }
            None => GenerationConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(rooms) = self.rooms {
            config.room_count = rooms;
        }
        if let Some(min) = self.min_room {
            config.min_room_size = min;
        }
        if let Some(max) = self.max_room {
            config.max_room_size = max;
        }
        if let Some(layout) = self.layout {
            config.layout = layout.into();
        }
        config.validate().context("invalid generation parameters")?;
        Ok(config)
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn install_logger(verbose: u8) -> Result<()> {
    use log::LevelFilter::Off;

    simplelog::WriteLogger::init(
        log_level(verbose),
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .set_time_level(Off)
            .build(),
        std::io::stderr(),
    )
    .context("failed to install logger")
}

fn print_text(dungeon: &Dungeon, seed: u64, path: Option<&Option<Path>>) {
    print!("{dungeon}");
    println!("seed: {seed}");
    println!("rooms: {}", dungeon.rooms().len());
    for (i, room) in dungeon.rooms().iter().enumerate() {
        println!("  #{i} {room}");
    }
    match dungeon.start() {
        Some(start) => println!("start: {start}"),
        None => println!("start: none"),
    }
    match dungeon.exit() {
        Some(exit) => println!("exit: {exit}"),
        None => println!("exit: none ({:?})", dungeon.exit_placement()),
    }
    match path {
        None => {}
        Some(None) => println!("no path"),
        Some(Some(path)) => {
            println!("path: {} steps, cost {:.3}", path.len(), path.cost);
            for waypoint in &path.waypoints {
                println!("  {waypoint}");
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    install_logger(args.verbose)?;

    let config = args.generation_config()?;
    let mut rng = args.seed.map_or_else(DungeonRng::from_entropy, DungeonRng::new);
    info!("generating with seed {}", rng.seed());

    let dungeon = generate_dungeon(&config, &mut rng).context("generating dungeon")?;
    let path = args
        .path
        .map(|query| Pathfinder::new(&dungeon).find_path(query.from, query.to));

    if args.json {
        let output = serde_json::json!({
            "seed": rng.seed(),
            "config": config,
            "dungeon": dungeon,
            "path": path,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serializing output")?
        );
    } else {
        print_text(&dungeon, rng.seed(), path.as_ref());
    }
    Ok(())
}
