//! # Dungeon Generator Entry Point
//!
//! Generates a single level from a seed and dumps it as text or JSON.

use clap::{Parser, ValueEnum};
use log::{error, info};
use squashdelve::{
    DungeonResult, EncounterGenerator, GeneratedMap, GenerationConfig, Generator, Item,
    ItemGenerator, MapGenerator, Monster, Populator,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Output formats for the generated level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// ASCII dump: `.` floor, `#` wall, `>` staircase
    Text,
    /// Grid, rooms and entities as JSON
    Json,
}

/// Command line arguments for the dungeon generator.
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen")]
#[command(about = "Generate a squashed room-and-corridor dungeon level")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Side length of the square grid
    #[arg(long)]
    size: Option<u32>,

    /// JSON file with a generation configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the level to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// A generated level with its population, as written by `--format json`.
#[derive(Debug, Serialize)]
struct LevelDump {
    seed: u64,
    #[serde(flatten)]
    map: GeneratedMap,
    monsters: Vec<Monster>,
    items: Vec<Item>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting dungeon-gen v{}", squashdelve::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes `env_logger`, letting `RUST_LOG` override the flag.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn run(args: &Args) -> DungeonResult<()> {
    let config = load_config(args)?;
    info!("Generating level with seed: {}", config.seed);

    let dump = generate_level(&config)?;
    let rendered = render(&dump, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("Wrote level to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Builds the configuration from the optional file, then applies flag overrides.
fn load_config(args: &Args) -> DungeonResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(size) = args.size {
        config.size = size;
    }
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> DungeonResult<GenerationConfig> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn generate_level(config: &GenerationConfig) -> DungeonResult<LevelDump> {
    let mut rng = config.create_rng();
    let map = MapGenerator::new().generate(config, &mut rng)?;
    let monsters = EncounterGenerator::new().populate(&map.grid, config, &mut rng)?;
    let items = ItemGenerator::new().populate(&map.grid, config, &mut rng)?;

    Ok(LevelDump {
        seed: config.seed,
        map,
        monsters,
        items,
    })
}

fn render(dump: &LevelDump, format: OutputFormat) -> DungeonResult<String> {
    match format {
        OutputFormat::Text => Ok(dump.map.grid.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(dump)?),
    }
}
