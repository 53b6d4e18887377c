//! `icecream`: headless driver for the arena engine.
//!
//! Checks level files, runs machine-vs-machine matches and converts saved
//! boards back into level files.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use icecream_core::{Board, EngineConfig, MachineControl, MatchStatus, PlayerSlot};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a level file and print what it places
    Check {
        #[arg(short, long)]
        level: PathBuf,
    },
    /// Run a machine-controlled match from a level file
    Simulate {
        #[arg(short, long)]
        level: PathBuf,

        /// Overrides the seed from the config file
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum number of entity ticks before giving up
        #[arg(short, long, default_value_t = 2000)]
        ticks: u32,

        /// TOML file with engine timings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the final board to this snapshot file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Load a saved board and write it out as a level file
    Export {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { level } => check(&level),
        Commands::Simulate { level, seed, ticks, config, save } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config.seed = seed;
            }
            simulate(&level, config, ticks, save.as_deref())
        }
        Commands::Export { snapshot, out } => {
            let board = Board::load(&snapshot)
                .with_context(|| format!("Failed to load snapshot: {}", snapshot.display()))?;
            board
                .export_level(&out)
                .with_context(|| format!("Failed to write level file: {}", out.display()))?;
            println!("Exported {} to {}", snapshot.display(), out.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: EngineConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate().with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

fn check(level: &Path) -> Result<()> {
    let mut board = Board::default();
    board
        .import_level(level)
        .with_context(|| format!("Failed to import level: {}", level.display()))?;

    println!("Level {} is valid.", level.display());
    for slot in PlayerSlot::ALL {
        match board.player(slot) {
            Some(player) => println!("Player {slot}: {} at {}", player.flavor.token(), player.pos),
            None => println!("Player {slot}: absent"),
        }
    }
    println!("Blocks: {}", board.blocks().len());
    println!("Monsters: {}", board.monsters().len());
    println!("Fruit (phase 1): {}", board.fruits().len());
    println!("Fruit (phase 2): {}", board.manifest().phase_two.len());
    Ok(())
}

struct SimulationReport {
    status: MatchStatus,
    entity_ticks: u32,
    board: Board,
}

fn run_simulation(
    level: &Path,
    config: EngineConfig,
    max_entity_ticks: u32,
) -> Result<SimulationReport> {
    let physics_per_entity = config.physics_ticks_per_entity_tick();
    let mut board = Board::new(config);
    board
        .import_level(level)
        .with_context(|| format!("Failed to import level: {}", level.display()))?;

    let mut status = board.match_status();
    let mut entity_ticks = 0;
    while !status.is_over() && entity_ticks < max_entity_ticks {
        for _ in 0..physics_per_entity {
            status = board.physics_tick();
        }
        if status.is_over() {
            break;
        }
        status = board.entity_tick(MachineControl::BOTH);
        entity_ticks += 1;
    }
    info!("simulation stopped after {entity_ticks} entity ticks with {status:?}");
    Ok(SimulationReport { status, entity_ticks, board })
}

fn simulate(
    level: &Path,
    config: EngineConfig,
    max_entity_ticks: u32,
    save: Option<&Path>,
) -> Result<()> {
    let seed = config.seed;
    let report = run_simulation(level, config, max_entity_ticks)?;
    let board = &report.board;

    println!("Simulation complete (seed {seed}).");
    println!("Entity ticks: {}", report.entity_ticks);
    println!("Clock: {}", board.clock());
    println!("Status: {:?}", report.status);
    println!("Phase: {}", board.phase().number());
    for player in board.players() {
        println!("Player {} score: {}", player.slot, player.score);
    }
    if report.status.is_over() {
        println!("Winner: {}", board.get_winner());
    }
    println!("Snapshot Hash: {}", board.snapshot_hash());

    if let Some(path) = save {
        board.save(path).with_context(|| format!("Failed to save board: {}", path.display()))?;
        println!("Saved board to {}", path.display());
    }
    Ok(())
}
