use anyhow::{Context, Result};
use clap::Parser;
use icecream_core::{Board, Direction, EngineConfig, MachineControl, PlayerSlot, Pos};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::path::PathBuf;

const DEFAULT_LEVEL: &str = "\
jugador vs jugador
vainilla 4 4
fresa 11 11
monster troll 1 1
monster calamar 14 2
monster maceta 2 13
monster narval 8 8
block fogata 6 6
block baldosa 9 9
block decoration 5 10
fruit cactus 3 3
fruit cereza 12 12
fruit pina 7 2
fruit uva 13 7
phase 2
fruit platano 0 15
fruit uva 15 0
";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    /// Level file to fuzz instead of the built-in arena
    #[arg(short, long)]
    level: Option<PathBuf>,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} entity ticks...", args.seed, args.ticks);
    let mut board = Board::new(EngineConfig::with_seed(args.seed));
    match &args.level {
        Some(path) => board
            .import_level(path)
            .with_context(|| format!("Failed to import level: {}", path.display()))?,
        None => board.import_level_str(DEFAULT_LEVEL).context("Built-in level failed to import")?,
    }
    let physics_per_entity = board.config().physics_ticks_per_entity_tick();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed ^ 0x1CE_C8EA);

    for tick in 0..args.ticks {
        // Each player is either handed to the machine or pressed at random this tick.
        let control = MachineControl {
            player_one: rng.next_u64() % 2 == 0,
            player_two: rng.next_u64() % 2 == 0,
        };
        for slot in PlayerSlot::ALL {
            if control.controls(slot) || board.player(slot).is_none() {
                continue;
            }
            // Rejected commands are expected here.
            match rng.next_u64() % 4 {
                0 => {
                    let _ = board.shoot_or_break_ice(slot);
                }
                1 => {}
                _ => {
                    let _ = board.step_player(slot, choose(&mut rng, &Direction::ALL));
                }
            }
        }

        for _ in 0..physics_per_entity {
            board.physics_tick();
            assert_invariants(&board);
        }
        let status = board.entity_tick(control);
        assert_invariants(&board);

        if status.is_over() {
            println!(
                "Finished with {:?} after {} entity ticks (winner: {})",
                status,
                tick + 1,
                board.get_winner()
            );
            break;
        }
    }

    println!("Final snapshot hash: {}", board.snapshot_hash());
    println!("Fuzzing completed successfully.");
    Ok(())
}

fn assert_invariants(board: &Board) {
    for player in board.players() {
        let at = board.get_player(player.pos);
        assert_eq!(
            at.map(|found| found.slot),
            Some(player.slot),
            "Invariant failed: player handle out of sync"
        );
        let block = board.get_block(player.pos);
        assert!(
            block.is_none_or(|block| !block.blocks_sight()),
            "Invariant failed: player inside {block:?}"
        );
        assert!(
            board.get_monster(player.pos).is_none(),
            "Invariant failed: player shares a cell with a monster"
        );
    }
    for pos in Pos::all() {
        if let Some(monster) = board.get_monster(pos) {
            assert_eq!(monster.pos, pos, "Invariant failed: monster position cache");
            let block = board.get_block(pos);
            assert!(
                block.is_none_or(|block| block.monster_passable()),
                "Invariant failed: monster inside {block:?}"
            );
        }
        if let Some(fruit) = board.get_fruit(pos) {
            assert_eq!(fruit.pos, pos, "Invariant failed: fruit position cache");
        }
    }
}
