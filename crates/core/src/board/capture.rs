//! Conversion between a live board and its structural snapshot.
//! Restoring validates the snapshot so a loaded board upholds the layer invariants.

use super::*;
use crate::error::SnapshotError;
use crate::snapshot::{BoardSnapshot, PlacedBlock};

impl Board {
    pub fn capture(&self) -> BoardSnapshot {
        BoardSnapshot {
            config: self.config.clone(),
            clock: self.clock,
            phase: self.phase,
            rng: self.rng.state(),
            blocks: self
                .blocks
                .occupied()
                .into_iter()
                .map(|(pos, block)| PlacedBlock { pos, block })
                .collect(),
            fruits: self.fruits(),
            monsters: self.monsters(),
            players: self.players().copied().collect(),
            manifest: self.manifest.clone(),
            selected_flavors: self.selected_flavors,
        }
    }

    pub fn restore(snapshot: BoardSnapshot) -> Result<Board, SnapshotError> {
        snapshot.config.validate().map_err(|err| invalid(err.to_string()))?;

        let mut board = Board::new(snapshot.config);
        board.clock = snapshot.clock;
        board.phase = snapshot.phase;
        board.rng = SimRng::resume(snapshot.rng);
        if board.rng.state() != snapshot.rng {
            return Err(invalid(format!("rng position {} is out of range", snapshot.rng.word_pos)));
        }

        for PlacedBlock { pos, block } in snapshot.blocks {
            check_pos("block", pos)?;
            if board.blocks.get(pos).is_some() {
                return Err(invalid(format!("two blocks at {pos}")));
            }
            board.set_block(pos, Some(block));
        }
        for fruit in snapshot.fruits {
            check_pos("fruit", fruit.pos)?;
            if board.fruits.get(fruit.pos).is_some() {
                return Err(invalid(format!("two fruit at {}", fruit.pos)));
            }
            board.set_fruit(fruit.pos, Some(fruit));
        }
        for monster in snapshot.monsters {
            check_pos("monster", monster.pos)?;
            if board.monsters.get(monster.pos).is_some() {
                return Err(invalid(format!("two monsters at {}", monster.pos)));
            }
            board.set_monster(monster.pos, Some(monster));
        }
        for player in snapshot.players {
            check_pos("player", player.pos)?;
            if board.player(player.slot).is_some() {
                return Err(invalid(format!("player {} listed twice", player.slot)));
            }
            if board.players.get(player.pos).is_some() {
                return Err(invalid(format!("two players at {}", player.pos)));
            }
            board.set_player(player.pos, Some(player));
        }

        board.manifest = snapshot.manifest;
        board.selected_flavors = snapshot.selected_flavors;
        Ok(board)
    }
}

fn check_pos(entity: &str, pos: Pos) -> Result<(), SnapshotError> {
    if pos.in_bounds() {
        Ok(())
    } else {
        Err(invalid(format!("{entity} at {pos} is outside the board")))
    }
}

fn invalid(reason: String) -> SnapshotError {
    SnapshotError::InvalidState { reason }
}
