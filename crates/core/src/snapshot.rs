//! Whole-board save files (`.sav`).
//!
//! A save file is one JSON document:
//! - `format_version`: bumped whenever `BoardSnapshot` changes shape.
//! - `sha256_hex`: SHA-256 of the canonical JSON of `board`.
//! - `board`: the structural snapshot, layers listed row-major.
//!
//! Writes go to a temporary sibling and are renamed into place, so a crash never
//! leaves a half-written save. Loading verifies version and digest before any board is built.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::entities::{Block, Fruit, Monster, PhaseManifest, Player};
use crate::error::SnapshotError;
use crate::rng::RngState;
use crate::types::{Flavor, Phase, Pos};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Snapshot structs
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub pos: Pos,
    pub block: Block,
}

/// Everything needed to rebuild a board that continues exactly where the original stood.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub config: EngineConfig,
    pub clock: u64,
    pub phase: Phase,
    pub rng: RngState,
    pub blocks: Vec<PlacedBlock>,
    pub fruits: Vec<Fruit>,
    pub monsters: Vec<Monster>,
    pub players: Vec<Player>,
    pub manifest: PhaseManifest,
    pub selected_flavors: [Option<Flavor>; 2],
}

#[derive(Serialize, Deserialize)]
struct SaveFile {
    format_version: u32,
    sha256_hex: String,
    board: BoardSnapshot,
}

fn digest(snapshot: &BoardSnapshot) -> Result<String, SnapshotError> {
    let json = serde_json::to_string(snapshot)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:064x}", hasher.finalize()))
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub fn encode_snapshot(board: &Board) -> Result<Vec<u8>, SnapshotError> {
    let snapshot = board.capture();
    let sha256_hex = digest(&snapshot)?;
    let file = SaveFile { format_version: SNAPSHOT_FORMAT_VERSION, sha256_hex, board: snapshot };
    Ok(serde_json::to_vec_pretty(&file)?)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Board, SnapshotError> {
    let file: SaveFile = serde_json::from_slice(bytes)?;
    if file.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: file.format_version,
            expected: SNAPSHOT_FORMAT_VERSION,
        });
    }
    let computed = digest(&file.board)?;
    if computed != file.sha256_hex {
        return Err(SnapshotError::DigestMismatch { recorded: file.sha256_hex, computed });
    }
    Board::restore(file.board)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

impl Board {
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = encode_snapshot(self)?;
        let tmp_path = path.with_extension("sav.tmp");
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, path)?;
        info!("saved board at clock {} to {}", self.clock(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Board, SnapshotError> {
        let bytes = fs::read(path)?;
        let board = decode_snapshot(&bytes)?;
        info!("loaded board at clock {} from {}", board.clock(), path.display());
        Ok(board)
    }
}

#[cfg(test)]
mod tests;
