//! Typed failures of the engine surface. Commands, level files, snapshots and
//! configuration each get their own enum so callers can tell rejected input
//! apart from I/O trouble.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::entities::BlockKind;
use crate::types::{PlayerSlot, Pos};

/// What already sits on a cell that a command or placement wanted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Player,
    Monster,
    Fruit,
    Block(BlockKind),
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Player => f.write_str("player"),
            Occupant::Monster => f.write_str("monster"),
            Occupant::Fruit => f.write_str("fruit"),
            Occupant::Block(kind) => write!(f, "{} block", kind.token()),
        }
    }
}

/// A player command that could not be carried out. The board is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("player {0} is not on the board")]
    PlayerAbsent(PlayerSlot),
    #[error("target {pos} is outside the board")]
    OutOfBounds { pos: Pos },
    #[error("target {pos} is occupied by a {occupant}")]
    Occupied { pos: Pos, occupant: Occupant },
    #[error("no entity behind that handle")]
    UnknownEntity,
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("level is empty, expected the mode line")]
    MissingModeLine,
    #[error("line 1: unsupported mode {found:?}")]
    InvalidMode { found: String },
    #[error("line {line}: missing player {slot} line")]
    MissingPlayerLine { line: usize, slot: PlayerSlot },
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount { line: usize, expected: usize, found: usize },
    #[error("line {line}: {token:?} is not a number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: unknown flavor {token:?}")]
    UnknownFlavor { line: usize, token: String },
    #[error("line {line}: unknown entity kind {token:?}")]
    UnknownKind { line: usize, token: String },
    #[error("line {line}: unknown {kind} type {token:?}")]
    UnknownType { line: usize, kind: &'static str, token: String },
    #[error("line {line}: position {pos} is outside the board")]
    OutOfBounds { line: usize, pos: Pos },
    #[error("line {line}: both players start at {pos}")]
    PlayersOverlap { line: usize, pos: Pos },
    #[error("line {line}: cannot place {entity} at {pos}, occupied by a {occupant}")]
    Occupied { line: usize, entity: &'static str, pos: Pos, occupant: Occupant },
}

impl LevelError {
    /// 1-based line the error refers to, if it came from file content.
    pub fn line(&self) -> Option<usize> {
        match self {
            LevelError::Io(_) | LevelError::MissingModeLine => None,
            LevelError::InvalidMode { .. } => Some(1),
            LevelError::MissingPlayerLine { line, .. }
            | LevelError::FieldCount { line, .. }
            | LevelError::InvalidNumber { line, .. }
            | LevelError::UnknownFlavor { line, .. }
            | LevelError::UnknownKind { line, .. }
            | LevelError::UnknownType { line, .. }
            | LevelError::OutOfBounds { line, .. }
            | LevelError::PlayersOverlap { line, .. }
            | LevelError::Occupied { line, .. } => Some(*line),
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("snapshot format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("snapshot digest mismatch: recorded {recorded}, computed {computed}")]
    DigestMismatch { recorded: String, computed: String },
    #[error("snapshot describes an impossible board: {reason}")]
    InvalidState { reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive cadence")]
    ZeroCadence { field: &'static str },
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("{field} is {value}, chances are percentages in 0..=100")]
    PercentOutOfRange { field: &'static str, value: u32 },
}
