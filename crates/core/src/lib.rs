pub mod board;
pub mod config;
pub mod entities;
pub mod error;
pub mod level;
mod rng;
pub mod snapshot;
pub mod types;

pub use board::{Board, IceAction};
pub use config::EngineConfig;
pub use entities::*;
pub use error::{CommandError, ConfigError, LevelError, Occupant, SnapshotError};
pub use level::{Level, parse_level, render_level};
pub use rng::RngState;
pub use snapshot::{BoardSnapshot, decode_snapshot, encode_snapshot};
pub use types::*;
