//! Entity variants held by the board layers. This module exists to keep each
//! family a closed sum type with its own per-variant state; the board decides
//! what the variants do on a tick. It does not own any grid state.

mod block;
mod fruit;
mod monster;
mod player;

pub use block::{Block, BlockKind, CoveredHazard};
pub use fruit::{Fruit, FruitKind, FruitSpawn, FruitVariant, PhaseManifest};
pub use monster::{Monster, MonsterKind, MonsterVariant};
pub use player::Player;
