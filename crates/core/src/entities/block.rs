use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Ice,
    Decoration,
    Fogata,
    HotTile,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] =
        [BlockKind::Ice, BlockKind::Decoration, BlockKind::Fogata, BlockKind::HotTile];

    pub fn token(self) -> &'static str {
        match self {
            BlockKind::Ice => "iceblock",
            BlockKind::Decoration => "decoration",
            BlockKind::Fogata => "fogata",
            BlockKind::HotTile => "baldosa",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        BlockKind::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

/// Hazard remembered under a sheet of ice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoveredHazard {
    Fogata,
    /// `since` is the physics tick the ice landed on the tile.
    HotTile { since: u64 },
}

/// Timestamps are physics ticks on the board clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    Ice { covers: Option<CoveredHazard> },
    Decoration,
    Fogata { lit_at: u64 },
    HotTile,
}

impl Block {
    pub const ICE: Block = Block::Ice { covers: None };

    /// Fresh block of `kind` created at tick `now`.
    pub fn fresh(kind: BlockKind, now: u64) -> Self {
        match kind {
            BlockKind::Ice => Block::ICE,
            BlockKind::Decoration => Block::Decoration,
            BlockKind::Fogata => Block::Fogata { lit_at: now },
            BlockKind::HotTile => Block::HotTile,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Ice { .. } => BlockKind::Ice,
            Block::Decoration => BlockKind::Decoration,
            Block::Fogata { .. } => BlockKind::Fogata,
            Block::HotTile => BlockKind::HotTile,
        }
    }

    pub fn is_ice(&self) -> bool {
        matches!(self, Block::Ice { .. })
    }

    /// Ice and decorations stop line of sight; hazards on the floor do not.
    pub fn blocks_sight(&self) -> bool {
        matches!(self, Block::Ice { .. } | Block::Decoration)
    }

    pub fn monster_passable(&self) -> bool {
        matches!(self, Block::Fogata { .. } | Block::HotTile)
    }

    /// A fogata burns once its activation delay has elapsed.
    pub fn is_active(&self, now: u64, config: &EngineConfig) -> bool {
        match self {
            Block::Fogata { lit_at } => {
                now.saturating_sub(*lit_at) >= config.fogata_activation_ticks()
            }
            _ => false,
        }
    }

    pub fn is_dangerous(&self, now: u64, config: &EngineConfig) -> bool {
        self.is_active(now, config)
    }

    pub fn player_steppable(&self, now: u64, config: &EngineConfig) -> bool {
        match self {
            Block::HotTile => true,
            Block::Fogata { .. } => !self.is_active(now, config),
            Block::Ice { .. } | Block::Decoration => false,
        }
    }

    /// Ice laid over this block, if it is a hazard that ice can cover.
    pub fn covered_by_ice(&self, now: u64) -> Option<Block> {
        match self {
            Block::Fogata { .. } => Some(Block::Ice { covers: Some(CoveredHazard::Fogata) }),
            Block::HotTile => {
                Some(Block::Ice { covers: Some(CoveredHazard::HotTile { since: now }) })
            }
            Block::Ice { .. } | Block::Decoration => None,
        }
    }

    /// What remains once this ice is broken or melted: the covered hazard, freshly made.
    pub fn after_thaw(&self, now: u64) -> Option<Block> {
        match self {
            Block::Ice { covers: Some(CoveredHazard::Fogata) } => {
                Some(Block::Fogata { lit_at: now })
            }
            Block::Ice { covers: Some(CoveredHazard::HotTile { .. }) } => Some(Block::HotTile),
            _ => None,
        }
    }

    /// Ice resting on a hot tile for the full melt delay.
    pub fn should_melt(&self, now: u64, config: &EngineConfig) -> bool {
        match self {
            Block::Ice { covers: Some(CoveredHazard::HotTile { since }) } => {
                now.saturating_sub(*since) >= config.hot_tile_melt_ticks()
            }
            _ => false,
        }
    }
}
