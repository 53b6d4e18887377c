use serde::{Deserialize, Serialize};

use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Banana,
    Grape,
    Cherry,
    Pineapple,
    Cactus,
}

impl FruitKind {
    pub const ALL: [FruitKind; 5] = [
        FruitKind::Banana,
        FruitKind::Grape,
        FruitKind::Cherry,
        FruitKind::Pineapple,
        FruitKind::Cactus,
    ];

    pub fn score(self) -> u32 {
        match self {
            FruitKind::Banana => 5,
            FruitKind::Grape => 10,
            FruitKind::Cherry => 15,
            FruitKind::Pineapple | FruitKind::Cactus => 20,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            FruitKind::Banana => "platano",
            FruitKind::Grape => "uva",
            FruitKind::Cherry => "cereza",
            FruitKind::Pineapple => "pina",
            FruitKind::Cactus => "cactus",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        FruitKind::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

/// Per-variant behaviour state. Tick counters count entity ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitVariant {
    Banana,
    Grape,
    Cherry { ticks: u32 },
    Pineapple { heading: Direction },
    Cactus { active: bool, ticks: u32 },
}

impl FruitVariant {
    /// Initial state. Only a pineapple uses `heading`.
    pub fn fresh(kind: FruitKind, heading: Direction) -> Self {
        match kind {
            FruitKind::Banana => FruitVariant::Banana,
            FruitKind::Grape => FruitVariant::Grape,
            FruitKind::Cherry => FruitVariant::Cherry { ticks: 0 },
            FruitKind::Pineapple => FruitVariant::Pineapple { heading },
            FruitKind::Cactus => FruitVariant::Cactus { active: false, ticks: 0 },
        }
    }

    pub fn kind(&self) -> FruitKind {
        match self {
            FruitVariant::Banana => FruitKind::Banana,
            FruitVariant::Grape => FruitKind::Grape,
            FruitVariant::Cherry { .. } => FruitKind::Cherry,
            FruitVariant::Pineapple { .. } => FruitKind::Pineapple,
            FruitVariant::Cactus { .. } => FruitKind::Cactus,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fruit {
    pub pos: Pos,
    pub variant: FruitVariant,
}

impl Fruit {
    pub fn new(kind: FruitKind, pos: Pos) -> Self {
        Self { pos, variant: FruitVariant::fresh(kind, Direction::Up) }
    }

    pub fn kind(&self) -> FruitKind {
        self.variant.kind()
    }

    pub fn score(&self) -> u32 {
        self.kind().score()
    }

    /// Only a blooming cactus hurts.
    pub fn is_dangerous(&self) -> bool {
        matches!(self.variant, FruitVariant::Cactus { active: true, .. })
    }

    /// Flips a cactus every `period` calls. Returns the new activity.
    pub(crate) fn advance_bloom(&mut self, period: u32) -> bool {
        match &mut self.variant {
            FruitVariant::Cactus { active, ticks } => {
                *ticks += 1;
                if *ticks >= period {
                    *ticks = 0;
                    *active = !*active;
                }
                *active
            }
            _ => false,
        }
    }

    /// Counts a cherry towards its next jump. True when the jump is due.
    pub(crate) fn advance_teleport(&mut self, period: u32) -> bool {
        match &mut self.variant {
            FruitVariant::Cherry { ticks } => {
                *ticks += 1;
                if *ticks >= period {
                    *ticks = 0;
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}

/// A fruit waiting in a phase manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitSpawn {
    pub kind: FruitKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseManifest {
    pub phase_one: Vec<FruitSpawn>,
    pub phase_two: Vec<FruitSpawn>,
}

impl PhaseManifest {
    pub fn clear(&mut self) {
        self.phase_one.clear();
        self.phase_two.clear();
    }
}
