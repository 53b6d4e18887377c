use serde::{Deserialize, Serialize};

use crate::types::{Direction, Flavor, PlayerSlot, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub slot: PlayerSlot,
    pub pos: Pos,
    pub facing: Direction,
    pub score: u32,
    pub flavor: Flavor,
}

impl Player {
    pub fn new(slot: PlayerSlot, pos: Pos, flavor: Flavor) -> Self {
        Self { slot, pos, facing: Direction::Down, score: 0, flavor }
    }

    pub fn ahead(&self) -> Pos {
        self.pos.step(self.facing)
    }
}
