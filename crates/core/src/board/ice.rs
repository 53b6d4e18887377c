//! Directional ice rays. Creation lays ice cell by cell away from an origin;
//! breaking consumes a contiguous run of ice and gives back any hazard it covered.

use super::*;

/// What a shoot command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IceAction {
    Created(usize),
    Broken(usize),
}

impl Board {
    /// Lays ice from the cell beyond `origin` towards `direction`. Stops at the edge,
    /// at a monster or player, or at any block. A fogata or hot tile in the way is
    /// covered by the last ice of the ray. Returns how many cells got ice; an origin
    /// off the board lays nothing.
    pub fn create_ice(&mut self, direction: Direction, origin: Pos) -> usize {
        if !origin.in_bounds() {
            return 0;
        }
        let mut placed = 0;
        let mut cursor = origin.step(direction);
        while cursor.in_bounds() {
            if self.monsters.get(cursor).is_some() || self.players.get(cursor).is_some() {
                break;
            }
            match self.blocks.get(cursor) {
                None => {
                    self.blocks.set(cursor, Some(Block::ICE));
                    placed += 1;
                }
                Some(block) => {
                    if let Some(covered) = block.covered_by_ice(self.clock) {
                        self.blocks.set(cursor, Some(covered));
                        placed += 1;
                    }
                    break;
                }
            }
            cursor = cursor.step(direction);
        }
        debug!("ice ray {direction:?} from {origin} placed {placed}");
        placed
    }

    /// Removes the run of ice starting beyond `origin`. Returns how many cells thawed.
    pub fn break_ice(&mut self, direction: Direction, origin: Pos) -> usize {
        if !origin.in_bounds() {
            return 0;
        }
        let mut broken = 0;
        let mut cursor = origin.step(direction);
        while self.shatter_ice(cursor) {
            broken += 1;
            cursor = cursor.step(direction);
        }
        debug!("ice ray {direction:?} from {origin} broke {broken}");
        broken
    }

    /// Breaks the ice in front of the player, or shoots a new ray into empty space.
    pub fn shoot_or_break_ice(&mut self, slot: PlayerSlot) -> Result<IceAction, CommandError> {
        let player = *self.player(slot).ok_or(CommandError::PlayerAbsent(slot))?;
        let ahead = player.ahead();
        if !ahead.in_bounds() {
            return Err(CommandError::OutOfBounds { pos: ahead });
        }
        if let Some(block) = self.blocks.get(ahead) {
            if block.is_ice() {
                return Ok(IceAction::Broken(self.break_ice(player.facing, player.pos)));
            }
            let occupant = Occupant::Block(block.kind());
            return Err(CommandError::Occupied { pos: ahead, occupant });
        }
        if self.monsters.get(ahead).is_some() {
            return Err(CommandError::Occupied { pos: ahead, occupant: Occupant::Monster });
        }
        if self.players.get(ahead).is_some() {
            return Err(CommandError::Occupied { pos: ahead, occupant: Occupant::Player });
        }
        Ok(IceAction::Created(self.create_ice(player.facing, player.pos)))
    }
}
