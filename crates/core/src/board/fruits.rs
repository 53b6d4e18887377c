//! Fruit behaviour and hot-tile melting.

use super::*;

const CHERRY_JUMP_ATTEMPTS: usize = 100;

impl Board {
    /// Acts every fruit once in row-major order, then settles both players.
    pub fn tick_fruits(&mut self) -> Vec<PlayerEvent> {
        for (pos, id) in self.fruits.occupied() {
            if let Err(err) = self.act_fruit(id) {
                debug!("fruit at {pos} skipped its tick: {err}");
            }
        }

        let mut events = Vec::new();
        for slot in PlayerSlot::ALL {
            if self.player(slot).is_none() {
                continue;
            }
            let interaction = self.resolve_player(slot);
            if interaction != Interaction::Nothing {
                events.push(PlayerEvent { slot, interaction });
            }
        }
        events
    }

    fn act_fruit(&mut self, id: FruitId) -> Result<(), CommandError> {
        let mut fruit = self.fruit_arena.get(id).copied().ok_or(CommandError::UnknownEntity)?;
        match fruit.variant {
            FruitVariant::Banana | FruitVariant::Grape => {}
            FruitVariant::Cactus { .. } => {
                fruit.advance_bloom(self.config.cactus_toggle_ticks);
                self.store_fruit(id, fruit);
            }
            FruitVariant::Cherry { .. } => {
                let due = fruit.advance_teleport(self.config.cherry_teleport_ticks);
                self.store_fruit(id, fruit);
                if due {
                    self.teleport_cherry(id);
                }
            }
            FruitVariant::Pineapple { heading } => {
                if !self.bounce_pineapple(id, heading) {
                    let turned = heading.clockwise();
                    fruit.variant = FruitVariant::Pineapple { heading: turned };
                    self.store_fruit(id, fruit);
                    self.bounce_pineapple(id, turned);
                }
            }
        }
        Ok(())
    }

    fn store_fruit(&mut self, id: FruitId, fruit: Fruit) {
        if let Some(slot) = self.fruit_arena.get_mut(id) {
            slot.variant = fruit.variant;
        }
    }

    /// Jumps to a random cell free on every layer. Gives up quietly after a bounded
    /// number of draws.
    fn teleport_cherry(&mut self, id: FruitId) {
        for _ in 0..CHERRY_JUMP_ATTEMPTS {
            let row = self.rng.below(BOARD_HEIGHT as usize) as i32;
            let col = self.rng.below(BOARD_WIDTH as usize) as i32;
            let pos = Pos::new(row, col);
            if self.cell_is_vacant(pos) {
                self.move_fruit(id, pos);
                return;
            }
        }
        debug!("cherry found no free cell to jump to");
    }

    fn cell_is_vacant(&self, pos: Pos) -> bool {
        self.blocks.get(pos).is_none()
            && self.fruits.get(pos).is_none()
            && self.players.get(pos).is_none()
            && self.monsters.get(pos).is_none()
    }

    /// Rolls one cell along `heading`, or hops a single block when the cell beyond it is clear.
    fn bounce_pineapple(&mut self, id: FruitId, heading: Direction) -> bool {
        let Some(from) = self.fruit_arena.get(id).map(|fruit| fruit.pos) else {
            return false;
        };
        let next = from.step(heading);
        if !next.in_bounds() {
            return false;
        }
        let clear = |board: &Board, pos: Pos| {
            board.blocks.get(pos).is_none()
                && board.monsters.get(pos).is_none()
                && board.fruits.get(pos).is_none()
        };
        if clear(self, next) {
            self.move_fruit(id, next);
            return true;
        }
        if self.blocks.get(next).is_none() {
            return false;
        }
        let landing = next.step(heading);
        if !landing.in_bounds() || !clear(self, landing) {
            return false;
        }
        self.move_fruit(id, landing);
        true
    }

    /// Melts ice that has sat on a hot tile for the full delay. Returns how many melted.
    pub fn tick_hot_tiles(&mut self) -> usize {
        let melting: Vec<Pos> = self
            .blocks
            .occupied()
            .into_iter()
            .filter(|(_, block)| block.should_melt(self.clock, &self.config))
            .map(|(pos, _)| pos)
            .collect();
        for &pos in &melting {
            self.shatter_ice(pos);
        }
        melting.len()
    }
}
