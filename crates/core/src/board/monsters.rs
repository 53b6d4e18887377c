//! Monster behaviour, one state machine per variant.
//! Each act reads the monster out of the arena, decides, and writes facing and
//! variant state back; position changes go through `move_monster`.

use super::*;

impl Board {
    /// Acts every monster once in row-major order, then settles players caught by a monster.
    pub fn tick_monsters(&mut self) -> Vec<PlayerEvent> {
        for (pos, id) in self.monsters.occupied() {
            if let Err(err) = self.act_monster(id) {
                debug!("monster at {pos} skipped its tick: {err}");
            }
        }

        let mut events = Vec::new();
        for slot in PlayerSlot::ALL {
            let caught =
                self.player(slot).is_some_and(|player| self.monsters.get(player.pos).is_some());
            if caught {
                let interaction = self.resolve_player(slot);
                events.push(PlayerEvent { slot, interaction });
            }
        }
        events
    }

    fn act_monster(&mut self, id: MonsterId) -> Result<(), CommandError> {
        let monster = self.monster_entry(id)?;
        match monster.variant {
            MonsterVariant::Troll => self.act_troll(id, monster),
            MonsterVariant::Squid { .. } => self.act_squid(id, monster),
            MonsterVariant::FlowerPot { .. } => self.act_flower_pot(id, monster),
            MonsterVariant::Narwhal { .. } => self.act_narwhal(id, monster),
        }
    }

    // ------------------------------------------------------------------
    // Troll
    // ------------------------------------------------------------------

    fn act_troll(&mut self, id: MonsterId, mut troll: Monster) -> Result<(), CommandError> {
        let ahead = troll.pos.step(troll.facing);
        if self.monster_can_enter(ahead) {
            self.move_monster(id, ahead);
        } else {
            troll.facing = troll.facing.clockwise();
            self.store_monster(id, troll);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Squid
    // ------------------------------------------------------------------

    fn act_squid(&mut self, id: MonsterId, mut squid: Monster) -> Result<(), CommandError> {
        let Some(target) = self.nearest_player_manhattan(squid.pos) else {
            return Ok(());
        };
        let Some(direction) = major_axis_direction(squid.pos, target) else {
            return Ok(());
        };
        squid.facing = direction;
        let ahead = squid.pos.step(direction);

        if !ahead.in_bounds() || self.monsters.get(ahead).is_some() {
            self.store_monster(id, squid);
            return Ok(());
        }
        if self.blocks.get(ahead).is_some_and(|block| block.is_ice()) {
            if squid.chew_ice(ahead, self.config.squid_break_ticks) {
                self.shatter_ice(ahead);
            }
            self.store_monster(id, squid);
            return Ok(());
        }

        squid.forget_ice();
        self.store_monster(id, squid);
        if self.monster_can_enter(ahead) {
            self.move_monster(id, ahead);
        }
        Ok(())
    }

    /// Manhattan-nearer player; player 1 wins ties.
    fn nearest_player_manhattan(&self, from: Pos) -> Option<Pos> {
        let mut best: Option<(u32, Pos)> = None;
        for player in self.players() {
            let distance = from.manhattan(player.pos);
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, player.pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    // ------------------------------------------------------------------
    // Flower pot
    // ------------------------------------------------------------------

    fn act_flower_pot(&mut self, id: MonsterId, mut pot: Monster) -> Result<(), CommandError> {
        let alert = pot.advance_alert_cycle(
            self.config.flower_pot_calm_ticks(),
            self.config.flower_pot_alert_ticks(),
        );
        self.store_monster(id, pot);
        if alert {
            for _ in 0..self.config.flower_pot_alert_moves {
                self.flower_pot_chase_step(id)?;
            }
            Ok(())
        } else {
            self.flower_pot_calm_step(id)
        }
    }

    fn flower_pot_calm_step(&mut self, id: MonsterId) -> Result<(), CommandError> {
        let mut pot = self.monster_entry(id)?;
        let sees_player = self.sees_player(pot.pos, pot.facing);
        pot.set_chasing(sees_player);
        self.store_monster(id, pot);

        if !self.try_monster_step(id, pot.facing)? {
            self.turn_to_random_open_direction(id)?;
            return Ok(());
        }
        if sees_player {
            self.try_monster_step(id, pot.facing)?;
        } else if self.rng.chance(self.config.flower_pot_turn_percent) {
            self.turn_to_random_open_direction(id)?;
        }
        Ok(())
    }

    fn flower_pot_chase_step(&mut self, id: MonsterId) -> Result<(), CommandError> {
        let mut pot = self.monster_entry(id)?;
        let Some(target) = self.nearest_player_euclidean(pot.pos) else {
            return self.flower_pot_calm_step(id);
        };
        pot.set_chasing(true);
        self.store_monster(id, pot);

        let dr = target.row - pot.pos.row;
        let dc = target.col - pot.pos.col;
        let vertical = match dr.signum() {
            1 => Some(Direction::Down),
            -1 => Some(Direction::Up),
            _ => None,
        };
        let horizontal = match dc.signum() {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        };
        let (first, second) =
            if dr.abs() > dc.abs() { (vertical, horizontal) } else { (horizontal, vertical) };

        for direction in [first, second].into_iter().flatten() {
            if self.try_monster_step(id, direction)? {
                return Ok(());
            }
        }
        self.turn_to_random_open_direction(id)
    }

    /// Euclidean-nearest player in row-major order; the first found wins ties.
    fn nearest_player_euclidean(&self, from: Pos) -> Option<Pos> {
        let mut best: Option<(i32, Pos)> = None;
        for (pos, _) in self.players.occupied() {
            let distance = from.distance_squared(pos);
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    /// Faces `direction` and steps if the cell is open. Returns whether it moved.
    fn try_monster_step(
        &mut self,
        id: MonsterId,
        direction: Direction,
    ) -> Result<bool, CommandError> {
        let mut monster = self.monster_entry(id)?;
        monster.facing = direction;
        self.store_monster(id, monster);
        let ahead = monster.pos.step(direction);
        if !self.monster_can_enter(ahead) {
            return Ok(false);
        }
        self.move_monster(id, ahead);
        Ok(true)
    }

    /// Faces a random direction with an open cell, or turns around when boxed in.
    fn turn_to_random_open_direction(&mut self, id: MonsterId) -> Result<(), CommandError> {
        let mut monster = self.monster_entry(id)?;
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| self.monster_can_enter(monster.pos.step(direction)))
            .collect();
        monster.facing = self.rng.pick(&open).unwrap_or(monster.facing.opposite());
        self.store_monster(id, monster);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Narwhal
    // ------------------------------------------------------------------

    fn act_narwhal(&mut self, id: MonsterId, mut narwhal: Monster) -> Result<(), CommandError> {
        if narwhal.is_alert() {
            return self.narwhal_charge_step(id);
        }
        if let Some(direction) = self.charge_direction(narwhal.pos) {
            narwhal.facing = direction;
            narwhal.set_charging(true);
            self.store_monster(id, narwhal);
            return self.narwhal_charge_step(id);
        }
        self.narwhal_wander(id, narwhal)
    }

    fn narwhal_charge_step(&mut self, id: MonsterId) -> Result<(), CommandError> {
        let mut narwhal = self.monster_entry(id)?;
        let ahead = narwhal.pos.step(narwhal.facing);
        let stop = if !ahead.in_bounds() || self.monsters.get(ahead).is_some() {
            true
        } else if self.shatter_ice(ahead) {
            false
        } else {
            !self.monster_can_enter(ahead)
        };
        if stop {
            narwhal.set_charging(false);
            self.store_monster(id, narwhal);
            return Ok(());
        }
        self.move_monster(id, ahead);
        Ok(())
    }

    fn narwhal_wander(&mut self, id: MonsterId, mut narwhal: Monster) -> Result<(), CommandError> {
        if self.rng.chance(self.config.narwhal_turn_percent) {
            narwhal.facing = self.random_direction(narwhal.facing);
        }
        let ahead = narwhal.pos.step(narwhal.facing);
        let on_ice = self.blocks.get(ahead).is_some_and(|block| block.is_ice());
        if on_ice || !self.monster_can_enter(ahead) {
            narwhal.facing = self.random_direction(narwhal.facing);
            self.store_monster(id, narwhal);
            return Ok(());
        }
        self.store_monster(id, narwhal);
        self.move_monster(id, ahead);
        Ok(())
    }

    fn random_direction(&mut self, fallback: Direction) -> Direction {
        self.rng.pick(&Direction::ALL).unwrap_or(fallback)
    }

    /// Direction towards a player sharing a row or column with no ice or decoration
    /// between. Player 1 is checked first.
    fn charge_direction(&self, from: Pos) -> Option<Direction> {
        for player in self.players() {
            let target = player.pos;
            let direction = if target.row == from.row && target.col > from.col {
                Direction::Right
            } else if target.row == from.row && target.col < from.col {
                Direction::Left
            } else if target.col == from.col && target.row > from.row {
                Direction::Down
            } else if target.col == from.col && target.row < from.row {
                Direction::Up
            } else {
                continue;
            };
            if self.clear_line(from, direction, target) {
                return Some(direction);
            }
        }
        None
    }

    /// Whether nothing blocks sight from the cell after `from` up to and including `to`.
    fn clear_line(&self, from: Pos, direction: Direction, to: Pos) -> bool {
        let mut cursor = from;
        loop {
            cursor = cursor.step(direction);
            if !cursor.in_bounds() {
                return false;
            }
            if self.blocks.get(cursor).is_some_and(|block| block.blocks_sight()) {
                return false;
            }
            if cursor == to {
                return true;
            }
        }
    }

    /// Whether a player stands along the view line before the first sight blocker.
    fn sees_player(&self, from: Pos, facing: Direction) -> bool {
        let mut cursor = from.step(facing);
        while cursor.in_bounds() {
            if self.blocks.get(cursor).is_some_and(|block| block.blocks_sight()) {
                return false;
            }
            if self.players.get(cursor).is_some() {
                return true;
            }
            cursor = cursor.step(facing);
        }
        false
    }
}

/// Step along the axis with the larger gap; ties go horizontal. None when already there.
fn major_axis_direction(from: Pos, to: Pos) -> Option<Direction> {
    let dr = to.row - from.row;
    let dc = to.col - from.col;
    if dr.abs() > dc.abs() {
        return Some(if dr > 0 { Direction::Down } else { Direction::Up });
    }
    match dc.signum() {
        1 => Some(Direction::Right),
        -1 => Some(Direction::Left),
        _ => None,
    }
}
