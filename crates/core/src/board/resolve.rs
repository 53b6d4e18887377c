//! Player-facing rules: what happens on a player's cell, how players move,
//! how a machine player picks its step, and who is winning.

use super::*;

impl Board {
    /// Settles the player against everything sharing its cell: a burning fogata first,
    /// then any other danger, then fruit collection.
    pub fn resolve_player(&mut self, slot: PlayerSlot) -> Interaction {
        let Some(pos) = self.player(slot).map(|player| player.pos) else {
            return Interaction::Nothing;
        };

        if self.fogata_burning_at(pos) {
            return self.kill_player(slot, DeathCause::Fogata);
        }
        if let Some(cause) = self.danger_at(pos) {
            return self.kill_player(slot, cause);
        }

        let Some(id) = self.fruit_id_at(pos) else {
            return Interaction::Nothing;
        };
        let Some(fruit) = self.fruit_arena.get(id).copied() else {
            return Interaction::Nothing;
        };
        if fruit.is_dangerous() {
            return self.kill_player(slot, DeathCause::Cactus);
        }
        self.remove_fruit(id);
        let score = fruit.score();
        if let Some(player) = self.roster[slot.index()].as_mut() {
            player.score += score;
        }
        debug!("player {slot} collected {} at {pos} for {score}", fruit.kind().token());
        Interaction::Collected { score }
    }

    fn danger_at(&self, pos: Pos) -> Option<DeathCause> {
        let monster = self.monsters.get(pos).and_then(|id| self.monster_arena.get(id));
        if monster.is_some_and(Monster::is_dangerous) {
            return Some(DeathCause::Monster);
        }
        if self.get_fruit(pos).is_some_and(|fruit| fruit.is_dangerous()) {
            return Some(DeathCause::Cactus);
        }
        if self.blocks.get(pos).is_some_and(|block| block.is_dangerous(self.clock, &self.config)) {
            return Some(DeathCause::Fogata);
        }
        None
    }

    fn kill_player(&mut self, slot: PlayerSlot, cause: DeathCause) -> Interaction {
        if let Some(player) = self.remove_player(slot) {
            info!("player {slot} died at {} ({cause:?}) with score {}", player.pos, player.score);
        }
        Interaction::Died(cause)
    }

    pub fn turn_player(
        &mut self,
        slot: PlayerSlot,
        direction: Direction,
    ) -> Result<(), CommandError> {
        let player = self.roster[slot.index()].as_mut().ok_or(CommandError::PlayerAbsent(slot))?;
        player.facing = direction;
        Ok(())
    }

    /// Moves the player one cell along its view direction. Does not resolve the new cell.
    pub fn move_player(&mut self, slot: PlayerSlot) -> Result<Pos, CommandError> {
        let player = *self.player(slot).ok_or(CommandError::PlayerAbsent(slot))?;
        let target = player.ahead();
        if !target.in_bounds() {
            return Err(CommandError::OutOfBounds { pos: target });
        }
        if self.players.get(target).is_some() {
            return Err(CommandError::Occupied { pos: target, occupant: Occupant::Player });
        }
        if let Some(block) = self.blocks.get(target)
            && !block.player_steppable(self.clock, &self.config)
        {
            let occupant = Occupant::Block(block.kind());
            return Err(CommandError::Occupied { pos: target, occupant });
        }
        self.move_player_to(slot, target);
        Ok(target)
    }

    /// Turn, step and resolve: one directional key press.
    pub fn step_player(
        &mut self,
        slot: PlayerSlot,
        direction: Direction,
    ) -> Result<Interaction, CommandError> {
        self.turn_player(slot, direction)?;
        self.move_player(slot)?;
        Ok(self.resolve_player(slot))
    }

    /// Greedy step towards the nearest fruit, or a random step when no neighbour gets closer.
    pub fn move_machine_player(&mut self, slot: PlayerSlot) -> Result<Interaction, CommandError> {
        let origin = self.player(slot).ok_or(CommandError::PlayerAbsent(slot))?.pos;
        let options: Vec<(Direction, Pos)> = Direction::ALL
            .into_iter()
            .map(|direction| (direction, origin.step(direction)))
            .filter(|&(_, pos)| self.machine_reachable(slot, pos))
            .collect();

        let mut choice = None;
        if let Some(target) = self.nearest_fruit(origin) {
            let mut best = origin.manhattan(target);
            for &(direction, pos) in &options {
                let distance = pos.manhattan(target);
                if distance < best {
                    best = distance;
                    choice = Some((direction, pos));
                }
            }
        }
        let choice = match choice {
            Some(choice) => Some(choice),
            None => self.rng.pick(&options),
        };
        let Some((direction, pos)) = choice else {
            return Ok(Interaction::Nothing);
        };

        self.move_player_to(slot, pos);
        self.turn_player(slot, direction)?;
        Ok(self.resolve_player(slot))
    }

    fn machine_reachable(&self, slot: PlayerSlot, pos: Pos) -> bool {
        pos.in_bounds()
            && self.players.get(pos).is_none_or(|other| other == slot)
            && self.monsters.get(pos).is_none()
            && self.blocks.get(pos).is_none_or(|block| matches!(block, Block::Fogata { .. }))
    }

    /// Manhattan-nearest fruit; the first in row-major order wins ties.
    fn nearest_fruit(&self, from: Pos) -> Option<Pos> {
        let mut best: Option<(u32, Pos)> = None;
        for (pos, _) in self.fruits.occupied() {
            let distance = from.manhattan(pos);
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    /// Higher score wins; a lone survivor wins; otherwise a draw.
    pub fn get_winner(&self) -> Winner {
        match (self.player(PlayerSlot::One), self.player(PlayerSlot::Two)) {
            (Some(one), Some(two)) if one.score > two.score => Winner::PlayerOne,
            (Some(one), Some(two)) if two.score > one.score => Winner::PlayerTwo,
            (Some(_), None) => Winner::PlayerOne,
            (None, Some(_)) => Winner::PlayerTwo,
            _ => Winner::Draw,
        }
    }

    pub fn match_status(&self) -> MatchStatus {
        if self.players().next().is_none() {
            return MatchStatus::AllPlayersDown;
        }
        if self.phase == Phase::Two && self.is_phase_cleared() {
            return MatchStatus::AllPhasesCleared;
        }
        MatchStatus::Running
    }
}
