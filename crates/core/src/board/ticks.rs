//! The two cadences a host drives: a fast physics tick and a slower entity tick.

use super::*;

impl Board {
    /// Advances the clock, melts ice on hot tiles and opens phase 2 once phase 1 is cleared.
    pub fn physics_tick(&mut self) -> MatchStatus {
        self.clock += 1;
        self.tick_hot_tiles();
        if self.phase == Phase::One && self.is_phase_cleared() {
            self.go_to_next_phase();
        }
        self.match_status()
    }

    /// Monsters act, then machine-driven players, then fruit.
    pub fn entity_tick(&mut self, control: MachineControl) -> MatchStatus {
        self.tick_monsters();
        for slot in PlayerSlot::ALL {
            if !control.controls(slot) || self.player(slot).is_none() {
                continue;
            }
            if let Err(err) = self.move_machine_player(slot) {
                debug!("machine player {slot} skipped its move: {err}");
            }
        }
        self.tick_fruits();
        self.match_status()
    }
}
