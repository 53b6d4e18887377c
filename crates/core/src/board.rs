//! Layered board state and the command surface that drives it.
//! This module exists to own every entity on the 16x16 board: four parallel layers
//! (blocks, fruits, monsters, players), the phase, the fruit manifest and the seeded RNG.
//! Behaviour lives in focused submodules that all work through `impl Board`.
//! It does not own file formats; see `level` and `snapshot`.

use std::mem;

use log::{debug, info, warn};
use slotmap::SlotMap;

use crate::config::EngineConfig;
use crate::entities::{
    Block, Fruit, FruitKind, FruitSpawn, FruitVariant, Monster, MonsterVariant, PhaseManifest,
    Player,
};
use crate::error::{CommandError, Occupant};
use crate::rng::SimRng;
use crate::types::*;

mod capture;
mod fruits;
mod hash;
mod ice;
mod monsters;
mod resolve;
mod ticks;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use ice::IceAction;

/// One 16x16 layer stored row-major.
#[derive(Clone, Debug)]
pub(crate) struct Grid<T> {
    cells: Vec<Option<T>>,
}

impl<T: Copy> Grid<T> {
    fn new() -> Self {
        Self { cells: vec![None; BOARD_CELLS] }
    }

    pub(crate) fn get(&self, pos: Pos) -> Option<T> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.index()]
    }

    /// Overwrites the cell and hands back what was there. Out-of-bounds writes are ignored.
    fn set(&mut self, pos: Pos, value: Option<T>) -> Option<T> {
        if !pos.in_bounds() {
            return None;
        }
        mem::replace(&mut self.cells[pos.index()], value)
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Occupied cells in row-major order.
    pub(crate) fn occupied(&self) -> Vec<(Pos, T)> {
        Pos::all().filter_map(|pos| self.get(pos).map(|value| (pos, value))).collect()
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    config: EngineConfig,
    /// Physics ticks since the board was created or loaded.
    clock: u64,
    phase: Phase,
    blocks: Grid<Block>,
    fruits: Grid<FruitId>,
    monsters: Grid<MonsterId>,
    players: Grid<PlayerSlot>,
    fruit_arena: SlotMap<FruitId, Fruit>,
    monster_arena: SlotMap<MonsterId, Monster>,
    roster: [Option<Player>; 2],
    manifest: PhaseManifest,
    selected_flavors: [Option<Flavor>; 2],
    rng: SimRng,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Board {
    pub fn new(config: EngineConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self {
            config,
            clock: 0,
            phase: Phase::One,
            blocks: Grid::new(),
            fruits: Grid::new(),
            monsters: Grid::new(),
            players: Grid::new(),
            fruit_arena: SlotMap::with_key(),
            monster_arena: SlotMap::with_key(),
            roster: [None, None],
            manifest: PhaseManifest::default(),
            selected_flavors: [None, None],
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(EngineConfig::with_seed(seed))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn manifest(&self) -> &PhaseManifest {
        &self.manifest
    }

    pub fn selected_flavors(&self) -> [Option<Flavor>; 2] {
        self.selected_flavors
    }

    /// Flavors chosen before a match. They win over the flavors written in a level file.
    pub fn set_player_flavors(&mut self, one: Option<Flavor>, two: Option<Flavor>) {
        self.selected_flavors = [one, two];
    }

    // ------------------------------------------------------------------
    // Layer accessors
    // ------------------------------------------------------------------

    pub fn get_block(&self, pos: Pos) -> Option<Block> {
        self.blocks.get(pos)
    }

    pub fn set_block(&mut self, pos: Pos, block: Option<Block>) {
        self.blocks.set(pos, block);
    }

    pub fn get_fruit(&self, pos: Pos) -> Option<Fruit> {
        self.fruits.get(pos).and_then(|id| self.fruit_arena.get(id).copied())
    }

    /// Places `fruit` at `pos`, replacing whatever fruit was there.
    pub fn set_fruit(&mut self, pos: Pos, fruit: Option<Fruit>) {
        if !pos.in_bounds() {
            return;
        }
        let id = fruit.map(|fruit| self.fruit_arena.insert(Fruit { pos, ..fruit }));
        if let Some(previous) = self.fruits.set(pos, id) {
            self.fruit_arena.remove(previous);
        }
    }

    pub fn get_monster(&self, pos: Pos) -> Option<Monster> {
        self.monsters.get(pos).and_then(|id| self.monster_arena.get(id).copied())
    }

    /// Places `monster` at `pos`, replacing whatever monster was there.
    pub fn set_monster(&mut self, pos: Pos, monster: Option<Monster>) {
        if !pos.in_bounds() {
            return;
        }
        let id = monster.map(|monster| self.monster_arena.insert(Monster { pos, ..monster }));
        if let Some(previous) = self.monsters.set(pos, id) {
            self.monster_arena.remove(previous);
        }
    }

    pub fn get_player(&self, pos: Pos) -> Option<Player> {
        self.players.get(pos).and_then(|slot| self.roster[slot.index()])
    }

    /// Places a player at `pos`. The player's slot handle follows it: an earlier cell
    /// holding the same slot is cleared, and a different player displaced from `pos` is dropped.
    pub fn set_player(&mut self, pos: Pos, player: Option<Player>) {
        if !pos.in_bounds() {
            return;
        }
        if let Some(displaced) = self.players.set(pos, None) {
            self.roster[displaced.index()] = None;
        }
        let Some(player) = player else {
            return;
        };
        if let Some(previous) = self.roster[player.slot.index()] {
            self.players.set(previous.pos, None);
        }
        self.players.set(pos, Some(player.slot));
        self.roster[player.slot.index()] = Some(Player { pos, ..player });
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&Player> {
        self.roster[slot.index()].as_ref()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.roster.iter().flatten()
    }

    /// Fruit on the board in row-major order.
    pub fn fruits(&self) -> Vec<Fruit> {
        self.fruits
            .occupied()
            .into_iter()
            .filter_map(|(_, id)| self.fruit_arena.get(id).copied())
            .collect()
    }

    /// Monsters on the board in row-major order.
    pub fn monsters(&self) -> Vec<Monster> {
        self.monsters
            .occupied()
            .into_iter()
            .filter_map(|(_, id)| self.monster_arena.get(id).copied())
            .collect()
    }

    /// Blocks on the board in row-major order.
    pub fn blocks(&self) -> Vec<(Pos, Block)> {
        self.blocks.occupied()
    }

    // ------------------------------------------------------------------
    // Lifecycle and phases
    // ------------------------------------------------------------------

    /// Empties every layer, drops both players and the manifest, and returns to phase 1.
    /// The clock, RNG stream and flavor selection carry on.
    pub fn reboot(&mut self) {
        self.blocks.clear();
        self.fruits.clear();
        self.monsters.clear();
        self.players.clear();
        self.fruit_arena.clear();
        self.monster_arena.clear();
        self.roster = [None, None];
        self.manifest.clear();
        self.phase = Phase::One;
    }

    pub fn is_phase_cleared(&self) -> bool {
        self.fruits.is_empty()
    }

    /// Sum of the scores of every fruit still on the board.
    pub fn calculate_phase_score(&self) -> u32 {
        self.fruit_arena.values().map(Fruit::score).sum()
    }

    /// Moves from phase 1 to phase 2 once every fruit is gone, spawning the phase-2 fruit.
    /// Returns whether the phase changed.
    pub fn go_to_next_phase(&mut self) -> bool {
        if self.phase != Phase::One || !self.is_phase_cleared() {
            return false;
        }
        self.phase = Phase::Two;
        let spawns = self.manifest.phase_two.clone();
        let mut spawned = 0;
        for FruitSpawn { kind, pos } in spawns {
            if !pos.in_bounds() {
                warn!("phase 2 {} at {pos} is outside the board, skipped", kind.token());
                continue;
            }
            if let Some(occupant) = self.fruit_conflict(pos) {
                warn!("phase 2 {} at {pos} is covered by a {occupant}, skipped", kind.token());
                continue;
            }
            self.spawn_fruit(kind, pos);
            spawned += 1;
        }
        info!("advanced to phase 2 with {spawned} fruit");
        true
    }

    pub(crate) fn set_manifest(&mut self, manifest: PhaseManifest) {
        self.manifest = manifest;
    }

    /// Creates a fresh fruit of `kind` at `pos`; pineapples get a random heading.
    pub fn spawn_fruit(&mut self, kind: FruitKind, pos: Pos) {
        let heading = match kind {
            FruitKind::Pineapple => self.rng.pick(&Direction::ALL).unwrap_or(Direction::Up),
            _ => Direction::Up,
        };
        self.set_fruit(pos, Some(Fruit { pos, variant: FruitVariant::fresh(kind, heading) }));
    }

    // ------------------------------------------------------------------
    // Shared occupancy rules
    // ------------------------------------------------------------------

    /// Why a fruit may not be placed at `pos`, if anything stands in the way.
    pub(crate) fn fruit_conflict(&self, pos: Pos) -> Option<Occupant> {
        if self.fruits.get(pos).is_some() {
            return Some(Occupant::Fruit);
        }
        if let Some(block) = self.blocks.get(pos)
            && block.blocks_sight()
        {
            return Some(Occupant::Block(block.kind()));
        }
        if self.players.get(pos).is_some() {
            return Some(Occupant::Player);
        }
        if self.monsters.get(pos).is_some() {
            return Some(Occupant::Monster);
        }
        None
    }

    /// Whether a monster could step onto `pos`.
    fn monster_can_enter(&self, pos: Pos) -> bool {
        pos.in_bounds()
            && self.monsters.get(pos).is_none()
            && self.blocks.get(pos).is_none_or(|block| block.monster_passable())
    }

    pub(crate) fn fogata_burning_at(&self, pos: Pos) -> bool {
        self.blocks.get(pos).is_some_and(|block| block.is_active(self.clock, &self.config))
    }

    fn fruit_id_at(&self, pos: Pos) -> Option<FruitId> {
        self.fruits.get(pos)
    }

    fn move_fruit(&mut self, id: FruitId, to: Pos) {
        let Some(fruit) = self.fruit_arena.get_mut(id) else {
            return;
        };
        let from = fruit.pos;
        fruit.pos = to;
        self.fruits.set(from, None);
        self.fruits.set(to, Some(id));
    }

    fn move_monster(&mut self, id: MonsterId, to: Pos) {
        let Some(monster) = self.monster_arena.get_mut(id) else {
            return;
        };
        let from = monster.pos;
        monster.pos = to;
        self.monsters.set(from, None);
        self.monsters.set(to, Some(id));
    }

    fn move_player_to(&mut self, slot: PlayerSlot, to: Pos) {
        let Some(player) = self.roster[slot.index()].as_mut() else {
            return;
        };
        let from = player.pos;
        player.pos = to;
        self.players.set(from, None);
        self.players.set(to, Some(slot));
    }

    fn remove_player(&mut self, slot: PlayerSlot) -> Option<Player> {
        let player = self.roster[slot.index()].take()?;
        self.players.set(player.pos, None);
        Some(player)
    }

    fn remove_fruit(&mut self, id: FruitId) -> Option<Fruit> {
        let fruit = self.fruit_arena.remove(id)?;
        self.fruits.set(fruit.pos, None);
        Some(fruit)
    }

    fn monster_entry(&self, id: MonsterId) -> Result<Monster, CommandError> {
        self.monster_arena.get(id).copied().ok_or(CommandError::UnknownEntity)
    }

    fn store_monster(&mut self, id: MonsterId, monster: Monster) {
        if let Some(slot) = self.monster_arena.get_mut(id) {
            slot.facing = monster.facing;
            slot.variant = monster.variant;
        }
    }

    /// Replaces the one ice block at `pos`, restoring a covered hazard fresh.
    /// Returns false if `pos` holds no ice.
    fn shatter_ice(&mut self, pos: Pos) -> bool {
        match self.blocks.get(pos) {
            Some(block) if block.is_ice() => {
                let restored = block.after_thaw(self.clock);
                if let Some(hazard) = restored {
                    debug!("ice at {pos} broke, {} restored", hazard.kind().token());
                }
                self.blocks.set(pos, restored);
                true
            }
            _ => false,
        }
    }
}
