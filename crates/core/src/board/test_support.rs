//! Shared fixtures for the `board` test suites.
//! This module exists to avoid repeating board setup across many tests.
//! It does not own production rules.

use super::*;
use crate::entities::MonsterKind;

pub(super) fn empty_board() -> Board {
    Board::with_seed(7)
}

pub(super) fn place_player(board: &mut Board, slot: PlayerSlot, pos: Pos) {
    let flavor = match slot {
        PlayerSlot::One => Flavor::Vanilla,
        PlayerSlot::Two => Flavor::Chocolate,
    };
    board.set_player(pos, Some(Player::new(slot, pos, flavor)));
}

pub(super) fn place_facing(board: &mut Board, slot: PlayerSlot, pos: Pos, facing: Direction) {
    place_player(board, slot, pos);
    board.turn_player(slot, facing).expect("player was just placed");
}

pub(super) fn place_monster(board: &mut Board, kind: MonsterKind, pos: Pos, facing: Direction) {
    board.set_monster(pos, Some(Monster { facing, ..Monster::new(kind, pos) }));
}

pub(super) fn place_fruit(board: &mut Board, kind: FruitKind, pos: Pos) {
    board.set_fruit(pos, Some(Fruit::new(kind, pos)));
}

/// Advances the physics clock without running any other physics.
pub(super) fn advance_clock(board: &mut Board, ticks: u64) {
    board.clock += ticks;
}

/// A board whose fogata at `pos` is already burning.
pub(super) fn lit_fogata(board: &mut Board, pos: Pos) {
    board.set_block(pos, Some(Block::Fogata { lit_at: 0 }));
    let delay = board.config.fogata_activation_ticks();
    advance_clock(board, delay);
}

/// Every cell of every layer agrees with the entity stored behind it.
pub(super) fn assert_layers_consistent(board: &Board) {
    for (pos, id) in board.fruits.occupied() {
        assert_eq!(board.fruit_arena[id].pos, pos, "fruit layer out of sync at {pos}");
    }
    for (pos, id) in board.monsters.occupied() {
        assert_eq!(board.monster_arena[id].pos, pos, "monster layer out of sync at {pos}");
    }
    assert_eq!(board.fruit_arena.len(), board.fruits.occupied().len());
    assert_eq!(board.monster_arena.len(), board.monsters.occupied().len());
    for (pos, slot) in board.players.occupied() {
        let player = board.player(slot).expect("player layer points at an absent slot");
        assert_eq!(player.pos, pos);
    }
    for player in board.players() {
        assert_eq!(board.players.get(player.pos), Some(player.slot));
    }
}
