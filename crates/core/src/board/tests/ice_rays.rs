//! Tests for ice creation, breaking and the shoot command.

use proptest::prelude::*;

use super::support::*;

#[test]
fn ray_runs_to_the_board_edge() {
    let mut board = empty_board();
    let placed = board.create_ice(Direction::Up, Pos::new(10, 10));

    assert_eq!(placed, 10);
    for row in 0..10 {
        assert_eq!(board.get_block(Pos::new(row, 10)), Some(Block::ICE));
    }
    assert_eq!(board.get_block(Pos::new(10, 10)), None);
}

#[test]
fn rays_from_off_the_board_do_nothing() {
    let mut board = empty_board();
    board.set_block(Pos::new(0, 4), Some(Block::ICE));
    let before = board.snapshot_hash();

    assert_eq!(board.create_ice(Direction::Down, Pos::new(-1, 4)), 0);
    assert_eq!(board.break_ice(Direction::Down, Pos::new(-1, 4)), 0);
    assert_eq!(board.create_ice(Direction::Left, Pos::new(i32::MIN, i32::MIN)), 0);
    assert_eq!(board.break_ice(Direction::Right, Pos::new(i32::MAX, i32::MAX)), 0);
    assert_eq!(board.snapshot_hash(), before);
}

#[test]
fn ray_stops_before_monsters_players_and_solid_blocks() {
    let mut board = empty_board();
    place_monster(&mut board, MonsterKind::Troll, Pos::new(5, 3), Direction::Down);
    assert_eq!(board.create_ice(Direction::Right, Pos::new(5, 0)), 2);
    assert_eq!(board.get_block(Pos::new(5, 3)), None);

    place_player(&mut board, PlayerSlot::Two, Pos::new(8, 2));
    assert_eq!(board.create_ice(Direction::Down, Pos::new(6, 2)), 1);
    assert_eq!(board.get_player(Pos::new(8, 2)).map(|player| player.slot), Some(PlayerSlot::Two));

    board.set_block(Pos::new(0, 12), Some(Block::Decoration));
    assert_eq!(board.create_ice(Direction::Right, Pos::new(0, 9)), 2);
    assert_eq!(board.get_block(Pos::new(0, 12)), Some(Block::Decoration));
    assert_eq!(board.get_block(Pos::new(0, 13)), None);
}

#[test]
fn ray_covers_a_hazard_and_stops_there() {
    let mut board = empty_board();
    board.set_block(Pos::new(7, 10), Some(Block::Fogata { lit_at: 0 }));

    assert_eq!(board.create_ice(Direction::Up, Pos::new(10, 10)), 3);
    assert_eq!(
        board.get_block(Pos::new(7, 10)),
        Some(Block::Ice { covers: Some(CoveredHazard::Fogata) })
    );
    assert_eq!(board.get_block(Pos::new(6, 10)), None);
}

#[test]
fn break_restores_a_covered_fogata_with_a_fresh_timer() {
    let mut board = empty_board();
    board.set_block(Pos::new(4, 10), Some(Block::Fogata { lit_at: 0 }));
    board.create_ice(Direction::Up, Pos::new(10, 10));
    advance_clock(&mut board, 500);

    let broken = board.break_ice(Direction::Up, Pos::new(10, 10));

    assert_eq!(broken, 6);
    for row in 5..10 {
        assert_eq!(board.get_block(Pos::new(row, 10)), None);
    }
    let restored = board.get_block(Pos::new(4, 10)).expect("fogata comes back");
    assert_eq!(restored, Block::Fogata { lit_at: 500 });
    assert!(!restored.is_dangerous(board.clock(), board.config()));
}

#[test]
fn break_stops_at_the_first_cell_without_ice() {
    let mut board = empty_board();
    board.set_block(Pos::new(2, 1), Some(Block::ICE));
    board.set_block(Pos::new(2, 2), Some(Block::ICE));
    board.set_block(Pos::new(2, 4), Some(Block::ICE));

    assert_eq!(board.break_ice(Direction::Right, Pos::new(2, 0)), 2);
    assert_eq!(board.get_block(Pos::new(2, 4)), Some(Block::ICE));
    assert_eq!(board.break_ice(Direction::Right, Pos::new(2, 0)), 0);
}

#[test]
fn shoot_breaks_when_facing_ice_and_creates_when_facing_space() {
    let mut board = empty_board();
    place_facing(&mut board, PlayerSlot::One, Pos::new(10, 10), Direction::Up);

    assert_eq!(board.shoot_or_break_ice(PlayerSlot::One), Ok(IceAction::Created(10)));
    assert_eq!(board.shoot_or_break_ice(PlayerSlot::One), Ok(IceAction::Broken(10)));
    assert_eq!(board.get_block(Pos::new(0, 10)), None);
}

#[test]
fn shoot_rejects_blocked_targets_without_mutation() {
    let mut board = empty_board();
    place_facing(&mut board, PlayerSlot::One, Pos::new(0, 0), Direction::Up);
    assert_eq!(
        board.shoot_or_break_ice(PlayerSlot::One),
        Err(CommandError::OutOfBounds { pos: Pos::new(-1, 0) })
    );

    board.turn_player(PlayerSlot::One, Direction::Right).expect("player present");
    board.set_block(Pos::new(0, 1), Some(Block::Decoration));
    assert_eq!(
        board.shoot_or_break_ice(PlayerSlot::One),
        Err(CommandError::Occupied {
            pos: Pos::new(0, 1),
            occupant: Occupant::Block(BlockKind::Decoration)
        })
    );

    board.set_block(Pos::new(0, 1), None);
    place_monster(&mut board, MonsterKind::Squid, Pos::new(0, 1), Direction::Down);
    let before = board.snapshot_hash();
    assert_eq!(
        board.shoot_or_break_ice(PlayerSlot::One),
        Err(CommandError::Occupied { pos: Pos::new(0, 1), occupant: Occupant::Monster })
    );
    assert_eq!(board.snapshot_hash(), before);

    assert_eq!(
        board.shoot_or_break_ice(PlayerSlot::Two),
        Err(CommandError::PlayerAbsent(PlayerSlot::Two))
    );
}

#[test]
fn ice_on_a_hot_tile_melts_after_the_delay() {
    let mut board = empty_board();
    board.set_block(Pos::new(3, 5), Some(Block::HotTile));
    board.create_ice(Direction::Right, Pos::new(3, 0));
    let melt = board.config().hot_tile_melt_ticks();

    advance_clock(&mut board, melt - 1);
    assert_eq!(board.tick_hot_tiles(), 0);
    advance_clock(&mut board, 1);
    assert_eq!(board.tick_hot_tiles(), 1);

    assert_eq!(board.get_block(Pos::new(3, 5)), Some(Block::HotTile));
    assert_eq!(board.get_block(Pos::new(3, 4)), Some(Block::ICE));
}

proptest! {
    #[test]
    fn create_then_break_leaves_no_ice_in_the_lane(
        row in 0..BOARD_HEIGHT,
        col in 0..BOARD_WIDTH,
        direction_index in 0usize..4,
    ) {
        let mut board = empty_board();
        let origin = Pos::new(row, col);
        let direction = Direction::ALL[direction_index];

        let placed = board.create_ice(direction, origin);
        let broken = board.break_ice(direction, origin);

        prop_assert_eq!(placed, broken);
        let mut cursor = origin.step(direction);
        while cursor.in_bounds() {
            prop_assert_eq!(board.get_block(cursor), None);
            cursor = cursor.step(direction);
        }
    }
}
