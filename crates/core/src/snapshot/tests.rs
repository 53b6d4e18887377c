use std::fs;

use tempfile::tempdir;

use super::*;
use crate::types::{Direction, MachineControl, PlayerSlot};

const LEVEL: &str = "\
jugador vs jugador
vainilla 1 1
fresa 14 14
monster troll 8 2
monster calamar 2 12
monster maceta 12 3
monster narval 7 9
block baldosa 5 5
block fogata 9 9
block decoration 0 8
fruit pina 4 4
fruit cereza 11 11
fruit cactus 6 13
phase 2
fruit uva 3 3
";

fn played_board() -> Board {
    let mut board = Board::with_seed(2024);
    board.import_level_str(LEVEL).unwrap();
    board.turn_player(PlayerSlot::One, Direction::Right).unwrap();
    board.shoot_or_break_ice(PlayerSlot::One).unwrap();
    for _ in 0..6 {
        for _ in 0..31 {
            board.physics_tick();
        }
        board.entity_tick(MachineControl { player_one: false, player_two: true });
    }
    board
}

#[test]
fn saved_board_loads_with_identical_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("match.sav");
    let board = played_board();

    board.save(&path).unwrap();
    let loaded = Board::load(&path).unwrap();

    assert_eq!(loaded.capture(), board.capture());
    assert_eq!(loaded.snapshot_hash(), board.snapshot_hash());
    assert!(!dir.path().join("match.sav.tmp").exists());
}

#[test]
fn loaded_board_continues_the_same_random_stream() {
    let mut original = played_board();
    let mut loaded = decode_snapshot(&encode_snapshot(&original).unwrap()).unwrap();

    for _ in 0..20 {
        original.entity_tick(MachineControl::BOTH);
        loaded.entity_tick(MachineControl::BOTH);
        assert_eq!(original.snapshot_hash(), loaded.snapshot_hash());
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = Board::load(&dir.path().join("absent.sav")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io(_)));
}

#[test]
fn garbage_is_reported_as_corrupt() {
    assert!(matches!(decode_snapshot(b"{ not json"), Err(SnapshotError::Corrupt(_))));
}

#[test]
fn tampered_board_fails_the_digest() {
    let bytes = encode_snapshot(&played_board()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let tampered = text.replacen("\"clock\": 186", "\"clock\": 187", 1);
    assert_ne!(tampered, text);

    assert!(matches!(
        decode_snapshot(tampered.as_bytes()),
        Err(SnapshotError::DigestMismatch { .. })
    ));
}

#[test]
fn other_format_versions_are_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("old.sav");
    Board::default().save(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, text.replacen("\"format_version\": 1", "\"format_version\": 9", 1)).unwrap();

    let err = Board::load(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::UnsupportedVersion { found: 9, expected: 1 }));
}

#[test]
fn players_sharing_a_cell_are_an_invalid_state() {
    let mut board = Board::default();
    board.import_level_str(LEVEL).unwrap();
    let mut snapshot = board.capture();
    snapshot.players[1].pos = snapshot.players[0].pos;

    assert!(matches!(Board::restore(snapshot), Err(SnapshotError::InvalidState { .. })));
}

#[test]
fn far_rng_positions_restore_immediately() {
    let mut snapshot = Board::with_seed(1).capture();
    snapshot.rng.word_pos = 1 << 64;

    let board = Board::restore(snapshot.clone()).unwrap();
    assert_eq!(board.capture().rng, snapshot.rng);
}

#[test]
fn rng_positions_past_the_stream_are_an_invalid_state() {
    let mut snapshot = Board::with_seed(1).capture();
    snapshot.rng.word_pos = u128::MAX;

    assert!(matches!(Board::restore(snapshot), Err(SnapshotError::InvalidState { .. })));
}

#[test]
fn far_rng_positions_survive_the_save_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("far.sav");
    let mut snapshot = played_board().capture();
    snapshot.rng.word_pos = 3 << 62;
    let board = Board::restore(snapshot).unwrap();

    board.save(&path).unwrap();
    let loaded = Board::load(&path).unwrap();
    assert_eq!(loaded.snapshot_hash(), board.snapshot_hash());
}
