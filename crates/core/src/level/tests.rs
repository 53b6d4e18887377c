use super::*;

const SAMPLE: &str = "\
jugador vs jugador
vainilla 10 7
chocolate 10 8
monster troll 2 2
block iceblock 3 3
block fogata 4 4
fruit platano 5 5
phase 2
fruit pina 6 6
fruit uva 5 5
";

fn import(text: &str) -> Result<Board, LevelError> {
    let mut board = Board::with_seed(11);
    board.import_level_str(text)?;
    Ok(board)
}

#[test]
fn minimal_level_places_players_and_fruit() {
    let board =
        import("jugador vs jugador\nvainilla 10 7\nchocolate 10 8\nfruit platano 5 5\n").unwrap();

    let one = board.player(PlayerSlot::One).unwrap();
    let two = board.player(PlayerSlot::Two).unwrap();
    assert_eq!((one.pos, one.flavor), (Pos::new(10, 7), Flavor::Vanilla));
    assert_eq!((two.pos, two.flavor), (Pos::new(10, 8), Flavor::Chocolate));
    assert_eq!(board.get_fruit(Pos::new(5, 5)).map(|fruit| fruit.kind()), Some(FruitKind::Banana));
    assert_eq!(board.phase(), Phase::One);
}

#[test]
fn phase_two_fruit_waits_in_the_manifest() {
    let board = import(SAMPLE).unwrap();

    assert_eq!(board.fruits().len(), 1);
    assert_eq!(board.get_block(Pos::new(3, 3)), Some(Block::ICE));
    assert_eq!(board.get_block(Pos::new(4, 4)).map(|block| block.kind()), Some(BlockKind::Fogata));
    assert_eq!(
        board.get_monster(Pos::new(2, 2)).map(|monster| monster.kind()),
        Some(MonsterKind::Troll)
    );
    assert_eq!(
        board.manifest().phase_two,
        vec![
            FruitSpawn { kind: FruitKind::Pineapple, pos: Pos::new(6, 6) },
            FruitSpawn { kind: FruitKind::Grape, pos: Pos::new(5, 5) },
        ]
    );
}

#[test]
fn unknown_phase_numbers_fall_back_to_phase_one() {
    let level =
        parse_level("jugador vs jugador\nfresa 0 0\nfresa 0 1\nphase 7\nfruit cereza 1 1\n")
            .unwrap();
    assert_eq!(
        level.placements,
        vec![PlacementLine {
            line: 5,
            placement: Placement::Fruit { kind: FruitKind::Cherry, phase: Phase::One },
            pos: Pos::new(1, 1)
        }]
    );
}

#[test]
fn tokens_are_case_insensitive_and_blank_lines_are_skipped() {
    let board =
        import("jugador vs jugador\nFRESA 1 1\nVainilla 1 2\n\n  Monster Narval 7 7  \n").unwrap();
    assert_eq!(board.player(PlayerSlot::One).map(|player| player.flavor), Some(Flavor::Strawberry));
    assert_eq!(
        board.get_monster(Pos::new(7, 7)).map(|monster| monster.kind()),
        Some(MonsterKind::Narwhal)
    );
}

#[test]
fn selected_flavors_override_the_file() {
    let mut board = Board::default();
    board.set_player_flavors(Some(Flavor::Strawberry), None);
    board.import_level_str(SAMPLE).unwrap();

    assert_eq!(board.player(PlayerSlot::One).map(|player| player.flavor), Some(Flavor::Strawberry));
    assert_eq!(board.player(PlayerSlot::Two).map(|player| player.flavor), Some(Flavor::Chocolate));
}

#[test]
fn malformed_headers_are_rejected() {
    assert!(matches!(import(""), Err(LevelError::MissingModeLine)));
    assert!(matches!(import("jugador vs maquina\n"), Err(LevelError::InvalidMode { .. })));
    assert!(matches!(
        import("jugador vs jugador\nvainilla 1 1\n"),
        Err(LevelError::MissingPlayerLine { line: 3, slot: PlayerSlot::Two })
    ));
    assert!(matches!(
        import("jugador vs jugador\nmenta 1 1\nchocolate 1 2\n"),
        Err(LevelError::UnknownFlavor { line: 2, .. })
    ));
    assert!(matches!(
        import("jugador vs jugador\nvainilla 1\nchocolate 1 2\n"),
        Err(LevelError::FieldCount { line: 2, expected: 3, found: 2 })
    ));
}

#[test]
fn malformed_body_lines_report_their_line() {
    let header = "jugador vs jugador\nvainilla 0 0\nchocolate 0 1\n";
    let cases: [(&str, fn(&LevelError) -> bool); 6] = [
        ("fruit platano 5\n", |err| {
            matches!(err, LevelError::FieldCount { line: 4, expected: 4, found: 3 })
        }),
        ("fruit platano x 5\n", |err| matches!(err, LevelError::InvalidNumber { line: 4, .. })),
        ("wall stone 1 1\n", |err| matches!(err, LevelError::UnknownKind { line: 4, .. })),
        ("monster dragon 1 1\n", |err| {
            matches!(err, LevelError::UnknownType { line: 4, kind: "monster", .. })
        }),
        ("phase\n", |err| matches!(err, LevelError::FieldCount { line: 4, expected: 2, found: 1 })),
        ("phase two\n", |err| matches!(err, LevelError::InvalidNumber { line: 4, .. })),
    ];
    for (body, check) in cases {
        let err = import(&format!("{header}{body}")).unwrap_err();
        assert!(check(&err), "unexpected error for {body:?}: {err}");
        assert_eq!(err.line(), Some(4));
    }
}

#[test]
fn placement_conflicts_are_rejected() {
    let header = "jugador vs jugador\nvainilla 0 0\nchocolate 0 1\n";

    let err = import(&format!("{header}block decoration 0 0\n")).unwrap_err();
    assert!(matches!(err, LevelError::Occupied { line: 4, occupant: Occupant::Player, .. }));

    let err = import(&format!("{header}block iceblock 3 3\nblock fogata 3 3\n")).unwrap_err();
    assert!(matches!(
        err,
        LevelError::Occupied { line: 5, occupant: Occupant::Block(BlockKind::Ice), .. }
    ));

    let err = import(&format!("{header}block decoration 3 3\nmonster troll 3 3\n")).unwrap_err();
    assert!(matches!(err, LevelError::Occupied { entity: "monster", .. }));

    let err = import(&format!("{header}monster troll 3 3\nfruit uva 3 3\n")).unwrap_err();
    assert!(matches!(err, LevelError::Occupied { occupant: Occupant::Monster, .. }));

    let err = import(&format!("{header}fruit uva 3 3\nfruit uva 3 3\n")).unwrap_err();
    assert!(matches!(err, LevelError::Occupied { line: 5, occupant: Occupant::Fruit, .. }));

    let err = import(&format!("{header}monster troll 16 3\n")).unwrap_err();
    assert!(matches!(err, LevelError::OutOfBounds { line: 4, .. }));
}

#[test]
fn monsters_and_fruit_may_sit_on_floor_hazards() {
    let board = import(
        "jugador vs jugador\nvainilla 0 0\nchocolate 0 1\nblock baldosa 3 3\nmonster maceta 3 3\nblock fogata 4 4\nfruit cactus 4 4\n",
    )
    .unwrap();
    assert!(board.get_monster(Pos::new(3, 3)).is_some());
    assert!(board.get_fruit(Pos::new(4, 4)).is_some());
}

#[test]
fn players_must_not_overlap_or_leave_the_board() {
    assert!(matches!(
        import("jugador vs jugador\nvainilla 4 4\nchocolate 4 4\n"),
        Err(LevelError::PlayersOverlap { line: 3, .. })
    ));
    assert!(matches!(
        import("jugador vs jugador\nvainilla -1 4\nchocolate 4 4\n"),
        Err(LevelError::OutOfBounds { line: 2, .. })
    ));
}

#[test]
fn failed_import_leaves_a_cleared_board() {
    let mut board = Board::default();
    board.import_level_str(SAMPLE).unwrap();

    assert!(board.import_level_str("not a level").is_err());

    assert!(board.fruits().is_empty());
    assert!(board.monsters().is_empty());
    assert!(board.blocks().is_empty());
    assert!(board.players().next().is_none());
}

#[test]
fn render_writes_the_same_grammar_without_phases() {
    let board = import(SAMPLE).unwrap();
    assert_eq!(
        render_level(&board),
        "jugador vs jugador\nvainilla 10 7\nchocolate 10 8\nmonster troll 2 2\nblock iceblock 3 3\nblock fogata 4 4\nfruit platano 5 5\n"
    );
}

#[test]
fn render_uses_fallback_players() {
    let board = Board::default();
    assert_eq!(render_level(&board), "jugador vs jugador\nvainilla 10 7\nchocolate 10 8\n");
}

#[test]
fn unparsable_text_still_clears_the_board() {
    let mut board = import(SAMPLE).unwrap();
    assert!(board.import_level_str("jugador vs jugador\nvainilla 1 1\n").is_err());

    assert!(board.players().next().is_none());
    assert!(board.blocks().is_empty() && board.monsters().is_empty());
    assert!(board.is_phase_cleared());
    assert!(board.manifest().phase_two.is_empty());
}

#[test]
fn applying_a_parsed_level_replaces_the_previous_one() {
    let mut board = import(SAMPLE).unwrap();
    let level = parse_level("jugador vs jugador\nfresa 0 0\nfresa 0 1\nfruit uva 9 9\n").unwrap();
    board.apply_level(&level).unwrap();

    assert!(board.get_monster(Pos::new(2, 2)).is_none());
    assert!(board.get_block(Pos::new(3, 3)).is_none());
    assert_eq!(board.fruits().len(), 1);
    assert!(board.manifest().phase_two.is_empty());
}
