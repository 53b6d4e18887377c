//! Line-oriented level files (`.txt`).
//!
//! ```text
//! jugador vs jugador
//! <flavor> <row> <col>          player 1
//! <flavor> <row> <col>          player 2
//! phase <n>                     following fruit lines belong to phase n
//! <kind> <type> <row> <col>     kind is monster, block or fruit
//! ```
//!
//! Parsing is pure; applying a parsed level to a board validates placement layer by
//! layer. Export writes the current board in the same grammar without phase tags.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::board::Board;
use crate::entities::{
    Block, BlockKind, FruitKind, FruitSpawn, Monster, MonsterKind, PhaseManifest, Player,
};
use crate::error::{LevelError, Occupant};
use crate::types::{Flavor, Phase, PlayerSlot, Pos};

pub const MODE_LINE: &str = "jugador vs jugador";

/// Written for a slot with no player so the file stays importable.
const FALLBACK_PLAYERS: [(Flavor, Pos); 2] =
    [(Flavor::Vanilla, Pos::new(10, 7)), (Flavor::Chocolate, Pos::new(10, 8))];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerStart {
    pub line: usize,
    pub flavor: Flavor,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Monster(MonsterKind),
    Block(BlockKind),
    Fruit { kind: FruitKind, phase: Phase },
}

/// One body line, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementLine {
    pub line: usize,
    pub placement: Placement,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub players: [PlayerStart; 2],
    pub placements: Vec<PlacementLine>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

pub fn parse_level(text: &str) -> Result<Level, LevelError> {
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line.trim()));

    let (_, mode) = lines.next().ok_or(LevelError::MissingModeLine)?;
    if !mode.eq_ignore_ascii_case(MODE_LINE) {
        return Err(LevelError::InvalidMode { found: mode.to_string() });
    }

    let mut players = [PlayerStart { line: 0, flavor: Flavor::Vanilla, pos: Pos::new(0, 0) }; 2];
    for slot in PlayerSlot::ALL {
        let line_no = slot.index() + 2;
        let (line_no, line) =
            lines.next().ok_or(LevelError::MissingPlayerLine { line: line_no, slot })?;
        players[slot.index()] = parse_player_line(line_no, line)?;
    }

    let mut placements = Vec::new();
    let mut phase = Phase::One;
    for (line_no, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            continue;
        };
        if first.eq_ignore_ascii_case("phase") {
            expect_fields(line_no, &tokens, 2)?;
            phase = match parse_number(line_no, tokens[1])? {
                2 => Phase::Two,
                _ => Phase::One,
            };
            continue;
        }

        expect_fields(line_no, &tokens, 4)?;
        let kind = tokens[0].to_ascii_lowercase();
        let type_token = tokens[1].to_ascii_lowercase();
        let pos = Pos::new(parse_number(line_no, tokens[2])?, parse_number(line_no, tokens[3])?);
        let unknown_type = |kind: &'static str| LevelError::UnknownType {
            line: line_no,
            kind,
            token: tokens[1].to_string(),
        };
        let placement = match kind.as_str() {
            "monster" => Placement::Monster(
                MonsterKind::from_token(&type_token).ok_or_else(|| unknown_type("monster"))?,
            ),
            "block" => Placement::Block(
                BlockKind::from_token(&type_token).ok_or_else(|| unknown_type("block"))?,
            ),
            "fruit" => Placement::Fruit {
                kind: FruitKind::from_token(&type_token).ok_or_else(|| unknown_type("fruit"))?,
                phase,
            },
            _ => {
                return Err(LevelError::UnknownKind { line: line_no, token: tokens[0].to_string() });
            }
        };
        placements.push(PlacementLine { line: line_no, placement, pos });
    }

    Ok(Level { players, placements })
}

fn parse_player_line(line_no: usize, line: &str) -> Result<PlayerStart, LevelError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    expect_fields(line_no, &tokens, 3)?;
    let flavor = Flavor::from_token(&tokens[0].to_ascii_lowercase())
        .ok_or_else(|| LevelError::UnknownFlavor { line: line_no, token: tokens[0].to_string() })?;
    let pos = Pos::new(parse_number(line_no, tokens[1])?, parse_number(line_no, tokens[2])?);
    Ok(PlayerStart { line: line_no, flavor, pos })
}

fn expect_fields(line: usize, tokens: &[&str], expected: usize) -> Result<(), LevelError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(LevelError::FieldCount { line, expected, found: tokens.len() })
    }
}

fn parse_number(line: usize, token: &str) -> Result<i32, LevelError> {
    token.parse().map_err(|_| LevelError::InvalidNumber { line, token: token.to_string() })
}

// ---------------------------------------------------------------------------
// Applying
// ---------------------------------------------------------------------------

impl Board {
    /// Clears the board and loads a level file. On error the board keeps whatever was
    /// placed before the failing line.
    pub fn import_level(&mut self, path: &Path) -> Result<(), LevelError> {
        self.reboot();
        let text = fs::read_to_string(path)?;
        self.place_level(&parse_level(&text)?)?;
        info!("imported level {}", path.display());
        Ok(())
    }

    pub fn import_level_str(&mut self, text: &str) -> Result<(), LevelError> {
        self.reboot();
        self.place_level(&parse_level(text)?)
    }

    pub fn apply_level(&mut self, level: &Level) -> Result<(), LevelError> {
        self.reboot();
        self.place_level(level)
    }

    /// Players first, then blocks, then monsters, then phase-1 fruit. Phase-2 fruit
    /// only goes into the manifest. Expects a freshly rebooted board.
    fn place_level(&mut self, level: &Level) -> Result<(), LevelError> {
        let [one, two] = level.players;
        for start in [one, two] {
            if !start.pos.in_bounds() {
                return Err(LevelError::OutOfBounds { line: start.line, pos: start.pos });
            }
        }
        if one.pos == two.pos {
            return Err(LevelError::PlayersOverlap { line: two.line, pos: two.pos });
        }
        let selected = self.selected_flavors();
        for (slot, start) in PlayerSlot::ALL.into_iter().zip([one, two]) {
            let flavor = selected[slot.index()].unwrap_or(start.flavor);
            self.set_player(start.pos, Some(Player::new(slot, start.pos, flavor)));
        }

        for entry in &level.placements {
            if let Placement::Block(kind) = entry.placement {
                self.check_in_bounds(entry)?;
                if let Some(existing) = self.get_block(entry.pos) {
                    return Err(occupied(entry, "block", Occupant::Block(existing.kind())));
                }
                if self.get_player(entry.pos).is_some() {
                    return Err(occupied(entry, "block", Occupant::Player));
                }
                self.set_block(entry.pos, Some(Block::fresh(kind, self.clock())));
            }
        }

        for entry in &level.placements {
            if let Placement::Monster(kind) = entry.placement {
                self.check_in_bounds(entry)?;
                if let Some(block) = self.get_block(entry.pos)
                    && block.blocks_sight()
                {
                    return Err(occupied(entry, "monster", Occupant::Block(block.kind())));
                }
                if self.get_player(entry.pos).is_some() {
                    return Err(occupied(entry, "monster", Occupant::Player));
                }
                if self.get_monster(entry.pos).is_some() {
                    return Err(occupied(entry, "monster", Occupant::Monster));
                }
                self.set_monster(entry.pos, Some(Monster::new(kind, entry.pos)));
            }
        }

        let mut manifest = PhaseManifest::default();
        for entry in &level.placements {
            let Placement::Fruit { kind, phase } = entry.placement else {
                continue;
            };
            self.check_in_bounds(entry)?;
            let spawn = FruitSpawn { kind, pos: entry.pos };
            match phase {
                Phase::One => {
                    if let Some(occupant) = self.fruit_conflict(entry.pos) {
                        return Err(occupied(entry, "fruit", occupant));
                    }
                    self.spawn_fruit(kind, entry.pos);
                    manifest.phase_one.push(spawn);
                }
                Phase::Two => manifest.phase_two.push(spawn),
            }
        }
        self.set_manifest(manifest);
        Ok(())
    }

    fn check_in_bounds(&self, entry: &PlacementLine) -> Result<(), LevelError> {
        if entry.pos.in_bounds() {
            Ok(())
        } else {
            Err(LevelError::OutOfBounds { line: entry.line, pos: entry.pos })
        }
    }

    pub fn export_level(&self, path: &Path) -> Result<(), LevelError> {
        let mut writer = BufWriter::new(File::create(path)?);
        for line in level_lines(self) {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        info!("exported level {}", path.display());
        Ok(())
    }
}

fn occupied(entry: &PlacementLine, entity: &'static str, occupant: Occupant) -> LevelError {
    LevelError::Occupied { line: entry.line, entity, pos: entry.pos, occupant }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Current board in level grammar. Ice keeps no memory of what it covers and
/// fruit loses its phase, so a re-import starts every fruit in phase 1.
pub fn render_level(board: &Board) -> String {
    level_lines(board).into_iter().map(|line| line + "\n").collect()
}

fn level_lines(board: &Board) -> Vec<String> {
    let mut lines = vec![MODE_LINE.to_string()];
    for slot in PlayerSlot::ALL {
        let (flavor, pos) = match board.player(slot) {
            Some(player) => (player.flavor, player.pos),
            None => FALLBACK_PLAYERS[slot.index()],
        };
        lines.push(format!("{} {} {}", flavor.token(), pos.row, pos.col));
    }
    for monster in board.monsters() {
        let pos = monster.pos;
        lines.push(format!("monster {} {} {}", monster.kind().token(), pos.row, pos.col));
    }
    for (pos, block) in board.blocks() {
        lines.push(format!("block {} {} {}", block.kind().token(), pos.row, pos.col));
    }
    for fruit in board.fruits() {
        let pos = fruit.pos;
        lines.push(format!("fruit {} {} {}", fruit.kind().token(), pos.row, pos.col));
    }
    lines
}

#[cfg(test)]
mod tests;
