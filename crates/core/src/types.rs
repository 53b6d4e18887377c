use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

/// Rows on the board.
pub const BOARD_HEIGHT: i32 = 16;
/// Columns on the board.
pub const BOARD_WIDTH: i32 = 16;
pub(crate) const BOARD_CELLS: usize = (BOARD_HEIGHT * BOARD_WIDTH) as usize;

new_key_type! {
    pub struct FruitId;
    pub struct MonsterId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self { row: self.row.saturating_add(dr), col: self.col.saturating_add(dc) }
    }

    pub fn in_bounds(self) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < BOARD_HEIGHT && self.col < BOARD_WIDTH
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Squared straight-line distance; ordering matches true distance.
    pub fn distance_squared(self, other: Self) -> i32 {
        let dr = self.row - other.row;
        let dc = self.col - other.col;
        dr * dr + dc * dc
    }

    /// Every cell on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..BOARD_HEIGHT).flat_map(|row| (0..BOARD_WIDTH).map(move |col| Pos { row, col }))
    }

    pub(crate) fn index(self) -> usize {
        (self.row as usize) * (BOARD_WIDTH as usize) + (self.col as usize)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Scan order used whenever every direction is considered.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// up -> right -> down -> left -> up
    pub fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSlot::One => f.write_str("1"),
            PlayerSlot::Two => f.write_str("2"),
        }
    }
}

/// Ice cream flavor of a player. Only the presentation layer cares which one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    Vanilla,
    Chocolate,
    Strawberry,
}

impl Flavor {
    pub const ALL: [Flavor; 3] = [Flavor::Vanilla, Flavor::Chocolate, Flavor::Strawberry];

    /// Token used by the level file format.
    pub fn token(self) -> &'static str {
        match self {
            Flavor::Vanilla => "vainilla",
            Flavor::Chocolate => "chocolate",
            Flavor::Strawberry => "fresa",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Flavor::ALL.into_iter().find(|flavor| flavor.token() == token)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    One,
    Two,
}

impl Phase {
    pub fn number(self) -> u8 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    PlayerOne,
    PlayerTwo,
    Draw,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::PlayerOne => f.write_str("PLAYER 1"),
            Winner::PlayerTwo => f.write_str("PLAYER 2"),
            Winner::Draw => f.write_str("DRAW"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStatus {
    Running,
    AllPlayersDown,
    AllPhasesCleared,
}

impl MatchStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, MatchStatus::Running)
    }
}

/// Which player slots the engine steers during an entity tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MachineControl {
    pub player_one: bool,
    pub player_two: bool,
}

impl MachineControl {
    pub const NONE: MachineControl = MachineControl { player_one: false, player_two: false };
    pub const BOTH: MachineControl = MachineControl { player_one: true, player_two: true };

    pub fn controls(self, slot: PlayerSlot) -> bool {
        match slot {
            PlayerSlot::One => self.player_one,
            PlayerSlot::Two => self.player_two,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Fogata,
    Monster,
    Cactus,
}

/// Outcome of resolving a player against whatever shares its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Nothing,
    Collected { score: u32 },
    Died(DeathCause),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerEvent {
    pub slot: PlayerSlot,
    pub interaction: Interaction,
}
