use serde::{Deserialize, Serialize};

use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Troll,
    Squid,
    FlowerPot,
    Narwhal,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] =
        [MonsterKind::Troll, MonsterKind::Squid, MonsterKind::FlowerPot, MonsterKind::Narwhal];

    pub fn token(self) -> &'static str {
        match self {
            MonsterKind::Troll => "troll",
            MonsterKind::Squid => "calamar",
            MonsterKind::FlowerPot => "maceta",
            MonsterKind::Narwhal => "narval",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        MonsterKind::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

/// Per-variant behaviour state. Counters count entity ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterVariant {
    Troll,
    /// `target` is the ice cell being chewed, `break_ticks` how long it has been chewed.
    Squid { target: Option<Pos>, break_ticks: u32 },
    /// `phase_ticks` counts ticks spent in the current calm or alert stretch.
    FlowerPot { alert: bool, phase_ticks: u32, chasing: bool },
    Narwhal { charging: bool },
}

impl MonsterVariant {
    pub fn fresh(kind: MonsterKind) -> Self {
        match kind {
            MonsterKind::Troll => MonsterVariant::Troll,
            MonsterKind::Squid => MonsterVariant::Squid { target: None, break_ticks: 0 },
            MonsterKind::FlowerPot => {
                MonsterVariant::FlowerPot { alert: false, phase_ticks: 0, chasing: false }
            }
            MonsterKind::Narwhal => MonsterVariant::Narwhal { charging: false },
        }
    }

    pub fn kind(&self) -> MonsterKind {
        match self {
            MonsterVariant::Troll => MonsterKind::Troll,
            MonsterVariant::Squid { .. } => MonsterKind::Squid,
            MonsterVariant::FlowerPot { .. } => MonsterKind::FlowerPot,
            MonsterVariant::Narwhal { .. } => MonsterKind::Narwhal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Monster {
    pub pos: Pos,
    pub facing: Direction,
    pub variant: MonsterVariant,
}

impl Monster {
    pub fn new(kind: MonsterKind, pos: Pos) -> Self {
        Self { pos, facing: Direction::Down, variant: MonsterVariant::fresh(kind) }
    }

    pub fn kind(&self) -> MonsterKind {
        self.variant.kind()
    }

    /// Every monster kills on contact.
    pub fn is_dangerous(&self) -> bool {
        true
    }

    /// A flower pot in its alert stretch, or a narwhal mid-charge.
    pub fn is_alert(&self) -> bool {
        match self.variant {
            MonsterVariant::FlowerPot { alert, .. } => alert,
            MonsterVariant::Narwhal { charging } => charging,
            MonsterVariant::Troll | MonsterVariant::Squid { .. } => false,
        }
    }

    /// Whether a flower pot saw a player on its last calm tick or is chasing one.
    pub fn is_chasing(&self) -> bool {
        matches!(self.variant, MonsterVariant::FlowerPot { chasing: true, .. })
    }

    /// Advances the calm/alert cycle by one tick and returns whether the pot is alert now.
    pub(crate) fn advance_alert_cycle(&mut self, calm_ticks: u32, alert_ticks: u32) -> bool {
        match &mut self.variant {
            MonsterVariant::FlowerPot { alert, phase_ticks, .. } => {
                *phase_ticks += 1;
                let limit = if *alert { alert_ticks } else { calm_ticks };
                if *phase_ticks >= limit {
                    *alert = !*alert;
                    *phase_ticks = 0;
                }
                *alert
            }
            _ => false,
        }
    }

    /// Chews on the ice at `cell`. True once it has been chewed for `needed` consecutive ticks.
    pub(crate) fn chew_ice(&mut self, cell: Pos, needed: u32) -> bool {
        match &mut self.variant {
            MonsterVariant::Squid { target, break_ticks } => {
                if *target != Some(cell) {
                    *target = Some(cell);
                    *break_ticks = 0;
                }
                *break_ticks += 1;
                if *break_ticks >= needed {
                    *target = None;
                    *break_ticks = 0;
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    pub(crate) fn forget_ice(&mut self) {
        if let MonsterVariant::Squid { target, break_ticks } = &mut self.variant {
            *target = None;
            *break_ticks = 0;
        }
    }

    pub(crate) fn set_chasing(&mut self, value: bool) {
        if let MonsterVariant::FlowerPot { chasing, .. } = &mut self.variant {
            *chasing = value;
        }
    }

    pub(crate) fn set_charging(&mut self, value: bool) {
        if let MonsterVariant::Narwhal { charging } = &mut self.variant {
            *charging = value;
        }
    }
}
