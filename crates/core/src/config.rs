//! Engine tuning: tick cadences, behaviour timings and the RNG seed.
//! Durations are authored in milliseconds and converted to tick counts against
//! the cadence that drives the behaviour (physics for blocks, entity for creatures).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub seed: u64,
    pub physics_tick_ms: u32,
    pub entity_tick_ms: u32,
    pub fogata_activation_ms: u32,
    pub hot_tile_melt_ms: u32,
    pub flower_pot_calm_ms: u32,
    pub flower_pot_alert_ms: u32,
    pub flower_pot_alert_moves: u32,
    pub flower_pot_turn_percent: u32,
    pub narwhal_turn_percent: u32,
    pub cactus_toggle_ticks: u32,
    pub cherry_teleport_ticks: u32,
    pub squid_break_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            physics_tick_ms: 16,
            entity_tick_ms: 500,
            fogata_activation_ms: 3000,
            hot_tile_melt_ms: 2000,
            flower_pot_calm_ms: 8000,
            flower_pot_alert_ms: 5000,
            flower_pot_alert_moves: 2,
            flower_pot_turn_percent: 30,
            narwhal_turn_percent: 35,
            cactus_toggle_ticks: 5,
            cherry_teleport_ticks: 10,
            squid_break_ticks: 3,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cadences =
            [("physics_tick_ms", self.physics_tick_ms), ("entity_tick_ms", self.entity_tick_ms)];
        for (field, value) in cadences {
            if value == 0 {
                return Err(ConfigError::ZeroCadence { field });
            }
        }

        let counters = [
            ("flower_pot_alert_moves", self.flower_pot_alert_moves),
            ("cactus_toggle_ticks", self.cactus_toggle_ticks),
            ("cherry_teleport_ticks", self.cherry_teleport_ticks),
            ("squid_break_ticks", self.squid_break_ticks),
        ];
        for (field, value) in counters {
            if value == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
        }

        let chances = [
            ("flower_pot_turn_percent", self.flower_pot_turn_percent),
            ("narwhal_turn_percent", self.narwhal_turn_percent),
        ];
        for (field, value) in chances {
            if value > 100 {
                return Err(ConfigError::PercentOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Physics ticks before a freshly lit fogata burns.
    pub fn fogata_activation_ticks(&self) -> u64 {
        ticks_for(self.fogata_activation_ms, self.physics_tick_ms)
    }

    /// Physics ticks ice may rest on a hot tile before it melts.
    pub fn hot_tile_melt_ticks(&self) -> u64 {
        ticks_for(self.hot_tile_melt_ms, self.physics_tick_ms)
    }

    pub fn flower_pot_calm_ticks(&self) -> u32 {
        ticks_for(self.flower_pot_calm_ms, self.entity_tick_ms) as u32
    }

    pub fn flower_pot_alert_ticks(&self) -> u32 {
        ticks_for(self.flower_pot_alert_ms, self.entity_tick_ms) as u32
    }

    /// Whole physics ticks that elapse between two entity ticks, never zero.
    pub fn physics_ticks_per_entity_tick(&self) -> u32 {
        (self.entity_tick_ms / self.physics_tick_ms.max(1)).max(1)
    }
}

fn ticks_for(duration_ms: u32, cadence_ms: u32) -> u64 {
    u64::from(duration_ms).div_ceil(u64::from(cadence_ms.max(1)))
}
