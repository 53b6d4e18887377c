//! Stable board hashing for determinism checks.
//! This module exists to keep hashing separate from simulation code.
//! It does not own snapshot persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::entities::CoveredHazard;

impl Board {
    /// Digest of the simulated state: clock, phase, RNG position and every layer in
    /// row-major order.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        let rng = self.rng.state();
        hasher.write_u64(rng.seed);
        hasher.write_u128(rng.word_pos);
        hasher.write_u64(self.clock);
        hasher.write_u8(self.phase.number());

        for (pos, block) in self.blocks.occupied() {
            write_pos(&mut hasher, pos);
            match block {
                Block::Ice { covers: None } => hasher.write_u8(0),
                Block::Ice { covers: Some(CoveredHazard::Fogata) } => hasher.write_u8(1),
                Block::Ice { covers: Some(CoveredHazard::HotTile { since }) } => {
                    hasher.write_u8(2);
                    hasher.write_u64(since);
                }
                Block::Decoration => hasher.write_u8(3),
                Block::Fogata { lit_at } => {
                    hasher.write_u8(4);
                    hasher.write_u64(lit_at);
                }
                Block::HotTile => hasher.write_u8(5),
            }
        }

        for fruit in self.fruits() {
            write_pos(&mut hasher, fruit.pos);
            match fruit.variant {
                FruitVariant::Banana => hasher.write_u8(0),
                FruitVariant::Grape => hasher.write_u8(1),
                FruitVariant::Cherry { ticks } => {
                    hasher.write_u8(2);
                    hasher.write_u32(ticks);
                }
                FruitVariant::Pineapple { heading } => {
                    hasher.write_u8(3);
                    hasher.write_u8(heading as u8);
                }
                FruitVariant::Cactus { active, ticks } => {
                    hasher.write_u8(4);
                    hasher.write_u8(u8::from(active));
                    hasher.write_u32(ticks);
                }
            }
        }

        for monster in self.monsters() {
            write_pos(&mut hasher, monster.pos);
            hasher.write_u8(monster.facing as u8);
            match monster.variant {
                MonsterVariant::Troll => hasher.write_u8(0),
                MonsterVariant::Squid { target, break_ticks } => {
                    hasher.write_u8(1);
                    hasher.write_u8(u8::from(target.is_some()));
                    if let Some(target) = target {
                        write_pos(&mut hasher, target);
                    }
                    hasher.write_u32(break_ticks);
                }
                MonsterVariant::FlowerPot { alert, phase_ticks, chasing } => {
                    hasher.write_u8(2);
                    hasher.write_u8(u8::from(alert));
                    hasher.write_u32(phase_ticks);
                    hasher.write_u8(u8::from(chasing));
                }
                MonsterVariant::Narwhal { charging } => {
                    hasher.write_u8(3);
                    hasher.write_u8(u8::from(charging));
                }
            }
        }

        for slot in PlayerSlot::ALL {
            match self.player(slot) {
                Some(player) => {
                    hasher.write_u8(1);
                    write_pos(&mut hasher, player.pos);
                    hasher.write_u8(player.facing as u8);
                    hasher.write_u32(player.score);
                }
                None => hasher.write_u8(0),
            }
        }

        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.row);
    hasher.write_i32(pos.col);
}
