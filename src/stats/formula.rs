//! Derived opponent stats
//!
//! HP scales linearly with the raw level. ATK and DEF grow geometrically
//! with the level, capped at `LEVEL_CAP`.

use crate::encounter::coerce::round_half_up;
use crate::encounter::OpponentEntry;
use serde::Serialize;

/// Highest level that still increases ATK/DEF. HP is not capped.
pub const LEVEL_CAP: f64 = 80.0;

/// Per-level ATK growth factor
pub const ATK_GROWTH: f64 = 1.05;

/// Per-level DEF growth factor
pub const DEF_GROWTH: f64 = 1.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
}

pub fn computed_hp(opponent: &OpponentEntry) -> i64 {
    round_half_up(
        opponent.base_hp * opponent.hp_multiplier * opponent.level * (opponent.hp_modifier / 100.0),
    )
}

pub fn effective_level(level: f64) -> f64 {
    level.min(LEVEL_CAP)
}

pub fn computed_atk(opponent: &OpponentEntry) -> i64 {
    round_half_up(opponent.base_atk * ATK_GROWTH.powf(effective_level(opponent.level)))
}

pub fn computed_def(opponent: &OpponentEntry) -> i64 {
    round_half_up(opponent.base_def * DEF_GROWTH.powf(effective_level(opponent.level)))
}

pub fn derive(opponent: &OpponentEntry) -> DerivedStats {
    DerivedStats {
        hp: computed_hp(opponent),
        atk: computed_atk(opponent),
        def: computed_def(opponent),
    }
}
