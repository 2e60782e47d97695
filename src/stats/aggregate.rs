//! Chamber-level totals

use crate::core::types::LevelType;
use crate::encounter::coerce::round_half_up;
use crate::encounter::{ChamberEntry, OpponentEntry};
use crate::stats::formula;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChamberTotals {
    pub total_hp: i64,
    pub total_cycles: f64,
}

/// HP one opponent entry contributes: computed HP × raw qty, rounded once
pub fn opponent_hp(opponent: &OpponentEntry) -> i64 {
    round_half_up(formula::computed_hp(opponent) as f64 * opponent.qty)
}

/// Σ computed HP × qty over the first `sector_count` sectors
pub fn total_hp(chamber: &ChamberEntry, sector_count: usize) -> i64 {
    chamber
        .sectors
        .iter()
        .take(sector_count)
        .flat_map(|sector| sector.opponents())
        .fold(0i64, |total, opponent| total.saturating_add(opponent_hp(opponent)))
}

pub fn summarize(chamber: &ChamberEntry, level_type: LevelType) -> ChamberTotals {
    ChamberTotals {
        total_hp: total_hp(chamber, level_type.sector_count()),
        total_cycles: chamber.cycles,
    }
}
