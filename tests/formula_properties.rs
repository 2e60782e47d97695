//! Property tests for the stat formulas and chamber totals

use chamber_codex::core::types::LevelType;
use chamber_codex::encounter::{ChamberEntry, OpponentEntry};
use chamber_codex::stats::{formula, total_hp};
use proptest::prelude::*;
use serde_json::json;

fn opponent(base_hp: f64, base_atk: f64, base_def: f64, level: f64) -> OpponentEntry {
    OpponentEntry {
        base_hp,
        base_atk,
        base_def,
        level,
        ..OpponentEntry::default()
    }
}

proptest! {
    /// With neutral multiplier and modifier, HP is base × level
    #[test]
    fn hp_is_base_times_level(base in 0u32..100_000, level in 1u32..200) {
        let opp = opponent(f64::from(base), 0.0, 0.0, f64::from(level));
        prop_assert_eq!(formula::computed_hp(&opp), i64::from(base) * i64::from(level));
    }

    /// Above the cap, ATK and DEF stop growing
    #[test]
    fn atk_def_capped_above_eighty(base_atk in 0u32..10_000, base_def in 0u32..10_000, level in 80u32..1000) {
        let at_cap = formula::derive(&opponent(0.0, f64::from(base_atk), f64::from(base_def), 80.0));
        let over = formula::derive(&opponent(0.0, f64::from(base_atk), f64::from(base_def), f64::from(level)));
        prop_assert_eq!(at_cap.atk, over.atk);
        prop_assert_eq!(at_cap.def, over.def);
    }

    /// Below the cap, ATK never decreases as level rises
    #[test]
    fn atk_monotonic_below_cap(base_atk in 1u32..10_000, level in 1u32..79) {
        let low = formula::computed_atk(&opponent(0.0, f64::from(base_atk), 0.0, f64::from(level)));
        let high = formula::computed_atk(&opponent(0.0, f64::from(base_atk), 0.0, f64::from(level + 1)));
        prop_assert!(high >= low);
    }

    /// Chamber total equals the sum of per-opponent HP × qty
    #[test]
    fn total_matches_manual_sum(entries in prop::collection::vec((1u32..5_000, 1u32..50, 1u32..5), 0..8)) {
        let mut wave = serde_json::Map::new();
        let mut expected = 0i64;
        for (i, (base_hp, level, qty)) in entries.iter().enumerate() {
            wave.insert(
                format!("opponent{}", i + 1),
                json!({"baseHp": base_hp, "level": level, "qty": qty}),
            );
            expected += i64::from(*base_hp) * i64::from(*level) * i64::from(*qty);
        }
        let chamber = ChamberEntry::from_value(
            Some(&json!({"sector1": {"wave1": wave}})),
            LevelType::Basic,
        );
        prop_assert_eq!(total_hp(&chamber, 1), expected);
    }
}

#[test]
fn test_atk_reference_value() {
    assert_eq!(formula::computed_atk(&opponent(0.0, 100.0, 0.0, 10.0)), 163);
}

#[test]
fn test_level_150_matches_level_80() {
    let a = formula::derive(&opponent(500.0, 120.0, 90.0, 150.0));
    let b = formula::derive(&opponent(500.0, 120.0, 90.0, 80.0));
    assert_eq!((a.atk, a.def), (b.atk, b.def));
    assert_eq!(a.hp, 75_000);
}
