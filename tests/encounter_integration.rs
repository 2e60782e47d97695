//! Encounter model integration tests
//!
//! Full session documents through normalization, aggregation and rendering.

use chamber_codex::core::types::{LevelKey, LevelType};
use chamber_codex::encounter::SessionDocument;
use chamber_codex::index;
use chamber_codex::view::{render_session, KeywordHighlighter, PlainText};

const SESSION: &str = r#"{
    "trialBuffName": "Resonance",
    "trialbuffs": "Allies deal 15% more Quantum DMG",
    "levels": {
        "l1": {
            "levelBuff": "Enemies gain 10% Physical DEF",
            "chamber1": {
                "cycles": 6,
                "challenge": ["Clear in 4 cycles", "No unit falls"],
                "rewards": {"r1": {"name": "Quark", "qty": 20}, "r2": {"name": "Core"}},
                "sector1": {
                    "wave1": {
                        "opponent1": {"name": "Drone", "baseHp": 500, "baseAtk": 40, "baseDef": 20, "level": 1, "qty": 2},
                        "opponent2": {"name": "Warden", "baseHp": 300, "qty": 1}
                    },
                    "Wave2": {
                        "Opponent1": {"name": "Sentry", "baseHp": "250", "lvl": 4, "hpMultiplier": 2, "hpModifier": 50}
                    },
                    "waveNotes": "skip me"
                }
            },
            "chamber2": {"cycles": "3"}
        },
        "l11": {
            "chamber1": {
                "sector1": {"wave1": {"opponent1": {"baseHp": 1000, "level": 90, "baseAtk": 10}}},
                "sector2": {"wave1": {"opponent1": {"baseHp": 1000, "level": 80, "baseAtk": 10}}}
            }
        }
    }
}"#;

#[test]
fn test_full_level_one() {
    let doc = SessionDocument::from_json(SESSION).unwrap();
    let view = render_session(&doc, LevelKey::FIRST, &PlainText);

    assert_eq!(view.buffs.name.as_deref(), Some("Resonance"));
    let level = &view.selected;
    assert_eq!(level.level_type, LevelType::Basic);
    assert!(!level.seasonal);

    let chamber = &level.chambers[0];
    // 500×2 + 300 + 250×2×4×0.5
    assert_eq!(chamber.total_hp, 2300);
    assert_eq!(chamber.total_cycles, 6.0);

    let waves = &chamber.sectors[0].waves;
    let labels: Vec<&str> = waves.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["WAVE1", "WAVE2"]);
    assert_eq!(waves[1].opponents[0].computed_hp, 1000);
    assert_eq!(waves[1].opponents[0].level, 4.0);

    let rewards = chamber.rewards.as_ref().unwrap();
    assert_eq!(rewards.len(), 2);
    assert_eq!(rewards[1].qty, 1);
    assert_eq!(chamber.challenges.as_ref().unwrap().len(), 2);

    assert_eq!(level.chambers[1].total_cycles, 3.0);
    assert!(level.chambers[2].sectors[0].waves.is_empty());
}

#[test]
fn test_seasonal_advanced_level() {
    let doc = SessionDocument::from_json(SESSION).unwrap();
    let view = render_session(&doc, LevelKey::new(11).unwrap(), &PlainText);
    let level = &view.selected;

    assert!(level.seasonal);
    assert_eq!(level.level_type, LevelType::Advanced);
    let chamber = &level.chambers[0];
    assert_eq!(chamber.sectors.len(), 2);
    // HP is uncapped: 1000×90 + 1000×80
    assert_eq!(chamber.total_hp, 170_000);

    let over = &chamber.sectors[0].waves[0].opponents[0];
    let at_cap = &chamber.sectors[1].waves[0].opponents[0];
    assert_eq!(over.computed_atk, at_cap.computed_atk);
}

#[test]
fn test_highlighted_buffs() {
    let doc = SessionDocument::from_json(SESSION).unwrap();
    let view = render_session(&doc, LevelKey::FIRST, &KeywordHighlighter);
    assert!(view.buffs.text.contains(r#"<span class="Quantum-DMG">Quantum DMG</span>"#));
    assert!(view
        .selected
        .level_buff
        .as_deref()
        .unwrap()
        .contains(r#"<span class="Physical-DEF">Physical DEF</span>"#));
}

#[test]
fn test_views_serialize_to_json() {
    let doc = SessionDocument::from_json(SESSION).unwrap();
    let view = render_session(&doc, LevelKey::FIRST, &PlainText);
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["selected"]["key"], "l1");
    assert_eq!(value["selected"]["level_type"], "basic");
    assert_eq!(value["levels"].as_array().unwrap().len(), 15);
}

#[test]
fn test_index_then_document_flow() {
    let index_value: serde_json::Value =
        serde_json::from_str(r#"{"s5": "a.json", "s1": "b.json"}"#).unwrap();
    let index = index::normalize(&index_value).unwrap();
    let numbers: Vec<i64> = index.descriptors.iter().map(|d| d.session_number).collect();
    assert_eq!(numbers, vec![1, 5]);
}
