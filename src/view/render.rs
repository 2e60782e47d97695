//! Projection of the encounter model into display structures
//!
//! Derived values are computed here on every call; nothing is cached.

use crate::core::types::{LevelKey, LevelType};
use crate::encounter::{ChamberEntry, LevelEntry, OpponentEntry, SectorEntry, SessionDocument};
use crate::stats::{self, formula};
use crate::view::markup::TextMarkup;
use serde::Serialize;

/// Shown when a session document carries no global buff text
pub const NO_GLOBAL_BUFFS: &str = "No global buffs.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuffView {
    pub name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelButton {
    pub key: LevelKey,
    pub number: u8,
    pub level_type: LevelType,
    /// Label shown on the button
    pub type_label: String,
    pub seasonal: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentCard {
    pub name: Option<String>,
    pub level: f64,
    pub computed_hp: i64,
    pub computed_atk: i64,
    pub computed_def: i64,
    pub qty: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveView {
    /// Upper-cased wave key, e.g. `WAVE1`
    pub label: String,
    pub opponents: Vec<OpponentCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorView {
    /// 1-based
    pub index: usize,
    pub waves: Vec<WaveView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardView {
    pub name: String,
    pub qty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChamberView {
    /// 1-based
    pub index: usize,
    pub total_hp: i64,
    pub total_cycles: f64,
    pub sectors: Vec<SectorView>,
    pub challenges: Option<Vec<String>>,
    pub rewards: Option<Vec<RewardView>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelView {
    pub key: LevelKey,
    pub number: u8,
    pub level_type: LevelType,
    pub type_label: String,
    pub seasonal: bool,
    pub level_buff: Option<String>,
    pub chambers: Vec<ChamberView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub buffs: BuffView,
    /// Always fifteen buttons, exactly one active
    pub levels: Vec<LevelButton>,
    pub selected: LevelView,
}

pub fn render_session(
    document: &SessionDocument,
    selected: LevelKey,
    markup: &dyn TextMarkup,
) -> SessionView {
    let buffs = BuffView {
        name: document.trial_buff_name.clone().filter(|n| !n.is_empty()),
        text: document
            .trial_buff_text
            .as_deref()
            .map(|text| markup.mark_up(text))
            .unwrap_or_else(|| NO_GLOBAL_BUFFS.to_string()),
    };

    let levels = document
        .levels
        .iter()
        .map(|level| LevelButton {
            key: level.key,
            number: level.key.number(),
            level_type: level.level_type,
            type_label: level.type_label.clone(),
            seasonal: level.is_seasonal(),
            active: level.key == selected,
        })
        .collect();

    SessionView {
        buffs,
        levels,
        selected: render_level(document.level(selected), markup),
    }
}

pub fn render_level(level: &LevelEntry, markup: &dyn TextMarkup) -> LevelView {
    let chambers = level
        .chambers
        .iter()
        .enumerate()
        .map(|(i, chamber)| render_chamber(i + 1, chamber, level.level_type, markup))
        .collect();

    LevelView {
        key: level.key,
        number: level.key.number(),
        level_type: level.level_type,
        type_label: level.type_label.clone(),
        seasonal: level.is_seasonal(),
        level_buff: level.level_buff.as_deref().map(|buff| markup.mark_up(buff)),
        chambers,
    }
}

pub fn render_chamber(
    index: usize,
    chamber: &ChamberEntry,
    level_type: LevelType,
    markup: &dyn TextMarkup,
) -> ChamberView {
    let totals = stats::summarize(chamber, level_type);

    let sectors = chamber
        .sectors
        .iter()
        .take(level_type.sector_count())
        .enumerate()
        .map(|(i, sector)| render_sector(i + 1, sector, markup))
        .collect();

    ChamberView {
        index,
        total_hp: totals.total_hp,
        total_cycles: totals.total_cycles,
        sectors,
        challenges: chamber.challenge.clone(),
        rewards: chamber.rewards.as_ref().map(|rewards| {
            rewards
                .iter()
                .map(|r| RewardView {
                    name: r.name.clone(),
                    qty: r.qty,
                })
                .collect()
        }),
    }
}

pub fn render_sector(index: usize, sector: &SectorEntry, markup: &dyn TextMarkup) -> SectorView {
    SectorView {
        index,
        waves: sector
            .waves
            .iter()
            .map(|wave| WaveView {
                label: wave.key.to_uppercase(),
                opponents: wave
                    .opponents
                    .iter()
                    .map(|opponent| opponent_card(opponent, markup))
                    .collect(),
            })
            .collect(),
    }
}

pub fn opponent_card(opponent: &OpponentEntry, markup: &dyn TextMarkup) -> OpponentCard {
    let derived = formula::derive(opponent);
    OpponentCard {
        name: opponent.name.clone(),
        level: opponent.level,
        computed_hp: derived.hp,
        computed_atk: derived.atk,
        computed_def: derived.def,
        qty: opponent.qty,
        description: opponent.description.as_deref().map(|d| markup.mark_up(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::markup::{KeywordHighlighter, PlainText};
    use serde_json::json;

    fn sample() -> SessionDocument {
        SessionDocument::from_value(&json!({
            "trialBuffName": "Overclock",
            "trialbuffs": "All foes gain 20% ATK",
            "levels": {
                "l3": {
                    "levelBuff": "Foes regenerate",
                    "chamber1": {
                        "cycles": 5,
                        "challenge": ["Win in 3 cycles"],
                        "rewards": [{"name": "Quark", "qty": 40}],
                        "sector1": {
                            "wave1": {
                                "opponent1": {
                                    "name": "Husk", "baseHp": 100, "baseAtk": 100,
                                    "baseDef": 100, "level": 10, "qty": 2,
                                    "description": "Deals Flame DMG"
                                }
                            }
                        },
                        "sector2": {"wave1": {"opponent1": {"baseHp": 99999}}}
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_session_view_buttons() {
        let view = render_session(&sample(), LevelKey::new(3).unwrap(), &PlainText);
        assert_eq!(view.levels.len(), 15);
        assert_eq!(view.levels.iter().filter(|b| b.active).count(), 1);
        assert!(view.levels[2].active);
        assert!(view.levels[10].seasonal);
        assert!(!view.levels[9].seasonal);
        assert_eq!(view.buffs.name.as_deref(), Some("Overclock"));
    }

    #[test]
    fn test_level_view_cards_and_totals() {
        let view = render_session(&sample(), LevelKey::new(3).unwrap(), &PlainText);
        let level = &view.selected;
        assert_eq!(level.level_type, LevelType::Basic);
        assert_eq!(level.chambers.len(), 3);
        assert_eq!(level.level_buff.as_deref(), Some("Foes regenerate"));

        let chamber = &level.chambers[0];
        assert_eq!(chamber.sectors.len(), 1);
        assert_eq!(chamber.total_hp, 2000);
        assert_eq!(chamber.total_cycles, 5.0);
        assert_eq!(chamber.challenges, Some(vec!["Win in 3 cycles".to_string()]));
        assert_eq!(chamber.rewards.as_ref().unwrap()[0].qty, 40);

        let wave = &chamber.sectors[0].waves[0];
        assert_eq!(wave.label, "WAVE1");
        let card = &wave.opponents[0];
        assert_eq!(card.computed_hp, 1000);
        assert_eq!(card.computed_atk, 163);
        assert_eq!(card.computed_def, 148);
        assert_eq!(card.qty, 2.0);
    }

    #[test]
    fn test_markup_applied_to_descriptions() {
        let view = render_session(&sample(), LevelKey::new(3).unwrap(), &KeywordHighlighter);
        let card = &view.selected.chambers[0].sectors[0].waves[0].opponents[0];
        assert_eq!(
            card.description.as_deref(),
            Some(r#"Deals <span class="Flame-DMG">Flame DMG</span>"#)
        );
    }

    #[test]
    fn test_empty_document_renders() {
        let view = render_session(&SessionDocument::default(), LevelKey::FIRST, &PlainText);
        assert_eq!(view.buffs.text, NO_GLOBAL_BUFFS);
        assert!(view.buffs.name.is_none());
        for chamber in &view.selected.chambers {
            assert_eq!(chamber.total_hp, 0);
            assert!(chamber.challenges.is_none());
            assert!(chamber.rewards.is_none());
            assert_eq!(chamber.sectors.len(), 1);
            assert!(chamber.sectors[0].waves.is_empty());
        }
    }

    #[test]
    fn test_unknown_type_label_shown_with_one_sector() {
        let doc = SessionDocument::from_value(&json!({
            "levels": {"l13": {"levelType": "mythic"}}
        }))
        .unwrap();
        let view = render_session(&doc, LevelKey::new(13).unwrap(), &PlainText);
        assert_eq!(view.levels[12].type_label, "mythic");
        assert_eq!(view.selected.type_label, "mythic");
        assert!(view.selected.chambers.iter().all(|c| c.sectors.len() == 1));
    }

    #[test]
    fn test_advanced_level_has_two_sectors() {
        let doc = SessionDocument::default();
        let view = render_level(doc.level(LevelKey::new(12).unwrap()), &PlainText);
        assert!(view.seasonal);
        assert!(view.chambers.iter().all(|c| c.sectors.len() == 2));
    }
}
