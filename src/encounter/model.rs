//! Canonical encounter hierarchy
//!
//! `SessionDocument::from_value` is the single normalization boundary: the
//! alias table and the default table are applied here, and nothing past this
//! point ever looks at raw JSON again.

use crate::core::error::{ChamberError, Result};
use crate::core::types::{LevelKey, LevelType, CHAMBERS_PER_LEVEL, LEVEL_COUNT};
use crate::encounter::aliases;
use crate::encounter::coerce::{self, defaults};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key prefix identifying a wave inside a sector
pub const WAVE_PREFIX: &str = "wave";

/// Key prefix identifying an opponent inside a wave
pub const OPPONENT_PREFIX: &str = "opponent";

/// One enemy instance with defaults already applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentEntry {
    pub key: String,
    pub name: Option<String>,
    pub base_hp: f64,
    pub base_atk: f64,
    pub base_def: f64,
    pub hp_multiplier: f64,
    /// Percent; 100 leaves HP unchanged
    pub hp_modifier: f64,
    /// Raw level, uncapped
    pub level: f64,
    /// Not rounded; totals multiply by the raw quantity
    pub qty: f64,
    pub description: Option<String>,
}

impl Default for OpponentEntry {
    fn default() -> Self {
        Self {
            key: String::new(),
            name: None,
            base_hp: defaults::BASE_HP,
            base_atk: defaults::BASE_ATK,
            base_def: defaults::BASE_DEF,
            hp_multiplier: defaults::HP_MULTIPLIER,
            hp_modifier: defaults::HP_MODIFIER,
            level: defaults::LEVEL,
            qty: defaults::QTY,
            description: None,
        }
    }
}

impl OpponentEntry {
    pub fn from_object(key: &str, object: &Map<String, Value>) -> Self {
        let field = |name: &str, default: f64| coerce::number_or(object.get(name), default);
        Self {
            key: key.to_string(),
            name: object.get("name").and_then(coerce::non_empty_text),
            base_hp: field("baseHp", defaults::BASE_HP),
            base_atk: field("baseAtk", defaults::BASE_ATK),
            base_def: field("baseDef", defaults::BASE_DEF),
            hp_multiplier: field("hpMultiplier", defaults::HP_MULTIPLIER),
            hp_modifier: field("hpModifier", defaults::HP_MODIFIER),
            level: aliases::OPPONENT_LEVEL.first_number(object, defaults::LEVEL),
            qty: field("qty", defaults::QTY),
            description: object.get("description").and_then(coerce::non_empty_text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaveEntry {
    pub key: String,
    pub opponents: Vec<OpponentEntry>,
}

impl WaveEntry {
    pub fn from_object(key: &str, object: &Map<String, Value>) -> Self {
        let opponents = prefixed_objects(object, OPPONENT_PREFIX)
            .map(|(k, v)| OpponentEntry::from_object(k, v))
            .collect();
        Self {
            key: key.to_string(),
            opponents,
        }
    }
}

/// Waves in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectorEntry {
    pub waves: Vec<WaveEntry>,
}

impl SectorEntry {
    pub fn from_value(value: Option<&Value>) -> Self {
        let waves = value
            .and_then(Value::as_object)
            .map(|object| {
                prefixed_objects(object, WAVE_PREFIX)
                    .map(|(k, v)| WaveEntry::from_object(k, v))
                    .collect()
            })
            .unwrap_or_default();
        Self { waves }
    }

    pub fn opponents(&self) -> impl Iterator<Item = &OpponentEntry> {
        self.waves.iter().flat_map(|wave| wave.opponents.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reward {
    pub name: String,
    pub qty: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChamberEntry {
    pub cycles: f64,
    /// `None` when the document has no `challenge` field at all
    pub challenge: Option<Vec<String>>,
    pub rewards: Option<Vec<Reward>>,
    /// Exactly `level_type.sector_count()` sectors
    pub sectors: Vec<SectorEntry>,
}

impl ChamberEntry {
    pub fn from_value(value: Option<&Value>, level_type: LevelType) -> Self {
        let empty = Map::new();
        let object = value.and_then(Value::as_object).unwrap_or(&empty);

        let sectors = (1..=level_type.sector_count())
            .map(|s| SectorEntry::from_value(object.get(&format!("sector{}", s))))
            .collect();

        Self {
            cycles: coerce::number_or(object.get("cycles"), defaults::CYCLES),
            challenge: object.get("challenge").and_then(parse_challenge),
            rewards: object.get("rewards").and_then(parse_rewards),
            sectors,
        }
    }

    pub fn empty(level_type: LevelType) -> Self {
        Self::from_value(None, level_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelEntry {
    pub key: LevelKey,
    pub level_type: LevelType,
    /// Label as written in the document, or the default type's label
    pub type_label: String,
    pub level_buff: Option<String>,
    pub chambers: [ChamberEntry; CHAMBERS_PER_LEVEL],
}

impl LevelEntry {
    pub fn from_value(key: LevelKey, value: Option<&Value>) -> Self {
        let empty = Map::new();
        let object = value.and_then(Value::as_object).unwrap_or(&empty);

        // Only a missing or empty label takes the positional default
        let (level_type, type_label) = match object.get("levelType").and_then(coerce::non_empty_text) {
            Some(raw) => (LevelType::from_label(&raw), raw),
            None => (key.default_type(), key.default_type().label().to_string()),
        };

        let chambers = std::array::from_fn(|c| {
            ChamberEntry::from_value(object.get(&format!("chamber{}", c + 1)), level_type)
        });

        Self {
            key,
            level_type,
            type_label,
            level_buff: aliases::LEVEL_BUFF
                .first_present(object)
                .and_then(coerce::non_empty_text),
            chambers,
        }
    }

    pub fn empty(key: LevelKey) -> Self {
        Self::from_value(key, None)
    }

    pub fn is_seasonal(&self) -> bool {
        self.key.is_seasonal()
    }
}

/// One trial-chamber session: global buffs and all fifteen levels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDocument {
    pub trial_buff_name: Option<String>,
    pub trial_buff_text: Option<String>,
    /// `l1` first
    pub levels: [LevelEntry; LEVEL_COUNT as usize],
}

impl Default for SessionDocument {
    fn default() -> Self {
        Self {
            trial_buff_name: None,
            trial_buff_text: None,
            levels: LevelKey::all_keys().map(LevelEntry::empty),
        }
    }
}

impl SessionDocument {
    /// Normalize a parsed session document.
    ///
    /// Only a non-object top level is rejected; every nested shape problem
    /// falls back to defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            ChamberError::Malformed(format!(
                "session document must be a JSON object, got {}",
                json_kind(value)
            ))
        })?;

        let levels_object = object.get("levels").and_then(Value::as_object);
        if levels_object.is_none() {
            tracing::debug!("session document has no levels mapping, using defaults");
        }

        let levels = LevelKey::all_keys().map(|key| {
            LevelEntry::from_value(key, levels_object.and_then(|l| l.get(&key.to_string())))
        });

        Ok(Self {
            trial_buff_name: aliases::TRIAL_BUFF_NAME
                .first_present(object)
                .and_then(coerce::text),
            trial_buff_text: aliases::TRIAL_BUFF_TEXT
                .first_present(object)
                .and_then(coerce::text),
            levels,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn level(&self, key: LevelKey) -> &LevelEntry {
        &self.levels[usize::from(key.number() - 1)]
    }
}

/// Entries whose key starts with `prefix` (ASCII case-insensitive) and whose
/// value is a JSON object. Everything else is skipped.
pub fn prefixed_objects<'a>(
    object: &'a Map<String, Value>,
    prefix: &'a str,
) -> impl Iterator<Item = (&'a str, &'a Map<String, Value>)> + 'a {
    object.iter().filter_map(move |(key, value)| {
        if !has_prefix_ignore_case(key, prefix) {
            return None;
        }
        match value.as_object() {
            Some(inner) => Some((key.as_str(), inner)),
            None => {
                tracing::trace!("skipping '{}': not an object", key);
                None
            }
        }
    })
}

fn has_prefix_ignore_case(key: &str, prefix: &str) -> bool {
    key.len() >= prefix.len()
        && key.is_char_boundary(prefix.len())
        && key[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn parse_challenge(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => Some(items.iter().filter_map(coerce::text).collect()),
        Value::Object(map) => Some(map.values().filter_map(coerce::text).collect()),
        other => coerce::text(other).map(|line| vec![line]),
    }
}

fn parse_rewards(value: &Value) -> Option<Vec<Reward>> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return None,
    };
    Some(items.into_iter().filter_map(parse_reward).collect())
}

fn parse_reward(value: &Value) -> Option<Reward> {
    match value {
        Value::String(name) => Some(Reward {
            name: name.clone(),
            qty: defaults::REWARD_QTY,
        }),
        Value::Object(object) => Some(Reward {
            name: object
                .get("name")
                .and_then(coerce::text)
                .unwrap_or_default(),
            // An explicit zero is kept; only absent or unusable values default
            qty: object
                .get("qty")
                .and_then(|q| {
                    coerce::integer(q).or_else(|| {
                        q.as_f64()
                            .filter(|f| f.is_finite())
                            .map(coerce::round_half_up)
                    })
                })
                .unwrap_or(defaults::REWARD_QTY),
        }),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
