//! Core type definitions used throughout the codebase

use crate::core::error::{ChamberError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of level slots in every session
pub const LEVEL_COUNT: u8 = 15;

/// Number of chambers in every level
pub const CHAMBERS_PER_LEVEL: usize = 3;

/// Highest level number that defaults to `LevelType::Basic`
pub const LAST_BASIC_LEVEL: u8 = 10;

/// First level number tagged as seasonal (runs through `LEVEL_COUNT`)
pub const FIRST_SEASONAL_LEVEL: u8 = 11;

/// Level identifier, `l1` through `l15`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LevelKey(u8);

impl LevelKey {
    /// The first level, selected by default whenever a session is shown
    pub const FIRST: LevelKey = LevelKey(1);

    pub fn new(number: u8) -> Option<Self> {
        (1..=LEVEL_COUNT).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// All fifteen level keys in display order
    pub fn all() -> impl Iterator<Item = LevelKey> {
        (1..=LEVEL_COUNT).map(LevelKey)
    }

    /// All fifteen level keys as a fixed array, `l1` first
    pub fn all_keys() -> [LevelKey; LEVEL_COUNT as usize] {
        std::array::from_fn(|i| LevelKey(i as u8 + 1))
    }

    /// Levels 11-15 are seasonal. Display only.
    pub fn is_seasonal(self) -> bool {
        self.0 >= FIRST_SEASONAL_LEVEL
    }

    /// Type a level takes when the document does not say
    pub fn default_type(self) -> LevelType {
        if self.0 <= LAST_BASIC_LEVEL {
            LevelType::Basic
        } else {
            LevelType::Advanced
        }
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

impl FromStr for LevelKey {
    type Err = ChamberError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('l')
            .or_else(|| trimmed.strip_prefix('L'))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(LevelKey::new)
            .ok_or_else(|| ChamberError::UnknownLevel(s.to_string()))
    }
}

impl TryFrom<String> for LevelKey {
    type Error = ChamberError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LevelKey> for String {
    fn from(key: LevelKey) -> Self {
        key.to_string()
    }
}

/// Level difficulty tier. Decides how many sectors each chamber has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    Basic,
    Advanced,
}

impl LevelType {
    /// Type for an explicit `levelType` label. Only `advanced` (any case)
    /// is advanced; every other label gets a single sector.
    pub fn from_label(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("advanced") {
            LevelType::Advanced
        } else {
            LevelType::Basic
        }
    }

    pub fn sector_count(self) -> usize {
        match self {
            LevelType::Basic => 1,
            LevelType::Advanced => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LevelType::Basic => "basic",
            LevelType::Advanced => "advanced",
        }
    }
}

impl fmt::Display for LevelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
