//! Tolerated key spellings
//!
//! Session documents are hand-authored and a few fields show up under more
//! than one spelling. Every accepted spelling is listed here, in lookup
//! order; normalization never consults a key that is not in this table.

use crate::encounter::coerce;
use serde_json::{Map, Value};

/// Document keys that may carry one canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub keys: &'static [&'static str],
}

pub const TRIAL_BUFF_NAME: Alias = Alias {
    keys: &["trialBuffName", "trialbuffName"],
};

pub const TRIAL_BUFF_TEXT: Alias = Alias {
    keys: &["trialbuffs", "trialBuffs"],
};

pub const LEVEL_BUFF: Alias = Alias {
    keys: &["levelBuff", "levelbuff"],
};

pub const OPPONENT_LEVEL: Alias = Alias {
    keys: &["level", "lvl"],
};

/// Every alias the normalizer knows about
pub const ALIASES: &[Alias] = &[TRIAL_BUFF_NAME, TRIAL_BUFF_TEXT, LEVEL_BUFF, OPPONENT_LEVEL];

impl Alias {
    /// First key that is present and not null
    pub fn first_present<'a>(&self, object: &'a Map<String, Value>) -> Option<&'a Value> {
        self.keys
            .iter()
            .filter_map(|key| object.get(*key))
            .find(|value| !value.is_null())
    }

    /// First key holding a usable (non-zero, numeric) value, else `default`
    pub fn first_number(&self, object: &Map<String, Value>, default: f64) -> f64 {
        self.keys
            .iter()
            .filter_map(|key| object.get(*key))
            .find_map(coerce::number)
            .unwrap_or(default)
    }
}
