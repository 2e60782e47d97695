//! Session index normalization
//!
//! The index document comes in three shapes: a list of file names, a list of
//! `{session, file}` records, or a mapping of `sN` keys to file names. Each
//! shape gets its own normalizer; the result is always a list of
//! `SessionDescriptor` sorted by session number.

use crate::core::error::{ChamberError, Result};
use crate::encounter::coerce;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// One selectable session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SessionDescriptor {
    /// Display sort key only
    pub session_number: i64,
    pub file_ref: String,
}

impl fmt::Display for SessionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session {}", self.session_number)
    }
}

/// Structural view of a raw index document
#[derive(Debug, Clone, PartialEq)]
pub enum IndexShape<'a> {
    /// Array of file names and/or `{session, file}` records
    Sequence(&'a [Value]),
    /// Object mapping `sN` keys to file names
    Keyed(&'a Map<String, Value>),
}

impl<'a> IndexShape<'a> {
    /// Dispatch on the top-level JSON kind. Scalars and null are not an index.
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(IndexShape::Sequence(items)),
            Value::Object(map) => Some(IndexShape::Keyed(map)),
            _ => None,
        }
    }
}

/// Normalized index: sorted descriptors plus any flagged problems
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionIndex {
    pub descriptors: Vec<SessionDescriptor>,
    /// Session numbers shared by more than one descriptor
    pub duplicates: Vec<i64>,
}

impl SessionIndex {
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn first(&self) -> Option<&SessionDescriptor> {
        self.descriptors.first()
    }

    pub fn find(&self, session_number: i64) -> Option<&SessionDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.session_number == session_number)
    }
}

/// Normalize a raw index document
pub fn normalize(value: &Value) -> Result<SessionIndex> {
    let mut descriptors = match IndexShape::classify(value) {
        Some(IndexShape::Sequence(items)) => from_sequence(items),
        Some(IndexShape::Keyed(map)) => from_keyed(map),
        None => {
            return Err(ChamberError::IndexLoad(
                "index must be an array or an object".into(),
            ))
        }
    };

    // Stable: equal session numbers keep document order
    descriptors.sort_by_key(|d| d.session_number);

    let duplicates = find_duplicates(&descriptors);
    if !duplicates.is_empty() {
        tracing::warn!("Session index has duplicate session numbers: {:?}", duplicates);
    }

    Ok(SessionIndex {
        descriptors,
        duplicates,
    })
}

fn from_sequence(items: &[Value]) -> Vec<SessionDescriptor> {
    let mut descriptors = Vec::with_capacity(items.len());
    for item in items {
        let next = descriptors.len() as i64 + 1;
        match item {
            Value::String(file) => descriptors.push(SessionDescriptor {
                session_number: session_number_in_filename(file).unwrap_or(next),
                file_ref: file.clone(),
            }),
            Value::Object(record) => {
                let Some(file) = record
                    .get("file")
                    .and_then(Value::as_str)
                    .filter(|f| !f.is_empty())
                else {
                    tracing::debug!("Skipping index record without a file: {}", item);
                    continue;
                };
                descriptors.push(SessionDescriptor {
                    session_number: record
                        .get("session")
                        .and_then(coerce::integer)
                        .unwrap_or(next),
                    file_ref: file.to_string(),
                });
            }
            other => tracing::debug!("Skipping index entry: {}", other),
        }
    }
    descriptors
}

fn from_keyed(map: &Map<String, Value>) -> Vec<SessionDescriptor> {
    let mut descriptors = Vec::with_capacity(map.len());
    for (key, value) in map {
        let Some(file) = value.as_str() else {
            tracing::debug!("Skipping index key '{}': file is not a string", key);
            continue;
        };
        let next = descriptors.len() as i64 + 1;
        descriptors.push(SessionDescriptor {
            session_number: session_number_from_key(key).unwrap_or(next),
            file_ref: file.to_string(),
        });
    }
    descriptors
}

/// First run of digits following an `s` or `S`, e.g. `trial_s12.json` → 12
pub fn session_number_in_filename(file: &str) -> Option<i64> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"(?i)s(\d+)").expect("valid regex"));
    pattern
        .captures(file)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// `s5` → 5, `S12` → 12, `7` → 7. Zero and unparseable keys yield `None`.
pub fn session_number_from_key(key: &str) -> Option<i64> {
    let trimmed = key
        .strip_prefix('s')
        .or_else(|| key.strip_prefix('S'))
        .unwrap_or(key);
    trimmed.trim().parse::<i64>().ok().filter(|n| *n != 0)
}

fn find_duplicates(descriptors: &[SessionDescriptor]) -> Vec<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for d in descriptors {
        *counts.entry(d.session_number).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(number, _)| number)
        .collect()
}
