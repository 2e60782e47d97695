//! In-memory document source
//!
//! Used for embedding fixed data and for driving the controller in tests.
//! Counts fetches per path.

use crate::core::error::{ChamberError, Result};
use crate::source::DocumentSource;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<String, Value>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<String>, value: Value) -> Self {
        self.insert(path, value);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, value: Value) {
        self.documents.insert(path.into(), value);
    }

    /// Number of fetches issued for `path`, including failed ones
    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches
            .lock()
            .map(|counts| counts.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches
            .lock()
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch_json(&self, path: &str) -> Result<Value> {
        if let Ok(mut counts) = self.fetches.lock() {
            *counts.entry(path.to_string()).or_default() += 1;
        }
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| ChamberError::Fetch(format!("{} not found", path)))
    }
}
