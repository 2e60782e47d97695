//! Browser configuration with documented defaults
//!
//! Values come from `CodexConfig::default()`, optionally overlaid by a TOML
//! file, and finally by command-line flags in the binary.

use crate::core::error::{ChamberError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for locating and fetching trial chamber documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodexConfig {
    // === DOCUMENT LAYOUT ===
    /// Directory (relative to the source root) holding the index and the
    /// session documents.
    ///
    /// The index lives at `<data_dir>/<index_file>` and every session
    /// document at `<data_dir>/<file_ref>`.
    pub data_dir: String,

    /// File name of the session index inside `data_dir`
    pub index_file: String,

    // === SOURCE SELECTION ===
    /// Base URL of a static host serving the documents.
    ///
    /// When set, documents are fetched over HTTP and `local_root` is ignored.
    pub base_url: Option<String>,

    /// Local directory that contains `data_dir`
    pub local_root: PathBuf,

    /// Per-request timeout for HTTP fetches, in seconds.
    ///
    /// `None` leaves requests unbounded; a hung fetch then keeps the
    /// controller in its loading state.
    pub request_timeout_secs: Option<u64>,

    // === PRESENTATION ===
    /// Wrap keywords and numbers in styling spans before display
    pub highlight: bool,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            data_dir: "trialchambers".into(),
            index_file: "index.json".into(),
            base_url: None,
            local_root: PathBuf::from("data"),
            request_timeout_secs: None,
            highlight: false,
        }
    }
}

impl CodexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CodexConfig =
            toml::from_str(content).map_err(|e| ChamberError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.index_file.trim().is_empty() {
            return Err(ChamberError::Config("index_file must not be empty".into()));
        }

        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ChamberError::Config(format!(
                    "base_url must be http(s), got '{}'",
                    url
                )));
            }
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ChamberError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Source-relative path of the session index
    pub fn index_path(&self) -> String {
        self.join_data_dir(&self.index_file)
    }

    /// Source-relative path of one session document
    pub fn session_path(&self, file_ref: &str) -> String {
        self.join_data_dir(file_ref)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn join_data_dir(&self, file: &str) -> String {
        let dir = self.data_dir.trim_matches('/');
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", dir, file)
        }
    }
}
