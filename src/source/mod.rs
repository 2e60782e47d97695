//! Document sources
//!
//! Everything the browser reads goes through `DocumentSource::fetch_json`.
//! Paths are `/`-separated and relative to the source root, e.g.
//! `trialchambers/index.json`.

pub mod directory;
pub mod http;
pub mod memory;

use crate::core::config::CodexConfig;
use crate::core::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use directory::DirectorySource;
pub use http::HttpSource;
pub use memory::MemorySource;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch and parse one JSON document
    async fn fetch_json(&self, path: &str) -> Result<Value>;
}

#[async_trait]
impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    async fn fetch_json(&self, path: &str) -> Result<Value> {
        (**self).fetch_json(path).await
    }
}

/// Pick the source a configuration describes: HTTP when `base_url` is set,
/// otherwise the local directory.
pub fn from_config(config: &CodexConfig) -> Result<Box<dyn DocumentSource>> {
    match &config.base_url {
        Some(url) => Ok(Box::new(HttpSource::new(url, config.request_timeout())?)),
        None => Ok(Box::new(DirectorySource::new(config.local_root.clone()))),
    }
}
