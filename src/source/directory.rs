//! Local directory document source

use crate::core::error::{ChamberError, Result};
use crate::source::DocumentSource;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};

pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `path` below the root. Absolute paths and `..` are refused.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(ChamberError::InvalidPath(path.to_string())),
            }
        }
        Ok(resolved)
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn fetch_json(&self, path: &str) -> Result<Value> {
        let file = self.resolve(path)?;
        tracing::debug!("Reading {}", file.display());
        let content = tokio::fs::read_to_string(&file).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
