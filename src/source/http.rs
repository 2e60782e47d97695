//! Static-host document source over HTTP

use crate::core::error::{ChamberError, Result};
use crate::source::DocumentSource;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    /// Create a source rooted at `base_url`
    ///
    /// A trailing `/` is added when missing so relative paths resolve below
    /// the base instead of replacing its last segment.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)
            .map_err(|e| ChamberError::Config(format!("invalid base_url '{}': {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChamberError::Fetch(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ChamberError::InvalidPath(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch_json(&self, path: &str) -> Result<Value> {
        let url = self.url_for(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ChamberError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChamberError::Fetch(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ChamberError::Fetch(format!("{}: {}", url, e)))
    }
}
