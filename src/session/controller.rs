//! Session controller
//!
//! Owns the session list, the loaded document and the selected level. The
//! shell drives it through `initialize`, `select_session` and `select_level`.
//!
//! Session fetches are ticketed: only the most recently issued ticket may
//! replace the loaded document, so a slow response for an earlier selection
//! can never overwrite a later one.

use crate::core::config::CodexConfig;
use crate::core::error::{ChamberError, Result};
use crate::core::types::LevelKey;
use crate::encounter::SessionDocument;
use crate::index::{self, SessionDescriptor, SessionIndex};
use crate::source::DocumentSource;
use crate::view::{render_session, SessionView, TextMarkup};
use serde_json::Value;

/// Handle for one in-flight session fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    descriptor: SessionDescriptor,
    path: String,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn descriptor(&self) -> &SessionDescriptor {
        &self.descriptor
    }

    /// Source path to fetch for this ticket
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The document replaced the previous one
    Applied,
    /// A newer fetch was issued; this response was dropped
    Stale,
}

pub struct SessionController<S> {
    source: S,
    config: CodexConfig,
    initialized: bool,
    index: SessionIndex,
    index_error: Option<String>,
    selected_session: Option<SessionDescriptor>,
    document: Option<SessionDocument>,
    selected_level: LevelKey,
    session_error: Option<String>,
    issued: u64,
    pending: Option<u64>,
}

impl<S: DocumentSource> SessionController<S> {
    pub fn new(source: S, config: CodexConfig) -> Self {
        Self {
            source,
            config,
            initialized: false,
            index: SessionIndex::default(),
            index_error: None,
            selected_session: None,
            document: None,
            selected_level: LevelKey::FIRST,
            session_error: None,
            issued: 0,
            pending: None,
        }
    }

    /// Load the index and auto-select the first session.
    ///
    /// Runs once; later calls are no-ops, even when the first attempt failed.
    /// Use `reload_index` to retry explicitly.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            tracing::debug!("Session controller already initialized");
            return Ok(());
        }
        self.initialized = true;
        self.reload_index().await
    }

    /// Rebuild the session list from the index document.
    ///
    /// On failure the list is emptied and the error kept for display. On a
    /// non-empty list the first session is selected and fetched.
    pub async fn reload_index(&mut self) -> Result<()> {
        let path = self.config.index_path();
        tracing::info!("Loading session index from {}", path);

        let loaded = match self.source.fetch_json(&path).await {
            Ok(value) => index::normalize(&value),
            Err(e) => Err(ChamberError::IndexLoad(e.to_string())),
        };

        let loaded = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("Failed to load session index: {}", e);
                self.index = SessionIndex::default();
                self.index_error = Some(e.to_string());
                return Err(e);
            }
        };

        tracing::info!("Loaded {} session(s)", loaded.descriptors.len());
        self.index = loaded;
        self.index_error = None;

        match self.index.first().cloned() {
            Some(first) => self.select_session(&first).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Fetch and show a session. Exactly one document fetch per call.
    pub async fn select_session(&mut self, descriptor: &SessionDescriptor) -> Result<FetchOutcome> {
        let ticket = self.begin_session_fetch(descriptor);
        let response = self.source.fetch_json(ticket.path()).await;
        self.complete_session_fetch(ticket, response)
    }

    /// Issue a ticket for a session fetch, superseding any earlier ticket
    pub fn begin_session_fetch(&mut self, descriptor: &SessionDescriptor) -> FetchTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        tracing::info!("Fetching {} ({})", descriptor, descriptor.file_ref);
        FetchTicket {
            seq: self.issued,
            descriptor: descriptor.clone(),
            path: self.config.session_path(&descriptor.file_ref),
        }
    }

    /// Apply the response for `ticket`.
    ///
    /// Stale tickets are dropped whatever their result. A failed fetch keeps
    /// the previously loaded document and records the error.
    pub fn complete_session_fetch(
        &mut self,
        ticket: FetchTicket,
        response: Result<Value>,
    ) -> Result<FetchOutcome> {
        if ticket.seq != self.issued {
            tracing::debug!(
                "Dropping stale response for {} (ticket {}, latest {})",
                ticket.descriptor,
                ticket.seq,
                self.issued
            );
            return Ok(FetchOutcome::Stale);
        }
        self.pending = None;

        let document = response.and_then(|value| SessionDocument::from_value(&value));
        match document {
            Ok(document) => {
                self.document = Some(document);
                self.selected_session = Some(ticket.descriptor);
                self.selected_level = LevelKey::FIRST;
                self.session_error = None;
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", ticket.descriptor.file_ref, e);
                let error = ChamberError::SessionLoad {
                    file: ticket.descriptor.file_ref,
                    reason: e.to_string(),
                };
                self.session_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Select a level by key (`l1`..`l15`)
    pub fn select_level(&mut self, level_key: &str) -> Result<LevelKey> {
        let key: LevelKey = level_key.parse()?;
        self.selected_level = key;
        Ok(key)
    }

    /// Render the loaded session at the selected level. Recomputed every call.
    pub fn render(&self, markup: &dyn TextMarkup) -> Option<SessionView> {
        self.document
            .as_ref()
            .map(|document| render_session(document, self.selected_level, markup))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &CodexConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// True while the latest issued fetch has not completed
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn index(&self) -> &SessionIndex {
        &self.index
    }

    pub fn descriptors(&self) -> &[SessionDescriptor] {
        &self.index.descriptors
    }

    pub fn selected_session(&self) -> Option<&SessionDescriptor> {
        self.selected_session.as_ref()
    }

    pub fn selected_level(&self) -> LevelKey {
        self.selected_level
    }

    pub fn document(&self) -> Option<&SessionDocument> {
        self.document.as_ref()
    }

    pub fn index_error(&self) -> Option<&str> {
        self.index_error.as_deref()
    }

    pub fn session_error(&self) -> Option<&str> {
        self.session_error.as_deref()
    }
}
