//! Persistence of provider session links collected at the end of a run.

use std::path::PathBuf;

use applause_domain::{ApplauseError, Result, TestResultProviderInfo};
use async_trait::async_trait;
use tracing::info;

/// Default file the link writer persists to, relative to the working
/// directory.
pub const DEFAULT_LINK_FILE: &str = "provider_session_links.json";

/// Sink for the provider session links fetched when a run ends.
#[async_trait]
pub trait ProviderSessionLinkWriter: Send + Sync {
    async fn write_links(&self, links: &[TestResultProviderInfo]) -> Result<()>;
}

/// Writes provider session links to a JSON file.
pub struct FileLinkWriter {
    path: PathBuf,
}

impl FileLinkWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileLinkWriter {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_FILE)
    }
}

#[async_trait]
impl ProviderSessionLinkWriter for FileLinkWriter {
    async fn write_links(&self, links: &[TestResultProviderInfo]) -> Result<()> {
        let json = serde_json::to_vec_pretty(links)
            .map_err(|err| ApplauseError::Internal(format!("failed to encode links: {err}")))?;

        tokio::fs::write(&self.path, json).await.map_err(|err| {
            ApplauseError::Internal(format!(
                "failed to write {}: {err}",
                self.path.display()
            ))
        })?;

        info!(path = %self.path.display(), count = links.len(), "Wrote provider session links");
        Ok(())
    }
}
