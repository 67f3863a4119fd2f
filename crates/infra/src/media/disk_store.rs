//! Filesystem-backed media store
//!
//! Each upload is written under `<root>/<category>/` with a UUID-prefixed,
//! sanitised filename, and addressed publicly as
//! `<public_base>/media/<category>/<stored_name>`.

use std::path::PathBuf;

use async_trait::async_trait;
use medlink_core::MediaStore;
use medlink_domain::{PortalError, Result as DomainResult};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

/// Media store that writes uploads to a local directory
pub struct DiskMediaStore {
    root: PathBuf,
    public_base: String,
}

impl DiskMediaStore {
    /// Create a store rooted at `root`, issuing URLs under `public_base`
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        let public_base = public_base.into().trim_end_matches('/').to_string();
        Self { root: root.into(), public_base }
    }
}

#[async_trait]
impl MediaStore for DiskMediaStore {
    async fn store(&self, category: &str, filename: &str, bytes: Vec<u8>) -> DomainResult<String> {
        let dir = self.root.join(category);
        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(filename));
        let path = dir.join(&stored_name);
        let url = format!("{}/media/{}/{}", self.public_base, category, stored_name);

        task::spawn_blocking(move || -> DomainResult<()> {
            std::fs::create_dir_all(&dir).map_err(map_io_error)?;
            std::fs::write(&path, &bytes).map_err(map_io_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)??;

        debug!(category = %category, name = %stored_name, "stored upload");
        Ok(url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Reduce a client-supplied filename to a safe single path component
fn sanitize_filename(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    if safe.trim_matches(|c| c == '.' || c == '_').is_empty() {
        "upload".to_string()
    } else {
        safe
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_io_error(err: std::io::Error) -> PortalError {
    PortalError::Upstream(format!("media store: {err}"))
}

fn map_join_error(err: task::JoinError) -> PortalError {
    PortalError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Tests
// =============================================================================
