use crate::services::key;
use crate::services::stage::TempStage;
use crate::services::store::{ObjectStore, StoreError, Visibility};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("staging failed: {0}")]
    Stage(#[from] std::io::Error),

    #[error("no such object key: {0}")]
    NotFound(String),

    #[error("object key already exists: {0}")]
    KeyExists(String),

    #[error("remote store failure: {0}")]
    Remote(StoreError),
}

impl From<StoreError> for RelayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => RelayError::NotFound(key),
            other => RelayError::Remote(other),
        }
    }
}

/// An inbound upload as handed over by the HTTP boundary.
#[derive(Debug)]
pub struct IncomingFile {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Orchestrates staging, key resolution and the remote store for the three
/// end-to-end request flows. The store is injected so tests can substitute
/// a stand-in.
pub struct RelayService {
    store: Arc<dyn ObjectStore>,
    stage: TempStage,
    allow_overwrite: bool,
}

impl RelayService {
    pub fn new(store: Arc<dyn ObjectStore>, stage: TempStage, allow_overwrite: bool) -> Self {
        Self {
            store,
            stage,
            allow_overwrite,
        }
    }

    /// Stages the payload, derives the object key from the optional path
    /// hint, and forwards the staged bytes to the remote store with public
    /// visibility.
    ///
    /// Once staging succeeds this invocation owns the staged file; it is
    /// released on every exit path, and a release failure is logged without
    /// changing the outcome. A staging failure is terminal and leaves
    /// nothing to clean up.
    pub async fn upload(
        &self,
        file: IncomingFile,
        path_hint: Option<&str>,
    ) -> Result<String, RelayError> {
        let staged = self
            .stage
            .persist(&file.original_name, &file.mime_type, &file.bytes)
            .await?;
        let object_key = key::resolve(path_hint, &staged.original_name);

        let outcome = self.forward(&object_key, &staged.local_path).await;

        if let Err(err) = self.stage.release(&staged.local_path).await {
            warn!(
                "failed to release staged file {}: {}",
                staged.local_path.display(),
                err
            );
        }

        match outcome {
            Ok(()) => {
                info!("uploaded {} as {}", staged.original_name, object_key);
                Ok(object_key)
            }
            Err(err) => {
                error!("upload of {} failed: {}", staged.original_name, err);
                Err(err)
            }
        }
    }

    async fn forward(&self, object_key: &str, staged_path: &Path) -> Result<(), RelayError> {
        if !self.allow_overwrite && self.store.exists(object_key).await? {
            return Err(RelayError::KeyExists(object_key.to_string()));
        }
        let payload = tokio::fs::read(staged_path).await?;
        self.store
            .put(object_key, payload, Visibility::Public)
            .await?;
        Ok(())
    }

    /// Fetches an object by key and writes it back under the staging root.
    /// The local copy is kept around; only failures are reported to the
    /// caller.
    pub async fn retrieve(&self, object_key: &str) -> Result<PathBuf, RelayError> {
        let bytes = self.store.get(object_key).await?;
        let path = self.stage.save_as(object_key, &bytes).await?;
        info!("retrieved {} to {}", object_key, path.display());
        Ok(path)
    }

    pub async fn delete(&self, object_key: &str) -> Result<(), RelayError> {
        self.store.delete(object_key).await?;
        info!("deleted {}", object_key);
        Ok(())
    }
}
