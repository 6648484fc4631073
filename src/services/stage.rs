use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;

/// An uploaded payload materialized on local disk.
///
/// The relay invocation that created it owns the file exclusively and is
/// responsible for releasing it before returning.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub local_path: PathBuf,
    pub original_name: String,
    pub mime_type: String,
}

/// On-disk staging area shared by all relays.
///
/// Staged filenames carry a millisecond timestamp plus a random suffix;
/// collisions between concurrent requests are treated as negligible and no
/// uniqueness check is performed.
#[derive(Debug, Clone)]
pub struct TempStage {
    root: PathBuf,
}

impl TempStage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the staging directory. An existing directory is not an error.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// `<original>-<millis>-<random 0..1e9>.<mime subtype>`
    pub fn unique_name(&self, original_name: &str, mime_type: &str) -> String {
        let ext = mime_type
            .parse::<mime::Mime>()
            .map(|m| m.subtype().as_str().to_string())
            .unwrap_or_else(|_| "bin".to_string());
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        format!(
            "{}-{}-{}.{}",
            original_name,
            Utc::now().timestamp_millis(),
            suffix,
            ext
        )
    }

    /// Writes the payload under a unique name inside the staging root.
    pub async fn persist(
        &self,
        original_name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> std::io::Result<StagedFile> {
        self.ensure_root().await?;
        let local_path = self.root.join(self.unique_name(original_name, mime_type));
        fs::write(&local_path, bytes).await?;
        Ok(StagedFile {
            local_path,
            original_name: original_name.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// Deletes a staged file. Releasing an already-removed path surfaces the
    /// I/O error; callers must not let that override the primary outcome.
    pub async fn release(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_file(path).await
    }

    /// Writes a retrieved object under the staging root at `<root>/<name>`,
    /// overwriting any existing copy. Keys may contain `/`, so parent
    /// directories are created as needed.
    pub async fn save_as(&self, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_shape() {
        let stage = TempStage::new("uploads");
        let name = stage.unique_name("cat.png", "image/png");
        assert!(name.starts_with("cat.png-"));
        assert!(name.ends_with(".png"));
        // original name, millis, random suffix
        assert_eq!(name.trim_end_matches(".png").split('-').count(), 3);
    }

    #[test]
    fn test_unique_name_falls_back_for_bad_mime() {
        let stage = TempStage::new("uploads");
        let name = stage.unique_name("blob", "not a mime type");
        assert!(name.ends_with(".bin"));
    }

    #[tokio::test]
    async fn test_persist_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let stage = TempStage::new(dir.path());

        let staged = stage
            .persist("cat.png", "image/png", b"meow")
            .await
            .unwrap();
        assert_eq!(fs::read(&staged.local_path).await.unwrap(), b"meow");
        assert_eq!(staged.original_name, "cat.png");
        assert_eq!(staged.mime_type, "image/png");

        stage.release(&staged.local_path).await.unwrap();
        assert!(!staged.local_path.exists());

        // a second release surfaces the I/O error
        assert!(stage.release(&staged.local_path).await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_root_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let stage = TempStage::new(dir.path().join("uploads"));
        stage.ensure_root().await.unwrap();
        stage.ensure_root().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_as_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let stage = TempStage::new(dir.path());

        let path = stage.save_as("images/cat.png", b"v1").await.unwrap();
        assert_eq!(fs::read(&path).await.unwrap(), b"v1");

        let path = stage.save_as("images/cat.png", b"v2").await.unwrap();
        assert_eq!(fs::read(&path).await.unwrap(), b"v2");
    }
}
