use chrono::{DateTime, Duration, Utc};
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem storage for uploaded documents and generated audio.
///
/// File names handed to this repository must already be sanitized.
pub struct FileRepository {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl FileRepository {
    pub fn new(upload_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            upload_dir,
            output_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create both storage areas if absent
    pub async fn ensure_directories(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        Ok(())
    }

    /// Write the uploaded bytes verbatim, replacing any same-named upload
    pub async fn save_upload(&self, file_name: &str, data: &[u8]) -> io::Result<PathBuf> {
        let path = self.upload_dir.join(file_name);
        tokio::fs::write(&path, data).await?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = data.len(),
            "Upload stored"
        );

        Ok(path)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub async fn read_output(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    /// Delete files in both areas last modified more than `max_age` ago.
    /// Returns how many files were removed; individual failures are logged and skipped.
    pub async fn sweep_expired(&self, max_age: Duration) -> usize {
        let cutoff = Utc::now() - max_age;
        let mut removed = 0;

        for dir in [&self.upload_dir, &self.output_dir] {
            match Self::sweep_dir(dir, cutoff).await {
                Ok(count) => removed += count,
                Err(e) => {
                    tracing::warn!(error = %e, dir = %dir.display(), "Failed to sweep directory");
                }
            }
        }

        removed
    }

    async fn sweep_dir(dir: &Path, cutoff: DateTime<Utc>) -> io::Result<usize> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(error = %e, path = %entry.path().display(), "Failed to stat file");
                    continue;
                }
            };

            if !metadata.is_file() {
                continue;
            }

            let modified: DateTime<Utc> = match metadata.modified() {
                Ok(modified) => modified.into(),
                Err(_) => continue,
            };

            if modified >= cutoff {
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => {
                    removed += 1;
                    tracing::debug!(path = %entry.path().display(), "Expired file removed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, path = %entry.path().display(), "Failed to remove expired file");
                }
            }
        }

        Ok(removed)
    }
}
