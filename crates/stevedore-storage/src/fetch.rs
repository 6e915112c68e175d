//! Fetch orchestration: list the artifact's stored prefix, download into
//! the destination directory.

use std::path::Path;
use std::time::{Duration, Instant};

use stevedore_model::ArtifactMetadata;

use crate::error::StorageError;
use crate::paths::{from_posix_path, is_within_root};
use crate::publish::normalize_prefix;
use crate::traits::{ObjectInfo, ObjectStore};

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Files downloaded.
    pub files_downloaded: usize,
    /// Wall-clock time spent on the fetch.
    pub elapsed: Duration,
}

/// Downloads a published artifact's files. Fails fast on the first
/// transport error.
pub struct Fetcher<'a, C: ObjectStore> {
    client: &'a C,
    bucket: String,
}

impl<'a, C: ObjectStore> Fetcher<'a, C> {
    /// Create a fetcher for one bucket.
    pub fn new(client: &'a C, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Download every object under the artifact's stored prefix into
    /// `destination_dir`, preserving relative structure.
    ///
    /// # Errors
    /// `ArtifactNotFound` when the prefix holds no objects; a
    /// `PathOutsideRoot` error when a key would escape the destination
    /// directory; otherwise the first listing or download failure.
    pub async fn fetch(
        &self,
        metadata: &ArtifactMetadata,
        destination_dir: &Path,
    ) -> Result<FetchOutcome, StorageError> {
        let started: Instant = Instant::now();

        let prefix: String = normalize_prefix(&metadata.destination);
        let list_prefix: String = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}/")
        };

        let objects: Vec<ObjectInfo> =
            self.client.list_objects(&self.bucket, &list_prefix).await?;

        let mut downloaded: usize = 0;
        for obj in &objects {
            let suffix: &str = obj.key.strip_prefix(&list_prefix).unwrap_or(&obj.key);
            // Folder marker objects carry no file content.
            if suffix.is_empty() || suffix.ends_with('/') {
                continue;
            }

            let local = from_posix_path(suffix, destination_dir);
            if !is_within_root(&local, destination_dir) {
                return Err(StorageError::PathOutsideRoot {
                    path: local.display().to_string(),
                    root: destination_dir.display().to_string(),
                });
            }

            tracing::debug!(
                bucket = %self.bucket,
                key = %obj.key,
                path = %local.display(),
                "downloading artifact file"
            );
            self.client
                .get_object_to_file(&self.bucket, &obj.key, &local)
                .await?;
            downloaded += 1;
        }

        if downloaded == 0 {
            return Err(StorageError::ArtifactNotFound {
                bucket: self.bucket.clone(),
                prefix,
            });
        }

        let elapsed: Duration = started.elapsed();
        tracing::info!(
            bucket = %self.bucket,
            prefix = %prefix,
            files = downloaded,
            elapsed_ms = elapsed.as_millis() as u64,
            "artifact fetched"
        );

        Ok(FetchOutcome {
            files_downloaded: downloaded,
            elapsed,
        })
    }
}
