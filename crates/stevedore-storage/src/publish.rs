//! Publish orchestration: resolve local files, upload under a
//! deterministic key prefix.

use std::path::Path;
use std::time::{Duration, Instant};

use stevedore_model::{ArtifactMetadata, ArtifactPlan};

use crate::error::StorageError;
use crate::resolve::{resolve_source, ResolvedFile};
use crate::traits::ObjectStore;

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Files uploaded.
    pub files_uploaded: usize,
    /// Wall-clock time spent on the publish.
    pub elapsed: Duration,
    /// Metadata for the host to persist and hand back on fetch.
    pub metadata: ArtifactMetadata,
}

/// Uploads one artifact plan's files. All-or-nothing: the first failing
/// upload aborts the publish and is reported with the failing key.
pub struct Publisher<'a, C: ObjectStore> {
    client: &'a C,
    bucket: String,
}

impl<'a, C: ObjectStore> Publisher<'a, C> {
    /// Create a publisher for one bucket.
    pub fn new(client: &'a C, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Publish every file matched by the plan's source pattern.
    ///
    /// Remote keys are `{destination}/{relative_path}` with the relative
    /// directory structure of the matched files preserved, or just
    /// `{relative_path}` when the plan has no destination folder.
    ///
    /// # Errors
    /// `NoMatchingFiles` when the pattern matches nothing (no upload call
    /// is made), otherwise the first resolution or upload failure.
    pub async fn publish(
        &self,
        plan: &ArtifactPlan,
        working_dir: &Path,
    ) -> Result<PublishOutcome, StorageError> {
        let started: Instant = Instant::now();

        let files: Vec<ResolvedFile> = resolve_source(working_dir, plan.source())?;
        if files.is_empty() {
            return Err(StorageError::NoMatchingFiles {
                pattern: plan.source().to_string(),
            });
        }

        let prefix: String = normalize_prefix(plan.destination().unwrap_or(""));

        for file in &files {
            let key: String = remote_key(&prefix, &file.relative_path);
            tracing::debug!(
                bucket = %self.bucket,
                key = %key,
                path = %file.path.display(),
                "uploading artifact file"
            );
            self.client
                .put_object_from_file(&self.bucket, &key, &file.path)
                .await?;
        }

        let elapsed: Duration = started.elapsed();
        tracing::info!(
            bucket = %self.bucket,
            prefix = %prefix,
            files = files.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "artifact published"
        );

        Ok(PublishOutcome {
            files_uploaded: files.len(),
            elapsed,
            metadata: ArtifactMetadata {
                source: plan.source().to_string(),
                destination: prefix,
            },
        })
    }
}

/// Strip surrounding whitespace and slashes from a destination folder.
pub(crate) fn normalize_prefix(folder: &str) -> String {
    folder.trim().trim_matches('/').to_string()
}

/// Build a remote key from a prefix and a working-relative file path.
pub(crate) fn remote_key(prefix: &str, relative_path: &str) -> String {
    if prefix.is_empty() {
        relative_path.to_string()
    } else {
        format!("{prefix}/{relative_path}")
    }
}
