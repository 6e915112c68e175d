//! AWS SDK implementation of the `ObjectStore` seam.
//!
//! The client is built per request from a `StoreConfig` and discarded
//! with the call; there is no connection or credential caching across
//! requests.

use std::path::Path;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use stevedore_model::{is_blank, StoreConfig};

use crate::error::{StorageError, TransferOperation};
use crate::traits::{ObjectInfo, ObjectStore};

/// `ObjectStore` implementation using the AWS SDK for Rust.
pub struct S3ObjectStore {
    s3_client: S3Client,
}

impl S3ObjectStore {
    /// Build a client from a store configuration.
    ///
    /// - `Region` is applied when set, otherwise the ambient region
    ///   chain decides.
    /// - `EndpointURL` overrides the default regional endpoint, for
    ///   S3-compatible third-party stores.
    /// - `PathStyleAccess` forces path-style addressing instead of
    ///   virtual-hosted-style.
    /// - Explicit credentials are installed when both keys are filled,
    ///   otherwise the default credential chain applies.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, StorageError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if !is_blank(&config.region) {
            loader = loader.region(Region::new(config.region.trim().to_string()));
        }

        if !is_blank(&config.endpoint_url) {
            loader = loader.endpoint_url(config.endpoint_url.trim().to_string());
        }

        if config.has_explicit_credentials() {
            let credentials = Credentials::new(
                config.access_key.trim(),
                config.secret_key.trim(),
                None,
                None,
                "stevedore-store-config",
            );
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style_access)
            .build();

        Ok(Self {
            s3_client: S3Client::from_conf(s3_config),
        })
    }

    /// Wrap an existing SDK client (for testing).
    pub fn from_client(s3_client: S3Client) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError> {
        let body = ByteStream::from_path(file_path)
            .await
            .map_err(|e| StorageError::Io {
                path: file_path.display().to_string(),
                message: e.to_string(),
            })?;

        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|err| StorageError::Transfer {
                operation: TransferOperation::Upload,
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: err.to_string(),
                retryable: true,
            })?;

        Ok(())
    }

    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError> {
        let response = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                StorageError::Transfer {
                    operation: TransferOperation::Download,
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: service_err.to_string(),
                    retryable: !service_err.is_no_such_key(),
                }
            })?;

        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::from_io(parent.display().to_string(), e))?;
        }

        let mut file: File = File::create(file_path)
            .await
            .map_err(|e| StorageError::from_io(file_path.display().to_string(), e))?;

        let mut body = response.body;
        while let Some(chunk) = body.try_next().await.map_err(|e| StorageError::Transfer {
            operation: TransferOperation::Download,
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: e.to_string(),
            retryable: true,
        })? {
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::from_io(file_path.display().to_string(), e))?;
        }

        file.flush()
            .await
            .map_err(|e| StorageError::from_io(file_path.display().to_string(), e))?;

        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectInfo>, StorageError> {
        let mut objects: Vec<ObjectInfo> = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .s3_client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix);

            if let Some(ref token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|err| StorageError::Transfer {
                operation: TransferOperation::List,
                bucket: bucket.to_string(),
                key: prefix.to_string(),
                message: err.to_string(),
                retryable: true,
            })?;

            if let Some(ref contents) = response.contents {
                for obj in contents {
                    objects.push(ObjectInfo {
                        key: obj.key().unwrap_or_default().to_string(),
                        size: obj.size().map(|s| s as u64).unwrap_or(0),
                    });
                }
            }

            if response.is_truncated() == Some(true) {
                continuation_token = response.next_continuation_token.clone();
            } else {
                break;
            }
        }

        Ok(objects)
    }
}
