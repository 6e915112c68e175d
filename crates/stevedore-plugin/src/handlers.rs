//! One handler per plugin message.
//!
//! Handlers parse the request body, run the operation, and serialize the
//! response shape the host expects. Every resource they touch (SDK
//! client, file handles) is request-scoped and dropped before returning.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use stevedore_model::{
    is_blank, validate, validate_field, FetchArtifactRequest, PublishArtifactRequest, StoreConfig,
    ValidateFieldRequest, ValidationResult,
};
use stevedore_storage::{Fetcher, Publisher, S3ObjectStore, StorageError};

use crate::error::PluginError;
use crate::message::Message;

/// Route one message to its handler.
pub async fn dispatch(message: Message, body: &str) -> Result<Value, PluginError> {
    match message {
        Message::ValidateStoreConfig => validate_store_config(body),
        Message::ValidateField => validate_single_field(body),
        Message::PublishArtifact => publish_artifact(body).await,
        Message::FetchArtifact => fetch_artifact(body).await,
    }
}

fn validate_store_config(body: &str) -> Result<Value, PluginError> {
    let config: StoreConfig = StoreConfig::from_json(body)?;
    let result: ValidationResult = validate(&config);
    Ok(serde_json::to_value(&result)?)
}

fn validate_single_field(body: &str) -> Result<Value, PluginError> {
    let request: ValidateFieldRequest = ValidateFieldRequest::from_json(body)?;
    let result: ValidationResult = validate_field(&request.key, &request.value);
    Ok(serde_json::to_value(&result)?)
}

async fn publish_artifact(body: &str) -> Result<Value, PluginError> {
    let request: PublishArtifactRequest = PublishArtifactRequest::from_json(body)?;
    let config: &StoreConfig = &request.store.configuration;
    ensure_bucket(config)?;

    tracing::info!(
        store = %request.store.id,
        plan = %request.plan.id,
        source = %request.plan.source(),
        "publishing artifact"
    );

    let store: S3ObjectStore = S3ObjectStore::from_config(config).await?;
    let publisher = Publisher::new(&store, config.bucket.trim());
    let outcome = publisher
        .publish(&request.plan, Path::new(&request.working_directory))
        .await?;

    Ok(json!({ "metadata": serde_json::to_value(&outcome.metadata)? }))
}

async fn fetch_artifact(body: &str) -> Result<Value, PluginError> {
    let request: FetchArtifactRequest = FetchArtifactRequest::from_json(body)?;
    ensure_bucket(&request.store)?;

    tracing::info!(
        prefix = %request.metadata.destination,
        "fetching artifact"
    );

    let destination: PathBuf = destination_dir(&request);
    let store: S3ObjectStore = S3ObjectStore::from_config(&request.store).await?;
    let fetcher = Fetcher::new(&store, request.store.bucket.trim());
    fetcher.fetch(&request.metadata, &destination).await?;

    Ok(json!({}))
}

/// Local download directory: the working directory itself, or the fetch
/// configuration's sub-directory under it.
fn destination_dir(request: &FetchArtifactRequest) -> PathBuf {
    let working: &Path = Path::new(&request.working_directory);
    if is_blank(&request.fetch.destination) {
        working.to_path_buf()
    } else {
        working.join(request.fetch.destination.trim())
    }
}

/// A transfer cannot start without a bucket. Validation reports this to
/// the UI; this guard covers hosts that publish anyway.
fn ensure_bucket(config: &StoreConfig) -> Result<(), PluginError> {
    if is_blank(&config.bucket) {
        return Err(StorageError::InvalidConfig {
            message: "S3Bucket must not be blank".into(),
        }
        .into());
    }
    Ok(())
}
