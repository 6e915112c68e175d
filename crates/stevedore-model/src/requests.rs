//! Inbound request bodies and the codec around them.
//!
//! Each request type parses from one host JSON payload. A malformed payload
//! surfaces as a `DecodeError` naming the payload kind so the outer router
//! can turn it into a protocol-level error response instead of crashing.

use serde::Deserialize;
use thiserror::Error;

use crate::config::{ArtifactMetadata, ArtifactPlan, ArtifactStoreRef, StoreConfig};

/// Malformed inbound JSON.
#[derive(Debug, Error)]
#[error("Malformed {payload} payload: {message}")]
pub struct DecodeError {
    /// Which payload kind failed to parse.
    pub payload: &'static str,
    /// Underlying parse failure.
    pub message: String,
}

impl DecodeError {
    fn new(payload: &'static str, err: serde_json::Error) -> Self {
        Self {
            payload,
            message: err.to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse a store configuration from the host's flat configuration map.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|e| DecodeError::new("store configuration", e))
    }

    /// Serialize back to the host's flat configuration map.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Request body of the publish-artifact message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishArtifactRequest {
    /// The artifact plan being published.
    #[serde(rename = "artifact_plan")]
    pub plan: ArtifactPlan,

    /// The store to publish into, with its resolved configuration.
    #[serde(rename = "artifact_store")]
    pub store: ArtifactStoreRef,

    /// Build agent working directory the source pattern is relative to.
    #[serde(rename = "agent_working_directory")]
    pub working_directory: String,
}

impl PublishArtifactRequest {
    /// Parse a publish request body.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|e| DecodeError::new("publish-artifact request", e))
    }
}

/// Request body of the fetch-artifact message. The metadata is whatever
/// the plugin returned from the matching publish, persisted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchArtifactRequest {
    /// Metadata returned by the original publish.
    #[serde(rename = "artifact_metadata")]
    pub metadata: ArtifactMetadata,

    /// Store configuration, supplied anew for this call.
    #[serde(rename = "store_configuration")]
    pub store: StoreConfig,

    /// Fetch-side configuration map.
    #[serde(rename = "fetch_artifact_configuration", default)]
    pub fetch: FetchConfiguration,

    /// Build agent working directory to download into.
    #[serde(rename = "agent_working_directory")]
    pub working_directory: String,
}

impl FetchArtifactRequest {
    /// Parse a fetch request body.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|e| DecodeError::new("fetch-artifact request", e))
    }
}

/// Configuration map of a fetch task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FetchConfiguration {
    /// Local sub-directory under the agent working directory to download
    /// into. Blank = the working directory itself.
    #[serde(rename = "Destination", default)]
    pub destination: String,
}

/// Request body of the validate-field message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateFieldRequest {
    /// Wire name of the field being edited.
    pub key: String,
    /// Current field value. Missing = blank.
    #[serde(default)]
    pub value: String,
}

impl ValidateFieldRequest {
    /// Parse a validate-field request body.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|e| DecodeError::new("validate-field request", e))
    }
}
