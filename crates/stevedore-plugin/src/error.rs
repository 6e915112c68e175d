//! Plugin-level error type returned to the host adapter.

use serde_json::json;
use thiserror::Error;

use stevedore_model::DecodeError;
use stevedore_storage::StorageError;

/// Failure of one plugin call. Always returned as a value; a handler
/// never panics into the host.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The host sent a message name this plugin does not handle.
    #[error("Unknown message: {name}")]
    UnknownMessage {
        /// The unrecognized name.
        name: String,
    },

    /// Malformed request body.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Transfer-level failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A response failed to serialize.
    #[error("Response serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The blocking entry point could not build its runtime.
    #[error("Runtime initialization failed: {message}")]
    Runtime {
        /// Builder diagnostic.
        message: String,
    },
}

impl PluginError {
    /// The error body handed back to the host: `{"message": ...}`.
    /// Credential values never reach the message text.
    pub fn to_response(&self) -> serde_json::Value {
        json!({ "message": self.to_string() })
    }
}
