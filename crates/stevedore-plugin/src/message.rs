//! The host's message names, as a closed enum.
//!
//! Dispatch is a static mapping from message name to handler; an
//! unrecognized name is rejected up front rather than falling through a
//! dynamic lookup.

/// Core plugin messages. Host registration and view messages are handled
/// by the host adapter, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Validate a full artifact store configuration.
    ValidateStoreConfig,
    /// Validate a single configuration field being edited.
    ValidateField,
    /// Publish an artifact plan's files to the store.
    PublishArtifact,
    /// Fetch a published artifact into the agent working directory.
    FetchArtifact,
}

impl Message {
    /// Resolve a host message name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "validate-artifact-store-config" => Some(Self::ValidateStoreConfig),
            "validate-field" => Some(Self::ValidateField),
            "publish-artifact" => Some(Self::PublishArtifact),
            "fetch-artifact" => Some(Self::FetchArtifact),
            _ => None,
        }
    }

    /// The wire name of this message.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidateStoreConfig => "validate-artifact-store-config",
            Self::ValidateField => "validate-field",
            Self::PublishArtifact => "publish-artifact",
            Self::FetchArtifact => "fetch-artifact",
        }
    }
}
