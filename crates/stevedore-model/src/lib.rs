//! Host-protocol data model for the stevedore artifact plugin.
//!
//! This crate provides the request-scoped value objects exchanged with the
//! CD host, and the logic that operates on them:
//! - `StoreConfig` / `ArtifactPlan` - typed store configuration and
//!   artifact plan, parsed from the host's JSON configuration maps
//! - `PublishArtifactRequest` / `FetchArtifactRequest` - per-call request
//!   bodies
//! - `validate()` / `validate_field()` - per-field rule table validation
//! - `DecodeError` - distinguishable parse failure for malformed payloads
//!
//! Nothing here persists between calls; every value is parsed from one
//! inbound payload, consumed by one handler invocation, and discarded.

pub mod config;
pub mod requests;
pub mod validate;

pub use config::{ArtifactMetadata, ArtifactPlan, ArtifactPlanConfig, ArtifactStoreRef, StoreConfig};
pub use requests::{
    DecodeError, FetchArtifactRequest, FetchConfiguration, PublishArtifactRequest,
    ValidateFieldRequest,
};
pub use validate::{is_blank, validate, validate_field, ValidationError, ValidationResult};
