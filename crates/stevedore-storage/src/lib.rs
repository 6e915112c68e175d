//! Object store transfer client for the stevedore artifact plugin.
//!
//! This crate performs the actual object-store interaction for one
//! publish or fetch call:
//!
//! - `resolve_source()` - expands a source pattern (file, directory, or
//!   glob) relative to the agent working directory
//! - `ObjectStore` - the trait seam over the object-store SDK
//! - `S3ObjectStore` - AWS SDK implementation, built per request from a
//!   `StoreConfig` (custom endpoint, path-style addressing, explicit or
//!   ambient credentials)
//! - `Publisher` / `Fetcher` - transfer orchestration with all-or-nothing
//!   failure semantics
//!
//! Transfers are single-pass and sequential; there is no internal retry
//! loop. One underlying request failure is one reported failure, and the
//! host decides whether to retry the whole plugin call.

pub mod error;
pub mod fetch;
pub mod paths;
pub mod publish;
pub mod resolve;
pub mod s3;
pub mod traits;

pub use error::{StorageError, TransferOperation};
pub use fetch::{FetchOutcome, Fetcher};
pub use paths::{from_posix_path, is_within_root, lexical_normalize, to_posix_path};
pub use publish::{PublishOutcome, Publisher};
pub use resolve::{resolve_source, ResolvedFile};
pub use s3::S3ObjectStore;
pub use traits::{ObjectInfo, ObjectStore};
