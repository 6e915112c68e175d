//! Error types for transfer operations.

use thiserror::Error;

/// Which object-store operation a transfer error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOperation {
    /// Uploading an object.
    Upload,
    /// Downloading an object.
    Download,
    /// Listing objects under a prefix.
    List,
}

impl std::fmt::Display for TransferOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &str = match self {
            TransferOperation::Upload => "Upload",
            TransferOperation::Download => "Download",
            TransferOperation::List => "List",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while publishing or fetching artifacts.
///
/// Messages carry bucket, key and operation context for diagnosis but
/// never credential values.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// The source pattern matched no local files. A plan that produces
    /// nothing is a misconfiguration the user must see, not a no-op.
    #[error("Source {pattern} matched no files in the working directory")]
    NoMatchingFiles {
        /// The offending source pattern.
        pattern: String,
    },

    /// The artifact's stored prefix holds no objects.
    #[error("No artifacts found under s3://{bucket}/{prefix}")]
    ArtifactNotFound {
        /// Bucket that was listed.
        bucket: String,
        /// Prefix that matched nothing.
        prefix: String,
    },

    /// Underlying transport or object-store failure.
    #[error("{operation} failed for s3://{bucket}/{key}: {message}")]
    Transfer {
        /// Operation that failed.
        operation: TransferOperation,
        /// Bucket involved.
        bucket: String,
        /// Object key or prefix involved.
        key: String,
        /// Message from the underlying SDK/transport.
        message: String,
        /// Whether the host could reasonably retry the whole call.
        retryable: bool,
    },

    /// Local I/O error.
    #[error("I/O error for {path}: {message}")]
    Io {
        /// Path where the error occurred.
        path: String,
        /// Error message.
        message: String,
    },

    /// The source pattern is not a valid glob.
    #[error("Invalid source pattern {pattern}: {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A path resolved outside its expected root directory.
    #[error("Path is outside root: {path} not in {root}")]
    PathOutsideRoot {
        /// The escaping path.
        path: String,
        /// The root it should be within.
        root: String,
    },

    /// The store configuration cannot be used for a transfer.
    #[error("Invalid store configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },
}

impl StorageError {
    /// Create an `Io` error from a `std::io::Error`.
    pub fn from_io(path: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Whether retrying the whole plugin call could succeed. The plugin
    /// itself never retries; the host owns that decision.
    pub fn is_retryable(&self) -> bool {
        match self {
            StorageError::Transfer { retryable, .. } => *retryable,
            StorageError::NoMatchingFiles { .. } => false,
            StorageError::ArtifactNotFound { .. } => false,
            StorageError::Io { .. } => false,
            StorageError::InvalidPattern { .. } => false,
            StorageError::PathOutsideRoot { .. } => false,
            StorageError::InvalidConfig { .. } => false,
        }
    }
}
