//! Error types for group resolution.

use thiserror::Error;

/// Errors surfaced while resolving group membership.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A directory query failed. Fatal for the whole resolution; no retries.
    #[error("directory query failed for {member_key}: {message}")]
    DirectoryQuery { member_key: String, message: String },

    /// The resolution was canceled before it completed.
    #[error("group resolution canceled")]
    Canceled,

    /// The member resolved successfully but matched none of the allowed groups.
    #[error("member {member_key} is not in any of the allowed groups")]
    NotAuthorized { member_key: String },

    /// A failure outside the directory boundary, such as a worker panic.
    #[error("internal resolver error: {message}")]
    Internal { message: String },
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
