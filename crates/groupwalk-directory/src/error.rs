//! Directory backend error types.

use thiserror::Error;

/// Errors raised by directory backends.
///
/// Backends never retry; any of these fails the listing that observed it.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory API answered with a non-success status.
    #[error("directory api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced an answer (connect, timeout, TLS).
    #[error("directory transport error: {message}")]
    Http { message: String },

    /// The answer arrived but could not be decoded.
    #[error("invalid directory response: {message}")]
    InvalidResponse { message: String },

    /// A page token that this directory never issued.
    #[error("invalid page token: {token}")]
    InvalidPageToken { token: String },

    /// Bearer-token acquisition failed.
    #[error("token source error: {message}")]
    Token { message: String },

    /// The directory has no such member.
    #[error("member not found: {member_key}")]
    MemberNotFound { member_key: String },
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
