//! groupwalk-directory: directory-service backends
//!
//! Answers one question, one page at a time: which groups is a member a
//! direct member of. Two backends share the same inherent API:
//! - [`MemoryDirectory`]: a concurrent in-memory membership graph for tests
//!   and embedding
//! - [`AdminDirectory`]: a REST client for an Admin SDK style
//!   `groups.list` endpoint, with bearer tokens supplied by a
//!   [`TokenSource`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            groupwalk-directory              │
//! ├─────────────────────────────────────────────┤
//! │  memory      - In-memory membership graph   │
//! │  rest        - Admin SDK REST client        │
//! │  error       - Directory error types        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The resolution engine lives in `groupwalk-domain`; the connector crate
//! adapts these backends onto its `GroupLister` trait.

pub mod error;
pub mod memory;
pub mod rest;

pub use error::{DirectoryError, DirectoryResult};
pub use memory::MemoryDirectory;
pub use rest::{AdminDirectory, AdminDirectoryConfig, StaticTokenSource, TokenSource};

/// One page of a direct-membership listing as a backend serves it.
///
/// `next_page_token: None` means the listing is done; a present token must
/// be fed back to the same backend with the same `(domain, member_key)`
/// arguments. A page may be empty while a token continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPage {
    pub groups: Vec<String>,
    pub next_page_token: Option<String>,
}

impl MembershipPage {
    /// Creates a final page with no continuation.
    pub fn new(groups: Vec<String>) -> Self {
        Self {
            groups,
            next_page_token: None,
        }
    }

    /// Creates a page that continues with the given token.
    pub fn with_token(groups: Vec<String>, token: impl Into<String>) -> Self {
        Self {
            groups,
            next_page_token: Some(token.into()),
        }
    }
}
