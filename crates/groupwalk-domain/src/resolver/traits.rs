//! Directory access trait needed by the resolver.

use async_trait::async_trait;

use crate::error::ResolveResult;

use super::types::GroupPage;

/// Trait for directory group listing needed by the resolver.
///
/// One call answers one page of "which groups is `member_key` a direct
/// member of". Implementations live outside this crate (REST clients,
/// in-memory graphs); the resolver never sees anything else of the
/// directory.
#[async_trait]
pub trait GroupLister: Send + Sync {
    /// Lists the groups `member_key` belongs to directly, one page at a time.
    ///
    /// `domain` scopes the search to a directory partition; an empty string
    /// leaves it unscoped. `page_token` continues an earlier listing and is
    /// only meaningful for the same `(domain, member_key)` pair. A failed
    /// call is fatal to the resolution; implementations must not retry.
    async fn list_groups(
        &self,
        domain: &str,
        member_key: &str,
        page_token: Option<&str>,
    ) -> ResolveResult<GroupPage>;
}
