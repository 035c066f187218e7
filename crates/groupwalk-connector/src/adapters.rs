//! Adapters that bridge directory backends to the domain layer.
//!
//! The domain crate defines [`GroupLister`], the narrow seam the resolution
//! engine needs; the directory crate ships concrete backends with their own
//! page and error types. The adapters here implement the domain trait over
//! each backend, mapping pages and errors across the boundary.

use std::sync::Arc;

use async_trait::async_trait;

use groupwalk_directory::{AdminDirectory, DirectoryError, MembershipPage, MemoryDirectory};
use groupwalk_domain::error::{ResolveError, ResolveResult};
use groupwalk_domain::resolver::{GroupLister, GroupPage};

fn map_page(page: MembershipPage) -> GroupPage {
    GroupPage {
        groups: page.groups,
        next_page_token: page.next_page_token,
    }
}

fn map_error(member_key: &str, error: DirectoryError) -> ResolveError {
    ResolveError::DirectoryQuery {
        member_key: member_key.to_string(),
        message: error.to_string(),
    }
}

/// `GroupLister` over the in-memory directory.
pub struct MemoryGroupLister {
    directory: Arc<MemoryDirectory>,
}

impl MemoryGroupLister {
    /// Creates an adapter wrapping the given directory.
    pub fn new(directory: Arc<MemoryDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl GroupLister for MemoryGroupLister {
    async fn list_groups(
        &self,
        domain: &str,
        member_key: &str,
        page_token: Option<&str>,
    ) -> ResolveResult<GroupPage> {
        self.directory
            .list_groups(domain, member_key, page_token)
            .await
            .map(map_page)
            .map_err(|error| map_error(member_key, error))
    }
}

/// `GroupLister` over the Admin SDK REST backend.
pub struct AdminGroupLister {
    directory: Arc<AdminDirectory>,
}

impl AdminGroupLister {
    /// Creates an adapter wrapping the given client.
    pub fn new(directory: Arc<AdminDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl GroupLister for AdminGroupLister {
    async fn list_groups(
        &self,
        domain: &str,
        member_key: &str,
        page_token: Option<&str>,
    ) -> ResolveResult<GroupPage> {
        self.directory
            .list_groups(domain, member_key, page_token)
            .await
            .map(map_page)
            .map_err(|error| map_error(member_key, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_adapter_maps_pages() {
        let directory = Arc::new(MemoryDirectory::new().with_page_size(1));
        directory.add_membership("user@corp.test", "a@corp.test");
        directory.add_membership("user@corp.test", "b@corp.test");

        let lister = MemoryGroupLister::new(directory);
        let page = lister.list_groups("", "user@corp.test", None).await.unwrap();

        assert_eq!(page.groups, vec!["a@corp.test"]);
        assert!(
            !page.is_final(),
            "the backend's continuation token must survive the mapping"
        );
    }

    #[tokio::test]
    async fn test_memory_adapter_maps_errors_to_directory_query() {
        let directory = Arc::new(MemoryDirectory::new());
        directory.fail_listings_for("user@corp.test");

        let lister = MemoryGroupLister::new(directory);
        let result = lister.list_groups("", "user@corp.test", None).await;

        assert!(matches!(
            result,
            Err(ResolveError::DirectoryQuery { ref member_key, .. }) if member_key == "user@corp.test"
        ));
    }
}
