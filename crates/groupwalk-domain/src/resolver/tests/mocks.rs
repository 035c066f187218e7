//! Mock implementations for resolver testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{GroupLister, GroupPage, MembershipResolver, ResolverConfig};

/// Mock directory for testing.
///
/// Memberships are scripted per member key and served in insertion order,
/// split into pages of `page_size`. Listings can be scripted to fail per
/// member key; every page served counts one call.
pub struct MockDirectory {
    memberships: RwLock<HashMap<String, Vec<String>>>,
    failing: RwLock<HashSet<String>>,
    page_size: usize,
    calls: AtomicUsize,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self {
            memberships: RwLock::new(HashMap::new()),
            failing: RwLock::new(HashSet::new()),
            page_size: usize::MAX,
            calls: AtomicUsize::new(0),
        }
    }

    /// Serves listings in pages of at most `page_size` groups. A page must
    /// hold at least one group or the offset token would never advance.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Records that `member` belongs directly to `group`.
    pub async fn add_membership(&self, member: &str, group: &str) {
        self.memberships
            .write()
            .await
            .entry(member.to_string())
            .or_default()
            .push(group.to_string());
    }

    /// Scripts every listing for `member` to fail.
    pub async fn fail_listings_for(&self, member: &str) {
        self.failing.write().await.insert(member.to_string());
    }

    /// Number of list calls served so far (pages count individually).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GroupLister for MockDirectory {
    async fn list_groups(
        &self,
        _domain: &str,
        member_key: &str,
        page_token: Option<&str>,
    ) -> ResolveResult<GroupPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.read().await.contains(member_key) {
            return Err(ResolveError::DirectoryQuery {
                member_key: member_key.to_string(),
                message: "scripted failure".to_string(),
            });
        }

        let groups = self
            .memberships
            .read()
            .await
            .get(member_key)
            .cloned()
            .unwrap_or_default();

        let offset: usize = match page_token {
            Some(token) => token.parse().unwrap_or(0),
            None => 0,
        };
        let page: Vec<String> = groups
            .iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();
        let next_offset = offset + page.len();

        if next_offset < groups.len() {
            Ok(GroupPage::with_token(page, next_offset.to_string()))
        } else {
            Ok(GroupPage::new(page))
        }
    }
}

/// Helper to create a resolver over a fresh mock directory.
#[allow(dead_code)]
pub fn create_resolver(
    config: ResolverConfig,
) -> (Arc<MockDirectory>, MembershipResolver<MockDirectory>) {
    let directory = Arc::new(MockDirectory::new());
    let resolver = MembershipResolver::with_config(Arc::clone(&directory), config);
    (directory, resolver)
}
