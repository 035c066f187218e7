//! In-memory directory backend.
//!
//! A concurrent membership graph for tests and embedding. Listings are
//! served in insertion order with offset-encoded page tokens, so paginated
//! traversal can be exercised without a real directory.

use dashmap::{DashMap, DashSet};

use crate::error::{DirectoryError, DirectoryResult};
use crate::MembershipPage;

/// In-memory implementation of a membership directory.
///
/// # Performance Characteristics
///
/// - **Add membership**: O(1) average (DashMap entry)
/// - **List groups**: O(G) where G is the member's direct group count
///   (snapshot + offset slice)
///
/// Uses DashMap for thread-safe concurrent access without locks; a listing
/// snapshots the member's groups, so concurrent mutation never tears a page.
#[derive(Debug)]
pub struct MemoryDirectory {
    memberships: DashMap<String, Vec<String>>,
    failing: DashSet<String>,
    page_size: usize,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self {
            memberships: DashMap::new(),
            failing: DashSet::new(),
            page_size: usize::MAX,
        }
    }
}

impl MemoryDirectory {
    /// Creates an empty directory serving unpaginated listings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves listings in pages of at most `page_size` groups.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Records that `member` is a direct member of `group`. Adding the same
    /// edge twice is a no-op.
    pub fn add_membership(&self, member: &str, group: &str) {
        let mut groups = self.memberships.entry(member.to_string()).or_default();
        if !groups.iter().any(|existing| existing == group) {
            groups.push(group.to_string());
        }
    }

    /// Scripts every listing for `member` to fail, for failure-path tests.
    pub fn fail_listings_for(&self, member: &str) {
        self.failing.insert(member.to_string());
    }

    /// Lists the groups `member_key` belongs to directly, one page at a
    /// time.
    ///
    /// A non-empty `domain` keeps only groups addressed under it
    /// (`...@domain`), mirroring the Admin SDK's domain filter. An unknown
    /// member has no groups; that is an empty final page, not an error.
    pub async fn list_groups(
        &self,
        domain: &str,
        member_key: &str,
        page_token: Option<&str>,
    ) -> DirectoryResult<MembershipPage> {
        if self.failing.contains(member_key) {
            return Err(DirectoryError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            });
        }

        let groups: Vec<String> = self
            .memberships
            .get(member_key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
            .into_iter()
            .filter(|group| domain.is_empty() || group.ends_with(&format!("@{domain}")))
            .collect();

        let offset = parse_page_token(page_token)?;
        let page: Vec<String> = groups
            .iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();
        let next_offset = offset + page.len();

        if next_offset < groups.len() {
            Ok(MembershipPage::with_token(page, next_offset.to_string()))
        } else {
            Ok(MembershipPage::new(page))
        }
    }
}

/// Decodes an offset-encoded page token. Absent or empty means the first
/// page.
fn parse_page_token(page_token: Option<&str>) -> DirectoryResult<usize> {
    match page_token {
        None => Ok(0),
        Some("") => Ok(0),
        Some(token) => token.parse().map_err(|_| DirectoryError::InvalidPageToken {
            token: token.to_string(),
        }),
    }
}
