//! Sequential depth-first group expansion.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::{ResolveError, ResolveResult};

use super::traits::GroupLister;
use super::visited::VisitedSet;

/// Type alias for boxed future to handle async recursion.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Depth-first expansion of one member's group membership.
///
/// Carries the per-resolution traversal state: the shared visited set and
/// the cancellation token. Clones share both, so concurrent workers built
/// from the same expander observe a single traversal.
pub struct GroupExpander<L> {
    lister: Arc<L>,
    visited: VisitedSet,
    cancel: CancellationToken,
}

impl<L> Clone for GroupExpander<L> {
    fn clone(&self) -> Self {
        Self {
            lister: Arc::clone(&self.lister),
            visited: self.visited.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl<L> GroupExpander<L>
where
    L: GroupLister,
{
    /// Creates an expander over the given lister and traversal state.
    pub fn new(lister: Arc<L>, visited: VisitedSet, cancel: CancellationToken) -> Self {
        Self {
            lister,
            visited,
            cancel,
        }
    }

    /// Returns the shared visited set.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Expands the groups `member_key` belongs to (boxed for recursion).
    ///
    /// Pages through the member's direct groups; each newly discovered group
    /// is claimed in the visited set, appended to the output and, when
    /// `transitive` is set, recursed into with its own results appended
    /// right after it. A group already claimed is skipped entirely. With
    /// `transitive` unset this performs exactly one level of expansion.
    ///
    /// Any directory error aborts the expansion immediately; the caller
    /// never sees what was accumulated before the failure. Cancellation is
    /// observed between pages and between recursions.
    pub fn expand<'a>(
        &'a self,
        domain: &'a str,
        member_key: &'a str,
        transitive: bool,
    ) -> BoxFuture<'a, ResolveResult<Vec<String>>> {
        Box::pin(async move {
            let mut discovered = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                if self.cancel.is_cancelled() {
                    return Err(ResolveError::Canceled);
                }

                let page = self
                    .lister
                    .list_groups(domain, member_key, page_token.as_deref())
                    .await?;
                let last_page = page.is_final();

                for group in page.groups {
                    if self.visited.check_and_insert(&group) {
                        continue;
                    }
                    if transitive {
                        discovered.push(group.clone());
                        let nested = self.expand(domain, &group, true).await?;
                        discovered.extend(nested);
                    } else {
                        discovered.push(group);
                    }
                }

                // An empty page does not end the listing; only the token does.
                if last_page {
                    break;
                }
                page_token = page.next_page_token;
            }

            Ok(discovered)
        })
    }

    /// Pages through the direct groups of `member_key` with no visited-set
    /// involvement. Used by the direct-only strategy and for fan-out seeds.
    pub async fn list_direct(&self, domain: &str, member_key: &str) -> ResolveResult<Vec<String>> {
        let mut groups = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            if self.cancel.is_cancelled() {
                return Err(ResolveError::Canceled);
            }

            let page = self
                .lister
                .list_groups(domain, member_key, page_token.as_deref())
                .await?;
            let last_page = page.is_final();
            groups.extend(page.groups);

            if last_page {
                break;
            }
            page_token = page.next_page_token;
        }

        Ok(groups)
    }
}
