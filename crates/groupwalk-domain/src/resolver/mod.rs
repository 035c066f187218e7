//! Group membership resolution.
//!
//! Given a member identifier, computes every group that member belongs to,
//! directly or through nested membership, by querying a directory service
//! that answers one level of membership per paginated call.
//!
//! Three strategies, picked by [`ResolverConfig`]:
//!
//! - **direct-only**: one paginated listing, no recursion, no visited set
//! - **transitive sequential**: depth-first expansion behind a visited set
//! - **transitive concurrent**: one worker per direct group of the root,
//!   all sharing a visited set, results merged over a channel
//!
//! Real directory graphs contain cycles, diamonds and deep nesting; the
//! visited set is the sole guard that keeps traversal finite, keeps each
//! group reported once and keeps the directory from being queried twice for
//! the same group. A failed directory query anywhere aborts the whole
//! resolution; partial results are never returned.

mod concurrent;
mod config;
mod expander;
mod traits;
mod types;
mod visited;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::error::{ResolveError, ResolveResult};

pub use config::ResolverConfig;
pub use expander::GroupExpander;
pub use traits::GroupLister;
pub use types::{GroupPage, Resolution};
pub use visited::VisitedSet;

/// Resolves the full group membership of a single member.
///
/// The facade owns strategy selection and the allow-list policy; the actual
/// traversal lives in [`GroupExpander`] and the concurrent fan-out.
pub struct MembershipResolver<L> {
    lister: Arc<L>,
    config: ResolverConfig,
}

impl<L> MembershipResolver<L>
where
    L: GroupLister + 'static,
{
    /// Creates a resolver with the default configuration (direct-only,
    /// unscoped, no allow-list).
    pub fn new(lister: Arc<L>) -> Self {
        Self {
            lister,
            config: ResolverConfig::default(),
        }
    }

    /// Creates a resolver with custom configuration.
    pub fn with_config(lister: Arc<L>, config: ResolverConfig) -> Self {
        Self { lister, config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves every group `member_key` belongs to under the configured
    /// strategy, then applies the allow-list filter.
    ///
    /// Directory errors propagate unchanged. A member whose resolved groups
    /// match none of a non-empty allow-list fails with
    /// [`ResolveError::NotAuthorized`]; the unfiltered set is never exposed.
    #[instrument(skip(self), fields(member_key = %member_key, domain = %self.config.domain))]
    pub async fn resolve_groups(&self, member_key: &str) -> ResolveResult<Resolution> {
        let groups = if !self.config.transitive {
            self.expander()
                .list_direct(&self.config.domain, member_key)
                .await?
        } else if self.config.concurrent {
            concurrent::resolve_concurrent(
                Arc::clone(&self.lister),
                &self.config.domain,
                member_key,
            )
            .await?
        } else {
            self.expander()
                .expand(&self.config.domain, member_key, true)
                .await?
        };

        debug!(resolved = groups.len(), "group resolution complete");
        let groups = self.apply_allow_list(member_key, groups)?;
        Ok(Resolution { groups })
    }

    /// Builds an expander with fresh per-resolution traversal state.
    fn expander(&self) -> GroupExpander<L> {
        GroupExpander::new(
            Arc::clone(&self.lister),
            VisitedSet::new(),
            CancellationToken::new(),
        )
    }

    /// Keeps only allow-listed groups, preserving resolved order; rejects
    /// the member when the intersection is empty. An empty allow-list keeps
    /// everything.
    fn apply_allow_list(&self, member_key: &str, groups: Vec<String>) -> ResolveResult<Vec<String>> {
        if self.config.allowed_groups.is_empty() {
            return Ok(groups);
        }

        let allowed: HashSet<&str> = self
            .config
            .allowed_groups
            .iter()
            .map(String::as_str)
            .collect();
        let filtered: Vec<String> = groups
            .into_iter()
            .filter(|group| allowed.contains(group.as_str()))
            .collect();

        if filtered.is_empty() {
            return Err(ResolveError::NotAuthorized {
                member_key: member_key.to_string(),
            });
        }
        Ok(filtered)
    }
}
