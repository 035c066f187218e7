//! Identity-pipeline outcome mapping.
//!
//! [`GroupConnector`] runs the domain facade over a configured backend and
//! translates its results into the three outcomes an identity pipeline
//! acts on. A member matching none of the allowed groups is denied; an
//! infrastructure fault is unavailable, distinct from denial so the
//! pipeline can surface a retryable failure instead of rejecting the user.

use std::sync::Arc;

use tracing::{info, warn};

use groupwalk_domain::error::ResolveError;
use groupwalk_domain::resolver::{GroupLister, MembershipResolver, ResolverConfig};

use crate::config::ConnectorConfig;

/// What a resolution means to the identity pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Resolution succeeded; these groups go on the identity.
    Authorized { groups: Vec<String> },
    /// The member is not in any allowed group. An authorization fact, not
    /// a fault.
    Denied { reason: String },
    /// The directory could not be consulted; retrying may succeed.
    Unavailable { message: String },
}

/// Connector binding a directory backend to the resolution engine.
pub struct GroupConnector<L> {
    resolver: MembershipResolver<L>,
}

impl<L> GroupConnector<L>
where
    L: GroupLister + 'static,
{
    /// Builds a connector over `lister` with the strategy, scoping and
    /// allow-list taken from `config`.
    pub fn new(lister: Arc<L>, config: &ConnectorConfig) -> Self {
        let resolver_config = ResolverConfig::new()
            .with_domain(config.directory.domain.clone())
            .with_transitive(config.resolution.fetch_transitive_group_membership)
            .with_concurrent(config.resolution.fetch_groups_with_directory_service)
            .with_allowed_groups(config.allowed_groups.clone());

        Self {
            resolver: MembershipResolver::with_config(lister, resolver_config),
        }
    }

    /// Resolves `member_key` and maps the result onto a pipeline outcome.
    pub async fn resolve(&self, member_key: &str) -> ResolutionOutcome {
        match self.resolver.resolve_groups(member_key).await {
            Ok(resolution) => {
                info!(
                    member_key,
                    groups = resolution.groups.len(),
                    "member authorized"
                );
                ResolutionOutcome::Authorized {
                    groups: resolution.groups,
                }
            }
            Err(error @ ResolveError::NotAuthorized { .. }) => {
                info!(member_key, "member denied");
                ResolutionOutcome::Denied {
                    reason: error.to_string(),
                }
            }
            Err(error) => {
                warn!(member_key, %error, "group resolution unavailable");
                ResolutionOutcome::Unavailable {
                    message: error.to_string(),
                }
            }
        }
    }
}
