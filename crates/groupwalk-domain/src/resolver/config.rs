//! Configuration for the membership resolver.

/// Configuration for the membership resolver.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Directory partition every query is scoped to. Empty leaves queries
    /// unscoped.
    pub domain: String,
    /// Follow nested group membership instead of stopping after one level.
    pub transitive: bool,
    /// Fan transitive expansion out across the root's direct groups, one
    /// worker per group. Ignored unless `transitive` is set.
    pub concurrent: bool,
    /// When non-empty, only these groups may appear in a resolution, and a
    /// member matching none of them is rejected.
    pub allowed_groups: Vec<String>,
}

impl ResolverConfig {
    /// Creates a configuration with direct-only resolution and no filtering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scopes directory queries to the given partition.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Enables or disables transitive expansion.
    pub fn with_transitive(mut self, transitive: bool) -> Self {
        self.transitive = transitive;
        self
    }

    /// Enables or disables concurrent fan-out for transitive expansion.
    pub fn with_concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Restricts resolutions to the given groups.
    pub fn with_allowed_groups(mut self, groups: Vec<String>) -> Self {
        self.allowed_groups = groups;
        self
    }
}
