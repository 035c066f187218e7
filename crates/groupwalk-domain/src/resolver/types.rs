//! Types for group resolution.

/// One page of a direct-membership listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPage {
    /// Group identifiers on this page. May be empty even mid-listing.
    pub groups: Vec<String>,
    /// Cursor for the next page. `None` or empty means the listing is done.
    /// Only valid for the same `(domain, member_key)` pair that produced it.
    pub next_page_token: Option<String>,
}

impl GroupPage {
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

    /// Returns true when no further pages follow.
    pub fn is_final(&self) -> bool {
        self.next_page_token.as_deref().map_or(true, str::is_empty)
    }
}

/// Result of a group resolution.
///
/// Holds every group the member belongs to under the configured strategy,
/// after any allow-list filtering. Order carries no meaning; strategies are
/// free to report groups in traversal or completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub groups: Vec<String>,
}

impl Resolution {
    /// Returns true when the member resolved to no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the resolved groups sorted, for order-insensitive comparison.
    pub fn sorted(&self) -> Vec<String> {
        let mut groups = self.groups.clone();
        groups.sort();
        groups
    }
}
