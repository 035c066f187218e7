//! groupwalk-domain: group-membership resolution engine
//!
//! Computes the set of groups a member belongs to, directly or through
//! nested membership, against a directory service that answers one level
//! of membership per paginated call. This crate contains:
//! - The directory access trait the engine depends on
//! - A shared visited set for cycle and duplicate control
//! - A sequential depth-first expander
//! - A concurrent fan-out resolver with shared visited state
//! - A resolution facade with allow-list filtering
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              groupwalk-domain               │
//! ├─────────────────────────────────────────────┤
//! │  resolver/   - Expansion engine & facade    │
//! │  error       - Resolution error types       │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod resolver;

// Re-export commonly used types at the crate root
pub use error::{ResolveError, ResolveResult};
pub use resolver::{
    GroupLister, GroupPage, MembershipResolver, Resolution, ResolverConfig, VisitedSet,
};
