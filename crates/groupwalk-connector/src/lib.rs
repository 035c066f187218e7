//! groupwalk-connector: the connector-facing surface
//!
//! Wires a directory backend into the resolution engine for an identity
//! pipeline: configuration loading and validation, adapters implementing
//! the domain's `GroupLister` over the directory backends, logging
//! initialization and the outcome mapping the pipeline consumes
//! (authorized / denied / unavailable).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            groupwalk-connector              │
//! ├─────────────────────────────────────────────┤
//! │  config      - Layered YAML/env settings    │
//! │  adapters    - Directory → GroupLister      │
//! │  connector   - Outcome mapping              │
//! │  logging     - tracing initialization       │
//! └─────────────────────────────────────────────┘
//!            │                    │
//!            ▼                    ▼
//!    groupwalk-domain     groupwalk-directory
//! ```

pub mod adapters;
pub mod config;
pub mod connector;
pub mod logging;

pub use adapters::{AdminGroupLister, MemoryGroupLister};
pub use config::{ConfigError, ConnectorConfig, DirectoryConfig, ResolutionConfig};
pub use connector::{GroupConnector, ResolutionOutcome};
pub use logging::{init_logging, LoggingConfig};
