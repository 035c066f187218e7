//! Connector configuration.
//!
//! Loading order, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional YAML file
//! 3. Environment variables (`GROUPWALK_` prefix, `__` nested separator)
//!
//! Environment variables win over the file, the file over defaults. For
//! example `GROUPWALK_DIRECTORY__DOMAIN=corp.example` overrides
//! `directory.domain`.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// Top-level connector configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ConnectorConfig {
    /// Directory access settings.
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Resolution strategy flags.
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// When non-empty, only these groups may appear in a resolution, and a
    /// member matching none of them is denied.
    #[serde(default)]
    pub allowed_groups: Vec<String>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Directory access settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DirectoryConfig {
    /// Directory partition every group query is scoped to. Empty leaves
    /// queries unscoped.
    #[serde(default)]
    pub domain: String,

    /// Workspace admin the service account impersonates for directory
    /// reads.
    #[serde(default)]
    pub admin_email: String,

    /// Path to the service-account credential file. Token acquisition
    /// itself happens behind the directory crate's `TokenSource`.
    #[serde(default)]
    pub service_account_file: String,

    /// Admin SDK base URL override, for tests. Empty uses the real API.
    #[serde(default)]
    pub api_base: String,
}

/// Resolution strategy flags, named as the upstream connector names them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ResolutionConfig {
    /// Follow nested group membership instead of stopping after one level.
    #[serde(default)]
    pub fetch_transitive_group_membership: bool,

    /// Fan transitive expansion out across the root's direct groups using
    /// the directory service, one worker per group. Requires
    /// `fetch_transitive_group_membership`.
    #[serde(default)]
    pub fetch_groups_with_directory_service: bool,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConnectorConfig {
    /// Loads configuration from an optional YAML file with environment
    /// overrides. With no file, defaults plus environment apply.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&ConnectorConfig::default())?);

        if let Some(path) = path {
            if !Path::new(path).exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_string(),
                });
            }
            builder = builder.add_source(File::from(Path::new(path)).format(FileFormat::Yaml));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("GROUPWALK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let connector_config: ConnectorConfig = config.try_deserialize()?;
        connector_config.validate()?;

        Ok(connector_config)
    }

    /// Validates the flag combinations a resolution cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.fetch_groups_with_directory_service
            && !self.resolution.fetch_transitive_group_membership
        {
            return Err(ConfigError::Invalid {
                message: "resolution.fetch_groups_with_directory_service requires \
                          resolution.fetch_transitive_group_membership"
                    .to_string(),
            });
        }

        if self.resolution.fetch_groups_with_directory_service && self.directory.domain.is_empty() {
            return Err(ConfigError::Invalid {
                message: "directory.domain is required when \
                          resolution.fetch_groups_with_directory_service is enabled"
                    .to_string(),
            });
        }

        if !self.directory.admin_email.is_empty() && !self.directory.admin_email.contains('@') {
            return Err(ConfigError::Invalid {
                message: format!(
                    "directory.admin_email must be an email address, got: {}",
                    self.directory.admin_email
                ),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.default_level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "logging.default_level must be one of: {:?}, got: {}",
                    valid_levels, self.logging.default_level
                ),
            });
        }

        Ok(())
    }
}
