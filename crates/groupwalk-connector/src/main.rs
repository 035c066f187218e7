//! groupwalk demo binary
//!
//! Resolves one member's groups against a configured directory and prints
//! the outcome.
//!
//! ```bash
//! # In-memory demo graph
//! groupwalk-connector user@corp.example
//!
//! # Against a real Admin SDK endpoint
//! GROUPWALK_BEARER_TOKEN=ya29... groupwalk-connector \
//!     --config groupwalk.yaml user@corp.example
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use groupwalk_connector::{
    init_logging, AdminGroupLister, ConnectorConfig, GroupConnector, MemoryGroupLister,
    ResolutionOutcome,
};
use groupwalk_directory::{AdminDirectory, AdminDirectoryConfig, MemoryDirectory, StaticTokenSource};

/// Resolve a member's transitive group membership.
#[derive(Parser, Debug)]
#[command(name = "groupwalk", version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,

    /// Member to resolve (user or group key)
    member_key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ConnectorConfig::load(args.config.as_deref())?;
    init_logging(&config.logging);

    let outcome = match std::env::var("GROUPWALK_BEARER_TOKEN") {
        Ok(token) => {
            info!("using admin sdk directory backend");
            let mut directory_config = AdminDirectoryConfig::default();
            if !config.directory.api_base.is_empty() {
                directory_config.api_base = config.directory.api_base.clone();
            }
            let directory = AdminDirectory::with_config(
                Arc::new(StaticTokenSource::new(token)),
                directory_config,
            )?;
            let connector =
                GroupConnector::new(Arc::new(AdminGroupLister::new(Arc::new(directory))), &config);
            connector.resolve(&args.member_key).await
        }
        Err(_) => {
            info!("no bearer token set, using an in-memory demo directory");
            let directory = Arc::new(demo_directory(&args.member_key));
            let connector =
                GroupConnector::new(Arc::new(MemoryGroupLister::new(directory)), &config);
            connector.resolve(&args.member_key).await
        }
    };

    match outcome {
        ResolutionOutcome::Authorized { groups } => {
            println!("authorized; member of {} group(s):", groups.len());
            for group in groups {
                println!("  {group}");
            }
        }
        ResolutionOutcome::Denied { reason } => {
            println!("denied: {reason}");
            std::process::exit(1);
        }
        ResolutionOutcome::Unavailable { message } => {
            anyhow::bail!("directory unavailable: {message}");
        }
    }

    Ok(())
}

/// Small nested graph so the demo has something to walk: the member belongs
/// to two teams which both roll up into staff, which rolls up into everyone.
fn demo_directory(member_key: &str) -> MemoryDirectory {
    let directory = MemoryDirectory::new();
    directory.add_membership(member_key, "eng@demo.example");
    directory.add_membership(member_key, "oncall@demo.example");
    directory.add_membership("eng@demo.example", "staff@demo.example");
    directory.add_membership("oncall@demo.example", "staff@demo.example");
    directory.add_membership("staff@demo.example", "everyone@demo.example");
    directory
}
