//! Concurrent fan-out resolution over the root's direct groups.
//!
//! One worker per seed group, all sharing one visited set, all feeding one
//! collector over a channel. The first worker failure cancels everything
//! outstanding and becomes the error for the whole resolution. The cancel
//! token transitions exactly once: on that first failure, or once every
//! worker has finished.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::error::{ResolveError, ResolveResult};

use super::expander::GroupExpander;
use super::traits::GroupLister;
use super::visited::VisitedSet;

/// Bound on discovered groups in flight between workers and the collector.
const GROUP_CHANNEL_CAPACITY: usize = 64;

/// Resolves the transitive membership of `root_member` by expanding each of
/// its direct groups on its own task.
///
/// Seeds come from a plain paginated listing and never pass through the
/// visited set; every seed is reported as reachable alongside whatever its
/// expansion finds. Output is merged set-wise, so a seed rediscovered
/// through a sibling's traversal still appears once.
#[instrument(skip(lister), fields(root = %root_member, domain = %domain))]
pub(crate) async fn resolve_concurrent<L>(
    lister: Arc<L>,
    domain: &str,
    root_member: &str,
) -> ResolveResult<Vec<String>>
where
    L: GroupLister + 'static,
{
    let cancel = CancellationToken::new();
    let expander = GroupExpander::new(lister, VisitedSet::new(), cancel.clone());

    let seeds = expander.list_direct(domain, root_member).await?;
    debug!(seeds = seeds.len(), "fanning out over direct groups");
    if seeds.is_empty() {
        return Ok(Vec::new());
    }

    let (tx, mut rx) = mpsc::channel::<String>(GROUP_CHANNEL_CAPACITY);

    let collector: JoinHandle<HashSet<String>> = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            let mut resolved = HashSet::new();
            loop {
                tokio::select! {
                    // Drain buffered groups before honoring cancellation so a
                    // group that was successfully sent is never dropped.
                    biased;
                    received = rx.recv() => match received {
                        Some(group) => {
                            resolved.insert(group);
                        }
                        None => break,
                    },
                    _ = cancel.cancelled() => break,
                }
            }
            resolved
        }
    });

    let mut workers: FuturesUnordered<JoinHandle<ResolveResult<()>>> = seeds
        .into_iter()
        .map(|seed| {
            spawn_worker(
                expander.clone(),
                domain.to_string(),
                seed,
                tx.clone(),
                cancel.clone(),
            )
        })
        .collect();
    drop(tx);

    let mut first_error: Option<ResolveError> = None;
    while let Some(joined) = workers.next().await {
        let outcome = joined.unwrap_or_else(|join_error| {
            Err(ResolveError::Internal {
                message: format!("expansion worker panicked: {join_error}"),
            })
        });
        if let Err(error) = outcome {
            cancel.cancel();
            record_first_error(&mut first_error, error);
        }
    }

    // Every worker has finished. This is the other arm of the cancel
    // contract; it releases a collector still parked on an idle channel.
    cancel.cancel();

    let resolved = collector
        .await
        .map_err(|join_error| ResolveError::Internal {
            message: format!("group collector panicked: {join_error}"),
        })?;

    match first_error {
        Some(error) => {
            warn!(%error, "concurrent resolution failed, discarding partial output");
            Err(error)
        }
        None => Ok(resolved.into_iter().collect()),
    }
}

fn spawn_worker<L>(
    expander: GroupExpander<L>,
    domain: String,
    seed: String,
    tx: mpsc::Sender<String>,
    cancel: CancellationToken,
) -> JoinHandle<ResolveResult<()>>
where
    L: GroupLister + 'static,
{
    tokio::spawn(async move {
        let nested = expander.expand(&domain, &seed, true).await?;

        // The seed itself counts as reachable even though it never went
        // through the visited set.
        for group in std::iter::once(seed).chain(nested) {
            tokio::select! {
                _ = cancel.cancelled() => return Err(ResolveError::Canceled),
                sent = tx.send(group) => {
                    if sent.is_err() {
                        return Err(ResolveError::Canceled);
                    }
                }
            }
        }

        Ok(())
    })
}

/// Records the resolution's error, never letting `Canceled` from a worker
/// that merely observed the shutdown mask the failure that caused it.
fn record_first_error(first_error: &mut Option<ResolveError>, error: ResolveError) {
    match first_error {
        None => *first_error = Some(error),
        Some(ResolveError::Canceled) if !matches!(error, ResolveError::Canceled) => {
            *first_error = Some(error);
        }
        _ => {}
    }
}
