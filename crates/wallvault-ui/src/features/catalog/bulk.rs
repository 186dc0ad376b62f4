//! Best-effort sequential bulk operations.

use std::num::NonZeroU32;

use tracing::{info, warn};
use wallvault_api_models::WallpaperItem;

use crate::core::error::CatalogError;
use crate::core::query::build_query;
use crate::features::catalog::state::FilterState;
use crate::models::PartitionKind;
use crate::services::CatalogService;

/// Per-item accounting of one bulk delete.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    /// Number of deletes issued.
    pub attempted: usize,
    /// Number of deletes the service confirmed.
    pub succeeded: usize,
    /// Failed ids with their reasons, in issue order.
    pub failed: Vec<(String, CatalogError)>,
}

impl BatchOutcome {
    /// Fold one item result into the outcome.
    #[must_use]
    pub fn record(mut self, id: &str, result: Result<(), CatalogError>) -> Self {
        self.attempted += 1;
        match result {
            Ok(()) => self.succeeded += 1,
            Err(err) => {
                warn!(id, error = %err, "bulk delete item failed");
                self.failed.push((id.to_string(), err));
            }
        }
        self
    }

    /// Whether every attempted delete succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// User-facing summary, e.g. `2 succeeded out of 3`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} succeeded out of {}", self.succeeded, self.attempted)
    }
}

/// Delete `ids` one at a time; a failure never stops the remaining deletes.
pub async fn delete_batch<S>(service: &S, ids: &[String]) -> BatchOutcome
where
    S: CatalogService + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    for id in ids {
        let result = service.delete(id).await;
        outcome = outcome.record(id, result);
    }
    info!(
        attempted = outcome.attempted,
        succeeded = outcome.succeeded,
        "bulk delete finished"
    );
    outcome
}

/// Fetch every item of `kind` under `filter` in a single oversized page.
///
/// # Errors
///
/// Propagates the listing failure.
pub async fn collect_all<S>(
    service: &S,
    filter: &FilterState,
    kind: PartitionKind,
    page_size: NonZeroU32,
) -> Result<Vec<WallpaperItem>, CatalogError>
where
    S: CatalogService + ?Sized,
{
    let query = build_query(filter, 1, 1, page_size);
    let listing = service.list(&query).await?;
    Ok(match kind {
        PartitionKind::Subscribed => listing.subscribed.items,
        PartitionKind::Unsubscribed => listing.unsubscribed.items,
    })
}
