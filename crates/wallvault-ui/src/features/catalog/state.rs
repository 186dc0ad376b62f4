//! Catalog state and pure state transformations, testable outside wasm.

use std::collections::BTreeSet;
use std::num::NonZeroU32;
use std::time::Duration;

use tracing::debug;
use wallvault_api_models::{
    CatalogStats, PartitionPage, PathStatus, ServiceConfig, StatsBucket, UserSummary,
};

use crate::core::config::CatalogConfig;
use crate::core::coordinator::{FetchCoordinator, Stream, Ticket};
use crate::core::pagination::{PageView, page_count, page_slice, paginate};
use crate::features::catalog::bulk::BatchOutcome;
use crate::models::{CatalogRow, PartitionKind, Toast, ToastKind};

/// Owner filter shared by both partitions and statistics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum UserFilter {
    /// No owner constraint.
    #[default]
    All,
    /// Items owned by one user.
    User(String),
}

impl UserFilter {
    /// Interpret a raw filter value; blank and `all` mean no constraint.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::User(trimmed.to_string())
        }
    }

    /// Query parameter value, absent for [`UserFilter::All`].
    #[must_use]
    pub fn as_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::User(id) => Some(id),
        }
    }
}

/// Filter state for both partitions.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text search matched server-side against title and id.
    pub search: String,
    /// Owner filter.
    pub user: UserFilter,
}

/// One independently paginated partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Rows of the current page, in service order.
    pub rows: Vec<CatalogRow>,
    /// Item count under the active filter.
    pub total: u64,
    /// 1-based current page.
    pub page: u32,
}

impl Default for Partition {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
            page: 1,
        }
    }
}

/// Selection set used for bulk actions on the unsubscribed partition.
pub type SelectionSet = BTreeSet<String>;

/// Result of applying one partition response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchApplied {
    /// Rows and total replaced.
    Applied,
    /// Response was superseded and discarded untouched.
    Stale,
    /// Rows replaced, but the total shrank below the current page; the page
    /// was clamped to the carried value and must be fetched again.
    Clamped(u32),
}

/// Full catalog controller state.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogState {
    /// Active filter.
    pub filter: FilterState,
    /// Items per page.
    pub page_size: NonZeroU32,
    /// Page size used for whole-partition dumps.
    pub export_page_size: NonZeroU32,
    /// Debounce window for search edits.
    pub search_debounce: Duration,
    /// Subscribed partition.
    pub subscribed: Partition,
    /// Unsubscribed partition.
    pub unsubscribed: Partition,
    /// Selected unsubscribed ids; survives pagination, cleared on filter change.
    pub selected: SelectionSet,
    /// Ids seen in unsubscribed responses since the last filter change.
    pub known_unsubscribed: BTreeSet<String>,
    /// Latest statistics, scoped by the user filter.
    pub stats: Option<CatalogStats>,
    /// Known users for the filter menu.
    pub users: Vec<UserSummary>,
    /// Latest path availability check.
    pub path_status: Option<PathStatus>,
    /// Item shown in the detail view.
    pub current: Option<CatalogRow>,
    /// Outcome of the last bulk delete.
    pub last_batch: Option<BatchOutcome>,
    /// Service configuration loaded for the settings form.
    pub settings: Option<ServiceConfig>,
    /// Pending notifications, oldest first.
    pub toasts: Vec<Toast>,
    /// Freshness bookkeeping.
    pub coordinator: FetchCoordinator,
    next_toast_id: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}

impl CatalogState {
    /// Empty session state: both partitions on page 1, no filter, no selection.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            filter: FilterState::default(),
            page_size: config.page_size,
            export_page_size: config.export_page_size,
            search_debounce: config.search_debounce(),
            subscribed: Partition::default(),
            unsubscribed: Partition::default(),
            selected: SelectionSet::new(),
            known_unsubscribed: BTreeSet::new(),
            stats: None,
            users: Vec::new(),
            path_status: None,
            current: None,
            last_batch: None,
            settings: None,
            toasts: Vec::new(),
            coordinator: FetchCoordinator::default(),
            next_toast_id: 0,
        }
    }

    /// Borrow one partition.
    #[must_use]
    pub const fn partition(&self, kind: PartitionKind) -> &Partition {
        match kind {
            PartitionKind::Subscribed => &self.subscribed,
            PartitionKind::Unsubscribed => &self.unsubscribed,
        }
    }

    /// Mutably borrow one partition.
    pub const fn partition_mut(&mut self, kind: PartitionKind) -> &mut Partition {
        match kind {
            PartitionKind::Subscribed => &mut self.subscribed,
            PartitionKind::Unsubscribed => &mut self.unsubscribed,
        }
    }

    /// Pagination metadata for one partition.
    #[must_use]
    pub fn page_view(&self, kind: PartitionKind) -> PageView {
        let partition = self.partition(kind);
        paginate(partition.page, partition.total, self.page_size)
    }

    /// Whether any authoritative fetch is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.coordinator.is_loading()
    }

    /// Space that deleting every unsubscribed item would free.
    #[must_use]
    pub fn reclaimable(&self) -> Option<&StatsBucket> {
        self.stats.as_ref().map(CatalogStats::reclaimable)
    }

    /// Look up a rendered row in either partition or the detail view.
    #[must_use]
    pub fn find_row(&self, id: &str) -> Option<&CatalogRow> {
        self.current
            .iter()
            .chain(self.subscribed.rows.iter())
            .chain(self.unsubscribed.rows.iter())
            .find(|row| row.id == id)
    }

    /// Reset both page cursors and the selection after a filter change.
    pub fn reset_for_filter_change(&mut self) {
        self.subscribed.page = 1;
        self.unsubscribed.page = 1;
        self.selected.clear();
        self.known_unsubscribed.clear();
    }

    /// Replace one partition with a fetched page, unless the response is stale.
    pub fn apply_fetch_result(
        &mut self,
        kind: PartitionKind,
        ticket: Ticket,
        page: PartitionPage,
    ) -> FetchApplied {
        if !self.coordinator.settle(Stream::Partition(kind), ticket) {
            debug!(partition = %kind, ?ticket, "discarding superseded partition response");
            return FetchApplied::Stale;
        }

        let page_size = self.page_size;
        let partition = self.partition_mut(kind);
        partition.total = page.total;

        let last_page = page_count(partition.total, page_size);
        let clamped = partition.page > last_page;
        if clamped {
            debug!(partition = %kind, from = partition.page, to = last_page, "clamping page after total shrank");
            partition.page = last_page;
        }

        let items = if page.whole_set {
            page_slice(page.items, partition.page, page_size)
        } else {
            page.items
        };
        let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
        partition.rows = items.into_iter().map(CatalogRow::from).collect();
        if kind == PartitionKind::Unsubscribed {
            self.known_unsubscribed.extend(ids);
        }

        if clamped {
            FetchApplied::Clamped(last_page)
        } else {
            FetchApplied::Applied
        }
    }

    /// Queue a notification and return its id.
    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove one notification.
    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Take every pending notification, oldest first.
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
