//! Catalog commands, side-effect requests, and the reducer that maps one onto
//! the other.
//!
//! # Design
//! - [`reduce`] is the only writer of [`CatalogState`]; it performs no I/O and
//!   returns the requests a driver must carry out.
//! - Every network request carries the ticket it was issued under so late
//!   responses can be recognised and dropped.
//! - Validation failures are returned before any effect is produced;
//!   [`apply`] turns them into notifications.

use std::num::NonZeroU32;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, warn};
use wallvault_api_models::{
    CatalogListing, CatalogQuery, CatalogStats, ConfigForm, PathStatus, ServiceConfig,
    StatsQuery, UserSummary, WallpaperItem,
};

use crate::core::coordinator::{SearchToken, Stream, Ticket};
use crate::core::error::CatalogError;
use crate::core::pagination::{is_valid_page, page_count};
use crate::core::query::{build_query, build_stats_query};
use crate::features::catalog::bulk::BatchOutcome;
use crate::features::catalog::export::{CsvExport, build_export};
use crate::features::catalog::selection;
use crate::features::catalog::state::{CatalogState, FetchApplied, FilterState, UserFilter};
use crate::models::{CatalogRow, PartitionKind, ToastKind};

/// Input to the catalog state machine: user intent or an arrived response.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Session start: catalog, statistics and users.
    LoadInitial,
    /// Re-fetch both partitions and statistics for the current filter.
    Reload,
    /// Search text edited (debounced).
    SearchChanged(String),
    /// Debounce window for a search edit elapsed.
    SearchQuiet(SearchToken),
    /// User filter changed (`all` or a user id).
    UserFilterChanged(String),
    /// Page size changed.
    PageSizeChanged(NonZeroU32),
    /// Navigate one partition.
    PageRequested {
        /// Partition to navigate.
        kind: PartitionKind,
        /// Requested 1-based page.
        page: u32,
    },
    /// Check or uncheck one unsubscribed row.
    SelectionToggled {
        /// Item id.
        id: String,
        /// Whether the row is now checked.
        selected: bool,
    },
    /// Check or uncheck every row on the current unsubscribed page.
    SelectAllToggled(bool),
    /// Drop the whole selection.
    ClearSelection,
    /// Delete every selected item.
    DeleteSelectedRequested,
    /// Delete every unsubscribed item under the current filter.
    DeleteAllUnsubscribedRequested,
    /// Delete a single item.
    DeleteOneRequested(String),
    /// Export one whole filtered partition as CSV.
    ExportRequested {
        /// Partition to export.
        kind: PartitionKind,
        /// Date used in the file name.
        date: NaiveDate,
    },
    /// Show an item in the detail view.
    DetailRequested(String),
    /// Open an item's folder on the service host.
    OpenFolderRequested(String),
    /// Copy the current item's path.
    CopyPathRequested,
    /// Driver reported the clipboard write outcome.
    ClipboardWritten {
        /// Path that was copied.
        path: String,
        /// Whether the write succeeded.
        ok: bool,
    },
    /// Load the service configuration for the settings form.
    ConfigRequested,
    /// Submit the settings form.
    ConfigSubmitted(ConfigForm),
    /// Remove one notification.
    DismissToast(u64),
    /// Listing response for the given partition tickets.
    CatalogArrived {
        /// Partitions this request was issued for.
        targets: Vec<(PartitionKind, Ticket)>,
        /// Listing or failure.
        result: Result<CatalogListing, CatalogError>,
    },
    /// Statistics response.
    StatsArrived {
        /// Ticket the request was issued under.
        ticket: Ticket,
        /// Statistics or failure.
        result: Result<CatalogStats, CatalogError>,
    },
    /// Users response.
    UsersArrived {
        /// Ticket the request was issued under.
        ticket: Ticket,
        /// Users or failure.
        result: Result<Vec<UserSummary>, CatalogError>,
    },
    /// Path availability check finished.
    PathStatusArrived(Result<PathStatus, CatalogError>),
    /// Item detail response.
    DetailArrived {
        /// Ticket the request was issued under.
        ticket: Ticket,
        /// Item or failure.
        result: Result<WallpaperItem, CatalogError>,
    },
    /// Bulk delete finished.
    BatchFinished(BatchOutcome),
    /// Full unsubscribed set fetched for a purge.
    PurgeCollected(Result<Vec<WallpaperItem>, CatalogError>),
    /// Full partition fetched for an export.
    ExportCollected {
        /// Exported partition.
        kind: PartitionKind,
        /// Date used in the file name.
        date: NaiveDate,
        /// Items or failure.
        result: Result<Vec<WallpaperItem>, CatalogError>,
    },
    /// Single delete finished.
    Deleted {
        /// Deleted item id.
        id: String,
        /// Outcome.
        result: Result<(), CatalogError>,
    },
    /// Open-folder request finished.
    FolderOpened {
        /// Item id.
        id: String,
        /// Outcome.
        result: Result<(), CatalogError>,
    },
    /// Configuration load finished.
    ConfigArrived(Result<ServiceConfig, CatalogError>),
    /// Configuration save finished.
    ConfigSaved(Result<(), CatalogError>),
}

/// Why a whole partition is being collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectPurpose {
    /// Delete every collected item.
    Purge,
    /// Export the collected items, naming the file after this date.
    Export(NaiveDate),
}

/// Side effect requested by the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Arm the debounce timer; deliver [`Command::SearchQuiet`] when it fires.
    ScheduleSearch {
        /// Token to deliver back.
        token: SearchToken,
        /// Quiet period.
        delay: Duration,
    },
    /// Fetch the listing and apply it to `targets`.
    FetchCatalog {
        /// Request descriptor.
        query: CatalogQuery,
        /// Partitions the response is authoritative for.
        targets: Vec<(PartitionKind, Ticket)>,
    },
    /// Fetch statistics.
    FetchStats {
        /// Request descriptor.
        query: StatsQuery,
        /// Ticket to deliver back.
        ticket: Ticket,
    },
    /// Fetch known users.
    FetchUsers {
        /// Ticket to deliver back.
        ticket: Ticket,
    },
    /// Best-effort path availability check.
    CheckPaths,
    /// Fetch one item's detail.
    FetchDetail {
        /// Item id.
        id: String,
        /// Ticket to deliver back.
        ticket: Ticket,
    },
    /// Delete ids sequentially, best effort.
    DeleteBatch(Vec<String>),
    /// Delete one item.
    DeleteOne(String),
    /// Fetch a whole filtered partition.
    CollectPartition {
        /// Partition to collect.
        kind: PartitionKind,
        /// Filter snapshot.
        filter: FilterState,
        /// Oversized page size.
        page_size: NonZeroU32,
        /// What to do with the result.
        purpose: CollectPurpose,
    },
    /// Open an item's folder on the service host.
    OpenFolder(String),
    /// Load the service configuration.
    FetchConfig,
    /// Save the service configuration.
    SaveConfig(ServiceConfig),
    /// Hand a rendered export to the driver (download or write).
    SaveFile(CsvExport),
    /// Hand a path to the driver's clipboard or stdout.
    CopyText(String),
}

impl Effect {
    /// Whether the driver, not the catalog service, carries out this effect.
    #[must_use]
    pub const fn is_host(&self) -> bool {
        matches!(
            self,
            Self::ScheduleSearch { .. } | Self::SaveFile(_) | Self::CopyText(_)
        )
    }
}

/// Apply `command`, turning validation failures into error notifications.
pub fn apply(state: &mut CatalogState, command: Command) -> Vec<Effect> {
    match reduce(state, command) {
        Ok(effects) => effects,
        Err(err) => {
            state.notify(ToastKind::Error, err.to_string());
            Vec::new()
        }
    }
}

/// Apply `command` to `state` and return the side effects to carry out.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] when the command is rejected; the
/// state is left untouched in that case.
#[allow(clippy::too_many_lines)]
pub fn reduce(state: &mut CatalogState, command: Command) -> Result<Vec<Effect>, CatalogError> {
    match command {
        Command::LoadInitial => {
            let mut effects = reload(state);
            let ticket = state.coordinator.issue(Stream::Users);
            effects.push(Effect::FetchUsers { ticket });
            Ok(effects)
        }
        Command::Reload => Ok(reload(state)),
        Command::SearchChanged(text) => {
            if text.trim() == state.filter.search.trim() {
                state.filter.search = text;
                return Ok(Vec::new());
            }
            state.filter.search = text;
            state.reset_for_filter_change();
            for kind in PartitionKind::ALL {
                state.coordinator.invalidate(Stream::Partition(kind));
            }
            let token = state.coordinator.schedule_search();
            debug!(?token, "search edit scheduled");
            Ok(vec![Effect::ScheduleSearch {
                token,
                delay: state.search_debounce,
            }])
        }
        Command::SearchQuiet(token) => {
            if !state.coordinator.take_search(token) {
                debug!(?token, "ignoring superseded search timer");
                return Ok(Vec::new());
            }
            Ok(reload(state))
        }
        Command::UserFilterChanged(raw) => {
            let user = UserFilter::from_raw(&raw);
            if user == state.filter.user {
                return Ok(Vec::new());
            }
            state.filter.user = user;
            state.reset_for_filter_change();
            Ok(reload(state))
        }
        Command::PageSizeChanged(page_size) => {
            if page_size == state.page_size {
                return Ok(Vec::new());
            }
            state.page_size = page_size;
            state.subscribed.page = 1;
            state.unsubscribed.page = 1;
            Ok(reload(state))
        }
        Command::PageRequested { kind, page } => {
            let partition = state.partition(kind);
            if !is_valid_page(page, partition.total, state.page_size) {
                return Err(CatalogError::validation(format!(
                    "page {page} is out of range (1-{})",
                    page_count(partition.total, state.page_size)
                )));
            }
            if page == partition.page {
                return Ok(Vec::new());
            }
            state.partition_mut(kind).page = page;
            Ok(vec![fetch_partitions(state, &[kind])])
        }
        Command::SelectionToggled { id, selected } => {
            selection::toggle(state, &id, selected)?;
            Ok(Vec::new())
        }
        Command::SelectAllToggled(selected) => {
            selection::select_all(state, selected);
            Ok(Vec::new())
        }
        Command::ClearSelection => {
            selection::clear(state);
            Ok(Vec::new())
        }
        Command::DeleteSelectedRequested => {
            if state.selected.is_empty() {
                return Err(CatalogError::validation(
                    "Please select wallpapers to delete",
                ));
            }
            Ok(vec![Effect::DeleteBatch(
                state.selected.iter().cloned().collect(),
            )])
        }
        Command::DeleteAllUnsubscribedRequested => Ok(vec![Effect::CollectPartition {
            kind: PartitionKind::Unsubscribed,
            filter: state.filter.clone(),
            page_size: state.export_page_size,
            purpose: CollectPurpose::Purge,
        }]),
        Command::DeleteOneRequested(id) => Ok(vec![Effect::DeleteOne(id)]),
        Command::ExportRequested { kind, date } => Ok(vec![Effect::CollectPartition {
            kind,
            filter: state.filter.clone(),
            page_size: state.export_page_size,
            purpose: CollectPurpose::Export(date),
        }]),
        Command::DetailRequested(id) => {
            let ticket = state.coordinator.issue(Stream::Detail);
            Ok(vec![Effect::FetchDetail { id, ticket }])
        }
        Command::OpenFolderRequested(id) => Ok(vec![Effect::OpenFolder(id)]),
        Command::CopyPathRequested => match &state.current {
            Some(row) => Ok(vec![Effect::CopyText(row.path.clone())]),
            None => Err(CatalogError::validation("No wallpaper selected")),
        },
        Command::ClipboardWritten { path, ok } => {
            if ok {
                state.notify(ToastKind::Info, "Path copied to clipboard");
            } else {
                state.notify(ToastKind::Info, format!("Path: {path}"));
            }
            Ok(Vec::new())
        }
        Command::ConfigRequested => Ok(vec![Effect::FetchConfig]),
        Command::ConfigSubmitted(form) => {
            let config = form.validate()?;
            Ok(vec![Effect::SaveConfig(config)])
        }
        Command::DismissToast(id) => {
            state.dismiss_toast(id);
            Ok(Vec::new())
        }
        Command::CatalogArrived { targets, result } => Ok(catalog_arrived(state, targets, result)),
        Command::StatsArrived { ticket, result } => {
            if !state.coordinator.settle(Stream::Stats, ticket) {
                debug!(?ticket, "discarding superseded statistics response");
                return Ok(Vec::new());
            }
            match result {
                Ok(stats) => state.stats = Some(stats),
                Err(err) => {
                    state.notify(ToastKind::Error, format!("Error loading statistics: {err}"));
                }
            }
            Ok(Vec::new())
        }
        Command::UsersArrived { ticket, result } => {
            if !state.coordinator.settle(Stream::Users, ticket) {
                return Ok(Vec::new());
            }
            match result {
                Ok(users) => state.users = users,
                Err(err) => {
                    state.notify(ToastKind::Error, format!("Error loading users: {err}"));
                }
            }
            Ok(Vec::new())
        }
        Command::PathStatusArrived(result) => {
            match result {
                Ok(status) => state.path_status = Some(status),
                Err(err) => warn!(error = %err, "path availability check failed"),
            }
            Ok(Vec::new())
        }
        Command::DetailArrived { ticket, result } => {
            if !state.coordinator.settle(Stream::Detail, ticket) {
                return Ok(Vec::new());
            }
            match result {
                Ok(item) => state.current = Some(CatalogRow::from(item)),
                Err(err) => {
                    state.notify(
                        ToastKind::Error,
                        format!("Error loading wallpaper details: {err}"),
                    );
                }
            }
            Ok(Vec::new())
        }
        Command::BatchFinished(outcome) => {
            let kind = if outcome.is_complete() {
                ToastKind::Success
            } else {
                ToastKind::Error
            };
            state.notify(kind, format!("Deleted wallpapers: {}", outcome.summary()));
            state.last_batch = Some(outcome);
            selection::clear(state);
            Ok(reload(state))
        }
        Command::PurgeCollected(result) => match result {
            Ok(items) if items.is_empty() => {
                state.last_batch = Some(BatchOutcome::default());
                state.notify(ToastKind::Info, "No unsubscribed wallpapers to delete");
                Ok(Vec::new())
            }
            Ok(items) => Ok(vec![Effect::DeleteBatch(
                items.into_iter().map(|item| item.id).collect(),
            )]),
            Err(err) => {
                state.notify(ToastKind::Error, format!("Error loading wallpapers: {err}"));
                Ok(Vec::new())
            }
        },
        Command::ExportCollected { kind, date, result } => match result {
            Ok(items) => {
                let rows: Vec<CatalogRow> = items.into_iter().map(CatalogRow::from).collect();
                match build_export(kind, &rows, date) {
                    Some(export) => {
                        state.notify(
                            ToastKind::Success,
                            format!("Exported {} wallpapers to {}", export.rows, export.file_name),
                        );
                        Ok(vec![Effect::SaveFile(export)])
                    }
                    None => {
                        state.notify(ToastKind::Info, "Nothing to export");
                        Ok(Vec::new())
                    }
                }
            }
            Err(err) => {
                state.notify(ToastKind::Error, format!("Export failed: {err}"));
                Ok(Vec::new())
            }
        },
        Command::Deleted { id, result } => match result {
            Ok(()) => {
                state.notify(ToastKind::Success, "Wallpaper deleted");
                state.selected.remove(&id);
                if state.current.as_ref().is_some_and(|row| row.id == id) {
                    state.current = None;
                }
                Ok(reload(state))
            }
            Err(err) => {
                state.notify(ToastKind::Error, format!("Failed to delete wallpaper: {err}"));
                Ok(Vec::new())
            }
        },
        Command::FolderOpened { id, result } => {
            if let Err(err) = result {
                warn!(id, error = %err, "open folder failed");
                let message = match state.find_row(&id) {
                    Some(row) => format!("Failed to open folder, path: {}", row.path),
                    None => format!("Failed to open folder: {err}"),
                };
                state.notify(ToastKind::Error, message);
            }
            Ok(Vec::new())
        }
        Command::ConfigArrived(result) => {
            match result {
                Ok(config) => state.settings = Some(config),
                Err(err) => {
                    state.notify(ToastKind::Error, format!("Error loading configuration: {err}"));
                }
            }
            Ok(Vec::new())
        }
        Command::ConfigSaved(result) => match result {
            Ok(()) => {
                state.notify(ToastKind::Success, "Configuration saved");
                reduce(state, Command::LoadInitial)
            }
            Err(err) => {
                state.notify(
                    ToastKind::Error,
                    format!("Failed to save configuration: {err}"),
                );
                Ok(Vec::new())
            }
        },
    }
}

/// Re-fetch both partitions and statistics, superseding everything in flight.
fn reload(state: &mut CatalogState) -> Vec<Effect> {
    state.coordinator.cancel_search();
    let catalog = fetch_partitions(state, &PartitionKind::ALL);
    let ticket = state.coordinator.issue(Stream::Stats);
    vec![
        catalog,
        Effect::FetchStats {
            query: build_stats_query(&state.filter),
            ticket,
        },
    ]
}

fn fetch_partitions(state: &mut CatalogState, kinds: &[PartitionKind]) -> Effect {
    let targets = kinds
        .iter()
        .map(|kind| (*kind, state.coordinator.issue(Stream::Partition(*kind))))
        .collect();
    Effect::FetchCatalog {
        query: build_query(
            &state.filter,
            state.subscribed.page,
            state.unsubscribed.page,
            state.page_size,
        ),
        targets,
    }
}

fn catalog_arrived(
    state: &mut CatalogState,
    targets: Vec<(PartitionKind, Ticket)>,
    result: Result<CatalogListing, CatalogError>,
) -> Vec<Effect> {
    let mut listing = match result {
        Ok(listing) => listing,
        Err(err) => {
            let mut authoritative = false;
            for (kind, ticket) in targets {
                authoritative |= state.coordinator.settle(Stream::Partition(kind), ticket);
            }
            if authoritative {
                state.notify(ToastKind::Error, format!("Error loading wallpapers: {err}"));
            } else {
                debug!(error = %err, "discarding superseded catalog failure");
            }
            return Vec::new();
        }
    };

    let mut applied = false;
    let mut refetch = Vec::new();
    for (kind, ticket) in targets {
        let page = match kind {
            PartitionKind::Subscribed => std::mem::take(&mut listing.subscribed),
            PartitionKind::Unsubscribed => std::mem::take(&mut listing.unsubscribed),
        };
        match state.apply_fetch_result(kind, ticket, page) {
            FetchApplied::Applied => applied = true,
            FetchApplied::Clamped(_) => {
                applied = true;
                refetch.push(kind);
            }
            FetchApplied::Stale => {}
        }
    }

    let mut effects = Vec::new();
    if !refetch.is_empty() {
        effects.push(fetch_partitions(state, &refetch));
    }
    if applied {
        effects.push(Effect::CheckPaths);
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::selection::TriState;
    use crate::test_support::{item, listing, row};

    fn size(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
    }

    fn catalog_targets(effects: &[Effect]) -> Vec<(PartitionKind, Ticket)> {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::FetchCatalog { targets, .. } => Some(targets.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn catalog_query(effects: &[Effect]) -> Option<CatalogQuery> {
        effects.iter().find_map(|effect| match effect {
            Effect::FetchCatalog { query, .. } => Some(query.clone()),
            _ => None,
        })
    }

    fn loaded_state(sub_total: u64, unsub_ids: &[&str], unsub_total: u64) -> CatalogState {
        let mut state = CatalogState::default();
        let effects = apply(&mut state, Command::LoadInitial);
        let targets = catalog_targets(&effects);
        apply(
            &mut state,
            Command::CatalogArrived {
                targets,
                result: Ok(listing(&[], sub_total, unsub_ids, unsub_total)),
            },
        );
        state
    }

    #[test]
    fn load_initial_requests_catalog_stats_and_users() {
        let mut state = CatalogState::default();
        let effects = apply(&mut state, Command::LoadInitial);
        assert_eq!(effects.len(), 3);
        assert!(matches!(effects[1], Effect::FetchStats { .. }));
        assert!(matches!(effects[2], Effect::FetchUsers { .. }));
        assert_eq!(catalog_targets(&effects).len(), 2);
        assert!(state.is_loading());
    }

    #[test]
    fn filter_changes_reset_both_pages_before_fetching() {
        let mut state = loaded_state(200, &["a"], 200);
        state.subscribed.page = 3;
        state.unsubscribed.page = 2;

        let effects = apply(&mut state, Command::UserFilterChanged("7656".into()));
        let query = catalog_query(&effects);
        assert_eq!(state.subscribed.page, 1);
        assert_eq!(state.unsubscribed.page, 1);
        assert_eq!(query.as_ref().map(|q| q.subscribed_page), Some(1));
        assert_eq!(query.as_ref().map(|q| q.unsubscribed_page), Some(1));
        assert_eq!(query.and_then(|q| q.user), Some("7656".to_string()));
        assert!(effects.iter().any(|e| matches!(e, Effect::FetchStats { query, .. } if query.user.as_deref() == Some("7656"))));

        state.unsubscribed.page = 2;
        let effects = apply(&mut state, Command::SearchChanged("sky".into()));
        assert_eq!(state.unsubscribed.page, 1);
        assert!(matches!(effects.as_slice(), [Effect::ScheduleSearch { .. }]));
    }

    #[test]
    fn rapid_search_edits_issue_one_fetch_for_latest_text() {
        let mut state = loaded_state(0, &[], 0);
        let mut tokens = Vec::new();
        for text in ["a", "ab", "abc"] {
            for effect in apply(&mut state, Command::SearchChanged(text.into())) {
                if let Effect::ScheduleSearch { token, delay } = effect {
                    assert_eq!(delay, Duration::from_millis(300));
                    tokens.push(token);
                }
            }
        }
        assert_eq!(tokens.len(), 3);

        let mut fetches = Vec::new();
        for token in tokens {
            fetches.extend(
                apply(&mut state, Command::SearchQuiet(token))
                    .into_iter()
                    .filter_map(|effect| match effect {
                        Effect::FetchCatalog { query, .. } => Some(query),
                        _ => None,
                    }),
            );
        }
        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].search.as_deref(), Some("abc"));
    }

    #[test]
    fn delayed_response_for_superseded_filter_is_discarded() {
        let mut state = loaded_state(0, &[], 0);
        let for_a = catalog_targets(&apply(&mut state, Command::UserFilterChanged("a".into())));
        let for_b = catalog_targets(&apply(&mut state, Command::UserFilterChanged("b".into())));

        apply(
            &mut state,
            Command::CatalogArrived {
                targets: for_b,
                result: Ok(listing(&["b1"], 1, &["b2"], 1)),
            },
        );
        apply(
            &mut state,
            Command::CatalogArrived {
                targets: for_a,
                result: Ok(listing(&["a1", "a2"], 2, &["a3"], 7)),
            },
        );

        assert_eq!(state.filter.user, UserFilter::User("b".into()));
        assert_eq!(state.subscribed.rows[0].id, "b1");
        assert_eq!(state.unsubscribed.rows[0].id, "b2");
        assert_eq!(state.unsubscribed.total, 1);
    }

    #[test]
    fn select_all_during_filter_reload_never_selects_stale_rows() {
        let mut state = loaded_state(0, &["a", "b"], 2);
        let token = apply(&mut state, Command::SearchChanged("x".into()))
            .into_iter()
            .find_map(|effect| match effect {
                Effect::ScheduleSearch { token, .. } => Some(token),
                _ => None,
            });
        apply(&mut state, Command::SelectAllToggled(true));
        assert!(state.selected.is_empty());

        let targets = token
            .map(|token| catalog_targets(&apply(&mut state, Command::SearchQuiet(token))))
            .unwrap_or_default();
        apply(
            &mut state,
            Command::CatalogArrived {
                targets,
                result: Ok(listing(&[], 0, &["c"], 1)),
            },
        );
        assert!(state.selected.is_empty());
        let rejected = reduce(&mut state, Command::DeleteSelectedRequested);
        assert!(rejected.is_err_and(|err| err.is_validation()));

        apply(&mut state, Command::SelectAllToggled(true));
        let effects = apply(&mut state, Command::DeleteSelectedRequested);
        assert_eq!(effects, vec![Effect::DeleteBatch(vec!["c".to_string()])]);
    }

    #[test]
    fn whitespace_only_search_edit_keeps_selection_and_skips_fetch() {
        let mut state = loaded_state(0, &["a"], 1);
        state.filter.search = "sky".into();
        apply(
            &mut state,
            Command::SelectionToggled {
                id: "a".into(),
                selected: true,
            },
        );
        let effects = apply(&mut state, Command::SearchChanged("sky ".into()));
        assert!(effects.is_empty());
        assert_eq!(state.filter.search, "sky ");
        assert!(state.selected.contains("a"));
        assert!(state.coordinator.pending_search().is_none());
    }

    #[test]
    fn response_arriving_while_search_debounces_is_discarded() {
        let mut state = CatalogState::default();
        let targets = catalog_targets(&apply(&mut state, Command::LoadInitial));
        apply(&mut state, Command::SearchChanged("new".into()));
        apply(
            &mut state,
            Command::CatalogArrived {
                targets,
                result: Ok(listing(&["old"], 1, &[], 0)),
            },
        );
        assert!(state.subscribed.rows.is_empty());
    }

    #[test]
    fn page_request_refetches_only_its_partition() {
        let mut state = loaded_state(200, &["a"], 95);
        let effects = apply(
            &mut state,
            Command::PageRequested {
                kind: PartitionKind::Unsubscribed,
                page: 3,
            },
        );
        let targets = catalog_targets(&effects);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0, PartitionKind::Unsubscribed);
        assert_eq!(catalog_query(&effects).map(|q| q.unsubscribed_page), Some(3));
        assert_eq!(state.subscribed.page, 1);
        assert_eq!(state.subscribed.total, 200);

        let same = apply(
            &mut state,
            Command::PageRequested {
                kind: PartitionKind::Unsubscribed,
                page: 3,
            },
        );
        assert!(same.is_empty());
    }

    #[test]
    fn out_of_range_page_is_rejected_without_fetch() {
        let mut state = loaded_state(0, &["a"], 95);
        let result = reduce(
            &mut state,
            Command::PageRequested {
                kind: PartitionKind::Unsubscribed,
                page: 5,
            },
        );
        assert_eq!(
            result,
            Err(CatalogError::Validation(
                "page 5 is out of range (1-3)".into()
            ))
        );
        assert_eq!(state.unsubscribed.page, 1);

        let effects = apply(
            &mut state,
            Command::PageRequested {
                kind: PartitionKind::Unsubscribed,
                page: 0,
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.toasts.last().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn shrinking_total_clamps_and_refetches_that_partition() {
        let mut state = loaded_state(0, &["a"], 95);
        let effects = apply(
            &mut state,
            Command::PageRequested {
                kind: PartitionKind::Unsubscribed,
                page: 3,
            },
        );
        let effects = apply(
            &mut state,
            Command::CatalogArrived {
                targets: catalog_targets(&effects),
                result: Ok(listing(&[], 0, &[], 41)),
            },
        );
        assert_eq!(state.unsubscribed.page, 2);
        let targets = catalog_targets(&effects);
        assert_eq!(targets.len(), 1);
        assert_eq!(catalog_query(&effects).map(|q| q.unsubscribed_page), Some(2));
        assert!(effects.contains(&Effect::CheckPaths));
    }

    #[test]
    fn selection_survives_page_change_but_tri_state_tracks_page() {
        let mut state = loaded_state(0, &["x", "y"], 95);
        apply(
            &mut state,
            Command::SelectionToggled {
                id: "x".into(),
                selected: true,
            },
        );
        assert_eq!(state.select_all_tri_state(), TriState::Indeterminate);

        let effects = apply(
            &mut state,
            Command::PageRequested {
                kind: PartitionKind::Unsubscribed,
                page: 2,
            },
        );
        apply(
            &mut state,
            Command::CatalogArrived {
                targets: catalog_targets(&effects),
                result: Ok(listing(&[], 0, &["p2a", "p2b"], 95)),
            },
        );
        assert!(state.selected.contains("x"));
        assert_eq!(state.select_all_tri_state(), TriState::Unchecked);

        apply(&mut state, Command::SelectAllToggled(true));
        assert_eq!(state.select_all_tri_state(), TriState::Checked);
        assert_eq!(state.selected.len(), 3);

        apply(&mut state, Command::UserFilterChanged("someone".into()));
        assert!(state.selected.is_empty());
    }

    #[test]
    fn failures_are_isolated_per_stream() {
        let mut state = CatalogState::default();
        let effects = apply(&mut state, Command::LoadInitial);
        let stats_ticket = effects.iter().find_map(|e| match e {
            Effect::FetchStats { ticket, .. } => Some(*ticket),
            _ => None,
        });
        apply(
            &mut state,
            Command::CatalogArrived {
                targets: catalog_targets(&effects),
                result: Err(CatalogError::Transport("connection refused".into())),
            },
        );
        if let Some(ticket) = stats_ticket {
            apply(
                &mut state,
                Command::StatsArrived {
                    ticket,
                    result: Ok(CatalogStats::default()),
                },
            );
        }
        assert!(state.stats.is_some());
        assert_eq!(
            state.toasts[0].message,
            "Error loading wallpapers: network error: connection refused"
        );
    }

    #[test]
    fn delete_selected_requires_selection() {
        let mut state = loaded_state(0, &["a"], 1);
        assert!(
            reduce(&mut state, Command::DeleteSelectedRequested)
                .is_err_and(|err| err.is_validation())
        );
        state.selected.insert("a".into());
        assert_eq!(
            reduce(&mut state, Command::DeleteSelectedRequested),
            Ok(vec![Effect::DeleteBatch(vec!["a".into()])])
        );
    }

    #[test]
    fn batch_finish_reports_clears_and_reloads() {
        let mut state = loaded_state(0, &["a", "b", "c"], 3);
        state.selected.extend(["a".to_string(), "b".into(), "c".into()]);
        let outcome = BatchOutcome::default()
            .record("a", Ok(()))
            .record("b", Err(CatalogError::Service("locked".into())))
            .record("c", Ok(()));
        let effects = apply(&mut state, Command::BatchFinished(outcome));

        assert!(state.selected.is_empty());
        assert_eq!(catalog_targets(&effects).len(), 2);
        let toast = state.toasts.last().map(|t| t.message.clone());
        assert_eq!(toast.as_deref(), Some("Deleted wallpapers: 2 succeeded out of 3"));
    }

    #[test]
    fn purge_of_empty_set_notifies_without_deleting() {
        let mut state = CatalogState::default();
        let effects = apply(&mut state, Command::PurgeCollected(Ok(Vec::new())));
        assert!(effects.is_empty());
        assert_eq!(
            state.toasts.last().map(|t| t.message.as_str()),
            Some("No unsubscribed wallpapers to delete")
        );

        let effects = apply(
            &mut state,
            Command::PurgeCollected(Ok(vec![item("1", false), item("2", false)])),
        );
        assert_eq!(effects, vec![Effect::DeleteBatch(vec!["1".into(), "2".into()])]);
    }

    #[test]
    fn export_of_empty_set_writes_nothing() {
        let mut state = CatalogState::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default();
        let effects = apply(
            &mut state,
            Command::ExportCollected {
                kind: PartitionKind::Subscribed,
                date,
                result: Ok(Vec::new()),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.toasts[0].message, "Nothing to export");
    }

    #[test]
    fn detail_failure_keeps_previous_item() {
        let mut state = CatalogState::default();
        state.current = Some(row("keep", true));
        let effects = apply(&mut state, Command::DetailRequested("x".into()));
        let Some(Effect::FetchDetail { ticket, .. }) = effects.first().cloned() else {
            panic!("expected detail fetch: {effects:?}");
        };
        apply(
            &mut state,
            Command::DetailArrived {
                ticket,
                result: Err(CatalogError::Service("Wallpaper not found".into())),
            },
        );
        assert_eq!(state.current.as_ref().map(|r| r.id.as_str()), Some("keep"));
        assert_eq!(
            state.toasts[0].message,
            "Error loading wallpaper details: Wallpaper not found"
        );
    }

    #[test]
    fn copy_path_needs_current_item() {
        let mut state = CatalogState::default();
        assert_eq!(
            reduce(&mut state, Command::CopyPathRequested),
            Err(CatalogError::Validation("No wallpaper selected".into()))
        );
        state.current = Some(row("1", true));
        assert_eq!(
            reduce(&mut state, Command::CopyPathRequested),
            Ok(vec![Effect::CopyText("/w/1".into())])
        );
    }

    #[test]
    fn open_folder_failure_falls_back_to_path() {
        let mut state = CatalogState::default();
        state.current = Some(row("1", true));
        apply(
            &mut state,
            Command::FolderOpened {
                id: "1".into(),
                result: Err(CatalogError::Transport("refused".into())),
            },
        );
        assert_eq!(state.toasts[0].message, "Failed to open folder, path: /w/1");
    }

    #[test]
    fn config_submission_validates_port_before_saving() {
        let mut state = CatalogState::default();
        let form = ConfigForm {
            port: "70000".into(),
            ..ConfigForm::default()
        };
        assert!(apply(&mut state, Command::ConfigSubmitted(form.clone())).is_empty());
        assert_eq!(state.toasts.len(), 1);

        let valid = ConfigForm {
            port: "5001".into(),
            ..form
        };
        let effects = apply(&mut state, Command::ConfigSubmitted(valid));
        assert!(matches!(effects.as_slice(), [Effect::SaveConfig(config)] if config.server.port == 5001));

        let effects = apply(&mut state, Command::ConfigSaved(Ok(())));
        assert!(effects.iter().any(|e| matches!(e, Effect::FetchUsers { .. })));
    }

    #[test]
    fn page_size_change_resets_pages() {
        let mut state = loaded_state(100, &[], 100);
        state.subscribed.page = 2;
        let effects = apply(&mut state, Command::PageSizeChanged(size(10)));
        assert_eq!(state.subscribed.page, 1);
        assert_eq!(catalog_query(&effects).map(|q| q.page_size), Some(10));
    }
}
