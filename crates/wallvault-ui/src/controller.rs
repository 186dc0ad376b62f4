//! Sequential driver that owns a [`CatalogState`] and a [`CatalogService`].
//!
//! # Design
//! - Runs reducer effects one at a time, feeding each outcome back through the
//!   reducer before the next effect starts.
//! - Host effects (debounce timers, file saves, clipboard) are handed back to
//!   the caller; a pending search is flushed explicitly with
//!   [`CatalogController::flush_search`] once the caller's timer fires.
//! - Operations whose caller needs the outcome call the service directly and
//!   then feed the arrival command through the reducer.

use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::debug;
use wallvault_api_models::{ConfigForm, ServiceConfig};

use crate::core::config::CatalogConfig;
use crate::core::coordinator::Stream;
use crate::core::error::CatalogError;
use crate::features::catalog::actions::{Command, Effect, apply, reduce};
use crate::features::catalog::bulk::{BatchOutcome, collect_all, delete_batch};
use crate::features::catalog::export::CsvExport;
use crate::features::catalog::state::CatalogState;
use crate::models::{CatalogRow, PartitionKind, Toast, ToastKind};
use crate::runtime::execute;
use crate::services::CatalogService;

/// Catalog state plus the service it is synchronised with.
pub struct CatalogController<S> {
    service: S,
    state: CatalogState,
}

impl<S> CatalogController<S>
where
    S: CatalogService,
{
    /// Create a controller with an empty session state.
    pub fn new(service: S, config: &CatalogConfig) -> Self {
        Self {
            service,
            state: CatalogState::new(config),
        }
    }

    /// Current state.
    pub const fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Underlying service.
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Apply one command and carry out every service effect it causes.
    ///
    /// Returns the host effects the caller is responsible for.
    ///
    /// # Errors
    ///
    /// Returns the validation failure when the command itself is rejected.
    pub async fn dispatch(&mut self, command: Command) -> Result<Vec<Effect>, CatalogError> {
        let effects = match reduce(&mut self.state, command) {
            Ok(effects) => effects,
            Err(err) => {
                self.state.notify(ToastKind::Error, err.to_string());
                return Err(err);
            }
        };
        Ok(self.drive(effects).await)
    }

    async fn drive(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut queue = VecDeque::from(effects);
        let mut host = Vec::new();
        while let Some(effect) = queue.pop_front() {
            if effect.is_host() {
                host.push(effect);
                continue;
            }
            if let Some(command) = execute(&self.service, effect).await {
                queue.extend(apply(&mut self.state, command));
            }
        }
        host
    }

    /// Load catalog, statistics and users for a new session.
    ///
    /// # Errors
    ///
    /// Never fails validation; service failures surface as notifications.
    pub async fn load_initial(&mut self) -> Result<(), CatalogError> {
        self.dispatch(Command::LoadInitial).await.map(drop)
    }

    /// Re-fetch both partitions and statistics.
    ///
    /// # Errors
    ///
    /// Never fails validation; service failures surface as notifications.
    pub async fn refresh(&mut self) -> Result<(), CatalogError> {
        self.dispatch(Command::Reload).await.map(drop)
    }

    /// Record a search edit. Returns the quiet period after which
    /// [`Self::flush_search`] should be called, or `None` when nothing changed.
    ///
    /// # Errors
    ///
    /// Never fails validation.
    pub async fn on_search_changed(&mut self, text: &str) -> Result<Option<Duration>, CatalogError> {
        let host = self.dispatch(Command::SearchChanged(text.to_string())).await?;
        Ok(host.into_iter().find_map(|effect| match effect {
            Effect::ScheduleSearch { delay, .. } => Some(delay),
            _ => None,
        }))
    }

    /// Run the pending debounced search, if any. Returns whether a fetch ran.
    ///
    /// # Errors
    ///
    /// Never fails validation.
    pub async fn flush_search(&mut self) -> Result<bool, CatalogError> {
        match self.state.coordinator.pending_search() {
            Some(token) => {
                self.dispatch(Command::SearchQuiet(token)).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Switch the user filter (`all` or a user id).
    ///
    /// # Errors
    ///
    /// Never fails validation.
    pub async fn on_user_filter_changed(&mut self, user: &str) -> Result<(), CatalogError> {
        self.dispatch(Command::UserFilterChanged(user.to_string()))
            .await
            .map(drop)
    }

    /// Change the page size for both partitions.
    ///
    /// # Errors
    ///
    /// Never fails validation.
    pub async fn on_page_size_changed(&mut self, page_size: NonZeroU32) -> Result<(), CatalogError> {
        self.dispatch(Command::PageSizeChanged(page_size))
            .await
            .map(drop)
    }

    /// Navigate one partition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for a page outside `1..=page_count`.
    pub async fn on_page_requested(
        &mut self,
        kind: PartitionKind,
        page: u32,
    ) -> Result<(), CatalogError> {
        self.dispatch(Command::PageRequested { kind, page })
            .await
            .map(drop)
    }

    /// Check or uncheck one unsubscribed row.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for ids never listed as unsubscribed.
    pub async fn on_selection_toggled(&mut self, id: &str, selected: bool) -> Result<(), CatalogError> {
        self.dispatch(Command::SelectionToggled {
            id: id.to_string(),
            selected,
        })
        .await
        .map(drop)
    }

    /// Check or uncheck every row on the current unsubscribed page.
    ///
    /// # Errors
    ///
    /// Never fails validation.
    pub async fn on_select_all_toggled(&mut self, selected: bool) -> Result<(), CatalogError> {
        self.dispatch(Command::SelectAllToggled(selected))
            .await
            .map(drop)
    }

    /// Delete every selected item, then clear the selection and reload.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when nothing is selected.
    pub async fn delete_selected(&mut self) -> Result<BatchOutcome, CatalogError> {
        self.state.last_batch = None;
        self.dispatch(Command::DeleteSelectedRequested).await?;
        Ok(self.state.last_batch.clone().unwrap_or_default())
    }

    /// Delete the given ids as one best-effort batch, then reload.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when `ids` is empty.
    pub async fn delete_ids(&mut self, ids: &[String]) -> Result<BatchOutcome, CatalogError> {
        if ids.is_empty() {
            let err = CatalogError::validation("Please select wallpapers to delete");
            self.state.notify(ToastKind::Error, err.to_string());
            return Err(err);
        }
        let outcome = delete_batch(&self.service, ids).await;
        self.dispatch(Command::BatchFinished(outcome.clone())).await?;
        Ok(outcome)
    }

    /// Delete every unsubscribed item under the current filter, across all pages.
    ///
    /// # Errors
    ///
    /// Returns the listing failure when the full set could not be fetched.
    pub async fn delete_all_unsubscribed(&mut self) -> Result<BatchOutcome, CatalogError> {
        let collected = collect_all(
            &self.service,
            &self.state.filter,
            PartitionKind::Unsubscribed,
            self.state.export_page_size,
        )
        .await;
        let failure = collected.as_ref().err().cloned();
        self.state.last_batch = None;
        self.dispatch(Command::PurgeCollected(collected)).await?;
        match failure {
            Some(err) => Err(err),
            None => Ok(self.state.last_batch.clone().unwrap_or_default()),
        }
    }

    /// Delete one item.
    ///
    /// # Errors
    ///
    /// Returns the service failure verbatim.
    pub async fn delete_one(&mut self, id: &str) -> Result<(), CatalogError> {
        let result = self.service.delete(id).await;
        self.dispatch(Command::Deleted {
            id: id.to_string(),
            result: result.clone(),
        })
        .await?;
        result
    }

    /// Render one whole filtered partition as CSV. `Ok(None)` means there was
    /// nothing to export.
    ///
    /// # Errors
    ///
    /// Returns the listing failure when the partition could not be fetched.
    pub async fn export_csv(
        &mut self,
        kind: PartitionKind,
        date: NaiveDate,
    ) -> Result<Option<CsvExport>, CatalogError> {
        let collected = collect_all(
            &self.service,
            &self.state.filter,
            kind,
            self.state.export_page_size,
        )
        .await;
        let failure = collected.as_ref().err().cloned();
        let host = self
            .dispatch(Command::ExportCollected {
                kind,
                date,
                result: collected,
            })
            .await?;
        if let Some(err) = failure {
            return Err(err);
        }
        Ok(host.into_iter().find_map(|effect| match effect {
            Effect::SaveFile(export) => Some(export),
            _ => None,
        }))
    }

    /// Load one item into the detail view.
    ///
    /// # Errors
    ///
    /// Returns the service failure; the previous detail item is kept.
    pub async fn show_detail(&mut self, id: &str) -> Result<CatalogRow, CatalogError> {
        let ticket = self.state.coordinator.issue(Stream::Detail);
        let result = self.service.detail(id).await;
        let failure = result.as_ref().err().cloned();
        self.dispatch(Command::DetailArrived { ticket, result })
            .await?;
        if let Some(err) = failure {
            return Err(err);
        }
        self.state
            .current
            .clone()
            .ok_or_else(|| CatalogError::Decode("detail response was discarded".into()))
    }

    /// Ask the service host to open an item's folder. Best effort: returns
    /// whether the request succeeded; failures only notify.
    pub async fn open_folder(&mut self, id: &str) -> bool {
        let result = self.service.open_folder(id).await;
        let opened = result.is_ok();
        if let Err(err) = self
            .dispatch(Command::FolderOpened {
                id: id.to_string(),
                result,
            })
            .await
        {
            debug!(id, error = %err, "open folder outcome rejected");
        }
        opened
    }

    /// Path of the current detail item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when no item is shown.
    pub async fn copy_path(&mut self) -> Result<String, CatalogError> {
        let host = self.dispatch(Command::CopyPathRequested).await?;
        host.into_iter()
            .find_map(|effect| match effect {
                Effect::CopyText(path) => Some(path),
                _ => None,
            })
            .ok_or_else(|| CatalogError::validation("No wallpaper selected"))
    }

    /// Load the service configuration.
    ///
    /// # Errors
    ///
    /// Returns the service failure.
    pub async fn load_config(&mut self) -> Result<ServiceConfig, CatalogError> {
        let result = self.service.config().await;
        self.dispatch(Command::ConfigArrived(result.clone()))
            .await?;
        result
    }

    /// Validate and save the settings form, then reload everything.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for an invalid port (nothing is
    /// sent), or the service failure.
    pub async fn save_config(&mut self, form: &ConfigForm) -> Result<ServiceConfig, CatalogError> {
        let config = match form.validate() {
            Ok(config) => config,
            Err(err) => {
                let err = CatalogError::from(err);
                self.state.notify(ToastKind::Error, err.to_string());
                return Err(err);
            }
        };
        let result = self.service.save_config(&config).await;
        self.dispatch(Command::ConfigSaved(result.clone()))
            .await?;
        result.map(|()| config)
    }

    /// Take every pending notification, oldest first.
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.state.drain_toasts()
    }
}
