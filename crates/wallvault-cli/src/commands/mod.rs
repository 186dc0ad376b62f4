//! Command handlers grouped by concern.

use anyhow::anyhow;
use wallvault_ui::features::catalog::state::UserFilter;
use wallvault_ui::models::ToastKind;

use crate::cli::FilterArgs;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::log_toasts;

pub(crate) mod catalog;
pub(crate) mod config;

/// Apply the filter flags and load both partitions plus statistics once.
pub(crate) async fn load_filtered(ctx: &mut AppContext, filter: &FilterArgs) -> CliResult<()> {
    if let Some(search) = &filter.search {
        ctx.controller.on_search_changed(search).await?;
    }
    match filter.user.as_deref() {
        Some(user) if UserFilter::from_raw(user) != UserFilter::All => {
            ctx.controller.on_user_filter_changed(user).await?;
        }
        _ => ctx.controller.refresh().await?,
    }
    surface_errors(ctx)
}

/// Drain pending notifications; the first error one fails the command.
pub(crate) fn surface_errors(ctx: &mut AppContext) -> CliResult<()> {
    let toasts = ctx.controller.drain_toasts();
    log_toasts(&toasts);
    toasts
        .into_iter()
        .find(|toast| toast.kind == ToastKind::Error)
        .map_or(Ok(()), |toast| Err(CliError::failure(anyhow!(toast.message))))
}
