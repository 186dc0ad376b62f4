//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use serde::Serialize;
use serde_json::{Value, json};
use wallvault_api_models::{CatalogStats, ServiceConfig, SubscribedAt, UserSummary};
use wallvault_ui::CatalogState;
use wallvault_ui::features::catalog::bulk::BatchOutcome;
use wallvault_ui::models::{CatalogRow, PartitionKind, Toast, ToastKind};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

fn row_json(row: &CatalogRow) -> Value {
    json!({
        "id": row.id,
        "title": row.title,
        "size": row.size_bytes,
        "size_formatted": row.size_label,
        "status": row.status_label(),
        "path": row.path,
        "subscribers": row.subscriber_count,
    })
}

fn subscribed_at(at: SubscribedAt) -> String {
    match at {
        SubscribedAt::At(at) => at.to_rfc3339(),
        SubscribedAt::Unknown => "unknown".to_string(),
    }
}

pub(crate) fn render_listing(
    state: &CatalogState,
    kinds: &[PartitionKind],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let mut doc = serde_json::Map::new();
            for kind in kinds {
                let partition = state.partition(*kind);
                let view = state.page_view(*kind);
                doc.insert(
                    kind.as_str().to_string(),
                    json!({
                        "page": partition.page,
                        "page_count": view.page_count,
                        "total": partition.total,
                        "wallpapers": partition.rows.iter().map(row_json).collect::<Vec<_>>(),
                    }),
                );
            }
            print_json(&doc)?;
        }
        OutputFormat::Table => {
            for kind in kinds {
                let partition = state.partition(*kind);
                let view = state.page_view(*kind);
                println!(
                    "{} (page {}/{}, {} total)",
                    kind.status_label(),
                    partition.page,
                    view.page_count,
                    partition.total
                );
                println!("{:<12} {:>10} TITLE", "ID", "SIZE");
                for row in &partition.rows {
                    println!("{:<12} {:>10} {}", row.id, row.size_label, row.title);
                }
                println!();
            }
        }
    }
    Ok(())
}

pub(crate) fn render_stats(stats: &CatalogStats, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(stats)?,
        OutputFormat::Table => {
            println!("{:<14} {:>8} {:>12}", "BUCKET", "COUNT", "SIZE");
            for (label, bucket) in [
                ("total", &stats.total),
                ("subscribed", &stats.subscribed),
                ("unsubscribed", &stats.unsubscribed),
                ("reclaimable", stats.reclaimable()),
            ] {
                println!(
                    "{:<14} {:>8} {:>12}",
                    label, bucket.count, bucket.size_formatted
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_users(users: &[UserSummary], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(users)?,
        OutputFormat::Table => {
            println!("{:<20} {:>6} NAME", "ID", "SUBS");
            for user in users {
                println!(
                    "{:<20} {:>6} {}",
                    user.id, user.subscription_count, user.display_name
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_detail(row: &CatalogRow, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let mut doc = row_json(row);
            doc["subscriptions"] = json!(row.subscriptions);
            doc["preview_available"] = json!(row.preview_available);
            print_json(&doc)?;
        }
        OutputFormat::Table => {
            println!("id: {}", row.id);
            println!("title: {}", row.title);
            println!("size: {}", row.size_label);
            println!("status: {}", row.status_label());
            println!("path: {}", row.path);
            if !row.subscriptions.is_empty() {
                println!("subscriptions:");
                for sub in &row.subscriptions {
                    println!(
                        "  {:<20} active={:<5} since {}",
                        sub.user_id,
                        sub.is_active,
                        subscribed_at(sub.time_subscribed)
                    );
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn render_batch(outcome: &BatchOutcome, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let failed: Vec<Value> = outcome
                .failed
                .iter()
                .map(|(id, err)| json!({"id": id, "error": err.to_string()}))
                .collect();
            print_json(&json!({
                "attempted": outcome.attempted,
                "succeeded": outcome.succeeded,
                "failed": failed,
            }))?;
        }
        OutputFormat::Table => {
            println!("Deleted wallpapers: {}", outcome.summary());
            for (id, err) in &outcome.failed {
                println!("  {id}: {err}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_config(config: &ServiceConfig, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Table => {
            println!("steam library: {}", config.steam_library_path);
            println!("steam userdata: {}", config.steam_userdata_path);
            println!("server: {}:{}", config.server.host, config.server.port);
            println!("debug: {}", config.server.debug);
        }
    }
    Ok(())
}

/// Forward drained notifications to the log.
pub(crate) fn log_toasts(toasts: &[Toast]) {
    for toast in toasts {
        match toast.kind {
            ToastKind::Error => tracing::warn!(message = %toast.message, "notification"),
            ToastKind::Info | ToastKind::Success => {
                tracing::info!(message = %toast.message, "notification");
            }
        }
    }
}
