use std::fs;

use anyhow::{Context, anyhow};
use chrono::Utc;
use wallvault_ui::features::catalog::bulk::BatchOutcome;
use wallvault_ui::models::{PartitionKind, ToastKind};

use crate::cli::{ExportArgs, FilterArgs, IdArgs, ListArgs, PurgeArgs, RemoveArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::{load_filtered, surface_errors};
use crate::output::{render_batch, render_detail, render_listing, render_stats, render_users};

pub(crate) async fn handle_list(ctx: &mut AppContext, args: ListArgs) -> CliResult<()> {
    load_filtered(ctx, &args.filter).await?;
    for (kind, page) in [
        (PartitionKind::Subscribed, args.subscribed_page),
        (PartitionKind::Unsubscribed, args.unsubscribed_page),
    ] {
        if page != ctx.controller.state().partition(kind).page {
            ctx.controller.on_page_requested(kind, page).await?;
        }
    }
    surface_errors(ctx)?;

    let kinds: Vec<PartitionKind> = match args.partition {
        Some(partition) => vec![partition.into()],
        None => PartitionKind::ALL.to_vec(),
    };
    render_listing(ctx.controller.state(), &kinds, ctx.output)
}

pub(crate) async fn handle_stats(ctx: &mut AppContext, args: FilterArgs) -> CliResult<()> {
    load_filtered(ctx, &args).await?;
    let stats = ctx
        .controller
        .state()
        .stats
        .as_ref()
        .ok_or_else(|| CliError::failure(anyhow!("service returned no statistics")))?;
    render_stats(stats, ctx.output)
}

pub(crate) async fn handle_users(ctx: &mut AppContext) -> CliResult<()> {
    ctx.controller.load_initial().await?;
    surface_errors(ctx)?;
    render_users(&ctx.controller.state().users, ctx.output)
}

pub(crate) async fn handle_show(ctx: &mut AppContext, args: IdArgs) -> CliResult<()> {
    let row = ctx.controller.show_detail(&args.id).await?;
    render_detail(&row, ctx.output)
}

pub(crate) async fn handle_path(ctx: &mut AppContext, args: IdArgs) -> CliResult<()> {
    ctx.controller.show_detail(&args.id).await?;
    let path = ctx.controller.copy_path().await?;
    println!("{path}");
    Ok(())
}

pub(crate) async fn handle_remove(ctx: &mut AppContext, args: RemoveArgs) -> CliResult<()> {
    let outcome = ctx.controller.delete_ids(&args.ids).await?;
    report_batch(ctx, &outcome)
}

pub(crate) async fn handle_purge(ctx: &mut AppContext, args: PurgeArgs) -> CliResult<()> {
    if !args.yes {
        return Err(CliError::validation(
            "refusing to delete every unsubscribed wallpaper without --yes",
        ));
    }
    load_filtered(ctx, &args.filter).await?;
    let outcome = ctx.controller.delete_all_unsubscribed().await?;
    if outcome.attempted == 0 {
        println!("No unsubscribed wallpapers to delete");
        return Ok(());
    }
    report_batch(ctx, &outcome)
}

fn report_batch(ctx: &AppContext, outcome: &BatchOutcome) -> CliResult<()> {
    render_batch(outcome, ctx.output)?;
    if outcome.is_complete() {
        Ok(())
    } else {
        Err(CliError::failure(anyhow!(
            "{} of {} deletes failed",
            outcome.failed.len(),
            outcome.attempted
        )))
    }
}

pub(crate) async fn handle_export(ctx: &mut AppContext, args: ExportArgs) -> CliResult<()> {
    load_filtered(ctx, &args.filter).await?;
    let kind = PartitionKind::from(args.partition);
    let Some(export) = ctx
        .controller
        .export_csv(kind, Utc::now().date_naive())
        .await?
    else {
        println!("Nothing to export");
        return Ok(());
    };

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))
        .map_err(CliError::failure)?;
    let path = args.out_dir.join(&export.file_name);
    fs::write(&path, export.contents.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))
        .map_err(CliError::failure)?;
    println!("Exported {} wallpapers to {}", export.rows, path.display());
    Ok(())
}

pub(crate) async fn handle_open(ctx: &mut AppContext, args: IdArgs) -> CliResult<()> {
    if ctx.controller.open_folder(&args.id).await {
        return Ok(());
    }
    let message = ctx
        .controller
        .state()
        .toasts
        .iter()
        .rev()
        .find(|toast| toast.kind == ToastKind::Error)
        .map_or_else(|| "Failed to open folder".to_string(), |toast| toast.message.clone());
    Err(CliError::failure(anyhow!(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::path::PathBuf;
    use wallvault_ui::{CatalogConfig, CatalogController};

    use crate::cli::{OutputFormat, PartitionArg};
    use crate::client::tests::service_for;

    fn context_for(server: &MockServer) -> Result<AppContext> {
        Ok(AppContext {
            controller: CatalogController::new(service_for(server)?, &CatalogConfig::default()),
            output: OutputFormat::Json,
        })
    }

    fn item(id: &str, title: &str, subscribed: bool) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "size": 2048,
            "size_formatted": "2.0 KB",
            "subscribed": subscribed,
            "path": format!("/lib/{id}")
        })
    }

    fn mock_side_channels(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "total": {"count": 3, "size": 6144, "size_formatted": "6.0 KB"},
                    "subscribed": {"count": 1, "size": 2048, "size_formatted": "2.0 KB"},
                    "unsubscribed": {"count": 2, "size": 4096, "size_formatted": "4.0 KB"}
                }
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/paths/status");
            then.status(200).json_body(json!({
                "success": true,
                "data": {"library_path_ok": true, "userdata_path_ok": false}
            }));
        });
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wallvault-cli-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn list_applies_filter_once_and_loads_statistics() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_side_channels(&server);
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/wallpapers")
                .query_param("search", "sky")
                .query_param("user", "7656")
                .query_param("subscribed_page", "1")
                .query_param("unsubscribed_page", "1")
                .query_param("page_size", "40");
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "subscribed": {"wallpapers": [item("1", "Sky", true)], "total": 1},
                    "unsubscribed": {"wallpapers": [item("2", "Blue sky", false), item("3", "Skyline", false)], "total": 2}
                }
            }));
        });

        let mut ctx = context_for(&server)?;
        let args = ListArgs {
            filter: FilterArgs {
                search: Some("sky".into()),
                user: Some("7656".into()),
            },
            partition: None,
            subscribed_page: 1,
            unsubscribed_page: 1,
        };
        handle_list(&mut ctx, args).await.map_err(|err| anyhow!(err.display_message()))?;

        list.assert_calls(1);
        let state = ctx.controller.state();
        assert_eq!(state.unsubscribed.total, 2);
        assert_eq!(state.reclaimable().map(|bucket| bucket.count), Some(2));
        assert_eq!(state.path_status.map(|status| status.userdata_path_ok), Some(false));
        Ok(())
    }

    #[tokio::test]
    async fn list_failure_fails_the_command() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_side_channels(&server);
        server.mock(|when, then| {
            when.method(GET).path("/api/wallpapers");
            then.status(500)
                .json_body(json!({"success": false, "error": "Steam library not found"}));
        });

        let mut ctx = context_for(&server)?;
        let result = handle_stats(&mut ctx, FilterArgs::default()).await;
        let Err(err) = result else {
            anyhow::bail!("expected failure");
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.display_message(),
            "Error loading wallpapers: Steam library not found"
        );
        Ok(())
    }

    #[tokio::test]
    async fn rm_continues_past_failures_and_reports_them() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_side_channels(&server);
        let ok = server.mock(|when, then| {
            when.method(DELETE).path("/api/wallpapers/1");
            then.status(200).json_body(json!({"success": true, "message": "deleted"}));
        });
        let locked = server.mock(|when, then| {
            when.method(DELETE).path("/api/wallpapers/2");
            then.status(200).json_body(json!({"success": false, "error": "File is locked"}));
        });
        let also_ok = server.mock(|when, then| {
            when.method(DELETE).path("/api/wallpapers/3");
            then.status(200).json_body(json!({"success": true}));
        });
        let reload = server.mock(|when, then| {
            when.method(GET).path("/api/wallpapers");
            then.status(200).json_body(json!({"success": true, "data": {"subscribed": [], "unsubscribed": []}}));
        });

        let mut ctx = context_for(&server)?;
        let args = RemoveArgs {
            ids: vec!["1".into(), "2".into(), "3".into()],
        };
        let result = handle_remove(&mut ctx, args).await;
        assert!(matches!(result, Err(ref err) if err.exit_code() == 3));
        ok.assert();
        locked.assert();
        also_ok.assert();
        reload.assert_calls(1);
        let summary = ctx.controller.state().last_batch.as_ref().map(BatchOutcome::summary);
        assert_eq!(summary.as_deref(), Some("2 succeeded out of 3"));
        Ok(())
    }

    #[tokio::test]
    async fn purge_requires_confirmation() -> Result<()> {
        let server = MockServer::start_async().await;
        let any = server.mock(|when, then| {
            when.any_request();
            then.status(200);
        });
        let mut ctx = context_for(&server)?;
        let args = PurgeArgs {
            filter: FilterArgs::default(),
            yes: false,
        };
        let result = handle_purge(&mut ctx, args).await;
        assert!(matches!(result, Err(ref err) if err.exit_code() == 2));
        any.assert_calls(0);
        Ok(())
    }

    #[tokio::test]
    async fn purge_deletes_the_whole_filtered_set() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_side_channels(&server);
        server.mock(|when, then| {
            when.method(GET).path("/api/wallpapers").query_param("page_size", "40");
            then.status(200).json_body(json!({
                "success": true,
                "data": {"subscribed": [], "unsubscribed": {"wallpapers": [item("1", "a", false)], "total": 2}}
            }));
        });
        let dump = server.mock(|when, then| {
            when.method(GET)
                .path("/api/wallpapers")
                .query_param("page_size", "999999");
            then.status(200).json_body(json!({
                "success": true,
                "data": {"subscribed": [], "unsubscribed": [item("1", "a", false), item("2", "b", false)]}
            }));
        });
        let deletes = server.mock(|when, then| {
            when.method(DELETE).path_matches(r"^/api/wallpapers/[12]$");
            then.status(200).json_body(json!({"success": true}));
        });

        let mut ctx = context_for(&server)?;
        let args = PurgeArgs {
            filter: FilterArgs::default(),
            yes: true,
        };
        handle_purge(&mut ctx, args).await.map_err(|err| anyhow!(err.display_message()))?;
        dump.assert_calls(1);
        deletes.assert_calls(2);
        Ok(())
    }

    #[tokio::test]
    async fn export_writes_csv_named_after_partition_and_date() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_side_channels(&server);
        server.mock(|when, then| {
            when.method(GET).path("/api/wallpapers");
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "subscribed": [item("7", "Foo \"Bar\"", true)],
                    "unsubscribed": []
                }
            }));
        });

        let out_dir = temp_dir("export");
        let mut ctx = context_for(&server)?;
        let args = ExportArgs {
            partition: PartitionArg::Subscribed,
            filter: FilterArgs::default(),
            out_dir: out_dir.clone(),
        };
        handle_export(&mut ctx, args).await.map_err(|err| anyhow!(err.display_message()))?;

        let file_name = format!(
            "wallpapers_subscribed_{}.csv",
            Utc::now().date_naive().format("%Y-%m-%d")
        );
        let written = fs::read_to_string(out_dir.join(file_name))?;
        assert!(written.starts_with("\u{feff}ID,Title,Size,Status,Path"));
        assert!(written.contains("7,\"Foo \"\"Bar\"\"\",2.0 KB,Subscribed,\"/lib/7\""));
        fs::remove_dir_all(out_dir)?;
        Ok(())
    }

    #[tokio::test]
    async fn open_failure_reports_notification() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/wallpapers/5/open-folder");
            then.status(200)
                .json_body(json!({"success": false, "error": "No desktop session"}));
        });
        let mut ctx = context_for(&server)?;
        let result = handle_open(&mut ctx, IdArgs { id: "5".into() }).await;
        let Err(err) = result else {
            anyhow::bail!("expected failure");
        };
        assert_eq!(err.display_message(), "Failed to open folder: No desktop session");
        Ok(())
    }
}
