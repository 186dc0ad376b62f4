//! Command-line parsing and dispatch for the Wallvault client.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;
use tracing::Instrument;
use wallvault_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, command_span, init_logging,
};
use wallvault_ui::core::config::DEFAULT_PAGE_SIZE;
use wallvault_ui::models::PartitionKind;
use wallvault_ui::{CatalogConfig, CatalogController};

use crate::client::{AppContext, CliResult, HttpCatalogService, build_http_client, parse_url};
use crate::commands::catalog::{
    handle_export, handle_list, handle_open, handle_path, handle_purge, handle_remove,
    handle_show, handle_stats, handle_users,
};
use crate::commands::config::{handle_config_get, handle_config_set};
use crate::output::log_toasts;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Parses CLI arguments, executes the requested command inside its logging
/// span, and returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("WALLVAULT_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let span = command_span(command_label(&cli.command));
    match dispatch(cli).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let client = build_http_client(cli.timeout)?;
    let config = CatalogConfig {
        page_size: cli.page_size,
        ..CatalogConfig::default()
    };
    let mut ctx = AppContext {
        controller: CatalogController::new(HttpCatalogService::new(client, cli.api_url), &config),
        output: cli.output,
    };

    let result = match cli.command {
        Command::Ls(args) => handle_list(&mut ctx, args).await,
        Command::Stats(args) => handle_stats(&mut ctx, args).await,
        Command::Users => handle_users(&mut ctx).await,
        Command::Show(args) => handle_show(&mut ctx, args).await,
        Command::Path(args) => handle_path(&mut ctx, args).await,
        Command::Rm(args) => handle_remove(&mut ctx, args).await,
        Command::Purge(args) => handle_purge(&mut ctx, args).await,
        Command::Export(args) => handle_export(&mut ctx, args).await,
        Command::Open(args) => handle_open(&mut ctx, args).await,
        Command::Config(ConfigCommand::Get) => handle_config_get(&mut ctx).await,
        Command::Config(ConfigCommand::Set(args)) => handle_config_set(&mut ctx, args).await,
    };
    log_toasts(&ctx.controller.drain_toasts());
    result
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Ls(_) => "ls",
        Command::Stats(_) => "stats",
        Command::Users => "users",
        Command::Show(_) => "show",
        Command::Path(_) => "path",
        Command::Rm(_) => "rm",
        Command::Purge(_) => "purge",
        Command::Export(_) => "export",
        Command::Open(_) => "open",
        Command::Config(ConfigCommand::Get) => "config_get",
        Command::Config(ConfigCommand::Set(_)) => "config_set",
    }
}

#[derive(Parser)]
#[command(name = "wallvault", about = "Inspect and clean up a Steam Workshop wallpaper catalog")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "WALLVAULT_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "WALLVAULT_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "WALLVAULT_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE
    )]
    pub(crate) page_size: NonZeroU32,
    #[arg(
        long,
        global = true,
        env = "WALLVAULT_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "WALLVAULT_LOG_FORMAT",
        help = "Log output format (json or pretty)"
    )]
    pub(crate) log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// List one page of each partition.
    Ls(ListArgs),
    /// Show storage statistics.
    Stats(FilterArgs),
    /// List known Steam users.
    Users,
    /// Show one wallpaper in detail.
    Show(IdArgs),
    /// Print a wallpaper's folder path.
    Path(IdArgs),
    /// Delete wallpapers by id (best effort, one at a time).
    Rm(RemoveArgs),
    /// Delete every unsubscribed wallpaper matching the filter.
    Purge(PurgeArgs),
    /// Write one whole partition to a CSV file.
    Export(ExportArgs),
    /// Open a wallpaper's folder on the service host.
    Open(IdArgs),
    /// Read or change the service configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommand {
    /// Print the service configuration.
    Get,
    /// Change selected configuration fields.
    Set(ConfigSetArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub(crate) struct FilterArgs {
    #[arg(long, help = "Match titles or ids containing this text")]
    pub(crate) search: Option<String>,
    #[arg(long, help = "Restrict to one Steam user id ('all' for everyone)")]
    pub(crate) user: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    #[arg(long, value_enum, help = "Only print this partition")]
    pub(crate) partition: Option<PartitionArg>,
    #[arg(long, default_value_t = 1)]
    pub(crate) subscribed_page: u32,
    #[arg(long, default_value_t = 1)]
    pub(crate) unsubscribed_page: u32,
}

#[derive(Args, Debug)]
pub(crate) struct IdArgs {
    #[arg(help = "Wallpaper identifier")]
    pub(crate) id: String,
}

#[derive(Args, Debug)]
pub(crate) struct RemoveArgs {
    #[arg(required = true, help = "Wallpaper identifiers")]
    pub(crate) ids: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct PurgeArgs {
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    #[arg(long, help = "Confirm the deletion")]
    pub(crate) yes: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[arg(value_enum)]
    pub(crate) partition: PartitionArg,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    #[arg(long, default_value = ".")]
    pub(crate) out_dir: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ConfigSetArgs {
    #[arg(long)]
    pub(crate) library_path: Option<String>,
    #[arg(long)]
    pub(crate) userdata_path: Option<String>,
    #[arg(long)]
    pub(crate) port: Option<String>,
    #[arg(long)]
    pub(crate) debug: Option<bool>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PartitionArg {
    Subscribed,
    Unsubscribed,
}

impl From<PartitionArg> for PartitionKind {
    fn from(value: PartitionArg) -> Self {
        match value {
            PartitionArg::Subscribed => Self::Subscribed,
            PartitionArg::Unsubscribed => Self::Unsubscribed,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}
