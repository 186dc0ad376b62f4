#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Telemetry primitives shared across the Wallvault clients.
//!
//! Centralises logging setup so the CLI and any native tooling report through the
//! same tracing subscriber and carry the same build identifier.

mod init;

pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};

/// Open the span wrapping one CLI command invocation.
#[must_use]
pub fn command_span(command: &'static str) -> tracing::Span {
    tracing::info_span!("command", name = command, build_sha = %build_sha())
}
