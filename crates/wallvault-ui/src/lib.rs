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
//! Wallvault catalog controller.
//!
//! The DOM-free state machine (query building, pagination, fetch freshness,
//! selection, bulk operations and CSV export) compiles natively so it can be
//! tested and driven from the CLI. The Yew shell that projects it into the
//! browser is only built for `wasm32`.

pub mod controller;
pub mod core;
pub mod features;
pub mod models;
pub mod runtime;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

pub use controller::CatalogController;
pub use core::config::CatalogConfig;
pub use core::error::CatalogError;
pub use features::catalog::actions::{Command, Effect};
pub use features::catalog::state::CatalogState;
pub use models::PartitionKind;
pub use services::CatalogService;
