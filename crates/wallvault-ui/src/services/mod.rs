//! Catalog service collaborator interface.
//!
//! # Design
//! - One async trait covers every remote operation the controller needs; the
//!   browser and the CLI each provide an HTTP implementation.
//! - Futures are not required to be `Send` so the trait works on wasm32.

use async_trait::async_trait;
use wallvault_api_models::{
    ApiResponse, CatalogListing, CatalogQuery, CatalogStats, PathStatus, ServiceConfig,
    StatsQuery, UserSummary, WallpaperItem,
};

use crate::core::error::CatalogError;

#[cfg(target_arch = "wasm32")]
pub mod http;

/// Remote catalog store.
#[async_trait(?Send)]
pub trait CatalogService {
    /// List one page of each partition.
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogListing, CatalogError>;

    /// Fetch one item including its subscription details.
    async fn detail(&self, id: &str) -> Result<WallpaperItem, CatalogError>;

    /// Delete one item from disk.
    async fn delete(&self, id: &str) -> Result<(), CatalogError>;

    /// Ask the service host to open the item's folder.
    async fn open_folder(&self, id: &str) -> Result<(), CatalogError>;

    /// Storage statistics scoped by the user filter.
    async fn stats(&self, query: &StatsQuery) -> Result<CatalogStats, CatalogError>;

    /// Known users.
    async fn users(&self) -> Result<Vec<UserSummary>, CatalogError>;

    /// Current service configuration.
    async fn config(&self) -> Result<ServiceConfig, CatalogError>;

    /// Replace the service configuration.
    async fn save_config(&self, config: &ServiceConfig) -> Result<(), CatalogError>;

    /// Library/userdata path availability.
    async fn path_status(&self) -> Result<PathStatus, CatalogError>;
}

/// Unwrap a decoded envelope, surfacing `success: false` verbatim.
///
/// # Errors
///
/// Returns [`CatalogError::Service`] with the service's message.
pub fn envelope_data<T>(envelope: ApiResponse<T>) -> Result<T, CatalogError> {
    envelope.into_data().map_err(CatalogError::Service)
}

/// Check a command acknowledgement, surfacing `success: false` verbatim.
///
/// # Errors
///
/// Returns [`CatalogError::Service`] with the service's message.
pub fn envelope_ack<T>(envelope: ApiResponse<T>) -> Result<(), CatalogError> {
    envelope.into_ack().map_err(CatalogError::Service)
}
