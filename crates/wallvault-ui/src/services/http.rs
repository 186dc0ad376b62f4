//! Browser [`CatalogService`] over `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wallvault_api_models::{
    ApiAck, ApiResponse, CatalogListData, CatalogListing, CatalogQuery, CatalogStats, PathStatus,
    ServiceConfig, StatsQuery, UserSummary, WallpaperItem, paths,
};

use crate::core::error::CatalogError;
use crate::core::query::{catalog_path, stats_path};
use crate::services::{CatalogService, envelope_ack, envelope_data};

/// REST client for the catalog service. An empty base URL targets the origin
/// that served the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct HttpCatalogService {
    base_url: String,
}

impl HttpCatalogService {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(request: Request) -> Result<ApiResponse<T>, CatalogError> {
    let response = request
        .send()
        .await
        .map_err(|err| CatalogError::Transport(err.to_string()))?;
    let status = response.status();
    response
        .json::<ApiResponse<T>>()
        .await
        .map_err(|err| CatalogError::Decode(format!("HTTP {status}: {err}")))
}

#[async_trait(?Send)]
impl CatalogService for HttpCatalogService {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogListing, CatalogError> {
        let envelope =
            decode::<CatalogListData>(Request::get(&self.url(&catalog_path(query)))).await?;
        envelope_data(envelope).map(CatalogListing::from)
    }

    async fn detail(&self, id: &str) -> Result<WallpaperItem, CatalogError> {
        envelope_data(decode(Request::get(&self.url(&paths::wallpaper(id)))).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let envelope: ApiAck = decode(Request::delete(&self.url(&paths::wallpaper(id)))).await?;
        envelope_ack(envelope)
    }

    async fn open_folder(&self, id: &str) -> Result<(), CatalogError> {
        let envelope: ApiAck =
            decode(Request::post(&self.url(&paths::open_folder(id)))).await?;
        envelope_ack(envelope)
    }

    async fn stats(&self, query: &StatsQuery) -> Result<CatalogStats, CatalogError> {
        envelope_data(decode(Request::get(&self.url(&stats_path(query)))).await?)
    }

    async fn users(&self) -> Result<Vec<UserSummary>, CatalogError> {
        envelope_data(decode(Request::get(&self.url(paths::USERS))).await?)
    }

    async fn config(&self) -> Result<ServiceConfig, CatalogError> {
        envelope_data(decode(Request::get(&self.url(paths::CONFIG))).await?)
    }

    async fn save_config(&self, config: &ServiceConfig) -> Result<(), CatalogError> {
        let request = Request::post(&self.url(paths::CONFIG))
            .json(config)
            .map_err(|err| CatalogError::Decode(err.to_string()))?;
        let envelope: ApiAck = decode(request).await?;
        envelope_ack(envelope)
    }

    async fn path_status(&self) -> Result<PathStatus, CatalogError> {
        envelope_data(decode(Request::get(&self.url(paths::PATH_STATUS))).await?)
    }
}
