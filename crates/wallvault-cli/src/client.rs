//! Shared client utilities, error types, and the HTTP catalog service.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use wallvault_api_models::{
    ApiAck, ApiResponse, CatalogListData, CatalogListing, CatalogQuery, CatalogStats, PathStatus,
    ServiceConfig, StatsQuery, UserSummary, WallpaperItem, paths,
};
use wallvault_ui::core::query::{catalog_path, stats_path};
use wallvault_ui::services::{envelope_ack, envelope_data};
use wallvault_ui::{CatalogController, CatalogError, CatalogService};

use crate::cli::OutputFormat;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(message) => Self::Validation(message),
            other => Self::Failure(anyhow!(other)),
        }
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) controller: CatalogController<HttpCatalogService>,
    pub(crate) output: OutputFormat,
}

/// Build the shared HTTP client.
pub(crate) fn build_http_client(timeout_secs: u64) -> CliResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Catalog service reached over REST with `reqwest`.
#[derive(Clone, Debug)]
pub(crate) struct HttpCatalogService {
    client: Client,
    base_url: Url,
}

impl HttpCatalogService {
    /// Endpoints resolve below `base_url`, so a path prefix such as
    /// `http://host/wallvault` is kept.
    pub(crate) fn new(client: Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    fn endpoint(&self, path_and_query: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path_and_query.trim_start_matches('/'))
            .map_err(|err| CatalogError::Transport(format!("invalid URL '{path_and_query}': {err}")))
    }
}

/// Send `request` and decode the service envelope.
///
/// Error statuses still carry an envelope; only an undecodable body on an
/// error status is reported by status code.
async fn decode<T: DeserializeOwned>(request: RequestBuilder) -> Result<ApiResponse<T>, CatalogError> {
    let response = request
        .send()
        .await
        .map_err(|err| CatalogError::Transport(err.to_string()))?;
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| CatalogError::Transport(err.to_string()))?;
    serde_json::from_slice::<ApiResponse<T>>(&bytes).map_err(|err| {
        if status.is_success() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Service(format!("request failed with status {status}"))
        }
    })
}

#[async_trait(?Send)]
impl CatalogService for HttpCatalogService {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogListing, CatalogError> {
        let url = self.endpoint(&catalog_path(query))?;
        let envelope = decode::<CatalogListData>(self.client.get(url)).await?;
        envelope_data(envelope).map(CatalogListing::from)
    }

    async fn detail(&self, id: &str) -> Result<WallpaperItem, CatalogError> {
        let url = self.endpoint(&paths::wallpaper(id))?;
        envelope_data(decode(self.client.get(url)).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let url = self.endpoint(&paths::wallpaper(id))?;
        let envelope: ApiAck = decode(self.client.delete(url)).await?;
        envelope_ack(envelope)
    }

    async fn open_folder(&self, id: &str) -> Result<(), CatalogError> {
        let url = self.endpoint(&paths::open_folder(id))?;
        let envelope: ApiAck = decode(self.client.post(url)).await?;
        envelope_ack(envelope)
    }

    async fn stats(&self, query: &StatsQuery) -> Result<CatalogStats, CatalogError> {
        let url = self.endpoint(&stats_path(query))?;
        envelope_data(decode(self.client.get(url)).await?)
    }

    async fn users(&self) -> Result<Vec<UserSummary>, CatalogError> {
        let url = self.endpoint(paths::USERS)?;
        envelope_data(decode(self.client.get(url)).await?)
    }

    async fn config(&self) -> Result<ServiceConfig, CatalogError> {
        let url = self.endpoint(paths::CONFIG)?;
        envelope_data(decode(self.client.get(url)).await?)
    }

    async fn save_config(&self, config: &ServiceConfig) -> Result<(), CatalogError> {
        let url = self.endpoint(paths::CONFIG)?;
        let envelope: ApiAck = decode(self.client.post(url).json(config)).await?;
        envelope_ack(envelope)
    }

    async fn path_status(&self) -> Result<PathStatus, CatalogError> {
        let url = self.endpoint(paths::PATH_STATUS)?;
        envelope_data(decode(self.client.get(url)).await?)
    }
}
