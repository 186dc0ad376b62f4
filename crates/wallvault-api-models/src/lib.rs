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
//! Shared HTTP DTOs for the Wallvault catalog service.
//!
//! These types are re-used by the browser shell and the CLI for request/response
//! encoding so both clients agree on one contract. Every response is wrapped in a
//! `{success, data, error}` envelope ([`ApiResponse`]).

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Route constants and path builders for the catalog service.
pub mod paths {
    /// Catalog listing endpoint (subscribed + unsubscribed pages).
    pub const WALLPAPERS: &str = "/api/wallpapers";
    /// Storage statistics endpoint.
    pub const STATS: &str = "/api/stats";
    /// Known Steam users endpoint.
    pub const USERS: &str = "/api/users";
    /// Service configuration endpoint (GET + POST).
    pub const CONFIG: &str = "/api/config";
    /// Library/userdata path availability check.
    pub const PATH_STATUS: &str = "/api/paths/status";

    /// Detail and delete endpoint for a single item.
    #[must_use]
    pub fn wallpaper(id: &str) -> String {
        format!("{WALLPAPERS}/{}", urlencoding::encode(id))
    }

    /// Open-containing-folder endpoint for a single item.
    #[must_use]
    pub fn open_folder(id: &str) -> String {
        format!("{}/open-folder", wallpaper(id))
    }

    /// Preview image endpoint for a single item.
    #[must_use]
    pub fn preview(id: &str) -> String {
        format!("{}/preview", wallpaper(id))
    }
}

/// Envelope wrapping every catalog service response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// Whether the service handled the request.
    pub success: bool,
    /// Payload for successful responses.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure reason reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message (some endpoints report failures here instead of `error`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope for command endpoints that carry no payload.
pub type ApiAck = ApiResponse<IgnoredAny>;

impl<T> ApiResponse<T> {
    /// Message describing a `success: false` response.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request failed".to_string())
    }

    /// Extract the payload, turning service-reported failures into their message.
    ///
    /// # Errors
    ///
    /// Returns the service message when `success` is false, or a fixed message when
    /// a successful response carries no data.
    pub fn into_data(self) -> Result<T, String> {
        if !self.success {
            return Err(self.failure_message());
        }
        self.data
            .ok_or_else(|| "response did not include data".to_string())
    }

    /// Check a command acknowledgement, ignoring any payload.
    ///
    /// # Errors
    ///
    /// Returns the service message when `success` is false.
    pub fn into_ack(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.failure_message())
        }
    }
}

/// Timestamp of a user's subscription; the service reports `"unknown"` when Steam
/// has no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscribedAt {
    /// Subscription time is known.
    At(DateTime<Utc>),
    /// Subscription time was not recorded.
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for SubscribedAt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Epoch(i64),
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Epoch(secs) => DateTime::<Utc>::from_timestamp(secs, 0).map_or(Self::Unknown, Self::At),
            Raw::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map_or(Self::Unknown, |parsed| Self::At(parsed.with_timezone(&Utc))),
            Raw::Other(_) => Self::Unknown,
        })
    }
}

impl Serialize for SubscribedAt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::At(at) => serializer.serialize_str(&at.to_rfc3339()),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Per-user subscription record attached to item details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionDetail {
    /// Steam user identifier.
    pub user_id: String,
    /// Whether the subscription is still active for the user.
    #[serde(default)]
    pub is_active: bool,
    /// When the user subscribed.
    #[serde(default)]
    pub time_subscribed: SubscribedAt,
}

/// Catalog item as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WallpaperItem {
    /// Workshop item identifier (opaque, stable).
    pub id: String,
    /// Title from the item's project file.
    #[serde(default)]
    pub title: String,
    /// Folder size in bytes.
    #[serde(default, rename = "size", alias = "size_bytes")]
    pub size_bytes: u64,
    /// Human-readable size computed by the service.
    #[serde(default)]
    pub size_formatted: String,
    /// Whether any tracked user is subscribed to the item.
    #[serde(default)]
    pub subscribed: bool,
    /// Folder location on the service host.
    #[serde(default)]
    pub path: String,
    /// Number of users subscribed to the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed_by_user_count: Option<u32>,
    /// Per-user subscription records (detail responses only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_details: Option<Vec<SubscriptionDetail>>,
    /// Whether a preview image exists.
    #[serde(default)]
    pub preview_available: bool,
    /// Preview media type (`image`, `gif`, `video`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_type: Option<String>,
}

/// One partition's slice of a listing response.
///
/// The service answers either with an envelope carrying an explicit total or,
/// for older deployments, a bare array whose length is the total. Nothing in the
/// response negotiates which shape is used, so both are decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PartitionPayload {
    /// Paginated envelope.
    Page {
        /// Items on the requested page.
        wallpapers: Vec<WallpaperItem>,
        /// Item count under the active filter, independent of page size.
        #[serde(default)]
        total: Option<u64>,
    },
    /// Legacy bare array (unpaginated).
    Legacy(Vec<WallpaperItem>),
}

impl Default for PartitionPayload {
    fn default() -> Self {
        Self::Legacy(Vec::new())
    }
}

impl PartitionPayload {
    /// Normalise either shape into items plus total.
    #[must_use]
    pub fn into_page(self) -> PartitionPage {
        match self {
            Self::Page { wallpapers, total } => {
                let len = wallpapers.len() as u64;
                PartitionPage {
                    total: total.unwrap_or(len).max(len),
                    items: wallpapers,
                    whole_set: false,
                }
            }
            Self::Legacy(items) => PartitionPage {
                total: items.len() as u64,
                items,
                whole_set: true,
            },
        }
    }
}

/// Listing payload returned by [`paths::WALLPAPERS`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogListData {
    /// Subscribed partition.
    #[serde(default)]
    pub subscribed: PartitionPayload,
    /// Unsubscribed partition.
    #[serde(default)]
    pub unsubscribed: PartitionPayload,
}

/// Normalised page of one partition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionPage {
    /// Items on the page, in service order.
    pub items: Vec<WallpaperItem>,
    /// Item count under the active filter.
    pub total: u64,
    /// The service sent every matching item instead of one page; the caller
    /// cuts out the page it asked for.
    pub whole_set: bool,
}

/// Normalised listing with both partitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogListing {
    /// Subscribed partition page.
    pub subscribed: PartitionPage,
    /// Unsubscribed partition page.
    pub unsubscribed: PartitionPage,
}

impl From<CatalogListData> for CatalogListing {
    fn from(value: CatalogListData) -> Self {
        Self {
            subscribed: value.subscribed.into_page(),
            unsubscribed: value.unsubscribed.into_page(),
        }
    }
}

/// Canonical listing request. Absent fields mean "no constraint".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Free-text filter matched against title and id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Restrict to items owned by this user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// 1-based page of the subscribed partition.
    pub subscribed_page: u32,
    /// 1-based page of the unsubscribed partition.
    pub unsubscribed_page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl CatalogQuery {
    /// Query-string pairs in a stable order, omitting absent constraints.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(user) = &self.user {
            pairs.push(("user", user.clone()));
        }
        pairs.push(("subscribed_page", self.subscribed_page.to_string()));
        pairs.push(("unsubscribed_page", self.unsubscribed_page.to_string()));
        pairs.push(("page_size", self.page_size.to_string()));
        pairs
    }
}

/// Statistics request scoped by the same user filter as the listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StatsQuery {
    /// Restrict statistics to this user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl StatsQuery {
    /// Query-string pairs, omitting absent constraints.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.user
            .iter()
            .map(|user| ("user", user.clone()))
            .collect()
    }
}

/// Count and size of one statistics bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StatsBucket {
    /// Number of items.
    #[serde(default)]
    pub count: u64,
    /// Total size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Human-readable total size.
    #[serde(default)]
    pub size_formatted: String,
}

/// Storage statistics returned by [`paths::STATS`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogStats {
    /// All items.
    #[serde(default)]
    pub total: StatsBucket,
    /// Subscribed items.
    #[serde(default)]
    pub subscribed: StatsBucket,
    /// Unsubscribed items.
    #[serde(default)]
    pub unsubscribed: StatsBucket,
}

impl CatalogStats {
    /// Space that deleting every unsubscribed item would free.
    #[must_use]
    pub const fn reclaimable(&self) -> &StatsBucket {
        &self.unsubscribed
    }
}

/// Steam user known to the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    /// Steam user identifier.
    pub id: String,
    /// Persona name.
    #[serde(default)]
    pub display_name: String,
    /// Number of items the user subscribes to.
    #[serde(default)]
    pub subscription_count: u32,
}

/// Path availability reported by [`paths::PATH_STATUS`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PathStatus {
    /// Whether the configured library path exists.
    #[serde(default)]
    pub library_path_ok: bool,
    /// Whether the configured userdata path exists.
    #[serde(default)]
    pub userdata_path_ok: bool,
}

/// Default bind host sent when saving configuration.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
/// Default service port.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

fn default_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

/// Server section of the service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Debug mode toggle.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

/// Service configuration as read from and written to [`paths::CONFIG`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ServiceConfig {
    /// Steam library root.
    #[serde(default)]
    pub steam_library_path: String,
    /// Steam userdata root.
    #[serde(default)]
    pub steam_userdata_path: String,
    /// Server bind settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// Validation failures raised before a configuration is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// Port was not an integer in `1..=65535`.
    #[error("port must be a number between 1 and 65535 (got '{value}')")]
    InvalidPort {
        /// Raw value provided by the caller.
        value: String,
    },
}

/// Parse a user-entered port, enforcing the `1..=65535` range.
///
/// # Errors
///
/// Returns [`ConfigValidationError::InvalidPort`] when the value is not an integer
/// in range.
pub fn parse_port(raw: &str) -> Result<u16, ConfigValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .filter(|port| (1..=65_535).contains(port))
        .and_then(|port| u16::try_from(port).ok())
        .ok_or_else(|| ConfigValidationError::InvalidPort {
            value: trimmed.to_string(),
        })
}

/// Raw settings form input; converted to a [`ServiceConfig`] only once valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigForm {
    /// Steam library root as typed.
    pub steam_library_path: String,
    /// Steam userdata root as typed.
    pub steam_userdata_path: String,
    /// Port as typed.
    pub port: String,
    /// Debug toggle.
    pub debug: bool,
}

impl ConfigForm {
    /// Prefill the form from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            steam_library_path: config.steam_library_path.clone(),
            steam_userdata_path: config.steam_userdata_path.clone(),
            port: config.server.port.to_string(),
            debug: config.server.debug,
        }
    }

    /// Validate the form and build the submission payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] when the port is out of range.
    pub fn validate(&self) -> Result<ServiceConfig, ConfigValidationError> {
        let port = parse_port(&self.port)?;
        Ok(ServiceConfig {
            steam_library_path: self.steam_library_path.trim().to_string(),
            steam_userdata_path: self.steam_userdata_path.trim().to_string(),
            server: ServerSettings {
                host: default_host(),
                port,
                debug: self.debug,
            },
        })
    }
}
