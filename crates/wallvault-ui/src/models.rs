//! Shared UI models: catalog rows, partitions and notifications.

use std::fmt;
use std::str::FromStr;

use wallvault_api_models::{SubscriptionDetail, WallpaperItem};

/// One of the two disjoint membership groups of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartitionKind {
    /// Items at least one tracked user subscribes to.
    Subscribed,
    /// Items nobody subscribes to any more.
    Unsubscribed,
}

impl PartitionKind {
    /// Both partitions in display order.
    pub const ALL: [Self; 2] = [Self::Subscribed, Self::Unsubscribed];

    /// Lowercase name used in file names and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
        }
    }

    /// Status label written to exports and tables.
    #[must_use]
    pub const fn status_label(self) -> &'static str {
        match self {
            Self::Subscribed => "Subscribed",
            Self::Unsubscribed => "Unsubscribed",
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "subscribed" | "sub" => Ok(Self::Subscribed),
            "unsubscribed" | "unsub" => Ok(Self::Unsubscribed),
            other => Err(format!("unknown partition '{other}'")),
        }
    }
}

/// UI-friendly catalog item used by list, detail and export helpers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogRow {
    /// Stable item identifier.
    pub id: String,
    /// Display title (falls back to `ID: <id>` when missing).
    pub title: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Human-readable size.
    pub size_label: String,
    /// Whether any tracked user subscribes to the item.
    pub subscribed: bool,
    /// Folder location on the service host.
    pub path: String,
    /// Number of subscribing users, when reported.
    pub subscriber_count: Option<u32>,
    /// Per-user subscription records (detail view only).
    pub subscriptions: Vec<SubscriptionDetail>,
    /// Whether the service can serve a preview image.
    pub preview_available: bool,
}

impl CatalogRow {
    /// Status label derived from the membership flag.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.subscribed {
            PartitionKind::Subscribed.status_label()
        } else {
            PartitionKind::Unsubscribed.status_label()
        }
    }
}

impl From<WallpaperItem> for CatalogRow {
    fn from(value: WallpaperItem) -> Self {
        let title = if value.title.trim().is_empty() {
            format!("ID: {}", value.id)
        } else {
            value.title
        };
        let size_label = if value.size_formatted.is_empty() {
            format_size(value.size_bytes)
        } else {
            value.size_formatted
        };
        Self {
            id: value.id,
            title,
            size_bytes: value.size_bytes,
            size_label,
            subscribed: value.subscribed,
            path: value.path,
            subscriber_count: value.subscribed_by_user_count,
            subscriptions: value.subscription_details.unwrap_or_default(),
            preview_available: value.preview_available,
        }
    }
}

/// Format a byte count with 1024-step units and one decimal place.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let bytes = u128::from(bytes);
    let mut divisor: u128 = 1;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if bytes < divisor * 1024 {
            break;
        }
        divisor *= 1024;
        unit = next;
    }
    let tenths = (bytes * 10 + divisor / 2) / divisor;
    format!("{}.{} {unit}", tenths / 10, tenths % 10)
}

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}

/// Toast payload queued by the catalog state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}
