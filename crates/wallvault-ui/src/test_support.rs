//! Shared fixtures and an in-memory [`CatalogService`] for unit tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::num::NonZeroU32;

use async_trait::async_trait;
use wallvault_api_models::{
    CatalogListing, CatalogQuery, CatalogStats, PartitionPage, PathStatus, ServiceConfig,
    StatsBucket, StatsQuery, UserSummary, WallpaperItem,
};

use crate::core::error::CatalogError;
use crate::core::pagination::page_slice;
use crate::models::CatalogRow;
use crate::services::CatalogService;

/// Ten-byte item with title `Item {id}` stored at `/w/{id}`.
pub(crate) fn item(id: &str, subscribed: bool) -> WallpaperItem {
    WallpaperItem {
        id: id.to_string(),
        title: format!("Item {id}"),
        size_bytes: 10,
        size_formatted: "10.0 B".to_string(),
        subscribed,
        path: format!("/w/{id}"),
        subscribed_by_user_count: None,
        subscription_details: None,
        preview_available: false,
        preview_type: None,
    }
}

pub(crate) fn row(id: &str, subscribed: bool) -> CatalogRow {
    CatalogRow::from(item(id, subscribed))
}

pub(crate) fn listing(
    sub_ids: &[&str],
    sub_total: u64,
    unsub_ids: &[&str],
    unsub_total: u64,
) -> CatalogListing {
    CatalogListing {
        subscribed: PartitionPage {
            items: sub_ids.iter().map(|id| item(id, true)).collect(),
            total: sub_total,
            whole_set: false,
        },
        unsubscribed: PartitionPage {
            items: unsub_ids.iter().map(|id| item(id, false)).collect(),
            total: unsub_total,
            whole_set: false,
        },
    }
}

/// One recorded service call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    List(CatalogQuery),
    Detail(String),
    Delete(String),
    OpenFolder(String),
    Stats(StatsQuery),
    Users,
    Config,
    SaveConfig(ServiceConfig),
    PathStatus,
}

/// In-memory catalog that records every call it receives.
///
/// Search matches id or title case-insensitively; the user filter is ignored.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    subscribed: RefCell<Vec<WallpaperItem>>,
    unsubscribed: RefCell<Vec<WallpaperItem>>,
    config: RefCell<ServiceConfig>,
    failing_deletes: BTreeSet<String>,
    fail_open_folder: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeCatalog {
    pub(crate) fn with_subscribed(self, items: impl IntoIterator<Item = WallpaperItem>) -> Self {
        self.subscribed.borrow_mut().extend(items);
        self
    }

    pub(crate) fn with_unsubscribed(self, items: impl IntoIterator<Item = WallpaperItem>) -> Self {
        self.unsubscribed.borrow_mut().extend(items);
        self
    }

    pub(crate) fn failing_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }

    pub(crate) fn failing_open_folder(mut self) -> Self {
        self.fail_open_folder = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn list_queries(&self) -> Vec<CatalogQuery> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every id a delete was attempted for, in call order.
    pub(crate) fn deleted(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Delete(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn find(&self, id: &str) -> Option<WallpaperItem> {
        self.subscribed
            .borrow()
            .iter()
            .chain(self.unsubscribed.borrow().iter())
            .find(|item| item.id == id)
            .cloned()
    }
}

fn matches_search(item: &WallpaperItem, search: Option<&str>) -> bool {
    search.is_none_or(|needle| {
        let needle = needle.to_lowercase();
        item.id.to_lowercase().contains(&needle) || item.title.to_lowercase().contains(&needle)
    })
}

fn page_of(items: &[WallpaperItem], search: Option<&str>, page: u32, page_size: u32) -> PartitionPage {
    let filtered: Vec<&WallpaperItem> = items
        .iter()
        .filter(|item| matches_search(item, search))
        .collect();
    let page_size = NonZeroU32::new(page_size).unwrap_or(NonZeroU32::MIN);
    PartitionPage {
        total: filtered.len() as u64,
        items: page_slice(filtered, page, page_size)
            .into_iter()
            .cloned()
            .collect(),
        whole_set: false,
    }
}

fn bucket(items: &[WallpaperItem]) -> StatsBucket {
    let size = items.iter().map(|item| item.size_bytes).sum();
    StatsBucket {
        count: items.len() as u64,
        size,
        size_formatted: crate::models::format_size(size),
    }
}

#[async_trait(?Send)]
impl CatalogService for FakeCatalog {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogListing, CatalogError> {
        self.record(Call::List(query.clone()));
        let search = query.search.as_deref();
        Ok(CatalogListing {
            subscribed: page_of(
                &self.subscribed.borrow(),
                search,
                query.subscribed_page,
                query.page_size,
            ),
            unsubscribed: page_of(
                &self.unsubscribed.borrow(),
                search,
                query.unsubscribed_page,
                query.page_size,
            ),
        })
    }

    async fn detail(&self, id: &str) -> Result<WallpaperItem, CatalogError> {
        self.record(Call::Detail(id.to_string()));
        self.find(id)
            .ok_or_else(|| CatalogError::Service("Wallpaper not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        self.record(Call::Delete(id.to_string()));
        if self.failing_deletes.contains(id) {
            return Err(CatalogError::Service("Failed to delete wallpaper".into()));
        }
        self.subscribed.borrow_mut().retain(|item| item.id != id);
        self.unsubscribed.borrow_mut().retain(|item| item.id != id);
        Ok(())
    }

    async fn open_folder(&self, id: &str) -> Result<(), CatalogError> {
        self.record(Call::OpenFolder(id.to_string()));
        if self.fail_open_folder {
            return Err(CatalogError::Transport("no desktop session".into()));
        }
        Ok(())
    }

    async fn stats(&self, query: &StatsQuery) -> Result<CatalogStats, CatalogError> {
        self.record(Call::Stats(query.clone()));
        let subscribed = bucket(&self.subscribed.borrow());
        let unsubscribed = bucket(&self.unsubscribed.borrow());
        let total = StatsBucket {
            count: subscribed.count + unsubscribed.count,
            size: subscribed.size + unsubscribed.size,
            size_formatted: crate::models::format_size(subscribed.size + unsubscribed.size),
        };
        Ok(CatalogStats {
            total,
            subscribed,
            unsubscribed,
        })
    }

    async fn users(&self) -> Result<Vec<UserSummary>, CatalogError> {
        self.record(Call::Users);
        Ok(vec![UserSummary {
            id: "76561198000000001".into(),
            display_name: "primary".into(),
            subscription_count: u32::try_from(self.subscribed.borrow().len()).unwrap_or(u32::MAX),
        }])
    }

    async fn config(&self) -> Result<ServiceConfig, CatalogError> {
        self.record(Call::Config);
        Ok(self.config.borrow().clone())
    }

    async fn save_config(&self, config: &ServiceConfig) -> Result<(), CatalogError> {
        self.record(Call::SaveConfig(config.clone()));
        *self.config.borrow_mut() = config.clone();
        Ok(())
    }

    async fn path_status(&self) -> Result<PathStatus, CatalogError> {
        self.record(Call::PathStatus);
        Ok(PathStatus {
            library_path_ok: true,
            userdata_path_ok: true,
        })
    }
}
