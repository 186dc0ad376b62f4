//! Persistence and environment helpers for the app shell.

use chrono::NaiveDate;
use gloo::storage::{LocalStorage, Storage};
use js_sys::Date;

use crate::core::config::{CatalogConfig, STORAGE_KEY};

pub(crate) const API_BASE_KEY: &str = "wallvault.api_base_url";

/// Catalog tuning, with an optional JSON override kept in local storage.
pub(crate) fn load_catalog_config() -> CatalogConfig {
    match LocalStorage::get::<String>(STORAGE_KEY) {
        Ok(raw) => CatalogConfig::from_json(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid stored catalog config");
            CatalogConfig::default()
        }),
        Err(_) => CatalogConfig::default(),
    }
}

/// Service base URL; empty means the origin that served the page.
pub(crate) fn api_base_url() -> String {
    LocalStorage::get::<String>(API_BASE_KEY)
        .ok()
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Today's date in the browser's local time zone.
pub(crate) fn today() -> NaiveDate {
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1;
    let day = now.get_date();
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .unwrap_or_default()
}
