//! Client-side catalog settings.
//!
//! # Design
//! - Every field has a default so partial overrides deserialize cleanly.
//! - Page sizes are `NonZeroU32`; a zero page size cannot be represented.

use std::num::NonZeroU32;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::CatalogError;

/// Quiet period before a search edit triggers a fetch.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;
/// Items per page for both partitions.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(40) {
    Some(size) => size,
    None => NonZeroU32::MIN,
};
/// Page size used to request a whole filtered partition in one response.
pub const DEFAULT_EXPORT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(999_999) {
    Some(size) => size,
    None => NonZeroU32::MAX,
};
/// Local storage key holding a JSON override of [`CatalogConfig`].
pub const STORAGE_KEY: &str = "wallvault.catalog";

/// Tunables for the catalog controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Debounce window for search edits, in milliseconds.
    pub search_debounce_ms: u32,
    /// Items per page.
    pub page_size: NonZeroU32,
    /// Page size for export and purge dumps.
    pub export_page_size: NonZeroU32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
            export_page_size: DEFAULT_EXPORT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.search_debounce_ms))
    }

    /// Parse a JSON override; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the document is malformed or a
    /// page size is zero.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw)
            .map_err(|err| CatalogError::validation(format!("invalid catalog settings: {err}")))
    }
}
