//! Canonical request descriptors for the catalog service.

use std::num::NonZeroU32;

use wallvault_api_models::{CatalogQuery, StatsQuery, paths};

use crate::features::catalog::state::FilterState;

/// Build the listing request for the given filter and page cursors.
///
/// The user constraint is omitted for the "all users" filter and the search
/// constraint is omitted for blank text; absence means "no constraint".
#[must_use]
pub fn build_query(
    filter: &FilterState,
    subscribed_page: u32,
    unsubscribed_page: u32,
    page_size: NonZeroU32,
) -> CatalogQuery {
    let search = filter.search.trim();
    CatalogQuery {
        search: (!search.is_empty()).then(|| search.to_string()),
        user: filter.user.as_param().map(str::to_string),
        subscribed_page: subscribed_page.max(1),
        unsubscribed_page: unsubscribed_page.max(1),
        page_size: page_size.get(),
    }
}

/// Build the statistics request, scoped by the same user filter as the listing.
#[must_use]
pub fn build_stats_query(filter: &FilterState) -> StatsQuery {
    StatsQuery {
        user: filter.user.as_param().map(str::to_string),
    }
}

/// Build the listing path including its encoded query string.
#[must_use]
pub fn catalog_path(query: &CatalogQuery) -> String {
    with_query(paths::WALLPAPERS, &query.query_pairs())
}

/// Build the statistics path including its encoded query string.
#[must_use]
pub fn stats_path(query: &StatsQuery) -> String {
    with_query(paths::STATS, &query.query_pairs())
}

fn with_query(base: &str, pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return base.to_string();
    }
    let encoded: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();
    format!("{base}?{}", encoded.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::state::UserFilter;

    fn size(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
    }

    #[test]
    fn all_users_and_blank_search_are_omitted() {
        let filter = FilterState {
            search: "   ".into(),
            user: UserFilter::All,
        };
        let query = build_query(&filter, 1, 3, size(40));
        assert_eq!(query.search, None);
        assert_eq!(query.user, None);
        assert_eq!(query.unsubscribed_page, 3);
        assert_eq!(
            catalog_path(&query),
            "/api/wallpapers?subscribed_page=1&unsubscribed_page=3&page_size=40"
        );
        assert_eq!(stats_path(&build_stats_query(&filter)), "/api/stats");
    }

    #[test]
    fn constraints_are_encoded() {
        let filter = FilterState {
            search: "night sky".into(),
            user: UserFilter::User("7656&1".into()),
        };
        let query = build_query(&filter, 2, 1, size(999_999));
        assert_eq!(
            catalog_path(&query),
            "/api/wallpapers?search=night%20sky&user=7656%261&subscribed_page=2&unsubscribed_page=1&page_size=999999"
        );
        assert_eq!(
            stats_path(&build_stats_query(&filter)),
            "/api/stats?user=7656%261"
        );
    }

    #[test]
    fn zero_page_cursor_is_lifted_to_first_page() {
        let query = build_query(&FilterState::default(), 0, 0, size(10));
        assert_eq!(query.subscribed_page, 1);
        assert_eq!(query.unsubscribed_page, 1);
    }
}
