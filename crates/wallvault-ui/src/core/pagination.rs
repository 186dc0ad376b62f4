//! Page windows for the two independently paginated partitions.
//!
//! # Design
//! - The first and last page are always listed, plus every page within
//!   [`PAGE_WINDOW`] of the current one.
//! - Gaps collapse to one [`PageSlot::Ellipsis`]; a gap of exactly one page is
//!   listed as that page instead.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

/// Neighbours listed on each side of the current page.
pub const PAGE_WINDOW: u32 = 2;

/// Entry of the compressed page list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSlot {
    /// Clickable page number.
    Page(u32),
    /// Two or more hidden pages.
    Ellipsis,
}

/// Pagination metadata for one partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    /// Number of pages under the current filter (at least 1).
    pub page_count: u32,
    /// Compressed, ordered page list.
    pub visible: Vec<PageSlot>,
    /// Whether a previous page exists.
    pub can_prev: bool,
    /// Whether a next page exists.
    pub can_next: bool,
}

/// Number of pages needed to show `total` items.
#[must_use]
pub fn page_count(total: u64, page_size: NonZeroU32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.get())).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Whether `page` addresses an existing page.
#[must_use]
pub fn is_valid_page(page: u32, total: u64, page_size: NonZeroU32) -> bool {
    (1..=page_count(total, page_size)).contains(&page)
}

/// Cut the items of `page` out of a whole, unpaginated result set.
#[must_use]
pub fn page_slice<T>(items: Vec<T>, page: u32, page_size: NonZeroU32) -> Vec<T> {
    let size = usize::try_from(page_size.get()).unwrap_or(usize::MAX);
    let skip = usize::try_from(page.saturating_sub(1))
        .unwrap_or(usize::MAX)
        .saturating_mul(size);
    items.into_iter().skip(skip).take(size).collect()
}

/// Compute the page view for `current` of `total` items.
#[must_use]
pub fn paginate(current: u32, total: u64, page_size: NonZeroU32) -> PageView {
    let page_count = page_count(total, page_size);
    let anchor = current.clamp(1, page_count);

    let mut pages = BTreeSet::from([1, page_count]);
    let low = anchor.saturating_sub(PAGE_WINDOW).max(1);
    let high = anchor.saturating_add(PAGE_WINDOW).min(page_count);
    pages.extend(low..=high);

    let mut visible = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<u32> = None;
    for page in pages {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                2 => visible.push(PageSlot::Page(prev + 1)),
                _ => visible.push(PageSlot::Ellipsis),
            }
        }
        visible.push(PageSlot::Page(page));
        previous = Some(page);
    }

    PageView {
        page_count,
        visible,
        can_prev: current > 1,
        can_next: current < page_count,
    }
}
