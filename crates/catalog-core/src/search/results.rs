//! Paginated results and the pagination control model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pages shown without ellipsis.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Pagination metadata as computed by the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether there's a next page.
    pub has_next_page: bool,
    /// Whether there's a previous page.
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// Derive metadata locally. Only the client-side filter path needs this;
    /// everything else uses the server's values.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// First item number on this page (1-indexed), 0 when empty.
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page.saturating_sub(1)) * u64::from(self.limit) + 1
        }
    }

    /// Last item number on this page.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }

    /// The pagination control is hidden for a single page.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }
}

/// Wire envelope `{ data, meta }` of paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// One slot of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => write!(f, "..."),
        }
    }
}

/// Page numbers to render for `page` out of `total_pages`.
///
/// Up to [`MAX_VISIBLE_PAGES`] pages are all shown. Beyond that the strip
/// keeps the first and last page and a window around the current page.
pub fn page_window(page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = Vec::with_capacity(7);
    if page <= 3 {
        items.extend((1..=4).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total_pages));
    } else if page >= total_pages - 2 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((total_pages - 3..=total_pages).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((page - 1..=page + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total_pages));
    }
    items
}

/// Navigation targets of the first/previous/next/last buttons.
///
/// `None` means the button is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNav {
    pub first: Option<u32>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub last: Option<u32>,
}

impl PageNav {
    pub fn from_meta(meta: &PaginationMeta) -> Self {
        let back = meta.has_previous_page && meta.page > 1;
        let forward = meta.has_next_page;
        Self {
            first: back.then_some(1),
            previous: back.then(|| meta.page - 1),
            next: forward.then(|| meta.page + 1),
            last: forward.then_some(meta.total_pages),
        }
    }
}

/// Full model of the pagination control for one metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControl {
    pub current: u32,
    pub items: Vec<PageItem>,
    pub nav: PageNav,
    pub start_item: u64,
    pub end_item: u64,
    pub total: u64,
}

impl PaginationControl {
    /// Build the control, or `None` when it should be hidden.
    pub fn from_meta(meta: &PaginationMeta) -> Option<Self> {
        if !meta.shows_controls() {
            return None;
        }
        Some(Self {
            current: meta.page,
            items: page_window(meta.page, meta.total_pages),
            nav: PageNav::from_meta(meta),
            start_item: meta.start_item(),
            end_item: meta.end_item(),
            total: meta.total,
        })
    }
}
