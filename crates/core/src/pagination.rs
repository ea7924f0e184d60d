//! Page windows over in-memory lists.
//!
//! [`Pagination`] tracks `total_items`, `items_per_page`, and a 1-based
//! `current_page`. The current page is always kept inside
//! `1..=total_pages()`, so shrinking the list or growing the page size pulls
//! it back to the last valid page.
//!
//! ```
//! use larder_core::Pagination;
//!
//! let mut pages = Pagination::new(95, 10);
//! assert_eq!(pages.total_pages(), 10);
//!
//! pages.go_to_page(11);
//! assert_eq!(pages.current_page(), 10);
//!
//! pages.go_to_page(5);
//! assert_eq!((pages.start_index(), pages.end_index()), (40, 49));
//! ```

use std::ops::Range;

use serde::Serialize;

/// Sentinel used by renderers that want a flat integer list.
pub const ELLIPSIS: i64 = -1;

/// Page-number lists switch to a windowed view above this many pages.
const MAX_FULL_PAGE_LIST: usize = 7;

/// One entry in a rendered page-number list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLink {
    /// A clickable page number (1-based).
    Page(usize),
    /// A gap in the sequence.
    Ellipsis,
}

impl PageLink {
    /// Page number, or [`ELLIPSIS`] for a gap.
    #[must_use]
    pub fn as_sentinel(self) -> i64 {
        match self {
            Self::Page(page) => i64::try_from(page).unwrap_or(i64::MAX),
            Self::Ellipsis => ELLIPSIS,
        }
    }
}

/// Pagination state for a list of `total_items` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    total_items: usize,
    items_per_page: usize,
    current_page: usize,
}

impl Pagination {
    /// Start on page 1. An `items_per_page` of zero is treated as one.
    #[must_use]
    pub fn new(total_items: usize, items_per_page: usize) -> Self {
        Self {
            total_items,
            items_per_page: items_per_page.max(1),
            current_page: 1,
        }
    }

    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(total_items / items_per_page)`, never less than 1.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        let pages = self.total_items.div_ceil(self.items_per_page);
        if pages == 0 { 1 } else { pages }
    }

    /// Zero-based index of the first item on the current page.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        (self.current_page - 1) * self.items_per_page
    }

    /// Zero-based index of the last item on the current page (inclusive).
    ///
    /// For an empty list this is `0`, same as [`Self::start_index`]; use
    /// [`Self::range`] when the difference matters.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.range().end.saturating_sub(1).max(self.start_index())
    }

    /// Half-open range of item indices on the current page.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.start_index().min(self.total_items);
        let end = (start + self.items_per_page).min(self.total_items);
        start..end
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Jump to `page`, clamped to `1..=total_pages()`.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// Resize the list, pulling the current page back if it fell off the end.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.go_to_page(self.current_page);
    }

    /// Change the page size, pulling the current page back if needed.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.go_to_page(self.current_page);
    }

    /// Page-number list for rendering.
    ///
    /// Up to seven pages are listed in full. Beyond that the list shows the
    /// first page, the pages around the current one, and the last page, with
    /// an ellipsis marking each gap. Near either end a run of five pages is
    /// shown instead, so that side needs no ellipsis.
    #[must_use]
    pub fn page_links(&self) -> Vec<PageLink> {
        let total = self.total_pages();
        let current = self.current_page;

        if total <= MAX_FULL_PAGE_LIST {
            return (1..=total).map(PageLink::Page).collect();
        }

        let mut links = Vec::with_capacity(MAX_FULL_PAGE_LIST);
        if current <= 4 {
            links.extend((1..=5).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        } else if current >= total - 3 {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((total - 4..=total).map(PageLink::Page));
        } else {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((current - 1..=current + 1).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        }
        links
    }

    /// [`Self::page_links`] flattened to integers, with [`ELLIPSIS`] for gaps.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<i64> {
        self.page_links()
            .into_iter()
            .map(PageLink::as_sentinel)
            .collect()
    }

    /// The current page's slice of `items`.
    ///
    /// Pure: the list is neither stored nor cached. A list shorter than
    /// `total_items` yields whatever part of the window it covers.
    #[must_use]
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Range { start, end } = self.range();
        let end = end.min(items.len());
        items.get(start.min(end)..end).unwrap_or_default()
    }
}
