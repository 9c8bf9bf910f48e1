//! Fixed-size, zero-based page windows over an already fetched list.

use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(2).expect("non-zero");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    /// Zero-based index of the page shown, clamped into range.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T: Clone> PageWindow<T> {
    pub fn paginate(items: &[T], requested_page: usize, page_size: NonZeroUsize) -> Self {
        let size = page_size.get();
        let total_items = items.len();
        let total_pages = total_items.div_ceil(size);
        let page = requested_page.min(total_pages.saturating_sub(1));
        let start = page * size;
        let end = (start + size).min(total_items);
        let window = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

        Self {
            items: window,
            page,
            total_pages,
            total_items,
        }
    }
}

impl<T> PageWindow<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn previous_page(&self) -> Option<usize> {
        self.has_previous().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.page + 1)
    }

    /// Controls are only worth showing when there is more than one page.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }
}
