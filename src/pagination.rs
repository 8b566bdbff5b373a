//! The canonical paginated result envelope and the pager built from it.

use serde::{Deserialize, Serialize};

/// Number of pages needed for `total_elements`, never less than one.
pub fn total_pages(total_elements: usize, size: usize) -> usize {
    total_elements.div_ceil(size.max(1)).max(1)
}

/// One page of a filtered and sorted list.
///
/// `total_pages` and `last` are always derived from `page`, `size` and
/// `total_elements`; they are never taken on trust.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: usize, size: usize, total_elements: usize) -> Self {
        let total_pages = total_pages(total_elements, size);
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            last: page + 1 >= total_pages,
        }
    }

    /// Cuts the requested page out of an already filtered and sorted list.
    ///
    /// A page past the end yields empty content, not an error.
    pub fn slice(items: Vec<T>, page: usize, size: usize) -> Self {
        let size = size.max(1);
        let total_elements = items.len();
        let start = page.saturating_mul(size).min(total_elements);
        let content = items.into_iter().skip(start).take(size).collect();
        Self::new(content, page, size, total_elements)
    }

    /// True when nothing matched the query at all.
    pub fn is_empty_result(&self) -> bool {
        self.total_elements == 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Pager controls for a list page.
///
/// `links` holds zero-based page indices; `None` marks an ellipsis between
/// the edge pages and the window around the current page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub links: Vec<Option<usize>>,
    pub current: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageLinks {
    pub fn new(current: usize, total_pages: usize) -> Self {
        let links = get_pages(total_pages, current + 1, 2, 2, 4, 2)
            .into_iter()
            .map(|link| link.map(|number| number - 1))
            .collect();

        Self {
            links,
            current,
            has_previous: current > 0,
            has_next: current + 1 < total_pages,
        }
    }

    pub fn for_page<T>(page: &Page<T>) -> Self {
        Self::new(page.page, page.total_pages)
    }
}
