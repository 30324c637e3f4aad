//! Page arithmetic.
//!
//! Every helper accepts unknown inputs as `None` and answers `None` instead of
//! guessing. A page size of 0 counts as unknown.

use crate::{Page, PageInfo, PageRequest};
use serde::{Deserialize, Serialize};

fn known_size(page_size: Option<u32>) -> Option<u64> {
    page_size.filter(|size| *size > 0).map(u64::from)
}

/// Number of pages needed for `total_elements`: `ceil(total / size)`.
#[must_use]
pub fn total_pages(total_elements: Option<u64>, page_size: Option<u32>) -> Option<u64> {
    let size = known_size(page_size)?;
    Some(total_elements?.div_ceil(size))
}

/// Page index containing `offset`: `floor(offset / size)`.
#[must_use]
pub fn current_page(offset: Option<u64>, page_size: Option<u32>) -> Option<u64> {
    let size = known_size(page_size)?;
    Some(offset? / size)
}

/// Offset of the previous page, if there is one.
#[must_use]
pub fn previous_offset(offset: Option<u64>, page_size: Option<u32>) -> Option<u64> {
    let size = known_size(page_size)?;
    offset?.checked_sub(size)
}

/// Offset of the next page, if it starts before `total_elements`.
#[must_use]
pub fn next_offset(offset: Option<u64>, page_size: Option<u32>, total_elements: Option<u64>) -> Option<u64> {
    let size = known_size(page_size)?;
    let next = offset?.checked_add(size)?;
    (next < total_elements?).then_some(next)
}

/// Number of rows the page-size selector is split into:
/// `ceil(page_size / max(fields_per_row, page_size))`.
///
/// A page size of 0 gives 0 rows.
#[must_use]
pub fn pagination_window_size(page_size: Option<u32>, fields_per_row: Option<u32>) -> Option<u32> {
    let page_size = page_size?;
    let fields_per_row = fields_per_row?;
    if page_size == 0 {
        return Some(0);
    }
    Some(page_size.div_ceil(fields_per_row.max(page_size)))
}

/// Index of the first element on a page; never overflows.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn first_result(page_number: u32, page_size: u32) -> u64 {
    page_number as u64 * page_size as u64
}

/// How many pages a result without elements reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyResultPages {
    /// One empty page, so "page 1 of 1" can be rendered.
    #[default]
    SinglePage,
    /// No pages at all.
    Zero,
}

impl EmptyResultPages {
    /// Applies the convention to a computed page count.
    #[must_use]
    pub const fn apply(self, total_pages: u64) -> u64 {
        match self {
            Self::SinglePage if total_pages == 0 => 1,
            _ => total_pages,
        }
    }
}

/// Offset-based view of a page whose fields may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindow {
    /// Index of the first element of the page.
    pub offset: Option<u64>,
    /// Requested page size.
    pub page_size: Option<u32>,
    /// Total elements of the result.
    pub total_elements: Option<u64>,
}

impl PageWindow {
    /// Creates a window from its parts.
    #[must_use]
    pub const fn new(offset: Option<u64>, page_size: Option<u32>, total_elements: Option<u64>) -> Self {
        Self {
            offset,
            page_size,
            total_elements,
        }
    }

    /// Number of pages, `None` if a part is unknown.
    #[must_use]
    pub fn total_pages(&self) -> Option<u64> {
        total_pages(self.total_elements, self.page_size)
    }

    /// Zero-based number of the page.
    #[must_use]
    pub fn current_page(&self) -> Option<u64> {
        current_page(self.offset, self.page_size)
    }

    /// Offset of the previous page, if any.
    #[must_use]
    pub fn previous_offset(&self) -> Option<u64> {
        previous_offset(self.offset, self.page_size)
    }

    /// Offset of the next page, if any.
    #[must_use]
    pub fn next_offset(&self) -> Option<u64> {
        next_offset(self.offset, self.page_size, self.total_elements)
    }
}

impl From<&PageInfo> for PageWindow {
    fn from(info: &PageInfo) -> Self {
        Self::new(Some(info.offset()), Some(info.size), Some(info.total_elements))
    }
}

impl<T> From<&Page<T>> for PageWindow {
    fn from(page: &Page<T>) -> Self {
        Self::from(&page.info)
    }
}

impl From<&PageRequest> for PageWindow {
    fn from(request: &PageRequest) -> Self {
        Self::new(Some(request.offset()), Some(request.page_size), None)
    }
}
