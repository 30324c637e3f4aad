//! Pagination links and navigation buttons.

use crate::params::{page_url, ParamNames};
use pagebuilder_config::PageControlConfig;
use pagebuilder_core::{EmptyResultPages, PageBuilderError, PageBuilderResult, PageInfo, Sort, UNBOUNDED};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Link to one page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page_number: u64,
    /// Whether this is the page being shown.
    pub active: bool,
    pub url: String,
}

/// One of the first/previous/next/last buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum PageButton {
    /// The button leads to another page.
    Enabled { page_number: u64, url: String },
    /// There is no page to go to.
    Disabled,
}

impl PageButton {
    fn towards(target: Option<u64>, url: impl FnOnce(u64) -> String) -> Self {
        match target {
            Some(page_number) => Self::Enabled {
                page_number,
                url: url(page_number),
            },
            None => Self::Disabled,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Enabled { url, .. } => Some(url.as_str()),
            Self::Disabled => None,
        }
    }

    #[must_use]
    pub const fn page_number(&self) -> Option<u64> {
        match self {
            Self::Enabled { page_number, .. } => Some(*page_number),
            Self::Disabled => None,
        }
    }
}

/// Navigation metadata of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinkSet {
    /// One link per existing page.
    pub all_links: Vec<PageLink>,
    /// The links to show, a contiguous run around the current page.
    pub window: Vec<PageLink>,
    pub first: PageButton,
    pub previous: PageButton,
    pub next: PageButton,
    pub last: PageButton,
    /// Number of links in the window.
    pub window_size: u64,
    pub total_pages: u64,
}

impl PaginationLinkSet {
    /// The link of the page being shown, if it exists.
    #[must_use]
    pub fn active(&self) -> Option<&PageLink> {
        self.all_links.iter().find(|link| link.active)
    }

    /// Page numbers of the window.
    #[must_use]
    pub fn window_page_numbers(&self) -> Vec<u64> {
        self.window.iter().map(|link| link.page_number).collect()
    }
}

/// Page numbers of the visible link window.
///
/// The window holds `min(max_window, total_pages)` pages. An odd window is
/// centered on `current`; an even one has one page more after `current`
/// than before it. Near either end the window is shifted to stay within
/// `0..total_pages`. A `max_window` of 0 is treated as 1.
#[must_use]
pub fn window_bounds(current: u64, total_pages: u64, max_window: u32) -> Range<u64> {
    let size = u64::from(max_window.max(1)).min(total_pages);
    if size == 0 {
        return 0..0;
    }
    let half = size / 2;
    let start = if size % 2 == 0 {
        (current + 1).saturating_sub(half)
    } else {
        current.saturating_sub(half)
    };
    let start = start.min(total_pages - size);
    start..start + size
}

/// Builds [`PaginationLinkSet`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLinkBuilder {
    names: ParamNames,
    max_window: u32,
    empty_result_pages: EmptyResultPages,
}

impl PaginationLinkBuilder {
    #[must_use]
    pub fn new(names: ParamNames, max_window: u32) -> Self {
        Self {
            names,
            max_window,
            empty_result_pages: EmptyResultPages::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &PageControlConfig) -> Self {
        Self::new(ParamNames::from(config), config.max_pagination_window)
            .with_empty_result_pages(config.empty_result_pages)
    }

    #[must_use]
    pub fn with_empty_result_pages(mut self, empty_result_pages: EmptyResultPages) -> Self {
        self.empty_result_pages = empty_result_pages;
        self
    }

    #[must_use]
    pub const fn names(&self) -> &ParamNames {
        &self.names
    }

    /// Builds the links of `page`.
    ///
    /// Every URL carries page number, page size, `sort` and the non-blank
    /// `query` on top of `base_url`. A page size of 0 is rendered as unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`PageBuilderError::InvalidPageState`] if the page has no
    /// content and is not the first page.
    pub fn build(
        &self,
        page: &PageInfo,
        sort: &Sort,
        base_url: &str,
        query: Option<&str>,
    ) -> PageBuilderResult<PaginationLinkSet> {
        if page.number_of_elements == 0 && page.number > 0 {
            return Err(PageBuilderError::InvalidPageState {
                page_number: page.number,
                total_pages: page.total_pages,
            });
        }

        let total_pages = self.empty_result_pages.apply(page.total_pages);
        let current = u64::from(page.number);
        let page_size = if page.size == 0 { UNBOUNDED } else { page.size };
        let url = |page_number| page_url(base_url, &self.names, page_number, page_size, sort, query);

        let all_links: Vec<PageLink> = (0..total_pages)
            .map(|page_number| PageLink {
                page_number,
                active: page_number == current,
                url: url(page_number),
            })
            .collect();

        let bounds = window_bounds(current, total_pages, self.max_window);
        let window: Vec<PageLink> = all_links
            .iter()
            .filter(|link| bounds.contains(&link.page_number))
            .cloned()
            .collect();

        let has_previous = current > 0;
        let has_next = current + 1 < total_pages;

        debug!(
            current,
            total_pages,
            window_start = bounds.start,
            window_end = bounds.end,
            "Built pagination links"
        );

        Ok(PaginationLinkSet {
            first: PageButton::towards(has_previous.then_some(0), url),
            previous: PageButton::towards(has_previous.then(|| current - 1), url),
            next: PageButton::towards(has_next.then(|| current + 1), url),
            last: PageButton::towards(has_next.then(|| total_pages - 1), url),
            window_size: bounds.end - bounds.start,
            all_links,
            window,
            total_pages,
        })
    }
}
