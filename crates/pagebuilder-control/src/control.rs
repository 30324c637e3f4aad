//! The rendering bundle of a page.

use crate::factory::PageControlFactory;
use crate::links::PaginationLinkSet;
use crate::params::ParamNames;
use crate::selector::PageSizeOption;
use pagebuilder_core::{Page, PageBuilderResult, UNBOUNDED};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything a UI needs to render one page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageControl<T> {
    pub page: Page<T>,
    pub pagination: PaginationLinkSet,
    pub page_size_options: Vec<PageSizeOption>,
    pub param_names: ParamNames,
    /// The page's sort, one value per sort parameter.
    pub sort_param_values: Vec<String>,
    pub query_supported: bool,
    /// The free-text query, if the listing supports one and it is not blank.
    pub query: Option<String>,
}

impl<T> PageControl<T> {
    /// Builds the controls of `page` with `factory`.
    ///
    /// A page size of 0 is shown as unbounded. Without `locale` the factory's
    /// configured default locale labels the selector. The query is dropped if
    /// the configuration does not support one.
    ///
    /// # Errors
    ///
    /// Fails with whatever the factory fails with, e.g.
    /// [`PageBuilderError::InvalidPageState`](pagebuilder_core::PageBuilderError::InvalidPageState)
    /// for an empty page behind the last one.
    pub fn new(
        factory: &dyn PageControlFactory,
        page: Page<T>,
        base_url: &str,
        query: Option<&str>,
        locale: Option<&str>,
    ) -> PageBuilderResult<Self> {
        let config = factory.config();
        let query = query
            .filter(|q| config.query_supported && !q.trim().is_empty())
            .map(str::to_string);
        let locale = locale.or(config.default_locale.as_deref()).unwrap_or_default();
        let selected = if page.size() == 0 { UNBOUNDED } else { page.size() };

        let pagination = factory.pagination(&page.info, &page.sort, base_url, query.as_deref())?;
        let page_size_options = factory.page_size_options(selected, locale)?;

        debug!(
            page = page.number(),
            total_pages = pagination.total_pages,
            options = page_size_options.len(),
            "Built page control"
        );

        Ok(Self {
            pagination,
            page_size_options,
            param_names: ParamNames::from(config),
            sort_param_values: page.sort.to_param_values(),
            query_supported: config.query_supported,
            query,
            page,
        })
    }

    /// The selected page-size entry.
    #[must_use]
    pub fn selected_page_size(&self) -> Option<&PageSizeOption> {
        self.page_size_options.iter().find(|option| option.selected)
    }
}
