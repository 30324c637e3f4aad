//! The page construction pipeline.
//!
//! A [`PageBuilder`] collects the configuration of one kind of page. Calling
//! [`PageBuilder::freeze`] validates it and produces an immutable
//! [`PagePipeline`], which can build any number of pages from fresh source
//! sequences. Each build runs these steps in order:
//!
//! 1. drain the source entries, dropping those rejected by the source filter
//! 2. sort the source entries, if the sort targets the source
//! 3. convert every entry
//! 4. drop converted entries rejected by the target filter
//! 5. sort the converted entries, if the sort targets the target
//! 6. cut out the requested page
//!
//! The total element count is the number of entries left after step 4.
//!
//! ```rust
//! use pagebuilder_core::{PageBuilder, SortDirective, SortTarget};
//!
//! let page = PageBuilder::new()
//!     .source_filter(|n: &i32| n % 2 == 0)
//!     .sort(vec![SortDirective::natural().descending()], SortTarget::Target)
//!     .page(0, 3)
//!     .build(1..=10)
//!     .unwrap();
//!
//! assert_eq!(page.content, vec![10, 8, 6]);
//! assert_eq!(page.total_elements(), 5);
//! assert_eq!(page.total_pages(), 2);
//! ```

use crate::pagination::checked_window;
use crate::{
    ComparatorBuilder, ComparatorFactory, Page, PageBuilderResult, PageRequest, Sort, SortTarget, Sortable,
    ValueComparatorFactory, UNBOUNDED,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type Filter<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;
type Converter<S, T> = Arc<dyn Fn(S) -> T + Send + Sync>;
type SharedFactory<V> = Arc<dyn ComparatorFactory<V>>;

/// Staged configuration of a page pipeline from source type `S` to target type `T`.
///
/// Defaults: accept every entry, identity conversion, no sort (applied to the
/// target once set), page 0 with unbounded size.
pub struct PageBuilder<S, T = S> {
    source_filter: Option<Filter<S>>,
    source_comparators: SharedFactory<S>,
    converter: Converter<S, T>,
    target_filter: Option<Filter<T>>,
    target_comparators: SharedFactory<T>,
    sort: Sort,
    sort_target: SortTarget,
    page_number: i64,
    page_size: i64,
}

impl<T: Sortable + 'static> PageBuilder<T, T> {
    /// Creates a builder without conversion.
    #[must_use]
    pub fn new() -> Self {
        Self::with_converter(|entry: T| entry)
    }
}

impl<T: Sortable + 'static> Default for PageBuilder<T, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> PageBuilder<S, T>
where
    S: Sortable + 'static,
    T: Sortable + 'static,
{
    /// Creates a builder converting every source entry with `converter`.
    #[must_use]
    pub fn with_converter<F>(converter: F) -> Self
    where
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        Self {
            source_filter: None,
            source_comparators: Arc::new(ValueComparatorFactory),
            converter: Arc::new(converter),
            target_filter: None,
            target_comparators: Arc::new(ValueComparatorFactory),
            sort: Sort::unsorted(),
            sort_target: SortTarget::default(),
            page_number: 0,
            page_size: i64::from(UNBOUNDED),
        }
    }

    /// Replaces the converter with one producing another target type.
    ///
    /// The target filter and the target comparator factory are reset, since
    /// they were written for the previous target type.
    #[must_use]
    pub fn converter<U, F>(self, converter: F) -> PageBuilder<S, U>
    where
        U: Sortable + 'static,
        F: Fn(S) -> U + Send + Sync + 'static,
    {
        PageBuilder {
            source_filter: self.source_filter,
            source_comparators: self.source_comparators,
            converter: Arc::new(converter),
            target_filter: None,
            target_comparators: Arc::new(ValueComparatorFactory),
            sort: self.sort,
            sort_target: self.sort_target,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

impl<S, T> PageBuilder<S, T> {
    /// Keeps only source entries matching the predicate.
    #[must_use]
    pub fn source_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.source_filter = Some(Arc::new(filter));
        self
    }

    /// Keeps only converted entries matching the predicate.
    #[must_use]
    pub fn target_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.target_filter = Some(Arc::new(filter));
        self
    }

    /// Sets the comparator factory used when sorting source entries.
    #[must_use]
    pub fn source_comparator_factory(mut self, factory: impl ComparatorFactory<S> + 'static) -> Self {
        self.source_comparators = Arc::new(factory);
        self
    }

    /// Sets the comparator factory used when sorting converted entries.
    #[must_use]
    pub fn target_comparator_factory(mut self, factory: impl ComparatorFactory<T> + 'static) -> Self {
        self.target_comparators = Arc::new(factory);
        self
    }

    /// Sets the sort and the representation it is applied to.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<Sort>, target: SortTarget) -> Self {
        self.sort = sort.into();
        self.sort_target = target;
        self
    }

    /// Sets the requested page. Checked by [`freeze`](Self::freeze).
    #[must_use]
    pub fn page(mut self, page_number: i64, page_size: i64) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    /// Requests everything on page 0.
    #[must_use]
    pub fn unpaged(self) -> Self {
        self.page(0, i64::from(UNBOUNDED))
    }

    /// Takes page number, size and sort from a request.
    #[must_use]
    pub fn pageable(self, request: &PageRequest, target: SortTarget) -> Self {
        self.page(i64::from(request.page_number), i64::from(request.page_size))
            .sort(request.sort.clone(), target)
    }

    /// Validates the configuration and freezes it into a reusable pipeline.
    ///
    /// Fails with `InvalidPageRequest` for a negative page number or a
    /// non-positive page size.
    pub fn freeze(self) -> PageBuilderResult<PagePipeline<S, T>> {
        let (page_number, page_size) = checked_window(self.page_number, self.page_size)?;
        Ok(PagePipeline {
            source_filter: self.source_filter,
            source_comparators: self.source_comparators,
            converter: self.converter,
            target_filter: self.target_filter,
            target_comparators: self.target_comparators,
            sort: self.sort,
            sort_target: self.sort_target,
            page_number,
            page_size,
        })
    }

    /// Freezes the configuration and builds a single page.
    pub fn build(self, entries: impl IntoIterator<Item = S>) -> PageBuilderResult<Page<T>> {
        self.freeze()?.build(entries)
    }
}

impl<S, T> fmt::Debug for PageBuilder<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageBuilder")
            .field("source_filter", &self.source_filter.is_some())
            .field("target_filter", &self.target_filter.is_some())
            .field("sort", &self.sort)
            .field("sort_target", &self.sort_target)
            .field("page_number", &self.page_number)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

/// Validated, immutable page pipeline.
///
/// Building is a pure function of the configuration and the supplied entries,
/// so the same pipeline can be shared between threads.
pub struct PagePipeline<S, T = S> {
    source_filter: Option<Filter<S>>,
    source_comparators: SharedFactory<S>,
    converter: Converter<S, T>,
    target_filter: Option<Filter<T>>,
    target_comparators: SharedFactory<T>,
    sort: Sort,
    sort_target: SortTarget,
    page_number: u32,
    page_size: u32,
}

impl<S, T> PagePipeline<S, T> {
    /// The requested page number.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// The requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The configured sort.
    #[must_use]
    pub const fn sort(&self) -> &Sort {
        &self.sort
    }

    /// The representation the sort is applied to.
    #[must_use]
    pub const fn sort_target(&self) -> SortTarget {
        self.sort_target
    }

    /// Runs the pipeline over `entries`, consuming them once.
    ///
    /// A comparison error aborts the build; no partial page is returned.
    pub fn build(&self, entries: impl IntoIterator<Item = S>) -> PageBuilderResult<Page<T>> {
        let mut drained = 0usize;
        let mut sources: Vec<S> = entries
            .into_iter()
            .inspect(|_| drained += 1)
            .filter(|entry| self.source_filter.as_ref().map_or(true, |accept| accept(entry)))
            .collect();
        let after_source_filter = sources.len();

        if self.sort_target == SortTarget::Source && self.sort.is_sorted() {
            ComparatorBuilder::new()
                .add_all(&self.sort, &*self.source_comparators)
                .build()
                .sort(&mut sources)?;
        }

        let mut targets: Vec<T> = sources
            .into_iter()
            .map(|entry| (self.converter)(entry))
            .filter(|entry| self.target_filter.as_ref().map_or(true, |accept| accept(entry)))
            .collect();

        let applied_sort = if self.sort_target == SortTarget::Target && self.sort.is_sorted() {
            ComparatorBuilder::new()
                .add_all(&self.sort, &*self.target_comparators)
                .build()
                .sort(&mut targets)?;
            self.sort.clone()
        } else {
            Sort::unsorted()
        };

        let total = targets.len();
        let offset = usize::try_from(crate::page_math::first_result(self.page_number, self.page_size))
            .unwrap_or(usize::MAX);
        let start = offset.min(total);
        let end = start
            .saturating_add(usize::try_from(self.page_size).unwrap_or(usize::MAX))
            .min(total);
        targets.truncate(end);
        let content = targets.split_off(start);

        debug!(
            drained,
            after_source_filter,
            total,
            start,
            end,
            page_number = self.page_number,
            page_size = self.page_size,
            sort_target = %self.sort_target,
            "Page built"
        );

        Ok(Page::new(
            content,
            self.page_number,
            self.page_size,
            total as u64,
            applied_sort,
        ))
    }
}

impl<S, T> Clone for PagePipeline<S, T> {
    fn clone(&self) -> Self {
        Self {
            source_filter: self.source_filter.clone(),
            source_comparators: Arc::clone(&self.source_comparators),
            converter: Arc::clone(&self.converter),
            target_filter: self.target_filter.clone(),
            target_comparators: Arc::clone(&self.target_comparators),
            sort: self.sort.clone(),
            sort_target: self.sort_target,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

impl<S, T> fmt::Debug for PagePipeline<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagePipeline")
            .field("sort", &self.sort)
            .field("sort_target", &self.sort_target)
            .field("page_number", &self.page_number)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
