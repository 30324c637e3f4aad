//! Page requests and pages.

use crate::page_math;
use crate::{PageBuilderError, PageBuilderResult, Sort, SortDirective, ValidateExt};
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

/// Page size meaning "all elements on one page".
pub const UNBOUNDED: u32 = u32::MAX;

/// A request for a page of results.
///
/// Page number and size describe the requested window, not the window that
/// actually exists: a request behind the last element is valid and yields an
/// empty page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PageRequest {
    /// The page number (0-indexed).
    #[serde(default)]
    pub page_number: u32,
    /// The number of items per page; [`UNBOUNDED`] for no limit.
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, message = "page size must be positive"))]
    pub page_size: u32,
    /// Requested order, primary key first.
    #[serde(default)]
    pub sort: Sort,
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Opaque caller payload, carried along untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<serde_json::Value>,
}

const fn default_page_size() -> u32 {
    UNBOUNDED
}

impl PageRequest {
    /// Creates a request, rejecting negative page numbers and non-positive sizes.
    ///
    /// Sizes above [`UNBOUNDED`] are treated as unbounded.
    pub fn of(page_number: i64, page_size: i64) -> PageBuilderResult<Self> {
        let (page_number, page_size) = checked_window(page_number, page_size)?;
        Ok(Self {
            page_number,
            page_size,
            ..Self::default()
        })
    }

    /// A request for everything on page 0.
    #[must_use]
    pub fn unpaged() -> Self {
        Self::default()
    }

    /// Parses raw request parameters leniently.
    ///
    /// Unparsable or negative page numbers fall back to 0, unparsable or
    /// non-positive sizes to [`UNBOUNDED`], unparsable sort values are dropped.
    /// Every fallback is logged.
    #[must_use]
    pub fn from_params<I, V>(page_number: Option<&str>, page_size: Option<&str>, sort: I, query: Option<&str>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let page_number = page_number.map_or(0, |raw| match raw.trim().parse::<u32>() {
            Ok(number) => number,
            Err(_) => {
                warn!(value = raw, "Invalid page number parameter, using 0");
                0
            }
        });
        let page_size = page_size.map_or(UNBOUNDED, |raw| match raw.trim().parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => {
                warn!(value = raw, "Invalid page size parameter, using unbounded size");
                UNBOUNDED
            }
        });
        let sort = sort
            .into_iter()
            .filter(|value| !value.as_ref().trim().is_empty())
            .filter_map(|value| match value.as_ref().parse::<SortDirective>() {
                Ok(directive) => Some(directive),
                Err(err) => {
                    warn!(value = value.as_ref(), error = %err, "Ignoring invalid sort parameter");
                    None
                }
            })
            .collect::<Vec<_>>();

        Self {
            page_number,
            page_size,
            sort: Sort::from(sort),
            query: query.map(str::trim).filter(|q| !q.is_empty()).map(ToString::to_string),
            extension: None,
        }
    }

    /// Replaces the sort.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<Sort>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Attaches an opaque payload.
    #[must_use]
    pub fn with_extension(mut self, extension: serde_json::Value) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Index of the first element of the requested page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        page_math::first_result(self.page_number, self.page_size)
    }

    /// Maximum number of elements on the requested page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }

    /// Returns true if the request has no size limit.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.page_size == UNBOUNDED
    }

    /// Checks a deserialized request.
    pub fn validate_window(&self) -> PageBuilderResult<()> {
        self.validate_request()
            .map_err(|err| PageBuilderError::invalid_request(err.to_string()))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: UNBOUNDED,
            sort: Sort::unsorted(),
            query: None,
            extension: None,
        }
    }
}

/// Converts a signed page window into its unsigned form.
pub(crate) fn checked_window(page_number: i64, page_size: i64) -> PageBuilderResult<(u32, u32)> {
    if page_number < 0 {
        return Err(PageBuilderError::invalid_request(format!(
            "page number must not be negative, was {page_number}"
        )));
    }
    if page_size <= 0 {
        return Err(PageBuilderError::invalid_request(format!(
            "page size must be positive, was {page_size}"
        )));
    }
    let page_number = u32::try_from(page_number).map_err(|_| {
        PageBuilderError::invalid_request(format!("page number {page_number} is too large"))
    })?;
    let page_size = u32::try_from(page_size).unwrap_or(UNBOUNDED);
    Ok((page_number, page_size))
}

/// Position and size information of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The page number (0-indexed).
    pub number: u32,
    /// The requested number of items per page.
    pub size: u32,
    /// The number of elements across all pages.
    pub total_elements: u64,
    /// The number of pages; 0 when there are no elements.
    pub total_pages: u64,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page (or behind it).
    pub last: bool,
    /// The number of items on this page.
    pub number_of_elements: usize,
}

impl PageInfo {
    /// Creates a new page info.
    #[must_use]
    pub fn new(number: u32, size: u32, total_elements: u64, number_of_elements: usize) -> Self {
        let total_pages = page_math::total_pages(Some(total_elements), Some(size)).unwrap_or(0);
        Self {
            number,
            size,
            total_elements,
            total_pages,
            first: number == 0,
            last: u64::from(number) >= total_pages.saturating_sub(1),
            number_of_elements,
        }
    }

    /// Index of the first element of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        page_math::first_result(self.number, self.size)
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Information about this page.
    #[serde(flatten)]
    pub info: PageInfo,
    /// The order the content is guaranteed to be in.
    #[serde(default)]
    pub sort: Sort,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64, sort: Sort) -> Self {
        let number_of_elements = content.len();
        Self {
            content,
            info: PageInfo::new(number, size, total_elements, number_of_elements),
            sort,
        }
    }

    /// Creates an empty, unsorted page.
    #[must_use]
    pub fn empty(number: u32, size: u32) -> Self {
        Self::new(Vec::new(), number, size, 0, Sort::unsorted())
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            info: self.info,
            sort: self.sort,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns the page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.info.number
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.info.size
    }

    /// Returns the total number of elements across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.info.total_elements
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.info.total_pages
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !self.info.last
    }

    /// Returns true if there is a previous page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        !self.info.first
    }

    /// Returns the sort the content is ordered by.
    #[must_use]
    pub const fn sort(&self) -> &Sort {
        &self.sort
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(0, UNBOUNDED)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        let req = PageRequest::of(2, 10).unwrap();
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
        assert!(!req.is_unbounded());
    }

    #[test]
    fn test_page_request_rejects_invalid_window() {
        assert!(matches!(PageRequest::of(-1, 10), Err(PageBuilderError::InvalidPageRequest(_))));
        assert!(matches!(PageRequest::of(0, 0), Err(PageBuilderError::InvalidPageRequest(_))));
        assert!(matches!(PageRequest::of(0, -5), Err(PageBuilderError::InvalidPageRequest(_))));
        assert!(PageRequest::of(i64::from(u32::MAX) + 1, 10).is_err());
    }

    #[test]
    fn test_page_request_huge_size_is_unbounded() {
        let req = PageRequest::of(0, i64::MAX).unwrap();
        assert!(req.is_unbounded());
    }

    #[test]
    fn test_page_request_default_is_unpaged() {
        let req = PageRequest::unpaged();
        assert_eq!(req.page_number, 0);
        assert_eq!(req.page_size, UNBOUNDED);
        assert!(req.sort.is_unsorted());
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let req = PageRequest::of(i64::from(u32::MAX), i64::from(u32::MAX)).unwrap();
        assert_eq!(req.offset(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn test_from_params() {
        let req = PageRequest::from_params(Some("3"), Some("25"), ["city,desc", "name"], Some(" berlin "));
        assert_eq!(req.page_number, 3);
        assert_eq!(req.page_size, 25);
        assert_eq!(
            req.sort,
            Sort::by([SortDirective::by("city").descending(), SortDirective::by("name")])
        );
        assert_eq!(req.query.as_deref(), Some("berlin"));
    }

    #[test]
    fn test_from_params_falls_back() {
        let req = PageRequest::from_params(Some("-1"), Some("abc"), ["city,sideways", ""], Some("  "));
        assert_eq!(req.page_number, 0);
        assert_eq!(req.page_size, UNBOUNDED);
        assert!(req.sort.is_unsorted());
        assert_eq!(req.query, None);

        let req = PageRequest::from_params(None, Some("0"), Vec::<String>::new(), None);
        assert_eq!(req.page_size, UNBOUNDED);
    }

    #[test]
    fn test_deserialized_request_validation() {
        let req: PageRequest = serde_json::from_value(serde_json::json!({ "page_number": 1, "page_size": 0 })).unwrap();
        let err = req.validate_window().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PAGE_REQUEST");

        let req: PageRequest = serde_json::from_value(serde_json::json!({ "page_number": 1 })).unwrap();
        assert!(req.validate_window().is_ok());
        assert!(req.is_unbounded());
    }

    #[test]
    fn test_page_info() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], 0, 10, 25, Sort::unsorted());
        assert!(page.info.first);
        assert!(!page.info.last);
        assert_eq!(page.info.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_page_info_last_page() {
        let page: Page<i32> = Page::new(vec![1, 2], 2, 10, 22, Sort::unsorted());
        assert!(!page.info.first);
        assert!(page.info.last);
        assert!(!page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.info.offset(), 20);
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let sort = Sort::by([SortDirective::natural()]);
        let page = Page::new(vec![1, 2, 3], 0, 10, 3, sort.clone());
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.content, vec![2, 4, 6]);
        assert_eq!(mapped.total_elements(), 3);
        assert_eq!(mapped.sort(), &sort);
    }

    #[test]
    fn test_page_empty() {
        let page: Page<i32> = Page::empty(0, 10);
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.total_elements(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.info.last);
    }

    #[test]
    fn test_unbounded_page_is_single_page() {
        let page = Page::new(vec![1, 2, 3], 0, UNBOUNDED, 3, Sort::unsorted());
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_json_shape() {
        let page = Page::new(vec!["a"], 1, 1, 2, Sort::unsorted());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["content"], serde_json::json!(["a"]));
        assert_eq!(json["number"], 1);
        assert_eq!(json["total_elements"], 2);
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["sort"], serde_json::json!([]));
    }

    #[test]
    fn test_page_into_iter() {
        let page = Page::new(vec![1, 2], 0, 2, 2, Sort::unsorted());
        assert_eq!(page.into_iter().sum::<i32>(), 3);
    }
}
