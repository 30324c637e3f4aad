//! Page-size selector.

use crate::labels::{label_or, LabelSource, DEFAULT_SELECT_ALL_TEXT};
use pagebuilder_config::{selector_option_count, PageControlConfig, MAX_PAGE_SIZE_OPTIONS, SELECT_ALL_LABEL};
use pagebuilder_core::{PageBuilderError, PageBuilderResult, UNBOUNDED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the page-size selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeOption {
    /// Page size to request; [`UNBOUNDED`] for "all results".
    pub value: u32,
    pub label: String,
    pub selected: bool,
}

impl PageSizeOption {
    /// Returns true for the "all results" entry.
    #[must_use]
    pub const fn is_select_all(&self) -> bool {
        self.value == UNBOUNDED
    }
}

/// Offers page sizes from `min` to `max` in steps of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeSelector {
    min: u32,
    max: u32,
    step: u32,
    include_select_all: bool,
}

impl PageSizeSelector {
    #[must_use]
    pub const fn new(min: u32, max: u32, step: u32) -> Self {
        Self {
            min,
            max,
            step,
            include_select_all: true,
        }
    }

    #[must_use]
    pub const fn from_config(config: &PageControlConfig) -> Self {
        Self::new(
            config.page_size_selector_min,
            config.page_size_selector_max,
            config.page_size_selector_step,
        )
        .with_select_all(config.include_select_all_option)
    }

    /// Whether an "all results" entry is offered.
    #[must_use]
    pub const fn with_select_all(mut self, include: bool) -> Self {
        self.include_select_all = include;
        self
    }

    /// Builds the selector entries, ascending and without duplicates.
    ///
    /// The `selected` size is always offered and is the only selected entry,
    /// even if it is not one of the stepped sizes. The "all results" entry
    /// is labelled through `labels`, or [`DEFAULT_SELECT_ALL_TEXT`].
    ///
    /// # Errors
    ///
    /// Returns [`PageBuilderError::Configuration`] for a range that is empty or
    /// starts at 0, a step of 0 over more than one size or more than
    /// [`MAX_PAGE_SIZE_OPTIONS`] sizes, and
    /// [`PageBuilderError::InvalidPageRequest`] if `selected` is 0.
    pub fn options(
        &self,
        selected: u32,
        labels: &dyn LabelSource,
        locale: &str,
    ) -> PageBuilderResult<Vec<PageSizeOption>> {
        if self.min == 0 || self.min > self.max {
            return Err(PageBuilderError::configuration(format!(
                "page size selector needs 0 < min <= max, got min {} and max {}",
                self.min, self.max
            )));
        }
        if self.min < self.max && self.step == 0 {
            return Err(PageBuilderError::configuration("page size selector step must be positive"));
        }
        let count = selector_option_count(self.min, self.max, self.step);
        if count > MAX_PAGE_SIZE_OPTIONS {
            return Err(PageBuilderError::configuration(format!(
                "page size selector would offer {count} sizes, at most {MAX_PAGE_SIZE_OPTIONS} are allowed"
            )));
        }
        if selected == 0 {
            return Err(PageBuilderError::invalid_request("selected page size must be positive"));
        }

        let step = usize::try_from(self.step.max(1)).unwrap_or(usize::MAX);
        let mut sizes: BTreeMap<u32, String> = (self.min..=self.max)
            .step_by(step)
            .map(|size| (size, size.to_string()))
            .collect();

        if self.include_select_all {
            let label = label_or(labels, SELECT_ALL_LABEL, locale, DEFAULT_SELECT_ALL_TEXT);
            sizes.insert(UNBOUNDED, label);
        }
        sizes.entry(selected).or_insert_with(|| selected.to_string());

        Ok(sizes
            .into_iter()
            .map(|(value, label)| PageSizeOption {
                value,
                label,
                selected: value == selected,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::MockLabelSource;
    use pagebuilder_config::LabelCatalog;

    fn no_labels() -> MockLabelSource {
        let mut labels = MockLabelSource::new();
        labels.expect_label().returning(|_, _| None);
        labels
    }

    fn values(options: &[PageSizeOption]) -> Vec<u32> {
        options.iter().map(|o| o.value).collect()
    }

    fn selected(options: &[PageSizeOption]) -> Vec<u32> {
        options.iter().filter(|o| o.selected).map(|o| o.value).collect()
    }

    #[test]
    fn test_stepped_sizes_with_select_all() {
        let options = PageSizeSelector::new(10, 50, 10).options(20, &no_labels(), "en").unwrap();

        assert_eq!(values(&options), vec![10, 20, 30, 40, 50, UNBOUNDED]);
        assert_eq!(selected(&options), vec![20]);
        assert_eq!(options[1].label, "20");
        assert_eq!(options[5].label, DEFAULT_SELECT_ALL_TEXT);
        assert!(options[5].is_select_all());
    }

    #[test]
    fn test_selected_size_outside_steps_is_added() {
        let options = PageSizeSelector::new(10, 30, 10)
            .with_select_all(false)
            .options(25, &no_labels(), "en")
            .unwrap();

        assert_eq!(values(&options), vec![10, 20, 25, 30]);
        assert_eq!(selected(&options), vec![25]);
    }

    #[test]
    fn test_step_not_reaching_max() {
        let options = PageSizeSelector::new(5, 20, 7)
            .with_select_all(false)
            .options(5, &no_labels(), "en")
            .unwrap();

        assert_eq!(values(&options), vec![5, 12, 19]);
    }

    #[test]
    fn test_unbounded_selection_selects_select_all() {
        let options = PageSizeSelector::new(10, 20, 10).options(UNBOUNDED, &no_labels(), "en").unwrap();

        assert_eq!(values(&options), vec![10, 20, UNBOUNDED]);
        assert_eq!(selected(&options), vec![UNBOUNDED]);
        assert_eq!(options[2].label, "Max");
    }

    #[test]
    fn test_single_size_without_step() {
        let options = PageSizeSelector::new(25, 25, 0)
            .with_select_all(false)
            .options(25, &no_labels(), "en")
            .unwrap();

        assert_eq!(values(&options), vec![25]);
        assert!(options[0].selected);
    }

    #[test]
    fn test_select_all_label_is_localised() {
        let mut labels = MockLabelSource::new();
        labels
            .expect_label()
            .withf(|key, locale| key == SELECT_ALL_LABEL && locale == "de-CH")
            .times(1)
            .returning(|_, _| Some("Alle".to_string()));

        let options = PageSizeSelector::new(10, 10, 10).options(10, &labels, "de-CH").unwrap();
        assert_eq!(options.last().map(|o| o.label.as_str()), Some("Alle"));
    }

    #[test]
    fn test_without_select_all_no_label_is_looked_up() {
        let mut labels = MockLabelSource::new();
        labels.expect_label().never();

        let options = PageSizeSelector::new(10, 20, 10)
            .with_select_all(false)
            .options(10, &labels, "en")
            .unwrap();
        assert_eq!(values(&options), vec![10, 20]);
    }

    #[test]
    fn test_from_config_with_catalog() {
        let config = PageControlConfig::default();
        let catalog = LabelCatalog::new().with_label("default", SELECT_ALL_LABEL, "All");

        let options = PageSizeSelector::from_config(&config).options(10, &catalog, "").unwrap();
        assert_eq!(options.len(), 11);
        assert_eq!(options.first().map(|o| o.value), Some(10));
        assert_eq!(options.last().map(|o| o.label.as_str()), Some("All"));
    }

    #[test]
    fn test_invalid_configuration() {
        let labels = no_labels();
        for selector in [
            PageSizeSelector::new(0, 10, 5),
            PageSizeSelector::new(20, 10, 5),
            PageSizeSelector::new(10, 20, 0),
            PageSizeSelector::new(1, u32::MAX, 1),
        ] {
            let err = selector.options(10, &labels, "en").unwrap_err();
            assert_eq!(err.error_code(), "CONFIGURATION_ERROR", "{selector:?}");
        }
    }

    #[test]
    fn test_zero_selection_is_rejected() {
        let err = PageSizeSelector::new(10, 20, 10).options(0, &no_labels(), "en").unwrap_err();
        assert!(matches!(err, PageBuilderError::InvalidPageRequest(_)));
    }
}
