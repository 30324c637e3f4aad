//! Configuration validation.
//!
//! Collects every problem of a configuration at once, so a broken file is
//! reported completely on startup.

use crate::{PageBuilderSettings, PageControlConfig};
use pagebuilder_core::validation::rules::{not_blank, valid_factory_key, valid_param_name};
use std::collections::BTreeMap;
use std::fmt;

/// Most entries a page size selector may offer, not counting "all results".
pub const MAX_PAGE_SIZE_OPTIONS: u64 = 1_000;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A parameter name is empty or contains characters that need URL encoding.
    InvalidParamName { name: String, value: String },
    /// Two parameters share a name.
    DuplicateParamName { value: String, names: Vec<String> },
    /// The pagination window must show at least one link.
    InvalidWindowSize { value: u32 },
    /// The smallest selectable page size must be positive.
    InvalidSelectorMin { value: u32 },
    /// The selector range is inverted.
    InvalidSelectorRange { min: u32, max: u32 },
    /// The selector step must be positive when min and max differ.
    InvalidSelectorStep { value: u32 },
    /// The selector range and step yield more than [`MAX_PAGE_SIZE_OPTIONS`] sizes.
    TooManySelectorOptions { count: u64 },
    /// The default locale is set but blank.
    BlankDefaultLocale,
    /// The factory key is not a valid registry key.
    InvalidFactoryKey { value: String },
    /// The log filter is empty.
    EmptyLogFilter,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParamName { name, value } => {
                write!(f, "Invalid parameter name for {name}: '{value}' (use letters, digits, '_', '-', '.')")
            }
            Self::DuplicateParamName { value, names } => {
                write!(f, "Parameter name '{value}' is used by {}", names.join(" and "))
            }
            Self::InvalidWindowSize { value } => {
                write!(f, "Invalid pagination window size: {value} (must be at least 1)")
            }
            Self::InvalidSelectorMin { value } => {
                write!(f, "Invalid page size selector minimum: {value} (must be at least 1)")
            }
            Self::InvalidSelectorRange { min, max } => {
                write!(
                    f,
                    "Invalid page size selector range: min ({min}) cannot be greater than max ({max})"
                )
            }
            Self::InvalidSelectorStep { value } => {
                write!(f, "Invalid page size selector step: {value} (must be at least 1)")
            }
            Self::TooManySelectorOptions { count } => {
                write!(
                    f,
                    "Page size selector offers {count} sizes (at most {MAX_PAGE_SIZE_OPTIONS}), raise the step or narrow the range"
                )
            }
            Self::BlankDefaultLocale => write!(f, "Default locale must not be blank"),
            Self::InvalidFactoryKey { value } => {
                write!(
                    f,
                    "Invalid page control factory key: '{value}' (use lowercase letters, digits, '_', '-')"
                )
            }
            Self::EmptyLogFilter => write!(f, "Log filter must not be empty when logging is enabled"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    #[must_use]
    pub fn errors(&self) -> &[ConfigValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the whole configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(settings: &PageBuilderSettings) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::default();

        Self::validate_control(&settings.control, &mut result);

        if valid_factory_key(&settings.factory).is_err() {
            result.add_error(ConfigValidationError::InvalidFactoryKey {
                value: settings.factory.clone(),
            });
        }
        if settings.logging.enabled && not_blank(&settings.logging.filter).is_err() {
            result.add_error(ConfigValidationError::EmptyLogFilter);
        }

        result.into_result()
    }

    /// Validates the control options alone.
    pub fn validate_control_config(config: &PageControlConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::default();
        Self::validate_control(config, &mut result);
        result.into_result()
    }

    fn validate_control(config: &PageControlConfig, result: &mut ValidationResult) {
        let mut by_value: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (name, value) in config.param_names() {
            if valid_param_name(value).is_err() {
                result.add_error(ConfigValidationError::InvalidParamName {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            } else {
                by_value.entry(value).or_default().push(name.to_string());
            }
        }
        for (value, names) in by_value {
            if names.len() > 1 {
                result.add_error(ConfigValidationError::DuplicateParamName {
                    value: value.to_string(),
                    names,
                });
            }
        }

        if config.max_pagination_window == 0 {
            result.add_error(ConfigValidationError::InvalidWindowSize {
                value: config.max_pagination_window,
            });
        }

        if config.page_size_selector_min == 0 {
            result.add_error(ConfigValidationError::InvalidSelectorMin {
                value: config.page_size_selector_min,
            });
        }
        if config.page_size_selector_min > config.page_size_selector_max {
            result.add_error(ConfigValidationError::InvalidSelectorRange {
                min: config.page_size_selector_min,
                max: config.page_size_selector_max,
            });
        } else if config.page_size_selector_min < config.page_size_selector_max
            && config.page_size_selector_step == 0
        {
            result.add_error(ConfigValidationError::InvalidSelectorStep {
                value: config.page_size_selector_step,
            });
        } else {
            let count = selector_option_count(
                config.page_size_selector_min,
                config.page_size_selector_max,
                config.page_size_selector_step,
            );
            if count > MAX_PAGE_SIZE_OPTIONS {
                result.add_error(ConfigValidationError::TooManySelectorOptions { count });
            }
        }

        if config.default_locale.as_deref().is_some_and(|l| not_blank(l).is_err()) {
            result.add_error(ConfigValidationError::BlankDefaultLocale);
        }
    }
}

/// Number of stepped sizes from `min` to `max`; a step of 0 counts as 1.
#[must_use]
pub fn selector_option_count(min: u32, max: u32, step: u32) -> u64 {
    if min > max {
        return 0;
    }
    u64::from(max - min) / u64::from(step.max(1)) + 1
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
