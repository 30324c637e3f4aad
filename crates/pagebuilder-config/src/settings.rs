//! Configuration structures.

use crate::LabelCatalog;
use pagebuilder_core::{EmptyResultPages, LoggingConfig, PageBuilderError, PageBuilderResult};
use serde::{Deserialize, Serialize};

/// Registry key of the built-in page control factory.
pub const DEFAULT_FACTORY: &str = "default";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBuilderSettings {
    /// Key of the page control factory to use.
    #[serde(default = "default_factory")]
    pub factory: String,

    /// Pagination control rendering.
    #[serde(default)]
    pub control: PageControlConfig,

    /// Localised labels.
    #[serde(default)]
    pub labels: LabelCatalog,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_factory() -> String {
    DEFAULT_FACTORY.to_string()
}

impl Default for PageBuilderSettings {
    fn default() -> Self {
        Self {
            factory: default_factory(),
            control: PageControlConfig::default(),
            labels: LabelCatalog::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PageBuilderSettings {
    /// Parses settings from a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(document: &str) -> PageBuilderResult<Self> {
        toml::from_str(document).map_err(|e| PageBuilderError::configuration(e.to_string()))
    }

    /// Renders the settings as a TOML document.
    pub fn to_toml_string(&self) -> PageBuilderResult<String> {
        toml::to_string_pretty(self).map_err(|e| PageBuilderError::configuration(e.to_string()))
    }
}

/// Options of the pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageControlConfig {
    /// Query parameter carrying the page number.
    pub page_number_param_name: String,
    /// Query parameter carrying the page size.
    pub page_size_param_name: String,
    /// Query parameter carrying sort directives (repeated).
    pub sort_param_name: String,
    /// Query parameter carrying the free-text query.
    pub query_param_name: String,
    /// Maximum number of page links shown at once.
    pub max_pagination_window: u32,
    /// Smallest page size offered by the selector.
    pub page_size_selector_min: u32,
    /// Largest stepped page size offered by the selector.
    pub page_size_selector_max: u32,
    /// Distance between offered page sizes.
    pub page_size_selector_step: u32,
    /// Offer an "all results" option.
    pub include_select_all_option: bool,
    /// Whether the listing accepts a free-text query.
    pub query_supported: bool,
    /// Number of pages reported for an empty result.
    pub empty_result_pages: EmptyResultPages,
    /// Locale used for labels when the caller passes none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

impl Default for PageControlConfig {
    fn default() -> Self {
        Self {
            page_number_param_name: "page".to_string(),
            page_size_param_name: "size".to_string(),
            sort_param_name: "sort".to_string(),
            query_param_name: "q".to_string(),
            max_pagination_window: 7,
            page_size_selector_min: 10,
            page_size_selector_max: 100,
            page_size_selector_step: 10,
            include_select_all_option: true,
            query_supported: true,
            empty_result_pages: EmptyResultPages::SinglePage,
            default_locale: None,
        }
    }
}

impl PageControlConfig {
    /// The four parameter names as `(label, value)` pairs.
    #[must_use]
    pub fn param_names(&self) -> [(&'static str, &str); 4] {
        [
            ("page_number_param_name", self.page_number_param_name.as_str()),
            ("page_size_param_name", self.page_size_param_name.as_str()),
            ("sort_param_name", self.sort_param_name.as_str()),
            ("query_param_name", self.query_param_name.as_str()),
        ]
    }
}
