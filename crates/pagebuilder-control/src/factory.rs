//! Page control factories and their registry.

use crate::labels::LabelSource;
use crate::links::{PaginationLinkBuilder, PaginationLinkSet};
use crate::selector::{PageSizeOption, PageSizeSelector};
use pagebuilder_config::{
    format_validation_errors, ConfigValidator, PageBuilderSettings, PageControlConfig, DEFAULT_FACTORY,
};
use pagebuilder_core::validation::rules::valid_factory_key;
use pagebuilder_core::{PageBuilderError, PageBuilderResult, PageInfo, Sort};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Produces the parts of a [`PageControl`](crate::PageControl).
pub trait PageControlFactory: fmt::Debug + Send + Sync {
    /// The options this factory renders with.
    fn config(&self) -> &PageControlConfig;

    /// Builds the pagination links of a page.
    fn pagination(
        &self,
        page: &PageInfo,
        sort: &Sort,
        base_url: &str,
        query: Option<&str>,
    ) -> PageBuilderResult<PaginationLinkSet>;

    /// Builds the page-size selector entries.
    fn page_size_options(&self, selected: u32, locale: &str) -> PageBuilderResult<Vec<PageSizeOption>>;
}

/// The built-in factory, driven by [`PageControlConfig`].
#[derive(Clone)]
pub struct DefaultPageControlFactory {
    config: PageControlConfig,
    links: PaginationLinkBuilder,
    selector: PageSizeSelector,
    labels: Arc<dyn LabelSource>,
}

impl DefaultPageControlFactory {
    /// Creates a factory after validating `config`.
    pub fn new(config: PageControlConfig, labels: Arc<dyn LabelSource>) -> PageBuilderResult<Self> {
        ConfigValidator::validate_control_config(&config)
            .map_err(|errors| PageBuilderError::configuration(format_validation_errors(&errors)))?;

        Ok(Self {
            links: PaginationLinkBuilder::from_config(&config),
            selector: PageSizeSelector::from_config(&config),
            config,
            labels,
        })
    }

    /// Creates a factory labelling with the settings' catalog.
    pub fn from_settings(settings: &PageBuilderSettings) -> PageBuilderResult<Self> {
        Self::new(settings.control.clone(), Arc::new(settings.labels.clone()))
    }
}

impl PageControlFactory for DefaultPageControlFactory {
    fn config(&self) -> &PageControlConfig {
        &self.config
    }

    fn pagination(
        &self,
        page: &PageInfo,
        sort: &Sort,
        base_url: &str,
        query: Option<&str>,
    ) -> PageBuilderResult<PaginationLinkSet> {
        self.links.build(page, sort, base_url, query)
    }

    fn page_size_options(&self, selected: u32, locale: &str) -> PageBuilderResult<Vec<PageSizeOption>> {
        self.selector.options(selected, self.labels.as_ref(), locale)
    }
}

impl fmt::Debug for DefaultPageControlFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultPageControlFactory")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Creates a factory from the settings.
pub type FactoryConstructor = fn(&PageBuilderSettings) -> PageBuilderResult<Box<dyn PageControlFactory>>;

fn default_factory(settings: &PageBuilderSettings) -> PageBuilderResult<Box<dyn PageControlFactory>> {
    Ok(Box::new(DefaultPageControlFactory::from_settings(settings)?))
}

/// Page control factories by configuration key.
pub struct PageControlFactoryRegistry {
    constructors: RwLock<HashMap<String, FactoryConstructor>>,
}

impl PageControlFactoryRegistry {
    /// Creates a registry without any factory.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry holding the built-in factory under [`DEFAULT_FACTORY`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::empty();
        registry
            .constructors
            .write()
            .insert(DEFAULT_FACTORY.to_string(), default_factory as FactoryConstructor);
        registry
    }

    /// Registers a factory, replacing any under the same key.
    ///
    /// # Errors
    ///
    /// Returns [`PageBuilderError::Validation`] for a key that is not lowercase
    /// letters, digits, `_` and `-`.
    pub fn register(&self, key: &str, constructor: FactoryConstructor) -> PageBuilderResult<()> {
        valid_factory_key(key).map_err(|_| PageBuilderError::validation(format!("invalid factory key '{key}'")))?;
        self.constructors.write().insert(key.to_string(), constructor);
        info!(factory = key, "Registered page control factory");
        Ok(())
    }

    /// Returns true if a factory is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.constructors.read().contains_key(key)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.constructors.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Creates the factory registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PageBuilderError::UnknownFactory`] if nothing is registered
    /// under `key`, or whatever the constructor fails with.
    pub fn create(&self, key: &str, settings: &PageBuilderSettings) -> PageBuilderResult<Box<dyn PageControlFactory>> {
        let constructor = self
            .constructors
            .read()
            .get(key)
            .copied()
            .ok_or_else(|| PageBuilderError::UnknownFactory(key.to_string()))?;
        debug!(factory = key, "Creating page control factory");
        constructor(settings)
    }

    /// Creates the factory the settings name.
    pub fn create_configured(&self, settings: &PageBuilderSettings) -> PageBuilderResult<Box<dyn PageControlFactory>> {
        self.create(&settings.factory, settings)
    }
}

impl Default for PageControlFactoryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for PageControlFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageControlFactoryRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
