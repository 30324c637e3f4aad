//! Configuration loader with layered sources.

use crate::{format_validation_errors, ConfigValidator, PageBuilderSettings};
use config::{Config, ConfigError, Environment, File};
use pagebuilder_core::PageBuilderError;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Prefix of environment variables overriding file values.
pub const ENV_PREFIX: &str = "PAGEBUILDER";

/// Environment variable selecting the environment-specific file.
pub const ENVIRONMENT_VAR: &str = "PAGEBUILDER_ENVIRONMENT";

/// Configuration loader with reload support.
#[derive(Clone)]
pub struct ConfigLoader {
    settings: Arc<RwLock<PageBuilderSettings>>,
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `<dir>/default.toml` - Default values
    /// 2. `<dir>/{environment}.toml` - Environment-specific overrides
    /// 3. `<dir>/local.toml` - Local overrides
    /// 4. Environment variables such as `PAGEBUILDER__CONTROL__PAGE_SIZE_PARAM_NAME`
    ///
    /// Every file is optional. The result is validated before it is accepted.
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, PageBuilderError> {
        let config_dir = config_dir.into();
        let settings = Self::load_settings(&config_dir)?;

        Ok(Self {
            settings: Arc::new(RwLock::new(settings)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, PageBuilderError> {
        Self::new("./config")
    }

    /// Returns the current settings.
    #[must_use]
    pub fn get(&self) -> PageBuilderSettings {
        self.settings.read().clone()
    }

    /// Returns the directory the files are read from.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Reloads the configuration. On failure the previous settings stay active.
    pub fn reload(&self) -> Result<(), PageBuilderError> {
        let new_settings = Self::load_settings(&self.config_dir)?;
        *self.settings.write() = new_settings;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Gets a specific configuration value by dotted key path.
    pub fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = serde_json::to_value(&*self.settings.read()).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }

    fn load_settings(config_dir: &Path) -> Result<PageBuilderSettings, PageBuilderError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        info!(environment = %environment, dir = %config_dir.display(), "Loading configuration");

        let mut builder = Config::builder();
        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!(path = %path.display(), "Loading config file");
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings: PageBuilderSettings = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_error)?;

        ConfigValidator::validate(&settings)
            .map_err(|errors| PageBuilderError::configuration(format_validation_errors(&errors)))?;

        Ok(settings)
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_dir", &self.config_dir)
            .finish_non_exhaustive()
    }
}

fn config_error_to_error(err: ConfigError) -> PageBuilderError {
    PageBuilderError::configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("absent")).unwrap();
        let settings = loader.get();
        assert_eq!(settings.control.page_number_param_name, "page");
        assert_eq!(settings.factory, "default");
    }

    #[test]
    fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[control]\npage_size_param_name = \"max\"\nmax_pagination_window = 9\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.toml"), "[control]\nmax_pagination_window = 5\n").unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        let settings = loader.get();
        assert_eq!(settings.control.page_size_param_name, "max");
        assert_eq!(settings.control.max_pagination_window, 5);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[control]\nmax_pagination_window = 0\n").unwrap();

        let err = ConfigLoader::new(dir.path()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("pagination window"));
    }

    #[test]
    fn test_reload_keeps_old_settings_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, "[control]\nquery_param_name = \"search\"\n").unwrap();
        let loader = ConfigLoader::new(dir.path()).unwrap();

        fs::write(&path, "[control]\nquery_param_name = \"find\"\n").unwrap();
        loader.reload().unwrap();
        assert_eq!(loader.get().control.query_param_name, "find");

        fs::write(&path, "[control]\nquery_param_name = \"a b\"\n").unwrap();
        assert!(loader.reload().is_err());
        assert_eq!(loader.get().control.query_param_name, "find");
    }

    #[test]
    fn test_get_value() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[labels.de]\nselect_all = \"Alle\"\n").unwrap();
        let loader = ConfigLoader::new(dir.path()).unwrap();

        assert_eq!(loader.get_value::<u32>("control.max_pagination_window"), Some(7));
        assert_eq!(
            loader.get_value::<String>("labels.de.select_all"),
            Some("Alle".to_string())
        );
        assert_eq!(loader.get_value::<String>("control.missing"), None);
    }
}
