//! Localised labels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label key of the "all results" page size option.
pub const SELECT_ALL_LABEL: &str = "select_all";

/// Locale entry consulted after every more specific locale.
pub const DEFAULT_LOCALE: &str = "default";

/// Labels per locale, read from the `[labels.<locale>]` tables of the configuration.
///
/// ```toml
/// [labels.default]
/// select_all = "All"
///
/// [labels.de]
/// select_all = "Alle"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelCatalog(BTreeMap<String, BTreeMap<String, String>>);

impl LabelCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label and returns the catalog.
    #[must_use]
    pub fn with_label(mut self, locale: &str, key: &str, label: &str) -> Self {
        self.insert(locale, key, label);
        self
    }

    /// Adds or replaces a label.
    pub fn insert(&mut self, locale: &str, key: &str, label: &str) {
        self.0
            .entry(normalize(locale))
            .or_default()
            .insert(key.to_string(), label.to_string());
    }

    /// Looks up a label, from the most specific locale to [`DEFAULT_LOCALE`].
    ///
    /// `de-CH` is tried as `de-ch`, then `de`, then `default`. Locale names
    /// match case-insensitively and `_` equals `-`.
    #[must_use]
    pub fn lookup(&self, key: &str, locale: Option<&str>) -> Option<&str> {
        locale_chain(locale).iter().find_map(|candidate| {
            self.0
                .iter()
                .find(|(name, _)| normalize(name) == *candidate)
                .and_then(|(_, labels)| labels.get(key))
                .map(String::as_str)
        })
    }

    /// Returns true if no label is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }
}

fn normalize(locale: &str) -> String {
    locale.trim().replace('_', "-").to_ascii_lowercase()
}

fn locale_chain(locale: Option<&str>) -> Vec<String> {
    let mut chain = Vec::new();
    if let Some(locale) = locale.map(normalize).filter(|l| !l.is_empty()) {
        let mut current = locale.as_str();
        loop {
            chain.push(current.to_string());
            match current.rfind('-') {
                Some(index) => current = &current[..index],
                None => break,
            }
        }
    }
    chain.push(DEFAULT_LOCALE.to_string());
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LabelCatalog {
        LabelCatalog::new()
            .with_label("default", SELECT_ALL_LABEL, "All")
            .with_label("de", SELECT_ALL_LABEL, "Alle")
            .with_label("de_CH", SELECT_ALL_LABEL, "Alli")
    }

    #[test]
    fn test_locale_chain() {
        assert_eq!(locale_chain(Some("de-CH-x")), vec!["de-ch-x", "de-ch", "de", "default"]);
        assert_eq!(locale_chain(None), vec!["default"]);
        assert_eq!(locale_chain(Some(" ")), vec!["default"]);
    }

    #[test]
    fn test_lookup_most_specific() {
        let catalog = catalog();
        assert_eq!(catalog.lookup(SELECT_ALL_LABEL, Some("de-CH")), Some("Alli"));
        assert_eq!(catalog.lookup(SELECT_ALL_LABEL, Some("de_AT")), Some("Alle"));
        assert_eq!(catalog.lookup(SELECT_ALL_LABEL, Some("fr")), Some("All"));
        assert_eq!(catalog.lookup(SELECT_ALL_LABEL, None), Some("All"));
    }

    #[test]
    fn test_lookup_missing() {
        let catalog = LabelCatalog::new().with_label("de", SELECT_ALL_LABEL, "Alle");
        assert_eq!(catalog.lookup(SELECT_ALL_LABEL, Some("en")), None);
        assert_eq!(catalog.lookup("other", Some("de")), None);
        assert!(LabelCatalog::new().is_empty());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_deserialize_tables() {
        let catalog: LabelCatalog = toml::from_str(
            r#"
            [default]
            select_all = "All"

            [DE]
            select_all = "Alle"
            "#,
        )
        .unwrap();
        assert_eq!(catalog.lookup(SELECT_ALL_LABEL, Some("de-DE")), Some("Alle"));
    }
}
