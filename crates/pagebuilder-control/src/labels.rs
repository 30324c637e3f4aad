//! Label lookup for rendered controls.

use pagebuilder_config::LabelCatalog;

/// Label of the "all results" option when no source knows one.
pub const DEFAULT_SELECT_ALL_TEXT: &str = "Max";

/// Source of localised labels.
///
/// `locale` is a language tag such as `de-CH`; an empty tag asks for the
/// fallback labels.
#[cfg_attr(test, mockall::automock)]
pub trait LabelSource: Send + Sync {
    /// Returns the label for `key`, or `None` if the source has none.
    fn label(&self, key: &str, locale: &str) -> Option<String>;
}

impl LabelSource for LabelCatalog {
    fn label(&self, key: &str, locale: &str) -> Option<String> {
        let locale = Some(locale).filter(|l| !l.trim().is_empty());
        self.lookup(key, locale).map(str::to_string)
    }
}

/// Resolves a label, falling back to `default` when the source has none.
pub fn label_or(source: &dyn LabelSource, key: &str, locale: &str, default: &str) -> String {
    source.label(key, locale).unwrap_or_else(|| default.to_string())
}
