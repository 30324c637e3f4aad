//! Sort directives and their text form.
//!
//! A directive is written as `field,asc|desc[,ignorecase][,nullsfirst|nullslast]`.
//! An empty field (for example `,desc`) sorts by the whole value. Several
//! directives are joined with `;`, the first one being the primary key.

use crate::{PageBuilderError, PageBuilderResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn default_ascending() -> bool {
    true
}

/// One ordering instruction: field, direction, case sensitivity and null placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDirective {
    /// Property to compare; `None` compares the whole value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Ascending (`true`) or descending order.
    #[serde(default = "default_ascending")]
    pub ascending: bool,
    /// Compare text case-insensitively.
    #[serde(default)]
    pub ignore_case: bool,
    /// Place missing values before present ones.
    #[serde(default)]
    pub nulls_first: bool,
}

impl SortDirective {
    /// Creates a directive with every option spelled out.
    #[must_use]
    pub fn new(field: Option<&str>, ascending: bool, ignore_case: bool, nulls_first: bool) -> Self {
        Self {
            field: field.filter(|f| !f.trim().is_empty()).map(|f| f.trim().to_string()),
            ascending,
            ignore_case,
            nulls_first,
        }
    }

    /// Ascending, case-sensitive, nulls last on the given field.
    #[must_use]
    pub fn by(field: &str) -> Self {
        Self::new(Some(field), true, false, false)
    }

    /// Ascending comparison of the whole value.
    #[must_use]
    pub fn natural() -> Self {
        Self::new(None, true, false, false)
    }

    /// Switches to descending order.
    #[must_use]
    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }

    /// Switches to case-insensitive text comparison.
    #[must_use]
    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Places missing values first.
    #[must_use]
    pub fn with_nulls_first(mut self) -> Self {
        self.nulls_first = true;
        self
    }

    /// Places missing values last.
    #[must_use]
    pub fn with_nulls_last(mut self) -> Self {
        self.nulls_first = false;
        self
    }

    /// Returns the field as a string slice.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl Default for SortDirective {
    fn default() -> Self {
        Self::natural()
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            self.field().unwrap_or_default(),
            if self.ascending { "asc" } else { "desc" }
        )?;
        if self.ignore_case {
            write!(f, ",ignorecase")?;
        }
        if self.nulls_first {
            write!(f, ",nullsfirst")?;
        }
        Ok(())
    }
}

impl FromStr for SortDirective {
    type Err = PageBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let field = parts.next().map(str::trim).filter(|f| !f.is_empty());
        let mut directive = Self::new(field, true, false, false);
        for option in parts.map(str::trim).filter(|p| !p.is_empty()) {
            match option.to_ascii_lowercase().as_str() {
                "asc" => directive.ascending = true,
                "desc" => directive.ascending = false,
                "ignorecase" => directive.ignore_case = true,
                "nullsfirst" => directive.nulls_first = true,
                "nullslast" => directive.nulls_first = false,
                other => {
                    return Err(PageBuilderError::invalid_request(format!(
                        "unknown sort option '{other}' in '{s}'"
                    )))
                }
            }
        }
        Ok(directive)
    }
}

/// Ordered sequence of sort directives; empty means unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort(Vec<SortDirective>);

impl Sort {
    /// The unsorted order.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self(Vec::new())
    }

    /// Creates a sort from directives, primary key first.
    #[must_use]
    pub fn by(directives: impl IntoIterator<Item = SortDirective>) -> Self {
        Self(directives.into_iter().collect())
    }

    /// Returns true if at least one directive is present.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        !self.0.is_empty()
    }

    /// Returns true if no directive is present.
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the directives, primary key first.
    #[must_use]
    pub fn directives(&self) -> &[SortDirective] {
        &self.0
    }

    /// Iterates over the directives.
    pub fn iter(&self) -> std::slice::Iter<'_, SortDirective> {
        self.0.iter()
    }

    /// Renders every directive in its text form, one string per directive.
    #[must_use]
    pub fn to_param_values(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Parses one text directive per value, skipping blank values.
    pub fn from_param_values<I, V>(values: I) -> PageBuilderResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        values
            .into_iter()
            .filter(|v| !v.as_ref().trim().is_empty())
            .map(|v| v.as_ref().parse())
            .collect::<PageBuilderResult<Vec<_>>>()
            .map(Self)
    }
}

impl From<Vec<SortDirective>> for Sort {
    fn from(directives: Vec<SortDirective>) -> Self {
        Self(directives)
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a SortDirective;
    type IntoIter = std::slice::Iter<'a, SortDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{directive}")?;
        }
        Ok(())
    }
}

impl FromStr for Sort {
    type Err = PageBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_param_values(s.split(';'))
    }
}

/// Which representation the sort is applied to while a page is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortTarget {
    /// Sort the source entries before conversion. The page reports "unsorted".
    Source,
    /// Sort the converted entries. The page reports the applied sort.
    #[default]
    Target,
}

impl fmt::Display for SortTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_defaults() {
        let directive = SortDirective::default();
        assert_eq!(directive.field, None);
        assert!(directive.ascending);
        assert!(!directive.ignore_case);
        assert!(!directive.nulls_first);
    }

    #[test]
    fn test_blank_field_is_whole_value() {
        assert_eq!(SortDirective::new(Some("  "), true, false, false).field, None);
    }

    #[test]
    fn test_directive_display() {
        let directive = SortDirective::by("city").descending().ignoring_case().with_nulls_first();
        assert_eq!(directive.to_string(), "city,desc,ignorecase,nullsfirst");
        assert_eq!(SortDirective::natural().to_string(), ",asc");
    }

    #[test]
    fn test_directive_parse() {
        let directive: SortDirective = "lastName,DESC,IgnoreCase".parse().unwrap();
        assert_eq!(directive.field(), Some("lastName"));
        assert!(!directive.ascending);
        assert!(directive.ignore_case);
        assert!(!directive.nulls_first);

        let directive: SortDirective = "name".parse().unwrap();
        assert_eq!(directive, SortDirective::by("name"));

        let directive: SortDirective = ",desc,nullsfirst".parse().unwrap();
        assert_eq!(directive.field, None);
        assert!(directive.nulls_first);
    }

    #[test]
    fn test_directive_parse_rejects_unknown_option() {
        let err = "city,sideways".parse::<SortDirective>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PAGE_REQUEST");
    }

    #[test]
    fn test_sort_text_form() {
        let sort: Sort = "lastName,asc;firstName,desc,ignorecase".parse().unwrap();
        assert_eq!(sort.directives().len(), 2);
        assert_eq!(sort.to_string(), "lastName,asc;firstName,desc,ignorecase");
        assert_eq!(
            sort.to_param_values(),
            vec!["lastName,asc".to_string(), "firstName,desc,ignorecase".to_string()]
        );
    }

    #[test]
    fn test_sort_skips_blank_values() {
        let sort = Sort::from_param_values(["", "  ", "city"]).unwrap();
        assert_eq!(sort, Sort::by([SortDirective::by("city")]));
        assert!("".parse::<Sort>().unwrap().is_unsorted());
    }

    #[test]
    fn test_sort_json_shape() {
        let sort = Sort::by([SortDirective::by("city").ignoring_case()]);
        let json = serde_json::to_value(&sort).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "city", "ascending": true, "ignore_case": true, "nulls_first": false }])
        );
        let back: Sort = serde_json::from_value(serde_json::json!([{ "field": "city" }])).unwrap();
        assert_eq!(back, Sort::by([SortDirective::by("city")]));
    }

    #[test]
    fn test_sort_target_default() {
        assert_eq!(SortTarget::default(), SortTarget::Target);
        assert_eq!(SortTarget::Source.to_string(), "source");
    }
}
