//! Query-string parameters of page URLs.

use pagebuilder_config::PageControlConfig;
use pagebuilder_core::{PageRequest, Sort};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Names of the query parameters carrying the page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamNames {
    pub page_number: String,
    pub page_size: String,
    pub sort: String,
    pub query: String,
}

impl ParamNames {
    fn all(&self) -> [&str; 4] {
        [&self.page_number, &self.page_size, &self.sort, &self.query].map(String::as_str)
    }
}

impl From<&PageControlConfig> for ParamNames {
    fn from(config: &PageControlConfig) -> Self {
        Self {
            page_number: config.page_number_param_name.clone(),
            page_size: config.page_size_param_name.clone(),
            sort: config.sort_param_name.clone(),
            query: config.query_param_name.clone(),
        }
    }
}

impl Default for ParamNames {
    fn default() -> Self {
        Self::from(&PageControlConfig::default())
    }
}

/// Sets query parameters on a URL, which may be relative.
///
/// Existing parameters named in `replace` or in `params` are removed, the
/// others keep their order. New parameters are appended in the given order;
/// a name may repeat. The fragment is preserved.
#[must_use]
pub fn set_url_parameters<'a>(
    url: &str,
    replace: &[&str],
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let params: Vec<(&str, &str)> = params.into_iter().collect();
    let (without_fragment, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(query) = query {
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            let replaced = replace.iter().any(|r| *r == name) || params.iter().any(|(n, _)| *n == name);
            if !replaced {
                serializer.append_pair(&name, &value);
            }
        }
    }
    for (name, value) in &params {
        serializer.append_pair(name, value);
    }
    let query = serializer.finish();

    let mut result = String::with_capacity(path.len() + query.len() + 2);
    result.push_str(path);
    if !query.is_empty() {
        result.push('?');
        result.push_str(&query);
    }
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}

/// URL of one page of a listing.
///
/// Page number and size are always set; every sort directive becomes one
/// sort parameter; a blank query is left out.
#[must_use]
pub fn page_url(
    base_url: &str,
    names: &ParamNames,
    page_number: u64,
    page_size: u32,
    sort: &Sort,
    query: Option<&str>,
) -> String {
    let page_number = page_number.to_string();
    let page_size = page_size.to_string();
    let sort_values = sort.to_param_values();

    let mut params = vec![
        (names.page_number.as_str(), page_number.as_str()),
        (names.page_size.as_str(), page_size.as_str()),
    ];
    params.extend(sort_values.iter().map(|value| (names.sort.as_str(), value.as_str())));
    if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
        params.push((names.query.as_str(), query));
    }
    set_url_parameters(base_url, &names.all(), params)
}

/// Reads a page request from a URL query string, leniently.
///
/// A leading `?` is ignored. Repeated sort parameters are kept in order.
#[must_use]
pub fn parse_page_request(query_string: &str, names: &ParamNames) -> PageRequest {
    let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
    let mut page_number = None;
    let mut page_size = None;
    let mut sort = Vec::new();
    let mut query = None;
    for (name, value) in form_urlencoded::parse(query_string.as_bytes()) {
        if name == names.page_number.as_str() {
            page_number = Some(value.into_owned());
        } else if name == names.page_size.as_str() {
            page_size = Some(value.into_owned());
        } else if name == names.sort.as_str() {
            sort.push(value.into_owned());
        } else if name == names.query.as_str() {
            query = Some(value.into_owned());
        }
    }
    PageRequest::from_params(page_number.as_deref(), page_size.as_deref(), sort, query.as_deref())
}
