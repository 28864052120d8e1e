//! Filter sets and query-string formatting
//!
//! A `FilterSet` is the set of query parameters that decides which slice of
//! the card listing is requested. It keeps insertion order so the formatted
//! query string is deterministic, but compares as a plain mapping.

use std::fmt;

/// Filter key for the sort field
pub const ORDER_BY: &str = "orderBy";
/// Filter key for the 1-based page cursor
pub const PAGE: &str = "page";
/// Filter key for the page size
pub const PAGE_SIZE: &str = "pageSize";
/// Filter key for the card category
pub const TYPES: &str = "types";
/// Free-text name filter
pub const NAME: &str = "name";

/// A single filter value
///
/// Values compare by their query-string form, so `Text("42")` equals
/// `Number(42)` while `Text("042")` does not.
#[derive(Debug, Clone)]
pub enum FilterValue {
    Text(String),
    Number(i64),
}

impl PartialEq for FilterValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(s), Self::Number(n)) | (Self::Number(n), Self::Text(s)) => {
                *s == n.to_string()
            }
        }
    }
}

impl Eq for FilterValue {}

impl FilterValue {
    /// Numeric view of the value; text that holds an integer counts too
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

/// Insertion-ordered mapping of filter name to value
///
/// Every transition returns a new `FilterSet`; nothing mutates a set that a
/// reader may already hold.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert: replaces the value in place if the key exists,
    /// appends otherwise
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(key.into(), value.into());
        self
    }

    fn set(&mut self, key: String, value: FilterValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Current page cursor, if present and numeric
    pub fn page(&self) -> Option<i64> {
        self.get(PAGE).and_then(FilterValue::as_number)
    }

    /// Copy of this set with the page cursor replaced
    pub fn with_page(&self, page: i64) -> Self {
        self.clone().with(PAGE, page)
    }

    /// Shallow merge: keys from `partial` overwrite ours, new keys append
    pub fn merged(&self, partial: &FilterSet) -> Self {
        let mut merged = self.clone();
        for (key, value) in &partial.entries {
            merged.set(key.clone(), value.clone());
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for FilterSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for FilterSet {}

impl<K, V> FromIterator<(K, V)> for FilterSet
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FilterSet::new(), |set, (k, v)| set.with(k, v))
    }
}

/// Format a filter set as a URL query string
///
/// `?` prefixes the first pair, `&` joins the rest, values are
/// percent-encoded. An empty set formats to an empty string.
pub fn format_query(filters: &FilterSet) -> String {
    filters
        .iter()
        .enumerate()
        .fold(String::new(), |mut acc, (index, (key, value))| {
            acc.push(if index == 0 { '?' } else { '&' });
            acc.push_str(key);
            acc.push('=');
            acc.push_str(&urlencoding::encode(&value.to_string()));
            acc
        })
}

/// Parse a query string produced by [`format_query`] back into a filter set
///
/// Values that read as canonical integers come back as `Number`; since
/// values compare by rendered form this still equals the `Text` that was
/// formatted. Pairs whose value fails to percent-decode are kept verbatim.
pub fn parse_query(query: &str) -> FilterSet {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let decoded = urlencoding::decode(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            let value = match decoded.parse::<i64>() {
                Ok(n) if n.to_string() == decoded => FilterValue::Number(n),
                _ => FilterValue::Text(decoded),
            };
            (key.to_string(), value)
        })
        .collect()
}
