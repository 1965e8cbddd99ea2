//! Shared types used across FieldOps API endpoints

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default page size sent when the caller does not choose one
pub const DEFAULT_PER_PAGE: u32 = 25;
/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination and filter parameters shared by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size (clamped to `1..=100`, default 25)
    pub per_page: Option<u32>,
    /// Free-text search term
    pub search: Option<String>,
    /// Status filter (endpoint specific, e.g. `scheduled`, `paid`)
    pub status: Option<String>,
}

impl ListParams {
    /// Creates empty list parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the search term
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the status filter
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Renders the parameters as query pairs, normalizing page bounds
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = vec![
            ("page", self.page.unwrap_or(1).max(1).to_string()),
            (
                "per_page",
                self.per_page
                    .unwrap_or(DEFAULT_PER_PAGE)
                    .clamp(1, MAX_PER_PAGE)
                    .to_string(),
            ),
        ];
        if let Some(s) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            q.push(("search", s.to_string()));
        }
        if let Some(s) = self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            q.push(("status", s.to_string()));
        }
        q
    }
}

/// One page of a list endpoint
///
/// The API answers list calls either with a bare JSON array or with an
/// envelope carrying pagination metadata; both decode into this type.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Page number reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Total number of matching items, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Whether more pages exist, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<U> {
            Bare(Vec<U>),
            Envelope {
                #[serde(
                    alias = "items",
                    alias = "results",
                    alias = "territories",
                    alias = "jobs",
                    alias = "customers",
                    alias = "invoices",
                    alias = "slots"
                )]
                data: Vec<U>,
                #[serde(default)]
                page: Option<u32>,
                #[serde(default)]
                per_page: Option<u32>,
                #[serde(default, alias = "total_count")]
                total: Option<u64>,
                #[serde(default)]
                has_more: Option<bool>,
            },
        }

        Ok(match Repr::<T>::deserialize(deserializer)? {
            Repr::Bare(data) => Self {
                data,
                page: None,
                per_page: None,
                total: None,
                has_more: None,
            },
            Repr::Envelope {
                data,
                page,
                per_page,
                total,
                has_more,
            } => Self {
                data,
                page,
                per_page,
                total,
                has_more,
            },
        })
    }
}

/// Deserializes an identifier that may be encoded as a JSON string or number
pub(crate) fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Optional variant of [`id_string`]; `null` and missing become `None`
pub(crate) fn opt_id_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Deserializes a list of strings, tolerating `null` and numeric entries
///
/// Postal codes in particular are sometimes sent as numbers.
pub(crate) fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let v = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
    v.into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(Ok(s)),
            Value::Number(n) => Some(Ok(n.to_string())),
            other => Some(Err(serde::de::Error::custom(format!(
                "expected string list entry, got {other}"
            )))),
        })
        .collect()
}
