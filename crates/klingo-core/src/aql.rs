//! AQL wire types, response unwrapping and in-body error classification.
//!
//! AQL is the platform's generic query protocol: a single POST endpoint
//! accepts a list of named queries and answers with a JSON object keyed by
//! each query's caller-chosen alias. This module holds the request shapes and
//! the two pieces of protocol knowledge every call path shares:
//!
//! - [`unwrap_alias`] strips one level of pagination envelope, because the
//!   platform applies the envelope inconsistently across endpoints and
//!   callers should not need to know which endpoints paginate.
//! - [`classify_body`] detects application errors signaled inside a 200
//!   response, which the platform does instead of (not in addition to) using
//!   the transport status.

use crate::error::{Error, Result};
use crate::query::QueryParams;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single named query, addressed in the response by its alias.
///
/// Built fresh per call and immutable once submitted. The alias is purely a
/// response lookup key; keeping aliases unique within one batch is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Query name, e.g. `pacientes.index`.
    pub name: String,

    /// Caller-chosen alias, sent on the wire as `id`.
    #[serde(rename = "id")]
    pub alias: String,

    /// Query parameters; shape is dictated by the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parms: Option<Value>,

    /// Extra configuration slugs to fetch alongside the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configs: Option<Vec<String>>,

    /// Cache key for data that rarely changes, sent on the wire as `lon`.
    #[serde(rename = "lon", skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
}

impl QueryDescriptor {
    /// Create a descriptor for the given query name and response alias.
    #[must_use]
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
            parms: None,
            configs: None,
            cache_key: None,
        }
    }

    /// Attach query parameters.
    #[must_use]
    pub fn with_parms(mut self, parms: Value) -> Self {
        self.parms = Some(parms);
        self
    }

    /// Attach extra configuration slugs.
    #[must_use]
    pub fn with_configs(mut self, configs: Vec<String>) -> Self {
        self.configs = Some(configs);
        self
    }

    /// Attach a cache key.
    #[must_use]
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }
}

/// Body of a batched AQL request: `{"q": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct AqlRequest {
    /// Queries to execute, answered independently under their aliases.
    pub q: Vec<QueryDescriptor>,
}

impl AqlRequest {
    /// Wrap a sequence of descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error when the sequence is empty or any descriptor has an
    /// empty name.
    pub fn new(queries: Vec<QueryDescriptor>) -> Result<Self> {
        if queries.is_empty() {
            return Err(Error::ValidationError(
                "AQL request must carry at least one query".to_string(),
            ));
        }
        if let Some(bad) = queries.iter().find(|query| query.name.is_empty()) {
            return Err(Error::ValidationError(format!(
                "AQL query with alias `{}` has an empty name",
                bad.alias
            )));
        }
        Ok(Self { q: queries })
    }
}

/// Request-level routing hints, sent as URL query parameters.
///
/// `action` historically lets the platform pick a faster code path for the
/// named operation; `page` drives server-side pagination.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoutingHints {
    /// Routing action, sent as `a`.
    pub action: Option<String>,

    /// Page number, sent as `page`.
    pub page: Option<u32>,
}

impl RoutingHints {
    /// Create empty hints.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            action: None,
            page: None,
        }
    }

    /// Set the routing action.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the page number.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Convert the hints into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("a", self.action.as_deref());
        params.push_opt("page", self.page);
        params.into_pairs()
    }
}

/// Extract the result for `alias` from a batch response, stripping one
/// pagination envelope when present.
///
/// Three cases, applied uniformly to every response:
///
/// - `alias` absent: the whole response is returned unchanged, as a fallback
///   for mis-set aliases and endpoints that ignore the alias.
/// - the value at `alias` is an object with a `data` field: the nested value
///   is returned.
/// - otherwise: the value at `alias`, verbatim.
///
/// Pure function; calling it repeatedly on the same input yields the same
/// result.
#[must_use]
pub fn unwrap_alias<'a>(response: &'a Value, alias: &str) -> &'a Value {
    match response.get(alias) {
        None => response,
        Some(value) => match value.get("data") {
            Some(nested) => nested,
            None => value,
        },
    }
}

/// Detect an application error signaled inside a successful response.
///
/// The platform sometimes answers with transport status 200 and puts the real
/// status in the body. When the body carries both a `status` field (integer,
/// or a numeric string) and an `error` field, and the status is >= 400, the
/// call is treated as failed.
///
/// # Errors
///
/// Returns [`Error::RemoteCall`] carrying the in-body status and the full
/// body when the pattern matches.
pub fn classify_body(operation: &str, body: &Value) -> Result<()> {
    let Some(status) = body.get("status") else {
        return Ok(());
    };
    if body.get("error").is_none() {
        return Ok(());
    }

    let code = match status {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };

    match code {
        Some(code) if code >= 400 => Err(Error::RemoteCall {
            operation: operation.to_string(),
            status: u16::try_from(code).unwrap_or(u16::MAX),
            body: Some(body.clone()),
        }),
        _ => Ok(()),
    }
}
