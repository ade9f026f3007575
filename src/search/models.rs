//! Search request model and validation

use crate::providers::RouteId;
use thiserror::Error;

/// Longest accepted search term, in characters
pub const MAX_TERM_CHARS: usize = 50;

/// Page requested by the primary query
pub const FIRST_PAGE: u32 = 1;

/// Page size requested by the primary query
pub const PAGE_SIZE: u32 = 20;

/// Client-caused request errors. The display text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("请输入搜索关键词")]
    EmptyTerm,

    #[error("搜索关键词过长，请控制在{max}字以内")]
    TermTooLong { len: usize, max: usize },

    #[error("无效的路线号，请使用 1、2 或 3")]
    InvalidRoute(String),
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trimmed search term
    pub term: String,
    pub route: RouteId,
}

/// A query parameter as it appeared in the query string
#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryValue {
    Missing,
    Single(String),
    /// Given more than once, so not a single string
    Repeated(Vec<String>),
}

impl QueryValue {
    fn push(&mut self, value: String) {
        *self = match std::mem::replace(self, QueryValue::Missing) {
            QueryValue::Missing => QueryValue::Single(value),
            QueryValue::Single(first) => QueryValue::Repeated(vec![first, value]),
            QueryValue::Repeated(mut values) => {
                values.push(value);
                QueryValue::Repeated(values)
            }
        };
    }
}

impl SearchRequest {
    /// Validate a raw query string such as `wd=test&rt=2`.
    ///
    /// A repeated `wd` is treated like a missing term and a repeated `rt` like an
    /// invalid route, so the usual check order still applies.
    pub fn from_query(query: Option<&str>) -> Result<Self, ValidationError> {
        let mut wd = QueryValue::Missing;
        let mut rt = QueryValue::Missing;

        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "wd" => wd.push(value.into_owned()),
                "rt" => rt.push(value.into_owned()),
                _ => {}
            }
        }

        let term = match wd {
            QueryValue::Single(ref term) => Some(term.as_str()),
            QueryValue::Missing | QueryValue::Repeated(_) => None,
        };
        let term = validate_term(term)?;

        let route = match rt {
            QueryValue::Missing => validate_route(None)?,
            QueryValue::Single(ref raw) => validate_route(Some(raw))?,
            QueryValue::Repeated(values) => {
                return Err(ValidationError::InvalidRoute(values.join(",")));
            }
        };

        Ok(Self { term, route })
    }

    /// Validate raw query values.
    ///
    /// Checks run in order: term present, term non-empty after trimming, term length,
    /// then route. A missing or blank `rt` selects route 1.
    pub fn parse(wd: Option<&str>, rt: Option<&str>) -> Result<Self, ValidationError> {
        let term = validate_term(wd)?;
        let route = validate_route(rt)?;
        Ok(Self { term, route })
    }
}

fn validate_term(wd: Option<&str>) -> Result<String, ValidationError> {
    let term = wd.map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(ValidationError::EmptyTerm);
    }

    let len = term.chars().count();
    if len > MAX_TERM_CHARS {
        return Err(ValidationError::TermTooLong {
            len,
            max: MAX_TERM_CHARS,
        });
    }

    Ok(term.to_string())
}

fn validate_route(rt: Option<&str>) -> Result<RouteId, ValidationError> {
    match rt.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(RouteId::default()),
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .and_then(|n| RouteId::try_from(n).ok())
            .ok_or_else(|| ValidationError::InvalidRoute(raw.to_string())),
    }
}

/// Upstream query mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryAction {
    /// Detailed records, including play addresses when the provider has them
    Detail,
    /// Plain listing, used as the fallback
    List,
}

impl QueryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryAction::Detail => "detail",
            QueryAction::List => "list",
        }
    }

    /// Query parameters for this action
    pub fn params(self, term: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("ac", self.as_str().to_string()), ("wd", term.to_string())];
        if self == QueryAction::Detail {
            params.push(("pg", FIRST_PAGE.to_string()));
            params.push(("limit", PAGE_SIZE.to_string()));
        }
        params
    }
}
