use std::fmt;

use url::form_urlencoded;

/// Default base URL for the production Tagstore service.
pub const DEFAULT_BASE_URL: &str = "https://api.tagstore.io";

/// A single query-string argument value.
///
/// Booleans are rendered lowercase because the service only understands
/// `true` and `false` in query positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for QueryArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<bool> for QueryArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for QueryArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for QueryArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Assemble a full endpoint URL from a base, a resource path and query
/// arguments.
///
/// The base may carry a trailing slash; the path always starts with one.
/// Query values are form-encoded, so paths and messages with reserved
/// characters survive the trip intact.
#[must_use]
pub fn endpoint_url(base: &str, path: &str, query: &[(&str, QueryArg)]) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), path);
    if !query.is_empty() {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in query {
            serializer.append_pair(key, &value.to_string());
        }
        url.push('?');
        url.push_str(&serializer.finish());
    }
    url
}
