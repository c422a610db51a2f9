//! REST envelope types. Resource shapes live in [`pipeline::definitions`].

use serde::Deserialize;

/// The `{ "count": n, "value": [...] }` envelope returned by list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
