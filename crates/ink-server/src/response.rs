//! Success responders.

use axum::Json;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// `Cache-Control` value sent with every modified-resource response.
pub const NO_CACHE: &str = "must-revalidate, no-cache, private";

/// JSON body that must not be cached by clients or proxies.
///
/// Every successful response uses this except DELETE, which answers with
/// plain [`Json`].
#[derive(Debug)]
pub struct ModifiedJson<T>(pub T);

impl<T: Serialize> IntoResponse for ModifiedJson<T> {
    fn into_response(self) -> Response {
        ([(CACHE_CONTROL, NO_CACHE)], Json(self.0)).into_response()
    }
}

/// Render an operation result, or `[]` when there is none.
#[must_use]
pub fn or_empty_list<T: Serialize>(value: Option<T>) -> ModifiedJson<Value> {
    let body = value
        .and_then(|v| {
            serde_json::to_value(v)
                .inspect_err(|e| tracing::warn!(%e, "response body not serializable"))
                .ok()
        })
        .unwrap_or_else(|| Value::Array(Vec::new()));
    ModifiedJson(body)
}
