//! HTTP routes.

mod auth;
mod branches;
pub mod context;
pub mod error;

use axum::Router;
use axum::routing::{get, post, put};
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

/// Success body: a localized message and the payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: String, data: T) -> Self {
        Self { message, data }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/branches",
            get(branches::list_branches).post(branches::create_branch),
        )
        .route(
            "/api/branches/:id",
            put(branches::update_branch).delete(branches::delete_branch),
        )
}

/// Trimmed text of a scalar payload value. Blank strings, null,
/// arrays and objects yield `None`.
pub(crate) fn text(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::String(s) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Patch semantics for an optional column: absent leaves it alone,
/// null or blank clears it, anything else sets it.
pub(crate) fn patch(payload: &Value, key: &str) -> Option<Option<String>> {
    payload.get(key).map(|_| text(payload, key))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_trims_and_drops_blanks() {
        let payload = json!({ "a": "  x ", "b": "   ", "c": 5, "d": null, "e": [1] });
        assert_eq!(text(&payload, "a").as_deref(), Some("x"));
        assert_eq!(text(&payload, "b"), None);
        assert_eq!(text(&payload, "c").as_deref(), Some("5"));
        assert_eq!(text(&payload, "d"), None);
        assert_eq!(text(&payload, "e"), None);
        assert_eq!(text(&payload, "missing"), None);
    }

    #[test]
    fn patch_distinguishes_absent_from_cleared() {
        let payload = json!({ "phone": null, "email": "a@b.co" });
        assert_eq!(patch(&payload, "address"), None);
        assert_eq!(patch(&payload, "phone"), Some(None));
        assert_eq!(patch(&payload, "email"), Some(Some("a@b.co".into())));
    }
}
