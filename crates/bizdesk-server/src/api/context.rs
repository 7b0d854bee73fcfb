//! Per-request context: language, caller identity, and the access guard.

use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use bizdesk_core::access::{Denial, authorize, tenant_id_from_value};
use bizdesk_core::identity::Identity;
use bizdesk_core::language::Language;
use bizdesk_core::validation::{RuleSet, validate_fields};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::state::AppState;

/// Language requested through `Accept-Language`.
pub fn language(headers: &HeaderMap) -> Language {
    Language::from_accept_language(headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the caller behind the bearer token. Always enforced,
/// regardless of policy.
pub async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    lang: Language,
) -> Result<Identity, ApiError> {
    let Some(token) = bearer_token(headers) else {
        debug!("Request without bearer token");
        return Err(ApiError::denied(&Denial::Unauthenticated, lang));
    };

    state
        .identities
        .from_token(token, state.auth_config())
        .await
        .map_err(|e| ApiError::from_domain(e, lang))
}

/// Check `code` and the payload's tenant under the configured policy.
pub fn guard(
    state: &AppState,
    identity: &Identity,
    code: &str,
    payload: &Value,
    lang: Language,
) -> Result<(), ApiError> {
    let tenant_id = tenant_id_from_value(payload.get("tenant_id"));
    let decision = authorize(Some(identity), code, tenant_id);

    match state.policy.apply(decision) {
        Ok(None) => Ok(()),
        Ok(Some(denial)) => {
            warn!(
                user_id = %identity.user_id,
                permission = code,
                ?denial,
                "Access denial overridden by permissive policy"
            );
            Ok(())
        }
        Err(denial) => {
            debug!(user_id = %identity.user_id, permission = code, ?denial, "Access denied");
            Err(ApiError::denied(&denial, lang))
        }
    }
}

/// Run the rules, turning failures into a 400.
pub fn validate(payload: &Value, rules: &RuleSet, lang: Language) -> Result<(), ApiError> {
    let result = validate_fields(payload, rules, lang);
    if result.is_valid() {
        Ok(())
    } else {
        Err(ApiError::Validation(result.into_errors()))
    }
}

/// Parse a JSON request body. An empty body is an empty object.
pub fn json_body(body: &Bytes, lang: Language) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|_| ApiError::invalid_body(lang))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_is_extracted() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn language_from_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(language(&headers), Language::En);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ar-SA,en;q=0.8"));
        assert_eq!(language(&headers), Language::Ar);
    }

    #[test]
    fn body_parsing() {
        assert_eq!(
            json_body(&Bytes::new(), Language::En).unwrap(),
            serde_json::json!({})
        );
        assert!(json_body(&Bytes::from_static(b"{not json"), Language::En).is_err());
    }
}
