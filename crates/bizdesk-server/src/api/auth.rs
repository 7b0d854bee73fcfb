//! Login endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use bizdesk_auth::{LoginInput, LoginOutput};
use bizdesk_core::error::BizdeskError;
use bizdesk_core::messages::{Message, label};
use bizdesk_core::validation::{Rule, RuleSet};

use super::context::{json_body, language, validate};
use super::error::ApiError;
use super::{Envelope, text};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<LoginOutput>>, ApiError> {
    let lang = language(&headers);
    let payload = json_body(&body, lang)?;

    let rules = RuleSet::new()
        .field("email", label(lang, "email"), [Rule::Required, Rule::Email])
        .field("password", label(lang, "password"), [Rule::Required]);
    validate(&payload, &rules, lang)?;

    let input = LoginInput {
        email: text(&payload, "email").unwrap_or_default(),
        password: payload
            .get("password")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_owned(),
    };

    let output = state.auth.login(input).await.map_err(|e| match e {
        BizdeskError::AuthenticationFailed { .. } => {
            ApiError::Unauthorized(Message::InvalidCredentials.render(lang))
        }
        other => ApiError::from_domain(other, lang),
    })?;

    Ok(Json(Envelope::new(Message::LoggedIn.render(lang), output)))
}
