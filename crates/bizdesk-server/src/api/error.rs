//! API error responses.
//!
//! Every error body carries a `message` already rendered in the
//! caller's language. Validation failures instead return the field
//! error map as the whole body.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bizdesk_core::access::Denial;
use bizdesk_core::error::BizdeskError;
use bizdesk_core::language::Language;
use bizdesk_core::messages::{Message, label};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Field name → localized message.
    Validation(BTreeMap<String, String>),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A single-field validation error.
    pub fn field(name: &str, message: String) -> Self {
        ApiError::Validation(BTreeMap::from([(name.to_owned(), message)]))
    }

    pub fn denied(denial: &Denial, lang: Language) -> Self {
        ApiError::Unauthorized(denial.message().render(lang))
    }

    pub fn not_found(entity: &str, lang: Language) -> Self {
        ApiError::NotFound(
            Message::NotFound {
                label: label(lang, entity),
            }
            .render(lang),
        )
    }

    pub fn invalid_body(lang: Language) -> Self {
        ApiError::BadRequest(Message::InvalidBody.render(lang))
    }

    /// Map a domain error. Anything unexpected is logged and hidden
    /// behind the generic message.
    pub fn from_domain(err: BizdeskError, lang: Language) -> Self {
        match err {
            BizdeskError::AuthenticationFailed { .. } => {
                ApiError::denied(&Denial::Unauthenticated, lang)
            }
            BizdeskError::NotFound { entity, .. } => ApiError::not_found(&entity, lang),
            BizdeskError::AlreadyExists { entity } => ApiError::BadRequest(
                Message::AlreadyExists {
                    label: label(lang, &entity),
                }
                .render(lang),
            ),
            other @ (BizdeskError::Database(_) | BizdeskError::Crypto(_)) => {
                error!(error = %other, "Request failed");
                ApiError::Internal(Message::Internal.render(lang))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => (status, Json(json!(errors))).into_response(),
            ApiError::Unauthorized(message)
            | ApiError::NotFound(message)
            | ApiError::BadRequest(message)
            | ApiError::Internal(message) => {
                (status, Json(json!({ "message": message }))).into_response()
            }
        }
    }
}
