//! Branch endpoints.

use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use bizdesk_core::error::BizdeskError;
use bizdesk_core::language::Language;
use bizdesk_core::messages::{Message, label};
use bizdesk_core::models::branch::{Branch, CreateBranch, UpdateBranch};
use bizdesk_core::models::permission::codes;
use bizdesk_core::repository::{BranchRepository, PaginatedResult, Pagination};
use bizdesk_core::validation::{Rule, RuleSet};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use super::context::{authenticate, guard, json_body, language, validate};
use super::error::ApiError;
use super::{Envelope, patch, text};
use crate::state::AppState;

const MAX_PAGE_SIZE: u64 = 200;

fn tenant_rules(lang: Language) -> RuleSet {
    RuleSet::new().field(
        "tenant_id",
        label(lang, "tenant_id"),
        [Rule::Required, Rule::Uuid],
    )
}

/// Rules for a branch body. `name` is only required on create.
fn branch_rules(lang: Language, name_required: bool) -> RuleSet {
    let name = if name_required {
        vec![Rule::Required, Rule::MinLength(2), Rule::MaxLength(100)]
    } else {
        vec![Rule::MinLength(2), Rule::MaxLength(100)]
    };

    tenant_rules(lang)
        .field("name", label(lang, "name"), name)
        .field("phone", label(lang, "phone"), [Rule::Phone])
        .field("email", label(lang, "email"), [Rule::Email])
        .field("address", label(lang, "address"), [Rule::MaxLength(255)])
}

/// Validated payloads always carry a UUID tenant.
fn tenant_of(payload: &Value, lang: Language) -> Result<Uuid, ApiError> {
    text(payload, "tenant_id")
        .and_then(|s| Uuid::parse_str(&s).ok())
        .ok_or_else(|| {
            ApiError::field(
                "tenant_id",
                Message::Uuid {
                    label: label(lang, "tenant_id"),
                }
                .render(lang),
            )
        })
}

fn path_id(raw: &str, lang: Language) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("branch", lang))
}

fn name_taken(lang: Language) -> ApiError {
    ApiError::field(
        "name",
        Message::AlreadyExists {
            label: label(lang, "name"),
        }
        .render(lang),
    )
}

/// Fail with a `name` error if another branch in the tenant uses it.
async fn ensure_name_free(
    state: &AppState,
    tenant_id: Uuid,
    name: &str,
    except: Option<Uuid>,
    lang: Language,
) -> Result<(), ApiError> {
    match state.branches.get_by_name(tenant_id, name).await {
        Ok(existing) if Some(existing.id) == except => Ok(()),
        Ok(_) => Err(name_taken(lang)),
        Err(BizdeskError::NotFound { .. }) => Ok(()),
        Err(e) => Err(ApiError::from_domain(e, lang)),
    }
}

/// Unique-index races surface as `AlreadyExists` on write.
fn write_error(err: BizdeskError, lang: Language) -> ApiError {
    match err {
        BizdeskError::AlreadyExists { .. } => name_taken(lang),
        other => ApiError::from_domain(other, lang),
    }
}

fn query_payload(query: HashMap<String, String>) -> Value {
    Value::Object(
        query
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<Map<_, _>>(),
    )
}

fn page_param(payload: &Value, key: &str, default: u64) -> u64 {
    text(payload, key)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.trunc() as u64)
        .unwrap_or(default)
}

/// GET /api/branches?tenant_id=…&offset=…&limit=…
pub async fn list_branches(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Envelope<PaginatedResult<Branch>>>, ApiError> {
    let lang = language(&headers);
    let identity = authenticate(&state, &headers, lang).await?;
    let payload = query_payload(query);

    guard(&state, &identity, codes::VIEW_BRANCHES, &payload, lang)?;

    let rules = tenant_rules(lang)
        .field("offset", label(lang, "offset"), [Rule::Number])
        .field("limit", label(lang, "limit"), [Rule::Number]);
    validate(&payload, &rules, lang)?;
    let tenant_id = tenant_of(&payload, lang)?;

    let defaults = Pagination::default();
    let pagination = Pagination {
        offset: page_param(&payload, "offset", defaults.offset),
        limit: page_param(&payload, "limit", defaults.limit).clamp(1, MAX_PAGE_SIZE),
    };

    let page = state
        .branches
        .list(tenant_id, pagination)
        .await
        .map_err(|e| ApiError::from_domain(e, lang))?;

    let message = Message::Fetched {
        label: label(lang, "branches"),
    }
    .render(lang);
    Ok(Json(Envelope::new(message, page)))
}

/// POST /api/branches
pub async fn create_branch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Branch>>), ApiError> {
    let lang = language(&headers);
    let identity = authenticate(&state, &headers, lang).await?;
    let payload = json_body(&body, lang)?;

    guard(&state, &identity, codes::CREATE_BRANCH, &payload, lang)?;
    validate(&payload, &branch_rules(lang, true), lang)?;

    let tenant_id = tenant_of(&payload, lang)?;
    let name = text(&payload, "name").ok_or_else(|| {
        ApiError::field(
            "name",
            Message::Required {
                label: label(lang, "name"),
            }
            .render(lang),
        )
    })?;
    ensure_name_free(&state, tenant_id, &name, None, lang).await?;

    let branch = state
        .branches
        .create(CreateBranch {
            tenant_id,
            name,
            phone: text(&payload, "phone"),
            email: text(&payload, "email"),
            address: text(&payload, "address"),
        })
        .await
        .map_err(|e| write_error(e, lang))?;

    info!(
        branch_id = %branch.id,
        tenant_id = %tenant_id,
        user_id = %identity.user_id,
        "Branch created"
    );

    let message = Message::Created {
        label: label(lang, "branch"),
    }
    .render(lang);
    Ok((StatusCode::CREATED, Json(Envelope::new(message, branch))))
}

/// PUT /api/branches/:id
pub async fn update_branch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Envelope<Branch>>, ApiError> {
    let lang = language(&headers);
    let identity = authenticate(&state, &headers, lang).await?;
    let payload = json_body(&body, lang)?;

    guard(&state, &identity, codes::UPDATE_BRANCH, &payload, lang)?;
    validate(&payload, &branch_rules(lang, false), lang)?;

    let tenant_id = tenant_of(&payload, lang)?;
    let id = path_id(&id, lang)?;
    state
        .branches
        .get_by_id(tenant_id, id)
        .await
        .map_err(|e| ApiError::from_domain(e, lang))?;

    let name = text(&payload, "name");
    if let Some(name) = &name {
        ensure_name_free(&state, tenant_id, name, Some(id), lang).await?;
    }

    let branch = state
        .branches
        .update(
            tenant_id,
            id,
            UpdateBranch {
                name,
                phone: patch(&payload, "phone"),
                email: patch(&payload, "email"),
                address: patch(&payload, "address"),
            },
        )
        .await
        .map_err(|e| write_error(e, lang))?;

    info!(branch_id = %id, user_id = %identity.user_id, "Branch updated");

    let message = Message::Updated {
        label: label(lang, "branch"),
    }
    .render(lang);
    Ok(Json(Envelope::new(message, branch)))
}

/// DELETE /api/branches/:id?tenant_id=…
pub async fn delete_branch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let lang = language(&headers);
    let identity = authenticate(&state, &headers, lang).await?;
    let payload = query_payload(query);

    guard(&state, &identity, codes::DELETE_BRANCH, &payload, lang)?;
    validate(&payload, &tenant_rules(lang), lang)?;

    let tenant_id = tenant_of(&payload, lang)?;
    let id = path_id(&id, lang)?;
    state
        .branches
        .delete(tenant_id, id)
        .await
        .map_err(|e| ApiError::from_domain(e, lang))?;

    info!(branch_id = %id, user_id = %identity.user_id, "Branch deleted");

    let message = Message::Deleted {
        label: label(lang, "branch"),
    }
    .render(lang);
    Ok(Json(Envelope::new(message, serde_json::json!({ "id": id }))))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_params_fall_back_to_defaults() {
        let payload = json!({ "offset": "20", "limit": "abc", "neg": "-5", "frac": "7.9" });
        assert_eq!(page_param(&payload, "offset", 0), 20);
        assert_eq!(page_param(&payload, "limit", 50), 50);
        assert_eq!(page_param(&payload, "neg", 3), 3);
        assert_eq!(page_param(&payload, "frac", 0), 7);
        assert_eq!(page_param(&payload, "missing", 9), 9);
    }

    #[test]
    fn update_rules_leave_name_optional() {
        let tenant = Uuid::new_v4().to_string();
        let result = bizdesk_core::validate_fields(
            &json!({ "tenant_id": tenant }),
            &branch_rules(Language::En, false),
            Language::En,
        );
        assert!(result.is_valid());

        let result = bizdesk_core::validate_fields(
            &json!({ "tenant_id": tenant }),
            &branch_rules(Language::En, true),
            Language::En,
        );
        assert_eq!(result.errors()["name"], "Name is required.");
    }
}
