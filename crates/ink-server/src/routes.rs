//! Route table and handlers.
//!
//! | Route | Operation |
//! |---|---|
//! | `POST /api/create-content` | create |
//! | `GET /api/operations/:id` | detail |
//! | `PUT /api/operations/:id` | update |
//! | `DELETE /api/operations/:id` | delete |
//! | `GET /api/external-data` | external GET proxy |
//! | `POST /api/external-data` | external POST helper |
//! | `GET /api/content` | published listing |
//! | `GET /api/content/recent` | raw recent listing |
//! | `GET /api/content-types/:type` | content-type description |
//! | `GET /custom-module/my-data` | greeting |

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use ink_core::ports::ContentStore;
use ink_core::{ContentError, ContentId, ContentItem};

use crate::AppState;
use crate::error::{ApiError, Operation};
use crate::middleware::log_requests;
use crate::response::{ModifiedJson, or_empty_list};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/create-content", post(create_content))
        .route(
            "/api/operations/:id",
            get(content_detail).put(update_content).delete(delete_content),
        )
        .route(
            "/api/external-data",
            get(external_data).post(post_external_data),
        )
        .route("/api/content", get(list_published))
        .route("/api/content/recent", get(list_recent))
        .route("/api/content-types/:type", get(content_type))
        .route("/custom-module/my-data", get(my_data))
        .layer(axum::middleware::from_fn(log_requests))
        .with_state(state)
}

/// Resolve a path identifier to a stored item. Unknown and non-numeric
/// identifiers resolve to `None`.
async fn resolve(state: &AppState, raw_id: &str) -> Result<Option<ContentItem>, ContentError> {
    let Ok(id) = raw_id.parse::<ContentId>() else {
        tracing::debug!(raw_id, "non-numeric content id");
        return Ok(None);
    };
    state.service.store().load(id).await
}

/// Parse a request body as JSON; anything unparseable becomes `null`.
fn json_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

async fn create_content(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .service
        .create(&json_body(&body))
        .await
        .map_err(ApiError::on(Operation::Create))?;
    Ok(or_empty_list(created))
}

async fn content_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let on_err = ApiError::on(Operation::Detail);
    let item = resolve(&state, &id).await.map_err(&on_err)?;
    let detail = state.service.get_detail(item).await.map_err(&on_err)?;
    Ok(ModifiedJson(detail))
}

async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let on_err = ApiError::on(Operation::Update);
    let item = resolve(&state, &id).await.map_err(&on_err)?;
    let updated = state
        .service
        .update(item, &json_body(&body))
        .await
        .map_err(&on_err)?;
    Ok(ModifiedJson(updated))
}

async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let on_err = ApiError::on(Operation::Delete);
    let item = resolve(&state, &id).await.map_err(&on_err)?;
    let deleted = state.service.delete(item).await.map_err(&on_err)?;
    Ok(Json(deleted))
}

async fn external_data(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let data = state
        .service
        .get_external_data()
        .await
        .map_err(ApiError::on(Operation::ExternalGet))?;
    Ok(or_empty_list(data))
}

async fn post_external_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let data = state
        .service
        .post_external_data(json_body(&body))
        .await
        .map_err(ApiError::on(Operation::ExternalPost))?;
    Ok(or_empty_list(data))
}

async fn list_published(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let list = state
        .service
        .list_published()
        .await
        .map_err(ApiError::on(Operation::ListPublished))?;
    Ok(ModifiedJson(list))
}

async fn list_recent(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let recent = state
        .service
        .list_recent_raw()
        .await
        .map_err(ApiError::on(Operation::ListRecent))?;
    Ok(ModifiedJson(recent))
}

async fn content_type(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
) -> impl IntoResponse {
    ModifiedJson(state.service.classify_content_type(&type_name))
}

async fn my_data(State(state): State<AppState>) -> impl IntoResponse {
    ModifiedJson(state.service.greeting())
}
