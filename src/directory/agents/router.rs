use std::collections::BTreeSet;
use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::super::import::{CsvProfileImporter, RejectedRow};
use super::domain::{AgentId, AgentProfileInput};
use super::repository::AgentRepository;
use super::service::{AgentDirectoryService, DirectoryServiceError};

const DIRECTORY_LIMIT: usize = 100;
const ADMIN_HEADER: &str = "x-admin-email";

/// Shared router state: the service facade plus the injected admin
/// allow-list guarding the bulk-import endpoint.
pub(crate) struct DirectoryState<R> {
    service: Arc<AgentDirectoryService<R>>,
    admins: Arc<BTreeSet<String>>,
}

impl<R> Clone for DirectoryState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            admins: Arc::clone(&self.admins),
        }
    }
}

/// Router builder exposing the profile-write, read, listing, and bulk-import
/// endpoints.
pub fn agent_router<R>(
    service: Arc<AgentDirectoryService<R>>,
    admins: BTreeSet<String>,
) -> Router
where
    R: AgentRepository + 'static,
{
    let state = DirectoryState {
        service,
        admins: Arc::new(admins),
    };

    Router::new()
        .route(
            "/api/v1/agents",
            get(directory_handler::<R>).post(upsert_handler::<R>),
        )
        .route("/api/v1/agents/:agent_id", get(detail_handler::<R>))
        .route("/api/v1/agents/import", post(import_handler::<R>))
        .with_state(state)
}

pub(crate) async fn upsert_handler<R>(
    State(state): State<DirectoryState<R>>,
    axum::Json(profile): axum::Json<AgentProfileInput>,
) -> Response
where
    R: AgentRepository + 'static,
{
    match state.service.upsert_profile(profile) {
        Ok(record) => {
            let view = state.service.detail_view(&record);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(state): State<DirectoryState<R>>,
    Path(agent_id): Path<String>,
) -> Response
where
    R: AgentRepository + 'static,
{
    match state.service.get(&AgentId(agent_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn directory_handler<R>(State(state): State<DirectoryState<R>>) -> Response
where
    R: AgentRepository + 'static,
{
    match state.service.directory(DIRECTORY_LIMIT) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => service_error_response(error),
    }
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    imported: usize,
    rejected: Vec<RejectedRow>,
}

pub(crate) async fn import_handler<R>(
    State(state): State<DirectoryState<R>>,
    headers: HeaderMap,
    body: String,
) -> Response
where
    R: AgentRepository + 'static,
{
    let caller = headers
        .get(ADMIN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_ascii_lowercase());

    let authorized = caller
        .map(|email| state.admins.contains(&email))
        .unwrap_or(false);
    if !authorized {
        let payload = json!({ "error": "bulk import requires a directory admin" });
        return (StatusCode::FORBIDDEN, axum::Json(payload)).into_response();
    }

    let outcome = match CsvProfileImporter::from_reader(Cursor::new(body.into_bytes())) {
        Ok(outcome) => outcome,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let mut imported = 0;
    for profile in outcome.profiles {
        match state.service.upsert_profile(profile) {
            Ok(_) => imported += 1,
            Err(error) => return service_error_response(error),
        }
    }

    let response = ImportResponse {
        imported,
        rejected: outcome.rejected,
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

fn service_error_response(error: DirectoryServiceError) -> Response {
    let status = match &error {
        DirectoryServiceError::UnknownAgent(_) => StatusCode::NOT_FOUND,
        DirectoryServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
