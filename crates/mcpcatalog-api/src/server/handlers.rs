//! HTTP handlers for the catalog API

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use mcpcatalog_core::{
    CatalogAppService, Entry, NewEntry, Page, Pagination, Parameter, Transport, WorkspaceServer,
    DEFAULT_PER_PAGE,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogAppService>,
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    debug!("[Api] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub q: Option<String>,
}

/// `GET /api/entries`
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Page<Entry>>> {
    let pagination = Pagination::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    let page = state
        .catalog
        .list(&pagination, params.q.as_deref())
        .await?;
    Ok(Json(page))
}

/// `POST /api/entries`
pub async fn create_entry(
    State(state): State<AppState>,
    Json(new): Json<NewEntry>,
) -> ApiResult<(StatusCode, Json<Entry>)> {
    let entry = state.catalog.import(new).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /api/entries/{name}`
///
/// Names containing `/` must be percent-encoded (`io.github%2Fnotion`).
pub async fn get_entry(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Entry>> {
    Ok(Json(state.catalog.get(&name).await?))
}

/// `DELETE /api/entries/{name}`
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state.catalog.delete(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransportRequest {
    pub transport: Transport,
    /// Hand-declared parameters; extracted from `transport` when absent
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,
}

/// `PUT /api/entries/{name}/transport`
pub async fn update_transport(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<UpdateTransportRequest>,
) -> ApiResult<Json<Entry>> {
    let entry = state
        .catalog
        .update_transport(&name, request.transport, request.parameters)
        .await?;
    Ok(Json(entry))
}

/// `POST /api/entries/{name}/enrich`
pub async fn enrich_entry(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Entry>> {
    Ok(Json(state.catalog.enrich(&name).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct ValuesRequest {
    #[serde(default)]
    pub values: HashMap<String, String>,
}

/// `POST /api/entries/{name}/preview`
pub async fn preview_entry(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<ValuesRequest>,
) -> ApiResult<Json<Transport>> {
    Ok(Json(state.catalog.preview(&name, &request.values).await?))
}

/// `GET /api/workspaces/{workspace_id}/servers`
pub async fn list_servers(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
) -> ApiResult<Json<Vec<WorkspaceServer>>> {
    Ok(Json(state.catalog.list_installed(workspace_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct InstallRequest {
    /// Catalog entry name
    pub entry: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

/// `POST /api/workspaces/{workspace_id}/servers`
pub async fn install_server(
    State(state): State<AppState>,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<InstallRequest>,
) -> ApiResult<(StatusCode, Json<WorkspaceServer>)> {
    let server = state
        .catalog
        .install(workspace_id, &request.entry, &request.values)
        .await?;
    Ok((StatusCode::CREATED, Json(server)))
}

/// `DELETE /api/workspaces/{workspace_id}/servers/{name}`
pub async fn uninstall_server(
    State(state): State<AppState>,
    Path((workspace_id, name)): Path<(Uuid, String)>,
) -> ApiResult<StatusCode> {
    state.catalog.uninstall(workspace_id, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}
