//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::api::UpsertQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Table, TableCreate, TableUpdate};
use crate::db::repository::{Repository, new_business_id};
use crate::utils::types::{Page, Pagination, PaginationQuery};
use crate::utils::validation::{ValidatedJson, patch_as_create};
use crate::utils::{AppError, AppResult};

/// GET /tables - 分页获取桌台
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Page<Table>>> {
    let pagination = Pagination::try_from(query)?;
    let page = state.repos.tables.find_all(&pagination).await.map_err(|e| {
        tracing::error!(event = "table_list_error", error = %e, "Failed to list tables");
        AppError::from(e)
    })?;
    Ok(Json(page))
}

/// GET /tables/{table_id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
) -> AppResult<Json<Table>> {
    let table = state.repos.tables.get(&table_id).await.map_err(|e| {
        tracing::error!(event = "table_get_error", table_id = %table_id, error = %e, "Failed to fetch table");
        AppError::from(e)
    })?;
    Ok(Json(table))
}

/// 写入新桌台; POST 与 upsert 新建共用
async fn insert_table(state: &ServerState, table_id: &str, payload: TableCreate) -> AppResult<Table> {
    let table = payload.into_table(table_id.to_string(), Utc::now());
    state.repos.tables.create(table_id, table).await.map_err(|e| {
        tracing::error!(event = "table_create_error", table_id = %table_id, error = %e, "Table was not created");
        AppError::from(e)
    })
}

/// POST /tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<TableCreate>,
) -> AppResult<Json<Table>> {
    let table_id = new_business_id();
    let table = insert_table(&state, &table_id, payload).await?;

    tracing::info!(event = "table_create_success", table_id = %table_id, actor = %user.user_id, "Table created");
    Ok(Json(table))
}

/// PATCH /tables/{table_id} - 更新桌台 (`?upsert=true` 时不存在则创建)
pub async fn update(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
    Query(mode): Query<UpsertQuery>,
    ValidatedJson(patch): ValidatedJson<TableUpdate>,
) -> AppResult<Json<Table>> {
    let repo = &state.repos.tables;
    if mode.upsert && !repo.exists(&table_id).await? {
        let payload: TableCreate = patch_as_create(&patch).inspect_err(|e| {
            tracing::warn!(event = "table_update_error", table_id = %table_id, error = %e, "Incomplete table for upsert");
        })?;
        let table = insert_table(&state, &table_id, payload).await?;
        tracing::info!(event = "table_update_success", table_id = %table_id, created = true, "Table created by upsert");
        return Ok(Json(table));
    }

    let table = repo.update(&table_id, &patch).await.map_err(|e| {
        tracing::error!(event = "table_update_error", table_id = %table_id, error = %e, "Table update failed");
        AppError::from(e)
    })?;

    tracing::info!(event = "table_update_success", table_id = %table_id, "Table updated");
    Ok(Json(table))
}
