//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::api::UpsertQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderUpdate};
use crate::db::repository::{Repository, new_business_id};
use crate::utils::types::{Page, Pagination, PaginationQuery};
use crate::utils::validation::{ValidatedJson, patch_as_create};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 桌台存在性检查 (订单与批量下单共用)
pub async fn ensure_table(state: &ServerState, table_id: &str) -> AppResult<()> {
    if state.repos.tables.exists(table_id).await? {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::TableNotFound).with_detail("table_id", table_id))
    }
}

/// GET /orders - 分页获取订单
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Page<Order>>> {
    let pagination = Pagination::try_from(query)?;
    let page = state.repos.orders.find_all(&pagination).await.map_err(|e| {
        tracing::error!(event = "order_list_error", error = %e, "Failed to list orders");
        AppError::from(e)
    })?;
    Ok(Json(page))
}

/// GET /orders/{order_id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.repos.orders.get(&order_id).await.map_err(|e| {
        tracing::error!(event = "order_get_error", order_id = %order_id, error = %e, "Failed to fetch order");
        AppError::from(e)
    })?;
    Ok(Json(order))
}

/// 写入新订单; POST 与 upsert 新建共用
///
/// 给出 table_id 时桌台必须存在; order_date 缺省为当前时间。
async fn insert_order(state: &ServerState, order_id: &str, payload: OrderCreate) -> AppResult<Order> {
    if let Some(table_id) = payload.table_id.as_deref()
        && let Err(e) = ensure_table(state, table_id).await
    {
        tracing::warn!(event = "order_create_error", table_id = %table_id, error = %e, "Referenced table does not exist");
        return Err(e);
    }

    let order = payload.into_order(order_id.to_string(), Utc::now());
    state.repos.orders.create(order_id, order).await.map_err(|e| {
        tracing::error!(event = "order_create_error", order_id = %order_id, error = %e, "Order was not created");
        AppError::from(e)
    })
}

/// POST /orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order_id = new_business_id();
    let order = insert_order(&state, &order_id, payload).await?;

    tracing::info!(event = "order_create_success", order_id = %order_id, actor = %user.user_id, "Order created");
    Ok(Json(order))
}

/// PATCH /orders/{order_id} - 更新订单 (`?upsert=true` 时不存在则创建)
pub async fn update(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Query(mode): Query<UpsertQuery>,
    ValidatedJson(patch): ValidatedJson<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let repo = &state.repos.orders;
    if mode.upsert && !repo.exists(&order_id).await? {
        let payload: OrderCreate = patch_as_create(&patch).inspect_err(|e| {
            tracing::warn!(event = "order_update_error", order_id = %order_id, error = %e, "Incomplete order for upsert");
        })?;
        let order = insert_order(&state, &order_id, payload).await?;
        tracing::info!(event = "order_update_success", order_id = %order_id, created = true, "Order created by upsert");
        return Ok(Json(order));
    }

    if let Some(table_id) = patch.table_id.as_deref()
        && let Err(e) = ensure_table(&state, table_id).await
    {
        tracing::warn!(event = "order_update_error", order_id = %order_id, error = %e, "Referenced table does not exist");
        return Err(e);
    }

    let order = repo.update(&order_id, &patch).await.map_err(|e| {
        tracing::error!(event = "order_update_error", order_id = %order_id, error = %e, "Order update failed");
        AppError::from(e)
    })?;

    tracing::info!(event = "order_update_success", order_id = %order_id, "Order updated");
    Ok(Json(order))
}
