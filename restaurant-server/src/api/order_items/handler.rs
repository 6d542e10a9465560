//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Serialize;

use super::summary::{OrderSummary, summarize_order};
use crate::api::UpsertQuery;
use crate::api::orders::ensure_table;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Order, OrderCreate, OrderItem, OrderItemCreate, OrderItemPack, OrderItemUpdate,
};
use crate::db::repository::{Repository, new_business_id};
use crate::utils::money::round_price;
use crate::utils::types::{Page, Pagination, PaginationQuery};
use crate::utils::validation::{ValidatedJson, patch_as_create};
use crate::utils::{AppError, AppResult, ErrorCode};

async fn ensure_order(state: &ServerState, order_id: &str) -> AppResult<()> {
    if state.repos.orders.exists(order_id).await? {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id))
    }
}

async fn ensure_food(state: &ServerState, food_id: &str) -> AppResult<()> {
    if state.repos.foods.exists(food_id).await? {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::FoodNotFound).with_detail("food_id", food_id))
    }
}

/// GET /order-items - 分页获取订单项
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Page<OrderItem>>> {
    let pagination = Pagination::try_from(query)?;
    let page = state.repos.order_items.find_all(&pagination).await.map_err(|e| {
        tracing::error!(event = "order_item_list_error", error = %e, "Failed to list order items");
        AppError::from(e)
    })?;
    Ok(Json(page))
}

/// GET /order-items/{order_item_id} - 获取单个订单项
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_item_id): Path<String>,
) -> AppResult<Json<OrderItem>> {
    let item = state.repos.order_items.get(&order_item_id).await.map_err(|e| {
        tracing::error!(event = "order_item_get_error", order_item_id = %order_item_id, error = %e, "Failed to fetch order item");
        AppError::from(e)
    })?;
    Ok(Json(item))
}

/// GET /order-items-order/{order_id} - 订单汇总
pub async fn items_by_order(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let summary = summarize_order(&state.repos, &order_id).await.inspect_err(|e| {
        tracing::error!(event = "order_item_summary_error", order_id = %order_id, error = %e, "Failed to summarize order");
    })?;
    Ok(Json(summary.into_iter().collect()))
}

/// 写入新订单项; POST 与 upsert 新建共用
async fn insert_order_item(
    state: &ServerState,
    order_item_id: &str,
    payload: OrderItemCreate,
) -> AppResult<OrderItem> {
    let order_id = payload.order_id.clone().unwrap_or_default();
    let food_id = payload.food_id.clone().unwrap_or_default();
    let refs = match ensure_order(state, &order_id).await {
        Ok(()) => ensure_food(state, &food_id).await,
        Err(e) => Err(e),
    };
    if let Err(e) = refs {
        tracing::warn!(event = "order_item_create_error", order_id = %order_id, food_id = %food_id, error = %e, "Unresolved reference");
        return Err(e);
    }

    let unit_price = round_price(payload.unit_price.unwrap_or_default())?;
    let item = payload.into_order_item(order_item_id.to_string(), unit_price, Utc::now());

    state.repos.order_items.create(order_item_id, item).await.map_err(|e| {
        tracing::error!(event = "order_item_create_error", order_item_id = %order_item_id, error = %e, "Order item was not created");
        AppError::from(e)
    })
}

/// POST /order-items - 创建订单项
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<OrderItemCreate>,
) -> AppResult<Json<OrderItem>> {
    let order_item_id = new_business_id();
    let item = insert_order_item(&state, &order_item_id, payload).await?;

    tracing::info!(event = "order_item_create_success", order_item_id = %order_item_id, actor = %user.user_id, "Order item created");
    Ok(Json(item))
}

/// PATCH /order-items/{order_item_id} - 更新订单项 (`?upsert=true` 时不存在则创建)
///
/// upsert 新建时补丁必须满足创建规则 (字段齐全、订单与菜品存在)。
pub async fn update(
    State(state): State<ServerState>,
    Path(order_item_id): Path<String>,
    Query(mode): Query<UpsertQuery>,
    ValidatedJson(mut patch): ValidatedJson<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    let repo = &state.repos.order_items;
    if mode.upsert && !repo.exists(&order_item_id).await? {
        let payload: OrderItemCreate = patch_as_create(&patch).inspect_err(|e| {
            tracing::warn!(event = "order_item_update_error", order_item_id = %order_item_id, error = %e, "Incomplete order item for upsert");
        })?;
        let item = insert_order_item(&state, &order_item_id, payload).await?;
        tracing::info!(event = "order_item_update_success", order_item_id = %order_item_id, created = true, "Order item created by upsert");
        return Ok(Json(item));
    }

    if let Some(order_id) = patch.order_id.as_deref()
        && let Err(e) = ensure_order(&state, order_id).await
    {
        tracing::warn!(event = "order_item_update_error", order_item_id = %order_item_id, error = %e, "Referenced order does not exist");
        return Err(e);
    }
    if let Some(food_id) = patch.food_id.as_deref()
        && let Err(e) = ensure_food(&state, food_id).await
    {
        tracing::warn!(event = "order_item_update_error", order_item_id = %order_item_id, error = %e, "Referenced food does not exist");
        return Err(e);
    }

    patch.unit_price = patch.unit_price.map(round_price).transpose()?;

    let item = repo.update(&order_item_id, &patch).await.map_err(|e| {
        tracing::error!(event = "order_item_update_error", order_item_id = %order_item_id, error = %e, "Order item update failed");
        AppError::from(e)
    })?;

    tracing::info!(event = "order_item_update_success", order_item_id = %order_item_id, "Order item updated");
    Ok(Json(item))
}

/// 批量下单结果
#[derive(Debug, Serialize)]
pub struct OrderItemBatch {
    pub order_id: String,
    pub order_items: Vec<OrderItem>,
}

/// POST /order-items/batch - 新建订单并写入全部订单项
///
/// 所有引用在写入前校验; 写入过程本身不是事务，中途失败时已写入的文档保留。
pub async fn create_batch(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(pack): ValidatedJson<OrderItemPack>,
) -> AppResult<Json<OrderItemBatch>> {
    if pack.order_items.is_empty() {
        tracing::warn!(event = "order_item_batch_error", error = "no items", "Rejected empty order");
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    if let Some(table_id) = pack.table_id.as_deref() {
        ensure_table(&state, table_id).await.inspect_err(|e| {
            tracing::warn!(event = "order_item_batch_error", table_id = %table_id, error = %e, "Referenced table does not exist");
        })?;
    }

    let mut prices = Vec::with_capacity(pack.order_items.len());
    for line in &pack.order_items {
        let food_id = line.food_id.as_deref().unwrap_or_default();
        ensure_food(&state, food_id).await.inspect_err(|e| {
            tracing::warn!(event = "order_item_batch_error", food_id = %food_id, error = %e, "Referenced food does not exist");
        })?;
        prices.push(round_price(line.unit_price.unwrap_or_default())?);
    }

    let now = Utc::now();
    let order_id = new_business_id();
    let order: Order = OrderCreate {
        order_date: Some(now),
        table_id: pack.table_id,
    }
    .into_order(order_id.clone(), now);
    state.repos.orders.create(&order_id, order).await.map_err(|e| {
        tracing::error!(event = "order_item_batch_error", order_id = %order_id, error = %e, "Order was not created");
        AppError::from(e)
    })?;

    let mut created = Vec::with_capacity(pack.order_items.len());
    for (line, unit_price) in pack.order_items.into_iter().zip(prices) {
        let item = OrderItemCreate {
            order_id: Some(order_id.clone()),
            food_id: line.food_id,
            quantity: line.quantity,
            unit_price: Some(unit_price),
        };
        let order_item_id = new_business_id();
        let item = item.into_order_item(order_item_id.clone(), unit_price, Utc::now());
        let item = state.repos.order_items.create(&order_item_id, item).await.map_err(|e| {
            tracing::error!(event = "order_item_batch_error", order_id = %order_id, order_item_id = %order_item_id, error = %e, "Order item was not created");
            AppError::from(e)
        })?;
        created.push(item);
    }

    tracing::info!(
        event = "order_item_batch_success",
        order_id = %order_id,
        count = created.len(),
        actor = %user.user_id,
        "Order created with items"
    );
    Ok(Json(OrderItemBatch {
        order_id,
        order_items: created,
    }))
}
