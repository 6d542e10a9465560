//! Food API Handlers
//!
//! 价格写入前统一规整为两位小数; 引用的菜单必须存在。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::api::UpsertQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Food, FoodCreate, FoodUpdate};
use crate::db::repository::{Repository, new_business_id};
use crate::utils::money::round_price;
use crate::utils::types::{Page, Pagination, PaginationQuery};
use crate::utils::validation::{ValidatedJson, patch_as_create};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 菜单存在性检查
async fn ensure_menu(state: &ServerState, menu_id: &str) -> AppResult<()> {
    if state.repos.menus.exists(menu_id).await? {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::MenuNotFound).with_detail("menu_id", menu_id))
    }
}

/// GET /foods - 分页获取菜品
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Page<Food>>> {
    let pagination = Pagination::try_from(query)?;
    let page = state.repos.foods.find_all(&pagination).await.map_err(|e| {
        tracing::error!(event = "food_list_error", error = %e, "Failed to list food items");
        AppError::from(e)
    })?;
    Ok(Json(page))
}

/// GET /foods/{food_id} - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(food_id): Path<String>,
) -> AppResult<Json<Food>> {
    let food = state.repos.foods.get(&food_id).await.map_err(|e| {
        tracing::error!(event = "food_get_error", food_id = %food_id, error = %e, "Failed to fetch food");
        AppError::from(e)
    })?;
    Ok(Json(food))
}

/// 写入新菜品; POST 与 upsert 新建共用
async fn insert_food(state: &ServerState, food_id: &str, payload: FoodCreate) -> AppResult<Food> {
    let menu_id = payload.menu_id.clone().unwrap_or_default();
    if let Err(e) = ensure_menu(state, &menu_id).await {
        tracing::warn!(event = "food_create_error", menu_id = %menu_id, error = %e, "Referenced menu does not exist");
        return Err(e);
    }

    let price = round_price(payload.price.unwrap_or_default())?;
    let food = payload.into_food(food_id.to_string(), price, Utc::now());

    state.repos.foods.create(food_id, food).await.map_err(|e| {
        tracing::error!(event = "food_create_error", food_id = %food_id, error = %e, "Food item was not created");
        AppError::from(e)
    })
}

/// POST /foods - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<FoodCreate>,
) -> AppResult<Json<Food>> {
    let food_id = new_business_id();
    let food = insert_food(&state, &food_id, payload).await?;

    tracing::info!(event = "food_create_success", food_id = %food_id, actor = %user.user_id, "Food created");
    Ok(Json(food))
}

/// PATCH /foods/{food_id} - 更新菜品 (`?upsert=true` 时不存在则创建)
///
/// upsert 新建时补丁必须满足创建规则 (字段齐全、菜单存在)。
pub async fn update(
    State(state): State<ServerState>,
    Path(food_id): Path<String>,
    Query(mode): Query<UpsertQuery>,
    ValidatedJson(mut patch): ValidatedJson<FoodUpdate>,
) -> AppResult<Json<Food>> {
    let repo = &state.repos.foods;
    if mode.upsert && !repo.exists(&food_id).await? {
        let payload: FoodCreate = patch_as_create(&patch).inspect_err(|e| {
            tracing::warn!(event = "food_update_error", food_id = %food_id, error = %e, "Incomplete food for upsert");
        })?;
        let food = insert_food(&state, &food_id, payload).await?;
        tracing::info!(event = "food_update_success", food_id = %food_id, created = true, "Food created by upsert");
        return Ok(Json(food));
    }

    if let Some(menu_id) = patch.menu_id.as_deref()
        && let Err(e) = ensure_menu(&state, menu_id).await
    {
        tracing::warn!(event = "food_update_error", food_id = %food_id, error = %e, "Referenced menu does not exist");
        return Err(e);
    }

    patch.price = patch.price.map(round_price).transpose()?;

    let food = repo.update(&food_id, &patch).await.map_err(|e| {
        tracing::error!(event = "food_update_error", food_id = %food_id, error = %e, "Food update failed");
        AppError::from(e)
    })?;

    tracing::info!(event = "food_update_success", food_id = %food_id, "Food updated");
    Ok(Json(food))
}
