//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::api::UpsertQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::menu::in_time_span;
use crate::db::models::{Menu, MenuCreate, MenuUpdate};
use crate::db::repository::{Repository, new_business_id};
use crate::utils::types::{Page, Pagination, PaginationQuery};
use crate::utils::validation::{ValidatedJson, patch_as_create};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /menus - 分页获取菜单
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Page<Menu>>> {
    let pagination = Pagination::try_from(query)?;
    let page = state.repos.menus.find_all(&pagination).await.map_err(|e| {
        tracing::error!(event = "menu_list_error", error = %e, "Failed to list menus");
        AppError::from(e)
    })?;
    Ok(Json(page))
}

/// GET /menus/{menu_id} - 获取单个菜单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(menu_id): Path<String>,
) -> AppResult<Json<Menu>> {
    let menu = state.repos.menus.get(&menu_id).await.map_err(|e| {
        tracing::error!(event = "menu_get_error", menu_id = %menu_id, error = %e, "Failed to fetch menu");
        AppError::from(e)
    })?;
    Ok(Json(menu))
}

/// 写入新菜单; POST 与 upsert 新建共用
async fn insert_menu(state: &ServerState, menu_id: &str, payload: MenuCreate) -> AppResult<Menu> {
    let menu = payload.into_menu(menu_id.to_string(), Utc::now());
    state.repos.menus.create(menu_id, menu).await.map_err(|e| {
        tracing::error!(event = "menu_create_error", menu_id = %menu_id, error = %e, "Menu item was not created");
        AppError::from(e)
    })
}

/// POST /menus - 创建菜单
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<MenuCreate>,
) -> AppResult<Json<Menu>> {
    let menu_id = new_business_id();
    let menu = insert_menu(&state, &menu_id, payload).await?;

    tracing::info!(event = "menu_create_success", menu_id = %menu_id, actor = %user.user_id, "Menu created");
    Ok(Json(menu))
}

/// PATCH /menus/{menu_id} - 更新菜单 (`?upsert=true` 时不存在则创建)
///
/// 同时给出 start_date 和 end_date 时，窗口必须包含当前时间。
pub async fn update(
    State(state): State<ServerState>,
    Path(menu_id): Path<String>,
    Query(mode): Query<UpsertQuery>,
    ValidatedJson(payload): ValidatedJson<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    let patch = payload.normalized();

    if let Some((start, end)) = patch.window()
        && !in_time_span(start, end, Utc::now())
    {
        tracing::warn!(event = "menu_update_error", menu_id = %menu_id, error = "window does not contain now", "Rejected menu window");
        return Err(AppError::new(ErrorCode::MenuWindowInvalid));
    }

    let repo = &state.repos.menus;
    if mode.upsert && !repo.exists(&menu_id).await? {
        let payload: MenuCreate = patch_as_create(&patch).inspect_err(|e| {
            tracing::warn!(event = "menu_update_error", menu_id = %menu_id, error = %e, "Incomplete menu for upsert");
        })?;
        let menu = insert_menu(&state, &menu_id, payload).await?;
        tracing::info!(event = "menu_update_success", menu_id = %menu_id, created = true, "Menu created by upsert");
        return Ok(Json(menu));
    }

    let menu = repo.update(&menu_id, &patch).await.map_err(|e| {
        tracing::error!(event = "menu_update_error", menu_id = %menu_id, error = %e, "Menu update failed");
        AppError::from(e)
    })?;

    tracing::info!(event = "menu_update_success", menu_id = %menu_id, "Menu updated");
    Ok(Json(menu))
}
