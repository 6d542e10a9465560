//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::UpsertQuery;
use crate::api::order_items::{OrderItemDetail, summarize_order};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::serde_helpers;
use crate::db::models::{Invoice, InvoiceCreate, InvoiceUpdate};
use crate::db::repository::{Repository, new_business_id};
use crate::utils::types::{Page, Pagination, PaginationQuery};
use crate::utils::validation::{ValidatedJson, patch_as_create};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 账单视图: 发票 + 订单汇总
///
/// 订单没有可汇总的订单项时，`payment_due` / `table_number` / `order_details` 不出现。
#[derive(Debug, Serialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub order_id: String,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    #[serde(with = "serde_helpers::timestamp")]
    pub payment_due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_due: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_details: Option<Vec<OrderItemDetail>>,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceView {
    fn from(invoice: Invoice) -> Self {
        Self {
            invoice_id: invoice.invoice_id,
            order_id: invoice.order_id,
            payment_method: invoice.payment_method,
            payment_status: invoice.payment_status,
            payment_due_date: invoice.payment_due_date,
            payment_due: None,
            table_number: None,
            order_details: None,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

/// GET /invoices - 分页获取发票
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Page<Invoice>>> {
    let pagination = Pagination::try_from(query)?;
    let page = state.repos.invoices.find_all(&pagination).await.map_err(|e| {
        tracing::error!(event = "invoice_list_error", error = %e, "Failed to list invoices");
        AppError::from(e)
    })?;
    Ok(Json(page))
}

/// GET /invoices/{invoice_id} - 账单视图
pub async fn get_view(
    State(state): State<ServerState>,
    Path(invoice_id): Path<String>,
) -> AppResult<Json<InvoiceView>> {
    let invoice = state.repos.invoices.get(&invoice_id).await.map_err(|e| {
        tracing::error!(event = "invoice_get_error", invoice_id = %invoice_id, error = %e, "Failed to fetch invoice");
        AppError::from(e)
    })?;

    let summary = summarize_order(&state.repos, &invoice.order_id).await.inspect_err(|e| {
        tracing::error!(event = "invoice_get_error", invoice_id = %invoice_id, error = %e, "Failed to summarize order");
    })?;

    let mut view = InvoiceView::from(invoice);
    if let Some(summary) = summary {
        view.payment_due = Some(summary.payment_due);
        view.table_number = summary.table_number;
        view.order_details = Some(summary.order_items);
    }
    Ok(Json(view))
}

/// 订单存在性检查
async fn ensure_order(state: &ServerState, order_id: &str) -> AppResult<()> {
    if state.repos.orders.exists(order_id).await? {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id))
    }
}

/// 写入新发票; POST 与 upsert 新建共用
///
/// 订单必须存在; 状态缺省 PENDING，到期日缺省为一天后。
async fn insert_invoice(state: &ServerState, invoice_id: &str, payload: InvoiceCreate) -> AppResult<Invoice> {
    let order_id = payload.order_id.clone().unwrap_or_default();
    if let Err(e) = ensure_order(state, &order_id).await {
        tracing::warn!(event = "invoice_create_error", order_id = %order_id, error = %e, "Referenced order does not exist");
        return Err(e);
    }

    let invoice = payload.into_invoice(invoice_id.to_string(), Utc::now());
    state.repos.invoices.create(invoice_id, invoice).await.map_err(|e| {
        tracing::error!(event = "invoice_create_error", invoice_id = %invoice_id, error = %e, "Invoice was not created");
        AppError::from(e)
    })
}

/// POST /invoices - 创建发票
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<InvoiceCreate>,
) -> AppResult<Json<Invoice>> {
    let invoice_id = new_business_id();
    let invoice = insert_invoice(&state, &invoice_id, payload).await?;

    tracing::info!(event = "invoice_create_success", invoice_id = %invoice_id, actor = %user.user_id, "Invoice created");
    Ok(Json(invoice))
}

/// PATCH /invoices/{invoice_id} - 更新发票 (`?upsert=true` 时不存在则创建)
///
/// upsert 新建时补丁必须带上已存在的 order_id。
pub async fn update(
    State(state): State<ServerState>,
    Path(invoice_id): Path<String>,
    Query(mode): Query<UpsertQuery>,
    ValidatedJson(patch): ValidatedJson<InvoiceUpdate>,
) -> AppResult<Json<Invoice>> {
    let repo = &state.repos.invoices;
    let current = repo.find_by_id(&invoice_id).await?;

    if mode.upsert && current.is_none() {
        let payload: InvoiceCreate = patch_as_create(&patch).inspect_err(|e| {
            tracing::warn!(event = "invoice_update_error", invoice_id = %invoice_id, error = %e, "Incomplete invoice for upsert");
        })?;
        let invoice = insert_invoice(&state, &invoice_id, payload).await?;
        tracing::info!(event = "invoice_update_success", invoice_id = %invoice_id, created = true, "Invoice created by upsert");
        return Ok(Json(invoice));
    }

    if let Some(order_id) = patch.order_id.as_deref()
        && let Err(e) = ensure_order(&state, order_id).await
    {
        tracing::warn!(event = "invoice_update_error", invoice_id = %invoice_id, error = %e, "Referenced order does not exist");
        return Err(e);
    }

    let patch = patch.with_default_status(current.as_ref());
    let invoice = repo.update(&invoice_id, &patch).await.map_err(|e| {
        tracing::error!(event = "invoice_update_error", invoice_id = %invoice_id, error = %e, "Invoice update failed");
        AppError::from(e)
    })?;

    tracing::info!(event = "invoice_update_success", invoice_id = %invoice_id, "Invoice updated");
    Ok(Json(invoice))
}
