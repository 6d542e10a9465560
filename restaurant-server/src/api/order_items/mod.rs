//! Order Item API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /order-items | GET, POST | 分页列表 / 创建 |
//! | /order-items/batch | POST | 新建订单并批量写入订单项 |
//! | /order-items/{order_item_id} | GET, PATCH | 查询 / 更新 |
//! | /order-items-order/{order_id} | GET | 订单汇总 (0 或 1 组) |

mod handler;
pub mod summary;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use summary::{OrderItemDetail, OrderSummary, summarize_order};

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/order-items", routes())
        .route("/order-items-order/{order_id}", get(handler::items_by_order))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/batch", post(handler::create_batch))
        .route(
            "/{order_item_id}",
            get(handler::get_by_id).patch(handler::update),
        )
}
