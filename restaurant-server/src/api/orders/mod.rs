//! Order API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::ensure_table;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{order_id}", get(handler::get_by_id).patch(handler::update))
}
