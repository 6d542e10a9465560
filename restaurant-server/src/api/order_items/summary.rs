//! Order summary
//!
//! 把订单项与菜品、桌台拼接成一张账单明细。菜品已不存在的订单项被丢弃;
//! 订单没有桌台时 `table_number` 为空。

use serde::{Deserialize, Serialize};

use crate::core::Repositories;
use crate::db::repository::Repository;
use crate::utils::AppResult;
use crate::utils::money::sum_prices;

/// 单个订单项明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDetail {
    pub order_item_id: String,
    pub food_id: String,
    pub food_name: String,
    pub food_image: String,
    pub quantity: String,
    pub unit_price: f64,
    /// 菜品当前价格
    pub price: f64,
    /// 计入应付金额的价格 (= 菜品价格)
    pub amount: f64,
}

/// 一个订单的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub table_id: Option<String>,
    pub table_number: Option<i64>,
    /// `amount` 之和，两位小数
    pub payment_due: f64,
    pub total_count: u64,
    pub order_items: Vec<OrderItemDetail>,
}

/// 汇总订单; 订单不存在或没有可用的订单项时返回 `None`
pub async fn summarize_order(repos: &Repositories, order_id: &str) -> AppResult<Option<OrderSummary>> {
    let Some(order) = repos.orders.find_by_id(order_id).await? else {
        return Ok(None);
    };

    let items = repos.order_items.find_by_order(order_id).await?;
    let mut details = Vec::with_capacity(items.len());
    for item in items {
        let Some(food) = repos.foods.find_by_id(&item.food_id).await? else {
            tracing::debug!(order_item_id = %item.order_item_id, food_id = %item.food_id, "Skipping item with missing food");
            continue;
        };
        details.push(OrderItemDetail {
            order_item_id: item.order_item_id,
            food_id: item.food_id,
            food_name: food.name,
            food_image: food.food_image,
            quantity: item.quantity,
            unit_price: item.unit_price,
            price: food.price,
            amount: food.price,
        });
    }

    if details.is_empty() {
        return Ok(None);
    }

    let table_number = match order.table_id.as_deref() {
        Some(table_id) => repos.tables.find_by_id(table_id).await?.map(|t| t.table_number),
        None => None,
    };

    Ok(Some(OrderSummary {
        order_id: order.order_id,
        table_id: order.table_id,
        table_number,
        payment_due: sum_prices(details.iter().map(|d| d.amount))?,
        total_count: details.len() as u64,
        order_items: details,
    }))
}
