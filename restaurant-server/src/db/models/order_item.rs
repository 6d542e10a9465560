//! Order Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;
use crate::utils::validation::{validate_not_blank, validate_quantity};

/// Order item entity (订单明细)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub food_id: String,
    /// S / M / L
    pub quantity: String,
    pub unit_price: f64,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Create order item payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemCreate {
    #[validate(required, custom(function = "validate_not_blank"))]
    pub order_id: Option<String>,
    #[validate(required, custom(function = "validate_not_blank"))]
    pub food_id: Option<String>,
    #[validate(required, custom(function = "validate_quantity"))]
    pub quantity: Option<String>,
    #[validate(required)]
    pub unit_price: Option<f64>,
}

impl OrderItemCreate {
    /// `unit_price` 须已规整
    pub fn into_order_item(self, order_item_id: String, unit_price: f64, now: DateTime<Utc>) -> OrderItem {
        OrderItem {
            order_item_id,
            order_id: self.order_id.unwrap_or_default(),
            food_id: self.food_id.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            unit_price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update order item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub food_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_quantity"))]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

/// One line of a bulk order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemLine {
    #[validate(required, custom(function = "validate_not_blank"))]
    pub food_id: Option<String>,
    #[validate(required, custom(function = "validate_quantity"))]
    pub quantity: Option<String>,
    #[validate(required)]
    pub unit_price: Option<f64>,
}

/// Bulk order payload: a new order plus its items
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemPack {
    #[validate(custom(function = "validate_not_blank"))]
    pub table_id: Option<String>,
    #[validate(nested)]
    pub order_items: Vec<OrderItemLine>,
}
