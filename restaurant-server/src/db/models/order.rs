//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;
use crate::utils::validation::validate_not_blank;

/// Order entity (订单)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub order_id: String,
    #[serde(with = "serde_helpers::timestamp")]
    pub order_date: DateTime<Utc>,
    /// 外带订单没有餐桌
    pub table_id: Option<String>,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Create order payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderCreate {
    #[serde(default, with = "serde_helpers::option_timestamp")]
    pub order_date: Option<DateTime<Utc>>,
    #[validate(custom(function = "validate_not_blank"))]
    pub table_id: Option<String>,
}

impl OrderCreate {
    /// `order_date` 缺省为当前时间
    pub fn into_order(self, order_id: String, now: DateTime<Utc>) -> Order {
        Order {
            order_id,
            order_date: self.order_date.unwrap_or(now),
            table_id: self.table_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_timestamp"
    )]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub table_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_date_defaults_to_now() {
        let now = Utc::now();
        let order = OrderCreate::default().into_order("o1".into(), now);
        assert_eq!(order.order_date, now);
        assert_eq!(order.table_id, None);
    }

    #[test]
    fn test_missing_table_round_trips_as_null() {
        let order = OrderCreate::default().into_order("o1".into(), Utc::now());
        let json = serde_json::to_value(&order).unwrap();
        assert!(json["table_id"].is_null());
        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back.table_id, None);
    }
}
