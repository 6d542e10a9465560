//! Dining Table Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;

/// Dining table entity (餐桌)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub table_id: String,
    pub number_of_guests: i64,
    pub table_number: i64,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Create table payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TableCreate {
    #[validate(required, range(min = 1))]
    pub number_of_guests: Option<i64>,
    #[validate(required, range(min = 1))]
    pub table_number: Option<i64>,
}

impl TableCreate {
    pub fn into_table(self, table_id: String, now: DateTime<Utc>) -> Table {
        Table {
            table_id,
            number_of_guests: self.number_of_guests.unwrap_or_default(),
            table_number: self.table_number.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub number_of_guests: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub table_number: Option<i64>,
}
