//! Food Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;
use crate::utils::validation::{MAX_NAME_LEN, MIN_NAME_LEN, validate_not_blank};

/// Food entity (菜品)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Food {
    pub food_id: String,
    pub name: String,
    /// 两位小数 (写入时规整)
    pub price: f64,
    pub food_image: String,
    /// 所属菜单
    pub menu_id: String,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Create food payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(required, length(min = MIN_NAME_LEN, max = MAX_NAME_LEN))]
    pub name: Option<String>,
    #[validate(required)]
    pub price: Option<f64>,
    #[validate(required, custom(function = "validate_not_blank"))]
    pub food_image: Option<String>,
    #[validate(required, custom(function = "validate_not_blank"))]
    pub menu_id: Option<String>,
}

impl FoodCreate {
    /// 校验通过后构造实体; `price` 须已规整
    pub fn into_food(self, food_id: String, price: f64, now: DateTime<Utc>) -> Food {
        Food {
            food_id,
            name: self.name.unwrap_or_default(),
            price,
            food_image: self.food_image.unwrap_or_default(),
            menu_id: self.menu_id.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update food payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FoodUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = MIN_NAME_LEN, max = MAX_NAME_LEN))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub food_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub menu_id: Option<String>,
}
