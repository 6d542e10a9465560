//! Menu Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;
use crate::utils::validation::validate_not_blank;

/// Menu entity (菜单)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Menu {
    pub menu_id: String,
    pub name: String,
    pub category: String,
    /// 供应时间窗口 (可选)
    #[serde(with = "serde_helpers::option_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(with = "serde_helpers::option_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Create menu payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuCreate {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl MenuCreate {
    pub fn into_menu(self, menu_id: String, now: DateTime<Utc>) -> Menu {
        Menu {
            menu_id,
            name: self.name,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update menu payload
///
/// 空字符串的 name / category 视为未提供; 供应时间窗口必须成对出现，
/// 只给出一端时忽略。
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_timestamp"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_timestamp"
    )]
    pub end_date: Option<DateTime<Utc>>,
}

impl MenuUpdate {
    /// 去掉空字符串字段和不完整的时间窗口，得到真正要合并的补丁
    pub fn normalized(self) -> Self {
        let (start_date, end_date) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (Some(start), Some(end)),
            _ => (None, None),
        };
        Self {
            name: self.name.filter(|s| !s.is_empty()),
            category: self.category.filter(|s| !s.is_empty()),
            start_date,
            end_date,
        }
    }

    /// 成对给出的时间窗口
    pub fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start_date.zip(self.end_date)
    }
}

/// `start < now < end` (严格)
pub fn in_time_span(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start < now && now < end
}
