//! Shared Types
//!
//! Pagination parameters and the list response shape

use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// 默认页码
pub const DEFAULT_PAGE: u32 = 1;
/// 默认每页条数
pub const DEFAULT_RECORD_PER_PAGE: u32 = 10;

/// Pagination query parameters as received
///
/// Values stay raw strings so unparsable numbers fall back to defaults
/// instead of rejecting the request.
///
/// | 参数 | 别名 | 说明 |
/// |------|------|------|
/// | page | | 页码, 从 1 开始 |
/// | record_per_page | recordPerPage | 每页条数 |
/// | start_index | startIndex | 直接指定偏移量, 不能与 page 同时出现 |
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    #[serde(alias = "recordPerPage")]
    pub record_per_page: Option<String>,
    #[serde(alias = "startIndex")]
    pub start_index: Option<String>,
}

/// Resolved pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub record_per_page: u32,
    start_index: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            record_per_page: DEFAULT_RECORD_PER_PAGE,
            start_index: None,
        }
    }
}

fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

impl TryFrom<PaginationQuery> for Pagination {
    type Error = AppError;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        let record_per_page = positive_or(query.record_per_page.as_deref(), DEFAULT_RECORD_PER_PAGE);

        let start_index = match query.start_index.as_deref() {
            None => None,
            Some(raw) => {
                if query.page.is_some() {
                    return Err(AppError::invalid(
                        "conflicting pagination parameters: use either page or start_index",
                    ));
                }
                let index = raw.trim().parse::<u64>().map_err(|_| {
                    AppError::invalid(format!("start_index must be a non-negative integer, got {raw:?}"))
                })?;
                Some(index)
            }
        };

        Ok(Self {
            page: positive_or(query.page.as_deref(), DEFAULT_PAGE),
            record_per_page,
            start_index,
        })
    }
}

impl Pagination {
    /// Offset of the first record in the window
    pub fn offset(&self) -> u64 {
        self.start_index
            .unwrap_or((u64::from(self.page) - 1) * u64::from(self.record_per_page))
    }

    /// Window size
    pub fn limit(&self) -> u64 {
        u64::from(self.record_per_page)
    }
}

/// One page of a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Document count of the whole collection at query time
    pub total_count: u64,
    pub items: Vec<T>,
}
