//! 金额规整
//!
//! 所有价格以 f64 存储，但写入前统一经过 `Decimal` 规整到两位小数，
//! 舍入方式为四舍五入远离零 (9.995 → 10.00, -9.995 → -10.00)。

use rust_decimal::prelude::*;

use crate::utils::{AppError, ErrorCode};

/// 金额保留的小数位数
pub const DECIMAL_PLACES: u32 = 2;

/// f64 → Decimal
///
/// 经由最短十进制表示转换，`9.995_f64` 得到 `9.995` 而非其二进制近似值。
pub fn to_decimal(value: f64) -> Result<Decimal, AppError> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::FoodInvalidPrice,
            "price must be a finite number",
        ));
    }
    Decimal::from_str(&value.to_string())
        .or_else(|_| Decimal::from_scientific(&format!("{value:e}")))
        .map_err(|_| {
            AppError::with_message(ErrorCode::FoodInvalidPrice, format!("price {value} is out of range"))
        })
}

/// Decimal → f64 (存储格式)
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// 规整价格到两位小数
pub fn round_price(value: f64) -> Result<f64, AppError> {
    let rounded = to_decimal(value)?
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    Ok(to_f64(rounded))
}

/// 金额求和，结果规整到两位小数
pub fn sum_prices(values: impl IntoIterator<Item = f64>) -> Result<f64, AppError> {
    let mut total = Decimal::ZERO;
    for value in values {
        total += to_decimal(value)?;
    }
    Ok(to_f64(total.round_dp_with_strategy(
        DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )))
}
