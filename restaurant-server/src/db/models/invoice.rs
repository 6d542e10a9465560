//! Invoice Model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;
use crate::utils::validation::{validate_not_blank, validate_payment_method, validate_payment_status};

/// 新建发票的默认支付状态
pub const DEFAULT_PAYMENT_STATUS: &str = "PENDING";

/// Invoice entity (发票)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub invoice_id: String,
    pub order_id: String,
    /// CARD / CASH / "" (未选择)
    pub payment_method: Option<String>,
    /// PENDING / PAID
    pub payment_status: Option<String>,
    #[serde(with = "serde_helpers::timestamp")]
    pub payment_due_date: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Create invoice payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceCreate {
    #[validate(required, custom(function = "validate_not_blank"))]
    pub order_id: Option<String>,
    #[validate(custom(function = "validate_payment_method"))]
    pub payment_method: Option<String>,
    #[validate(custom(function = "validate_payment_status"))]
    pub payment_status: Option<String>,
    #[serde(default, with = "serde_helpers::option_timestamp")]
    pub payment_due_date: Option<DateTime<Utc>>,
}

impl InvoiceCreate {
    /// 状态缺省 PENDING, 到期日缺省为创建后一天
    pub fn into_invoice(self, invoice_id: String, now: DateTime<Utc>) -> Invoice {
        Invoice {
            invoice_id,
            order_id: self.order_id.unwrap_or_default(),
            payment_method: self.payment_method,
            payment_status: Some(
                self.payment_status
                    .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            ),
            payment_due_date: self.payment_due_date.unwrap_or(now + Duration::days(1)),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update invoice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_not_blank"))]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_payment_method"))]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_payment_status"))]
    pub payment_status: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_timestamp"
    )]
    pub payment_due_date: Option<DateTime<Utc>>,
}

impl InvoiceUpdate {
    /// 补丁与现存文档都没有状态时补上 PENDING
    pub fn with_default_status(mut self, current: Option<&Invoice>) -> Self {
        let stored = current.and_then(|invoice| invoice.payment_status.as_ref());
        if self.payment_status.is_none() && stored.is_none() {
            self.payment_status = Some(DEFAULT_PAYMENT_STATUS.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::{patch_as_create, validate_payload};

    #[test]
    fn test_create_defaults() {
        let now = Utc::now();
        let payload: InvoiceCreate = serde_json::from_str(r#"{"order_id":"o1"}"#).unwrap();
        let invoice = payload.into_invoice("i1".into(), now);
        assert_eq!(invoice.payment_status.as_deref(), Some("PENDING"));
        assert_eq!(invoice.payment_due_date, now + Duration::days(1));
        assert_eq!(invoice.payment_method, None);
    }

    #[test]
    fn test_create_rejects_unknown_method() {
        let payload: InvoiceCreate =
            serde_json::from_str(r#"{"order_id":"o1","payment_method":"CHEQUE"}"#).unwrap();
        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.message, "payment_method: must be one of CARD|CASH|\"\"");
    }

    #[test]
    fn test_update_as_create_needs_order() {
        let patch: InvoiceUpdate = serde_json::from_str(r#"{"payment_method":"CASH"}"#).unwrap();
        let err = patch_as_create::<_, InvoiceCreate>(&patch).unwrap_err();
        assert_eq!(err.message, "order_id: is required");

        let patch = InvoiceUpdate {
            order_id: Some("o1".into()),
            ..patch
        };
        let now = Utc::now();
        let invoice = patch_as_create::<_, InvoiceCreate>(&patch)
            .unwrap()
            .into_invoice("i1".into(), now);
        assert_eq!(invoice.order_id, "o1");
        assert_eq!(invoice.payment_method.as_deref(), Some("CASH"));
        assert_eq!(invoice.payment_due_date, now + Duration::days(1));
    }

    #[test]
    fn test_update_rejects_blank_order() {
        let patch: InvoiceUpdate = serde_json::from_str(r#"{"order_id":" "}"#).unwrap();
        assert!(validate_payload(&patch).is_err());
    }

    #[test]
    fn test_update_status_default() {
        let patch = InvoiceUpdate::default().with_default_status(None);
        assert_eq!(patch.payment_status.as_deref(), Some("PENDING"));

        let paid = Invoice {
            payment_status: Some("PAID".into()),
            ..Default::default()
        };
        let patch = InvoiceUpdate::default().with_default_status(Some(&paid));
        assert_eq!(patch.payment_status, None);

        let patch = InvoiceUpdate {
            payment_status: Some("PAID".into()),
            ..Default::default()
        }
        .with_default_status(None);
        assert_eq!(patch.payment_status.as_deref(), Some("PAID"));
    }
}
