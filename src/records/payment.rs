use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Voided,
    Failed,
    #[default]
    Completed,
    PartiallyRefunded,
    Refunded,
}

/// A payment as stored in payments.toml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payment {
    pub id: String,
    pub client_id: String,
    pub invoice_id: String,
    pub payment_date: NaiveDate,
    /// Display name of the payment method (e.g. "Bank Transfer")
    pub payment_type: String,
    pub amount: f64,
    #[serde(default)]
    pub refunded: f64,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Payment {
    pub fn is_statement_visible(&self) -> bool {
        !self.is_deleted
    }

    /// Net amount that actually reached the account. Pending, failed and
    /// voided payments count for nothing.
    pub fn completed_amount(&self) -> f64 {
        match self.status {
            PaymentStatus::Completed | PaymentStatus::PartiallyRefunded => {
                self.amount - self.refunded
            }
            _ => 0.0,
        }
    }
}
