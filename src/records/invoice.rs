use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Viewed,
    Approved,
    Partial,
    Paid,
}

fn default_public() -> bool {
    true
}

/// An invoice as stored in invoices.toml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub client_id: String,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub amount: f64,
    pub balance: f64,
    /// Deposit requested ahead of the full balance (0 when none)
    #[serde(default)]
    pub partial: f64,
    #[serde(default)]
    pub partial_due_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub is_quote: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Public invoices (not quotes) that haven't been deleted. Archived
    /// invoices stay on statements.
    pub fn is_statement_visible(&self) -> bool {
        self.is_public && !self.is_quote && !self.is_deleted
    }

    pub fn has_partial(&self) -> bool {
        self.partial > 0.0
    }

    /// Amount currently asked of the client: the partial deposit when one
    /// is pending, otherwise the outstanding balance.
    pub fn requested_amount(&self) -> f64 {
        if self.has_partial() {
            self.partial
        } else {
            self.balance
        }
    }

    /// Date the requested amount falls due.
    pub fn requested_due_date(&self) -> Option<NaiveDate> {
        match self.partial_due_date {
            Some(date) if self.has_partial() => Some(date),
            _ => self.due_date,
        }
    }
}
