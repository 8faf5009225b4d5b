use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::statement::aging::AgingBuckets;
use crate::statement::line::{InvoiceLine, PaymentLine, StatementLine};
use crate::statement::options::StatusFilter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRef {
    pub id: String,
    pub name: String,
}

/// Complete statement, ready for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementData {
    pub client: ClientRef,
    pub date_format: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: StatusFilter,
    pub invoice_items: Vec<StatementLine>,
}

impl StatementData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn invoice_lines(&self) -> impl Iterator<Item = &InvoiceLine> {
        self.invoice_items.iter().filter_map(|line| match line {
            StatementLine::Invoice(inv) => Some(inv),
            _ => None,
        })
    }

    pub fn payment_lines(&self) -> impl Iterator<Item = &PaymentLine> {
        self.invoice_items.iter().filter_map(|line| match line {
            StatementLine::Payment(pay) => Some(pay),
            _ => None,
        })
    }

    pub fn aging(&self) -> Option<&AgingBuckets> {
        self.invoice_items.iter().find_map(|line| match line {
            StatementLine::Aging(buckets) => Some(buckets),
            _ => None,
        })
    }

    /// Sum of invoice amounts
    pub fn invoiced(&self) -> f64 {
        self.invoice_lines().map(|inv| inv.amount).sum()
    }

    /// Sum of invoice balances
    pub fn outstanding(&self) -> f64 {
        self.invoice_lines().map(|inv| inv.balance).sum()
    }

    /// Sum of net payments listed on the statement
    pub fn paid(&self) -> f64 {
        self.payment_lines().map(|pay| pay.amount).sum()
    }
}
