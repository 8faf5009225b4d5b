//! Data access for statements.
//!
//! The assembler never reads files itself: it describes what it needs as an
//! [`InvoiceQuery`] or [`PaymentQuery`] and a [`StatementSource`] answers it.

mod records;

pub use records::RecordStore;

use crate::error::Result;
use crate::records::{Account, Client, Invoice, Payment};
use crate::statement::{DateRange, StatementOptions, StatusFilter};

/// Invoices of one client, narrowed by status and optionally by date.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceQuery {
    pub client_id: String,
    pub status: StatusFilter,
    pub date_range: Option<DateRange>,
}

impl InvoiceQuery {
    /// Query for the invoice section of a statement. The date window only
    /// applies when the status filter allows it.
    pub fn for_statement(client_id: &str, options: &StatementOptions) -> Self {
        Self {
            client_id: client_id.to_string(),
            status: options.status,
            date_range: options
                .status
                .uses_date_range()
                .then_some(options.range()),
        }
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        invoice.client_id == self.client_id
            && invoice.is_statement_visible()
            && self.status.accepts(invoice)
            && self
                .date_range
                .map_or(true, |range| range.contains(invoice.invoice_date))
    }
}

/// Payments of one client received inside a date window.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentQuery {
    pub client_id: String,
    pub date_range: DateRange,
}

impl PaymentQuery {
    pub fn for_statement(client_id: &str, options: &StatementOptions) -> Self {
        Self {
            client_id: client_id.to_string(),
            date_range: options.range(),
        }
    }

    pub fn matches(&self, payment: &Payment) -> bool {
        payment.client_id == self.client_id
            && payment.is_statement_visible()
            && self.date_range.contains(payment.payment_date)
    }
}

/// A payment joined with the number of the invoice it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEntry {
    pub payment: Payment,
    pub invoice_number: String,
}

/// Anything that can supply the records behind a statement.
pub trait StatementSource {
    fn account(&self) -> &Account;

    fn client(&self, client_id: &str) -> Result<Client>;

    /// Invoices matching `query`, oldest invoice date first.
    fn invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>>;

    fn payments(&self, query: &PaymentQuery) -> Result<Vec<PaymentEntry>>;
}
