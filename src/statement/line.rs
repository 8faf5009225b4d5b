use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{Invoice, Payment};
use crate::statement::aging::AgingBuckets;

/// Discriminant the presentation layer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LineType {
    Invoice = 1,
    Payment = 3,
    Aging = 4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub amount: f64,
    pub balance: f64,
}

impl From<&Invoice> for InvoiceLine {
    fn from(invoice: &Invoice) -> Self {
        Self {
            invoice_number: invoice.invoice_number.clone(),
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            amount: invoice.amount,
            balance: invoice.balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLine {
    pub invoice_number: String,
    pub payment_date: NaiveDate,
    pub payment_type: String,
    /// Net of refunds
    pub amount: f64,
}

impl PaymentLine {
    pub fn new(payment: &Payment, invoice_number: &str) -> Self {
        Self {
            invoice_number: invoice_number.to_string(),
            payment_date: payment.payment_date,
            payment_type: payment.payment_type.clone(),
            amount: payment.completed_amount(),
        }
    }
}

/// One row of a statement body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "LineItem")]
pub enum StatementLine {
    Invoice(InvoiceLine),
    Payment(PaymentLine),
    Aging(AgingBuckets),
}

impl StatementLine {
    pub fn line_type(&self) -> LineType {
        match self {
            StatementLine::Invoice(_) => LineType::Invoice,
            StatementLine::Payment(_) => LineType::Payment,
            StatementLine::Aging(_) => LineType::Aging,
        }
    }

    pub fn to_item(&self) -> LineItem {
        LineItem::from(self.clone())
    }
}

/// Scalar carried in one of the shared line-item slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Text(String),
    Date(NaiveDate),
    Amount(f64),
}

/// Wire shape shared by every statement line.
///
/// Aging lines spread their buckets across the slots: `product_key` holds
/// the current bucket, `notes` 31-60 days, `custom_value1` 61-90,
/// `custom_value2` 91-120 and `cost` anything older.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub product_key: Field,
    pub custom_value1: Option<Field>,
    pub custom_value2: Option<Field>,
    pub notes: Option<Field>,
    pub cost: f64,
    pub qty: Option<f64>,
    pub invoice_item_type_id: u8,
}

impl From<StatementLine> for LineItem {
    fn from(line: StatementLine) -> Self {
        let invoice_item_type_id = line.line_type() as u8;
        match line {
            StatementLine::Invoice(inv) => LineItem {
                product_key: Field::Text(inv.invoice_number),
                custom_value1: Some(Field::Date(inv.invoice_date)),
                custom_value2: inv.due_date.map(Field::Date),
                notes: Some(Field::Amount(inv.amount)),
                cost: inv.balance,
                qty: Some(1.0),
                invoice_item_type_id,
            },
            StatementLine::Payment(pay) => LineItem {
                product_key: Field::Text(pay.invoice_number),
                custom_value1: Some(Field::Date(pay.payment_date)),
                custom_value2: Some(Field::Text(pay.payment_type)),
                notes: None,
                cost: pay.amount,
                qty: None,
                invoice_item_type_id,
            },
            StatementLine::Aging(buckets) => LineItem {
                product_key: Field::Amount(buckets.current),
                custom_value1: Some(Field::Amount(buckets.days_60)),
                custom_value2: Some(Field::Amount(buckets.days_90)),
                notes: Some(Field::Amount(buckets.days_30)),
                cost: buckets.days_120,
                qty: None,
                invoice_item_type_id,
            },
        }
    }
}
