use chrono::NaiveDate;

use crate::records::Invoice;

/// Accounts-receivable age bucket, by days past the requested due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    Current,
    Days30,
    Days60,
    Days90,
    Days120,
}

impl AgeGroup {
    pub fn from_days_past_due(days: i64) -> Self {
        match days {
            d if d <= 30 => AgeGroup::Current,
            d if d <= 60 => AgeGroup::Days30,
            d if d <= 90 => AgeGroup::Days60,
            d if d <= 120 => AgeGroup::Days90,
            _ => AgeGroup::Days120,
        }
    }

    /// Invoices without a due date, or not yet due on `as_of`, are current.
    pub fn for_invoice(invoice: &Invoice, as_of: NaiveDate) -> Self {
        match invoice.requested_due_date() {
            Some(due) if due < as_of => Self::from_days_past_due((as_of - due).num_days()),
            _ => AgeGroup::Current,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Current => "0 - 30",
            AgeGroup::Days30 => "31 - 60",
            AgeGroup::Days60 => "61 - 90",
            AgeGroup::Days90 => "91 - 120",
            AgeGroup::Days120 => "120+",
        }
    }
}

/// Requested amounts summed per age bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AgingBuckets {
    pub current: f64,
    pub days_30: f64,
    pub days_60: f64,
    pub days_90: f64,
    pub days_120: f64,
}

impl AgingBuckets {
    pub fn from_invoices<'a, I>(invoices: I, as_of: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Invoice>,
    {
        let mut buckets = Self::default();
        for invoice in invoices {
            buckets.add(
                AgeGroup::for_invoice(invoice, as_of),
                invoice.requested_amount(),
            );
        }
        buckets
    }

    pub fn add(&mut self, group: AgeGroup, amount: f64) {
        *self.bucket_mut(group) += amount;
    }

    pub fn get(&self, group: AgeGroup) -> f64 {
        match group {
            AgeGroup::Current => self.current,
            AgeGroup::Days30 => self.days_30,
            AgeGroup::Days60 => self.days_60,
            AgeGroup::Days90 => self.days_90,
            AgeGroup::Days120 => self.days_120,
        }
    }

    pub fn total(&self) -> f64 {
        self.current + self.days_30 + self.days_60 + self.days_90 + self.days_120
    }

    fn bucket_mut(&mut self, group: AgeGroup) -> &mut f64 {
        match group {
            AgeGroup::Current => &mut self.current,
            AgeGroup::Days30 => &mut self.days_30,
            AgeGroup::Days60 => &mut self.days_60,
            AgeGroup::Days90 => &mut self.days_90,
            AgeGroup::Days120 => &mut self.days_120,
        }
    }
}
