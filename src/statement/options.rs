use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatementError};
use crate::records::Invoice;

/// Which invoices a statement lists.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl StatusFilter {
    pub fn accepts(&self, invoice: &Invoice) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Paid => invoice.is_paid(),
            StatusFilter::Unpaid => !invoice.is_paid(),
        }
    }

    /// Unpaid statements list every open invoice regardless of the window,
    /// so old balances can't drop off.
    pub fn uses_date_range(&self) -> bool {
        !matches!(self, StatusFilter::Unpaid)
    }
}

impl FromStr for StatusFilter {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "paid" => Ok(StatusFilter::Paid),
            "unpaid" => Ok(StatusFilter::Unpaid),
            _ => Err(StatementError::InvalidStatusFilter(s.to_string())),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = StatementError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusFilter::All => "all",
            StatusFilter::Paid => "paid",
            StatusFilter::Unpaid => "unpaid",
        };
        write!(f, "{s}")
    }
}

/// Inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(StatementError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Everything that shapes a statement besides the client.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementOptions {
    pub status: StatusFilter,
    range: DateRange,
    pub show_payments: bool,
    pub show_aging: bool,
    /// Day the aging buckets are measured from
    pub as_of: NaiveDate,
}

impl StatementOptions {
    /// Options covering `start..=end` with every switch off, aged as of today.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Ok(Self {
            status: StatusFilter::All,
            range: DateRange::new(start, end)?,
            show_payments: false,
            show_aging: false,
            as_of: chrono::Local::now().date_naive(),
        })
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_payments(mut self, show: bool) -> Self {
        self.show_payments = show;
        self
    }

    pub fn with_aging(mut self, show: bool) -> Self {
        self.show_aging = show;
        self
    }

    pub fn aged_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = date;
        self
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn start_date(&self) -> NaiveDate {
        self.range.start()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.range.end()
    }
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| StatementError::InvalidDate(s.to_string()))
}
