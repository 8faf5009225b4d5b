mod aging;
mod document;
mod generator;
mod line;
mod options;

pub use aging::{AgeGroup, AgingBuckets};
pub use document::{ClientRef, StatementData};
pub use generator::generate_statement;
pub use line::{Field, InvoiceLine, LineItem, LineType, PaymentLine, StatementLine};
pub use options::{parse_date, DateRange, StatementOptions, StatusFilter};
