pub mod config;
pub mod error;
pub mod logging;
pub mod records;
pub mod statement;
pub mod store;

pub use config::{Config, StatementDefaults};
pub use error::{Result, StatementError};
pub use records::{Account, Client, Invoice, InvoiceStatus, Payment, PaymentStatus};
pub use statement::{
    generate_statement, StatementData, StatementLine, StatementOptions, StatusFilter,
};
pub use store::{RecordStore, StatementSource};
