use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Config directory not found at {0}. Run 'statement init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Client '{0}' not found in clients.toml")]
    ClientNotFound(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Invalid status filter '{0}'. Use 'all', 'paid', or 'unpaid'.")]
    InvalidStatusFilter(String),

    #[error("Payment {payment} references unknown invoice {invoice}")]
    DanglingPayment { payment: String, invoice: String },

    #[error("Failed to serialize statement: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatementError>;
