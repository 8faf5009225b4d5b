mod settings;

pub use settings::{Config, StatementDefaults};

use crate::error::{Result, StatementError};
use crate::records::{Client, Invoice, Payment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.statement/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "statement") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.statement/
    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        StatementError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".statement"))
}

fn load_toml<T: DeserializeOwned>(config_dir: &Path, file: &str) -> Result<T> {
    let path = config_dir.join(file);
    if !path.exists() {
        return Err(StatementError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| StatementError::ConfigParse { path, source: e })
}

/// Load config.toml (defaults if missing)
pub fn load_config(config_dir: &Path) -> Result<Config> {
    if !config_dir.join("config.toml").exists() {
        return Ok(Config::default());
    }
    load_toml(config_dir, "config.toml")
}

/// Load clients.toml as a HashMap
pub fn load_clients(config_dir: &Path) -> Result<HashMap<String, Client>> {
    load_toml(config_dir, "clients.toml")
}

#[derive(Deserialize)]
struct InvoiceFile {
    #[serde(default)]
    invoices: Vec<Invoice>,
}

#[derive(Deserialize)]
struct PaymentFile {
    #[serde(default)]
    payments: Vec<Payment>,
}

/// Load the [[invoices]] array from invoices.toml
pub fn load_invoices(config_dir: &Path) -> Result<Vec<Invoice>> {
    load_toml::<InvoiceFile>(config_dir, "invoices.toml").map(|f| f.invoices)
}

/// Load the [[payments]] array from payments.toml (empty if missing)
pub fn load_payments(config_dir: &Path) -> Result<Vec<Payment>> {
    if !config_dir.join("payments.toml").exists() {
        return Ok(Vec::new());
    }
    load_toml::<PaymentFile>(config_dir, "payments.toml").map(|f| f.payments)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[account]
date_format = "MMM D, YYYY"   # passed through to whatever renders the statement

[statement]
status = "all"                # all, paid or unpaid
show_payments = false
show_aging = false
"#;

/// Template content for clients.toml
pub const CLIENTS_TEMPLATE: &str = r#"# Define your clients here. The table name (e.g., [acme]) is used
# as the client identifier in the generate command.
#
# Example:
#   statement generate --client acme --from 2026-01-01 --to 2026-03-31

[acme]
name = "Acme Corporation"
email = "billing@acme.example"   # optional
"#;

/// Template content for invoices.toml
pub const INVOICES_TEMPLATE: &str = r#"# Invoices known to the statement generator.
#
# Optional fields: due_date, partial, partial_due_date,
# is_public (default true), is_quote, is_archived, is_deleted.
# status is one of: draft, sent, viewed, approved, partial, paid

[[invoices]]
id = "1"
client_id = "acme"
invoice_number = "0001"
invoice_date = "2026-01-05"
due_date = "2026-02-04"
amount = 1500.0
balance = 0.0
status = "paid"

[[invoices]]
id = "2"
client_id = "acme"
invoice_number = "0002"
invoice_date = "2026-02-10"
due_date = "2026-03-12"
amount = 800.0
balance = 300.0
status = "partial"

[[invoices]]
id = "3"
client_id = "acme"
invoice_number = "0003"
invoice_date = "2025-11-20"
due_date = "2025-12-20"
amount = 450.0
balance = 450.0
status = "sent"
is_archived = true
"#;

/// Template content for payments.toml
pub const PAYMENTS_TEMPLATE: &str = r#"# Payments received. invoice_id refers to an id in invoices.toml.
#
# status is one of: pending, voided, failed, completed (default),
# partially_refunded, refunded

[[payments]]
id = "1"
client_id = "acme"
invoice_id = "1"
payment_date = "2026-02-01"
payment_type = "Bank Transfer"
amount = 1500.0

[[payments]]
id = "2"
client_id = "acme"
invoice_id = "2"
payment_date = "2026-03-01"
payment_type = "Credit Card"
amount = 600.0
refunded = 100.0
status = "partially_refunded"
"#;
