use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::config::{load_clients, load_config, load_invoices, load_payments, StatementDefaults};
use crate::error::{Result, StatementError};
use crate::records::{Account, Client, Invoice, Payment};
use crate::store::{InvoiceQuery, PaymentEntry, PaymentQuery, StatementSource};

/// Statement source backed by the TOML files in the config directory.
#[derive(Debug, Default)]
pub struct RecordStore {
    account: Account,
    clients: HashMap<String, Client>,
    invoices: Vec<Invoice>,
    payments: Vec<Payment>,
    defaults: StatementDefaults,
}

impl RecordStore {
    pub fn new(
        account: Account,
        clients: HashMap<String, Client>,
        invoices: Vec<Invoice>,
        payments: Vec<Payment>,
    ) -> Self {
        Self {
            account,
            clients,
            invoices,
            payments,
            defaults: StatementDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: StatementDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Load config.toml, clients.toml, invoices.toml and payments.toml
    pub fn load(cfg_dir: &Path) -> Result<Self> {
        let config = load_config(cfg_dir)?;
        let store = Self::new(
            config.account,
            load_clients(cfg_dir)?,
            load_invoices(cfg_dir)?,
            load_payments(cfg_dir)?,
        )
        .with_defaults(config.statement);

        debug!(
            clients = store.clients.len(),
            invoices = store.invoices.len(),
            payments = store.payments.len(),
            "loaded records"
        );

        Ok(store)
    }

    /// `[statement]` defaults from config.toml
    pub fn statement_defaults(&self) -> StatementDefaults {
        self.defaults
    }

    pub fn clients(&self) -> &HashMap<String, Client> {
        &self.clients
    }

    fn invoice_by_id(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == id)
    }
}

impl StatementSource for RecordStore {
    fn account(&self) -> &Account {
        &self.account
    }

    fn client(&self, client_id: &str) -> Result<Client> {
        self.clients
            .get(client_id)
            .cloned()
            .ok_or_else(|| StatementError::ClientNotFound(client_id.to_string()))
    }

    fn invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|inv| query.matches(inv))
            .cloned()
            .collect();
        invoices.sort_by_key(|inv| inv.invoice_date);
        Ok(invoices)
    }

    fn payments(&self, query: &PaymentQuery) -> Result<Vec<PaymentEntry>> {
        self.payments
            .iter()
            .filter(|p| query.matches(p))
            .map(|p| {
                let invoice = self.invoice_by_id(&p.invoice_id).ok_or_else(|| {
                    StatementError::DanglingPayment {
                        payment: p.id.clone(),
                        invoice: p.invoice_id.clone(),
                    }
                })?;
                Ok(PaymentEntry {
                    payment: p.clone(),
                    invoice_number: invoice.invoice_number.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InvoiceStatus, PaymentStatus};
    use crate::statement::{DateRange, StatusFilter};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(id: &str, invoice_date: NaiveDate) -> Invoice {
        Invoice {
            id: id.to_string(),
            client_id: "acme".to_string(),
            invoice_number: format!("INV-{id}"),
            invoice_date,
            due_date: None,
            amount: 10.0,
            balance: 10.0,
            partial: 0.0,
            partial_due_date: None,
            status: InvoiceStatus::Sent,
            is_public: true,
            is_quote: false,
            is_archived: false,
            is_deleted: false,
        }
    }

    fn payment(id: &str, invoice_id: &str) -> Payment {
        Payment {
            id: id.to_string(),
            client_id: "acme".to_string(),
            invoice_id: invoice_id.to_string(),
            payment_date: date(2026, 2, 1),
            payment_type: "Cash".to_string(),
            amount: 10.0,
            refunded: 0.0,
            status: PaymentStatus::Completed,
            is_archived: false,
            is_deleted: false,
        }
    }

    fn range() -> DateRange {
        DateRange::new(date(2026, 1, 1), date(2026, 12, 31)).unwrap()
    }

    #[test]
    fn invoices_come_back_oldest_first() {
        let store = RecordStore::new(
            Account::default(),
            HashMap::new(),
            vec![
                invoice("3", date(2026, 3, 1)),
                invoice("1", date(2026, 1, 1)),
                invoice("2", date(2026, 2, 1)),
            ],
            vec![],
        );

        let query = InvoiceQuery {
            client_id: "acme".to_string(),
            status: StatusFilter::All,
            date_range: Some(range()),
        };
        let ids: Vec<_> = store
            .invoices(&query)
            .unwrap()
            .into_iter()
            .map(|inv| inv.id)
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn payments_are_joined_with_invoice_numbers() {
        let mut archived = payment("p2", "1");
        archived.is_archived = true;
        let mut deleted = payment("p3", "1");
        deleted.is_deleted = true;

        let store = RecordStore::new(
            Account::default(),
            HashMap::new(),
            vec![invoice("1", date(2026, 1, 5))],
            vec![payment("p1", "1"), archived, deleted],
        );

        let entries = store
            .payments(&PaymentQuery {
                client_id: "acme".to_string(),
                date_range: range(),
            })
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.invoice_number == "INV-1"));
    }

    #[test]
    fn payment_for_unknown_invoice_is_an_error() {
        let store = RecordStore::new(
            Account::default(),
            HashMap::new(),
            vec![],
            vec![payment("p1", "404")],
        );

        let err = store
            .payments(&PaymentQuery {
                client_id: "acme".to_string(),
                date_range: range(),
            })
            .unwrap_err();
        assert!(matches!(err, StatementError::DanglingPayment { .. }));
    }

    #[test]
    fn load_reads_statement_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[statement]\nstatus = \"Unpaid\"\nshow_aging = true\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("clients.toml"), "[acme]\nname = \"Acme\"\n").unwrap();
        std::fs::write(dir.path().join("invoices.toml"), "").unwrap();

        let store = RecordStore::load(dir.path()).unwrap();
        let defaults = store.statement_defaults();
        assert_eq!(defaults.status, StatusFilter::Unpaid);
        assert!(defaults.show_aging);
        assert!(!defaults.show_payments);
        assert!(store.clients().contains_key("acme"));
    }

    #[test]
    fn new_store_uses_default_switches() {
        let store = RecordStore::default();
        assert_eq!(store.statement_defaults(), StatementDefaults::default());
    }

    #[test]
    fn unknown_client_is_reported() {
        let store = RecordStore::default();
        assert!(matches!(
            store.client("nobody"),
            Err(StatementError::ClientNotFound(id)) if id == "nobody"
        ));
    }
}
