use tracing::{debug, info};

use crate::error::Result;
use crate::statement::aging::AgingBuckets;
use crate::statement::document::{ClientRef, StatementData};
use crate::statement::line::{InvoiceLine, PaymentLine, StatementLine};
use crate::statement::options::StatementOptions;
use crate::store::{InvoiceQuery, PaymentQuery, StatementSource};

/// Build the statement for `client_id`.
///
/// Lines come out as invoices (oldest first), then payments when requested,
/// then a single aging summary when requested. Any fetch failure aborts the
/// whole statement.
pub fn generate_statement<S>(
    source: &S,
    client_id: &str,
    options: &StatementOptions,
) -> Result<StatementData>
where
    S: StatementSource + ?Sized,
{
    let client = source.client(client_id)?;

    let mut invoices = source.invoices(&InvoiceQuery::for_statement(client_id, options))?;
    invoices.sort_by_key(|inv| inv.invoice_date);
    debug!(client = client_id, count = invoices.len(), "selected invoices");

    let mut lines: Vec<StatementLine> = invoices
        .iter()
        .map(|inv| StatementLine::Invoice(InvoiceLine::from(inv)))
        .collect();

    if options.show_payments {
        let payments = source.payments(&PaymentQuery::for_statement(client_id, options))?;
        debug!(client = client_id, count = payments.len(), "selected payments");

        lines.extend(payments.iter().map(|entry| {
            StatementLine::Payment(PaymentLine::new(&entry.payment, &entry.invoice_number))
        }));
    }

    if options.show_aging {
        let buckets = AgingBuckets::from_invoices(&invoices, options.as_of);
        lines.push(StatementLine::Aging(buckets));
    }

    info!(
        client = client_id,
        status = %options.status,
        start = %options.start_date(),
        end = %options.end_date(),
        lines = lines.len(),
        "generated statement"
    );

    Ok(StatementData {
        client: ClientRef {
            id: client_id.to_string(),
            name: client.name,
        },
        date_format: source.account().date_format().to_string(),
        start_date: options.start_date(),
        end_date: options.end_date(),
        status: options.status,
        invoice_items: lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatementError;
    use crate::records::{Account, Client, Invoice, InvoiceStatus, Payment, PaymentStatus};
    use crate::statement::line::{Field, LineType};
    use crate::statement::options::StatusFilter;
    use crate::store::{PaymentEntry, RecordStore};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(id: &str, invoice_date: NaiveDate, amount: f64, balance: f64) -> Invoice {
        Invoice {
            id: id.to_string(),
            client_id: "acme".to_string(),
            invoice_number: format!("000{id}"),
            invoice_date,
            due_date: Some(invoice_date + chrono::Duration::days(30)),
            amount,
            balance,
            partial: 0.0,
            partial_due_date: None,
            status: if balance == 0.0 {
                InvoiceStatus::Paid
            } else if balance < amount {
                InvoiceStatus::Partial
            } else {
                InvoiceStatus::Sent
            },
            is_public: true,
            is_quote: false,
            is_archived: false,
            is_deleted: false,
        }
    }

    fn payment(id: &str, invoice_id: &str, paid_on: NaiveDate, amount: f64) -> Payment {
        Payment {
            id: id.to_string(),
            client_id: "acme".to_string(),
            invoice_id: invoice_id.to_string(),
            payment_date: paid_on,
            payment_type: "Bank Transfer".to_string(),
            amount,
            refunded: 0.0,
            status: PaymentStatus::Completed,
            is_archived: false,
            is_deleted: false,
        }
    }

    fn store(invoices: Vec<Invoice>, payments: Vec<Payment>) -> RecordStore {
        let mut clients = HashMap::new();
        clients.insert(
            "acme".to_string(),
            Client {
                name: "Acme Corporation".to_string(),
                email: None,
            },
        );
        RecordStore::new(Account::default(), clients, invoices, payments)
    }

    fn first_quarter() -> StatementOptions {
        StatementOptions::new(date(2026, 1, 1), date(2026, 3, 31))
            .unwrap()
            .aged_as_of(date(2026, 4, 1))
    }

    fn types(data: &StatementData) -> Vec<LineType> {
        data.invoice_items.iter().map(StatementLine::line_type).collect()
    }

    #[test]
    fn paid_invoice_with_payment_yields_two_lines() {
        let source = store(
            vec![invoice("1", date(2026, 1, 10), 100.0, 0.0)],
            vec![payment("p1", "1", date(2026, 1, 20), 100.0)],
        );

        let options = first_quarter().with_payments(true);

        let data = generate_statement(&source, "acme", &options).unwrap();
        assert_eq!(data.invoice_items.len(), 2);

        let invoice_item = data.invoice_items[0].to_item();
        assert_eq!(invoice_item.invoice_item_type_id, 1);
        assert_eq!(invoice_item.cost, 0.0);
        assert_eq!(invoice_item.notes, Some(Field::Amount(100.0)));
        assert_eq!(invoice_item.qty, Some(1.0));

        let payment_item = data.invoice_items[1].to_item();
        assert_eq!(payment_item.invoice_item_type_id, 3);
        assert_eq!(payment_item.cost, 100.0);
        assert_eq!(payment_item.product_key, Field::Text("0001".to_string()));
    }

    #[test]
    fn empty_client_has_no_lines() {
        let source = store(vec![], vec![]);
        let options = first_quarter().with_payments(true);
        let data = generate_statement(&source, "acme", &options).unwrap();
        assert!(data.invoice_items.is_empty());
    }

    #[test]
    fn empty_client_with_aging_has_only_zero_aging_line() {
        let source = store(vec![], vec![]);
        let options = first_quarter().with_aging(true);
        let data = generate_statement(&source, "acme", &options).unwrap();

        assert_eq!(types(&data), [LineType::Aging]);
        assert_eq!(data.aging(), Some(&AgingBuckets::default()));
    }

    #[test]
    fn invoice_lines_ascend_by_date() {
        let source = store(
            vec![
                invoice("3", date(2026, 3, 5), 30.0, 30.0),
                invoice("1", date(2026, 1, 5), 10.0, 10.0),
                invoice("2", date(2026, 2, 5), 20.0, 20.0),
            ],
            vec![],
        );

        let data = generate_statement(&source, "acme", &first_quarter()).unwrap();
        let dates: Vec<_> = data.invoice_lines().map(|l| l.invoice_date).collect();
        assert_eq!(dates, [date(2026, 1, 5), date(2026, 2, 5), date(2026, 3, 5)]);
    }

    #[test]
    fn unpaid_filter_reaches_outside_the_window() {
        let source = store(
            vec![
                invoice("1", date(2025, 6, 1), 50.0, 50.0),
                invoice("2", date(2026, 2, 1), 80.0, 0.0),
                invoice("3", date(2026, 2, 15), 90.0, 40.0),
                invoice("4", date(2026, 6, 1), 70.0, 70.0),
            ],
            vec![],
        );

        let options = first_quarter().with_status(StatusFilter::Unpaid);

        let data = generate_statement(&source, "acme", &options).unwrap();
        let numbers: Vec<_> = data
            .invoice_lines()
            .map(|l| l.invoice_number.as_str())
            .collect();
        assert_eq!(numbers, ["0001", "0003", "0004"]);
    }

    #[test]
    fn paid_filter_stays_inside_the_window() {
        let source = store(
            vec![
                invoice("1", date(2025, 6, 1), 50.0, 0.0),
                invoice("2", date(2026, 2, 1), 80.0, 0.0),
                invoice("3", date(2026, 2, 15), 90.0, 40.0),
            ],
            vec![],
        );

        let options = first_quarter().with_status(StatusFilter::Paid);

        let data = generate_statement(&source, "acme", &options).unwrap();
        let numbers: Vec<_> = data
            .invoice_lines()
            .map(|l| l.invoice_number.as_str())
            .collect();
        assert_eq!(numbers, ["0002"]);
    }

    #[test]
    fn hidden_invoices_are_skipped_and_archived_kept() {
        let mut archived = invoice("1", date(2026, 1, 5), 10.0, 10.0);
        archived.is_archived = true;
        let mut deleted = invoice("2", date(2026, 1, 6), 10.0, 10.0);
        deleted.is_deleted = true;
        let mut private = invoice("3", date(2026, 1, 7), 10.0, 10.0);
        private.is_public = false;
        let mut quote = invoice("4", date(2026, 1, 8), 10.0, 10.0);
        quote.is_quote = true;
        let mut other_client = invoice("5", date(2026, 1, 9), 10.0, 10.0);
        other_client.client_id = "globex".to_string();

        let source = store(vec![archived, deleted, private, quote, other_client], vec![]);
        let data = generate_statement(&source, "acme", &first_quarter()).unwrap();
        let numbers: Vec<_> = data
            .invoice_lines()
            .map(|l| l.invoice_number.as_str())
            .collect();
        assert_eq!(numbers, ["0001"]);
    }

    #[test]
    fn payments_follow_invoices_and_use_net_amounts() {
        let mut refunded = payment("p1", "1", date(2026, 1, 3), 100.0);
        refunded.refunded = 25.0;
        refunded.status = PaymentStatus::PartiallyRefunded;
        let mut failed = payment("p2", "2", date(2026, 2, 3), 40.0);
        failed.status = PaymentStatus::Failed;
        let outside = payment("p3", "2", date(2026, 5, 3), 40.0);

        let source = store(
            vec![
                invoice("1", date(2026, 1, 1), 100.0, 25.0),
                invoice("2", date(2026, 2, 1), 40.0, 40.0),
            ],
            vec![refunded, failed, outside],
        );

        let options = first_quarter().with_payments(true);

        let data = generate_statement(&source, "acme", &options).unwrap();
        assert_eq!(
            types(&data),
            [
                LineType::Invoice,
                LineType::Invoice,
                LineType::Payment,
                LineType::Payment
            ]
        );

        let costs: Vec<_> = data.payment_lines().map(|p| p.amount).collect();
        assert_eq!(costs, [75.0, 0.0]);
        assert_eq!(data.paid(), 75.0);
    }

    #[test]
    fn aging_line_comes_last_and_matches_balances() {
        let source = store(
            vec![
                invoice("1", date(2025, 10, 1), 500.0, 500.0),
                invoice("2", date(2026, 1, 10), 300.0, 120.0),
                invoice("3", date(2026, 3, 15), 80.0, 80.0),
            ],
            vec![payment("p1", "2", date(2026, 2, 1), 180.0)],
        );

        let options = first_quarter()
            .with_status(StatusFilter::Unpaid)
            .with_payments(true)
            .with_aging(true);
        let data = generate_statement(&source, "acme", &options).unwrap();

        assert_eq!(
            data.invoice_items.last().map(StatementLine::line_type),
            Some(LineType::Aging)
        );

        let buckets = data.aging().unwrap();
        // due 2025-10-31, 152 days late
        assert_eq!(buckets.days_120, 500.0);
        // due 2026-02-09, 51 days late
        assert_eq!(buckets.days_30, 120.0);
        // due 2026-04-14, not yet due
        assert_eq!(buckets.current, 80.0);
        assert_eq!(buckets.total(), data.outstanding());
    }

    #[test]
    fn aging_only_covers_selected_invoices() {
        let source = store(
            vec![
                invoice("1", date(2025, 10, 1), 500.0, 500.0),
                invoice("2", date(2026, 1, 10), 300.0, 300.0),
            ],
            vec![],
        );

        let options = first_quarter().with_aging(true);

        let data = generate_statement(&source, "acme", &options).unwrap();
        assert_eq!(data.aging().unwrap().total(), 300.0);
    }

    #[test]
    fn metadata_carries_client_and_date_format() {
        let source = RecordStore::new(
            Account {
                date_format: Some("DD/MM/YYYY".to_string()),
            },
            store(vec![], vec![]).clients().clone(),
            vec![],
            vec![],
        );

        let data = generate_statement(&source, "acme", &first_quarter()).unwrap();
        assert_eq!(data.client.id, "acme");
        assert_eq!(data.client.name, "Acme Corporation");
        assert_eq!(data.date_format, "DD/MM/YYYY");
        assert_eq!(data.start_date, date(2026, 1, 1));
        assert_eq!(data.end_date, date(2026, 3, 31));
    }

    #[test]
    fn serializes_with_line_items() {
        let source = store(vec![invoice("1", date(2026, 1, 10), 100.0, 0.0)], vec![]);
        let data = generate_statement(&source, "acme", &first_quarter()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&data.to_json().unwrap()).unwrap();
        assert_eq!(value["client"]["id"], "acme");
        assert_eq!(value["date_format"], "MMM D, YYYY");
        assert_eq!(value["status"], "all");
        assert_eq!(value["invoice_items"][0]["product_key"], "0001");
        assert_eq!(value["invoice_items"][0]["invoice_item_type_id"], 1);
    }

    #[test]
    fn unknown_client_fails() {
        let source = store(vec![], vec![]);
        assert!(matches!(
            generate_statement(&source, "nobody", &first_quarter()),
            Err(StatementError::ClientNotFound(_))
        ));
    }

    struct BrokenPayments(RecordStore);

    impl StatementSource for BrokenPayments {
        fn account(&self) -> &Account {
            self.0.account()
        }

        fn client(&self, client_id: &str) -> Result<Client> {
            self.0.client(client_id)
        }

        fn invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>> {
            self.0.invoices(query)
        }

        fn payments(&self, _query: &PaymentQuery) -> Result<Vec<PaymentEntry>> {
            Err(StatementError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "payments unavailable",
            )))
        }
    }

    #[test]
    fn fetch_failure_aborts_the_statement() {
        let source = BrokenPayments(store(
            vec![invoice("1", date(2026, 1, 10), 100.0, 100.0)],
            vec![],
        ));

        assert!(generate_statement(&source, "acme", &first_quarter()).is_ok());
        assert!(matches!(
            generate_statement(&source, "acme", &first_quarter().with_payments(true)),
            Err(StatementError::Io(_))
        ));
    }

    /// Hands invoices back newest first, ignoring the ordering contract.
    struct NewestFirst(RecordStore);

    impl StatementSource for NewestFirst {
        fn account(&self) -> &Account {
            self.0.account()
        }

        fn client(&self, client_id: &str) -> Result<Client> {
            self.0.client(client_id)
        }

        fn invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>> {
            let mut invoices = self.0.invoices(query)?;
            invoices.reverse();
            Ok(invoices)
        }

        fn payments(&self, query: &PaymentQuery) -> Result<Vec<PaymentEntry>> {
            self.0.payments(query)
        }
    }

    #[test]
    fn invoice_lines_are_ordered_whatever_the_source_returns() {
        let source = NewestFirst(store(
            vec![
                invoice("1", date(2026, 1, 5), 10.0, 10.0),
                invoice("2", date(2026, 2, 5), 20.0, 20.0),
                invoice("3", date(2026, 3, 5), 30.0, 30.0),
            ],
            vec![],
        ));

        let data = generate_statement(&source, "acme", &first_quarter()).unwrap();
        let numbers: Vec<_> = data
            .invoice_lines()
            .map(|l| l.invoice_number.as_str())
            .collect();
        assert_eq!(numbers, ["0001", "0002", "0003"]);
    }
}
