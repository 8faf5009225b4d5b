mod client;
mod invoice;
mod payment;

pub use client::{Account, Client, DEFAULT_DATE_FORMAT};
pub use invoice::{Invoice, InvoiceStatus};
pub use payment::{Payment, PaymentStatus};
