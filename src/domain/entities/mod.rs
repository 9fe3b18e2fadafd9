pub mod customers;
pub mod invoices;
pub mod payments;
pub mod plans;
pub mod subscriptions;
pub mod usage_records;
