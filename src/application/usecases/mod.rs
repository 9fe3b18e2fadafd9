pub mod catalog;
pub mod customer_registry;
pub mod invoice_generator;
pub mod payment_recorder;
pub mod subscription_ledger;
pub mod usage_meter;
