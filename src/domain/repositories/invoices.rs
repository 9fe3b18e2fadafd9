use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::invoices::{InsertInvoiceEntity, InvoiceEntity};

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    async fn create_invoice(&self, insert_invoice_entity: InsertInvoiceEntity) -> Result<i64>;
    /// All invoices for the customer, oldest first. Empty when none exist.
    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<InvoiceEntity>>;
}
