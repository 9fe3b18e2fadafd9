use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::customers::InsertCustomerEntity;

#[async_trait]
#[automock]
pub trait CustomerRepository {
    /// Inserts a customer row. Email and phone uniqueness is the database's
    /// responsibility; violations surface as storage errors.
    async fn register(&self, insert_customer_entity: InsertCustomerEntity) -> Result<Uuid>;
    async fn exists(&self, customer_id: Uuid) -> Result<bool>;
}
