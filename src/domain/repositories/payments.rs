use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::payments::InsertPaymentEntity;

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn record_payment(&self, insert_payment_entity: InsertPaymentEntity) -> Result<i64>;
}
