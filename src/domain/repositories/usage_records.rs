use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::usage_records::InsertUsageRecordEntity;

#[async_trait]
#[automock]
pub trait UsageRepository {
    async fn log_usage(&self, insert_usage_record_entity: InsertUsageRecordEntity) -> Result<i64>;
}
