use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity};

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn create_plan(&self, insert_plan_entity: InsertPlanEntity) -> Result<i64>;
    async fn find_by_id(&self, plan_id: i64) -> Result<Option<PlanEntity>>;
}
