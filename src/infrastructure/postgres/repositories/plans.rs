use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::plans::{InsertPlanEntity, PlanEntity},
        repositories::plans::PlanRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::plans},
};

pub struct PlanPostgres {
    db_pool: Arc<PgPool>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn create_plan(&self, insert_plan_entity: InsertPlanEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let plan_id = insert_into(plans::table)
            .values(&insert_plan_entity)
            .returning(plans::id)
            .get_result::<i64>(&mut conn)?;

        Ok(plan_id)
    }

    async fn find_by_id(&self, plan_id: i64) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let plan = plans::table
            .filter(plans::id.eq(plan_id))
            .select(PlanEntity::as_select())
            .first::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(plan)
    }
}
