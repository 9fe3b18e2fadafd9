use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::usage_records::InsertUsageRecordEntity,
        repositories::usage_records::UsageRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::usage_records},
};

pub struct UsagePostgres {
    db_pool: Arc<PgPool>,
}

impl UsagePostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UsageRepository for UsagePostgres {
    async fn log_usage(
        &self,
        insert_usage_record_entity: InsertUsageRecordEntity,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let record_id = insert_into(usage_records::table)
            .values(&insert_usage_record_entity)
            .returning(usage_records::id)
            .get_result::<i64>(&mut conn)?;

        Ok(record_id)
    }
}
