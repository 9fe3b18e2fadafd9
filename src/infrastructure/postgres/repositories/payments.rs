use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::payments::InsertPaymentEntity, repositories::payments::PaymentRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::payments},
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPool>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn record_payment(&self, insert_payment_entity: InsertPaymentEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_id = insert_into(payments::table)
            .values(&insert_payment_entity)
            .returning(payments::id)
            .get_result::<i64>(&mut conn)?;

        Ok(payment_id)
    }
}
