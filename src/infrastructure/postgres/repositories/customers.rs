use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::customers::InsertCustomerEntity,
        repositories::customers::CustomerRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::customers},
};

pub struct CustomerPostgres {
    db_pool: Arc<PgPool>,
}

impl CustomerPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CustomerRepository for CustomerPostgres {
    async fn register(&self, insert_customer_entity: InsertCustomerEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let customer_id = insert_into(customers::table)
            .values(&insert_customer_entity)
            .returning(customers::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(customer_id)
    }

    async fn exists(&self, customer_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let found = customers::table
            .filter(customers::id.eq(customer_id))
            .select(customers::id)
            .first::<Uuid>(&mut conn)
            .optional()?;

        Ok(found.is_some())
    }
}
