use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::invoices::{InsertInvoiceEntity, InvoiceEntity},
        repositories::invoices::InvoiceRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::invoices},
};

pub struct InvoicePostgres {
    db_pool: Arc<PgPool>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn create_invoice(&self, insert_invoice_entity: InsertInvoiceEntity) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice_id = insert_into(invoices::table)
            .values(&insert_invoice_entity)
            .returning(invoices::id)
            .get_result::<i64>(&mut conn)?;

        Ok(invoice_id)
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = invoices::table
            .filter(invoices::customer_id.eq(customer_id))
            .order((invoices::invoice_date.asc(), invoices::id.asc()))
            .select(InvoiceEntity::as_select())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(results)
    }
}
