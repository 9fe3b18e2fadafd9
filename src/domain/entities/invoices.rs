use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::invoices;

/// Immutable billing record derived from the active subscription's plan.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
    pub id: i64,
    pub customer_id: Uuid,
    pub total_amount: i64,
    pub invoice_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct InsertInvoiceEntity {
    pub customer_id: Uuid,
    pub total_amount: i64,
    pub invoice_date: DateTime<Utc>,
}
