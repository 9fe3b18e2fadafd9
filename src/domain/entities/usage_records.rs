use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::usage_records;

/// Append-only metered consumption. Deliberately not tied to subscription
/// state; usage may be logged for customers without a live window.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = usage_records)]
pub struct UsageRecordEntity {
    pub id: i64,
    pub customer_id: Uuid,
    pub data_used_mb: i64,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = usage_records)]
pub struct InsertUsageRecordEntity {
    pub customer_id: Uuid,
    pub data_used_mb: i64,
    pub logged_at: DateTime<Utc>,
}
