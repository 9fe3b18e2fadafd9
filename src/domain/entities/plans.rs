use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::plans;

/// A purchasable access plan. Price is in whole UGX, duration in days.
/// Plans are immutable once defined; subscriptions reference them by id.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanEntity {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub duration_days: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plans)]
pub struct InsertPlanEntity {
    pub name: String,
    pub price: i64,
    pub duration_days: i32,
}
