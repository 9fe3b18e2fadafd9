use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        repositories::subscriptions::SubscriptionRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::subscriptions},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPool>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn subscribe(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // One transaction per call. The exclusion constraint decides the
        // winner under concurrent subscribes; losers roll back with no
        // partial rows.
        let subscription_id = conn.transaction(|conn| {
            insert_into(subscriptions::table)
                .values(&insert_subscription_entity)
                .returning(subscriptions::id)
                .get_result::<i64>(conn)
        })?;

        Ok(subscription_id)
    }

    async fn find_active_by_customer(
        &self,
        customer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let subscription = subscriptions::table
            .filter(subscriptions::customer_id.eq(customer_id))
            .filter(subscriptions::ends_at.ge(now))
            .order((subscriptions::ends_at.desc(), subscriptions::id.asc()))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(subscription)
    }
}
