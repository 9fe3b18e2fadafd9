use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Inserts the window in a single transaction. The active-window
    /// constraint is enforced at commit time, never by a pre-check.
    async fn subscribe(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<i64>;

    /// The unexpired subscription with the latest `ends_at` (lowest id on a
    /// tie), or `None` when every window has lapsed.
    async fn find_active_by_customer(
        &self,
        customer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<SubscriptionEntity>>;
}
