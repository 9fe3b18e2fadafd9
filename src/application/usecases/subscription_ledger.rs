use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    clock::Clock,
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    storage::is_window_overlap,
};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("customer already has an active subscription for this plan")]
    AlreadyActive,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// The central state machine: per (customer, plan) a subscription moves
/// Unsubscribed -> Active -> Expired, where Expired is derived from
/// `ends_at < now` rather than stored.
pub struct SubscriptionLedgerUseCase<P, S, C>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
    clock: Arc<C>,
}

impl<P, S, C> SubscriptionLedgerUseCase<P, S, C>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(plan_repo: Arc<P>, subscription_repo: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            plan_repo,
            subscription_repo,
            clock,
        }
    }

    /// Opens a new access window starting now and ending after the plan's
    /// duration. The insert commits atomically; when another unexpired window
    /// for the same (customer, plan) pair already exists the constraint
    /// rejects the row and nothing is written.
    pub async fn subscribe(&self, customer_id: Uuid, plan_id: i64) -> Result<i64, LedgerError> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%customer_id, plan_id, db_error = ?err, "ledger: plan lookup failed");
                LedgerError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%customer_id, plan_id, "ledger: plan not found");
                LedgerError::PlanNotFound
            })?;

        let starts_at = self.clock.now();
        let ends_at = starts_at
            .checked_add_signed(Duration::days(plan.duration_days.into()))
            .context("failed to compute subscription end date")?;

        let subscription_id = self
            .subscription_repo
            .subscribe(InsertSubscriptionEntity {
                customer_id,
                plan_id,
                starts_at,
                ends_at,
            })
            .await
            .map_err(|err| {
                if is_window_overlap(&err) {
                    warn!(%customer_id, plan_id, "ledger: subscription already active");
                    LedgerError::AlreadyActive
                } else {
                    error!(
                        %customer_id,
                        plan_id,
                        db_error = ?err,
                        "ledger: failed to insert subscription"
                    );
                    LedgerError::Internal(err)
                }
            })?;

        info!(
            %customer_id,
            plan_id,
            subscription_id,
            %starts_at,
            %ends_at,
            "ledger: subscription created"
        );

        Ok(subscription_id)
    }

    /// The customer's live window, if any. When several plans are active the
    /// one with the latest `ends_at` wins (lowest id on a tie) since it is
    /// the most permissive billable window.
    pub async fn active_subscription(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<SubscriptionEntity>, LedgerError> {
        let now = self.clock.now();

        let subscription = self
            .subscription_repo
            .find_active_by_customer(customer_id, now)
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "ledger: active subscription lookup failed");
                LedgerError::Internal(err)
            })?;

        Ok(subscription)
    }
}
