use std::sync::Arc;

use anyhow::anyhow;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    clock::Clock,
    entities::invoices::{InsertInvoiceEntity, InvoiceEntity},
    repositories::{
        invoices::InvoiceRepository, plans::PlanRepository,
        subscriptions::SubscriptionRepository,
    },
};

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("no active subscription")]
    NoActiveSubscription,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct InvoiceGeneratorUseCase<S, P, I, C>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
    invoice_repo: Arc<I>,
    clock: Arc<C>,
}

impl<S, P, I, C> InvoiceGeneratorUseCase<S, P, I, C>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        plan_repo: Arc<P>,
        invoice_repo: Arc<I>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            subscription_repo,
            plan_repo,
            invoice_repo,
            clock,
        }
    }

    /// Bills the customer's active window at the plan's list price. The
    /// amount is not prorated, and repeated calls during one window each
    /// append a full-price invoice; callers wanting one-invoice-per-window
    /// must gate this themselves.
    pub async fn generate_invoice(&self, customer_id: Uuid) -> Result<i64, InvoiceError> {
        let now = self.clock.now();

        let subscription = self
            .subscription_repo
            .find_active_by_customer(customer_id, now)
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "invoices: subscription lookup failed");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%customer_id, "invoices: no active subscription");
                InvoiceError::NoActiveSubscription
            })?;

        let plan = self
            .plan_repo
            .find_by_id(subscription.plan_id)
            .await
            .map_err(|err| {
                error!(
                    %customer_id,
                    plan_id = subscription.plan_id,
                    db_error = ?err,
                    "invoices: plan lookup failed"
                );
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                anyhow!(
                    "plan {} referenced by subscription {} is missing",
                    subscription.plan_id,
                    subscription.id
                )
            })?;

        let invoice_id = self
            .invoice_repo
            .create_invoice(InsertInvoiceEntity {
                customer_id,
                total_amount: plan.price,
                invoice_date: now,
            })
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "invoices: failed to create invoice");
                InvoiceError::Internal(err)
            })?;

        info!(
            %customer_id,
            invoice_id,
            subscription_id = subscription.id,
            total_amount = plan.price,
            "invoices: invoice generated"
        );

        Ok(invoice_id)
    }

    pub async fn list_invoices(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<InvoiceEntity>, InvoiceError> {
        let invoices = self
            .invoice_repo
            .list_by_customer(customer_id)
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "invoices: listing failed");
                InvoiceError::Internal(err)
            })?;

        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        clock::MockClock,
        entities::{plans::PlanEntity, subscriptions::SubscriptionEntity},
        repositories::{
            invoices::MockInvoiceRepository, plans::MockPlanRepository,
            subscriptions::MockSubscriptionRepository,
        },
    };
    use chrono::{Duration, TimeZone, Utc};

    fn daily_plan(plan_id: i64) -> PlanEntity {
        PlanEntity {
            id: plan_id,
            name: "Daily".to_string(),
            price: 2000,
            duration_days: 1,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn window(customer_id: Uuid, plan_id: i64, t0: chrono::DateTime<Utc>) -> SubscriptionEntity {
        SubscriptionEntity {
            id: 11,
            customer_id,
            plan_id,
            starts_at: t0,
            ends_at: t0 + Duration::days(1),
            created_at: t0,
        }
    }

    #[tokio::test]
    async fn bills_the_list_price_while_the_window_is_live() {
        let customer_id = Uuid::new_v4();
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let stored = window(customer_id, 5, t0);
        subscription_repo
            .expect_find_active_by_customer()
            .returning(move |_, now| {
                let stored = stored.clone();
                Box::pin(async move { Ok((stored.ends_at >= now).then_some(stored)) })
            });

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(|plan_id| Box::pin(async move { Ok(Some(daily_plan(plan_id))) }));

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_create_invoice()
            .withf(move |insert| {
                insert.customer_id == customer_id
                    && insert.total_amount == 2000
                    && insert.invoice_date == t0
            })
            .returning(|_| Box::pin(async { Ok(7) }));

        let mut clock = MockClock::new();
        clock.expect_now().return_const(t0);

        let generator = InvoiceGeneratorUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(plan_repo),
            Arc::new(invoice_repo),
            Arc::new(clock),
        );

        assert_eq!(generator.generate_invoice(customer_id).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn expired_rows_do_not_make_a_window_billable() {
        // Subscribed to the one-day plan at t0; two days later the invoice
        // must be refused even though the expired row still exists.
        let customer_id = Uuid::new_v4();
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let stored = window(customer_id, 5, t0);
        subscription_repo
            .expect_find_active_by_customer()
            .returning(move |_, now| {
                let stored = stored.clone();
                Box::pin(async move { Ok((stored.ends_at >= now).then_some(stored)) })
            });

        let mut clock = MockClock::new();
        clock.expect_now().return_const(t0 + Duration::days(2));

        let generator = InvoiceGeneratorUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockPlanRepository::new()),
            Arc::new(MockInvoiceRepository::new()),
            Arc::new(clock),
        );

        let result = generator.generate_invoice(customer_id).await;
        assert!(matches!(result, Err(InvoiceError::NoActiveSubscription)));
    }

    #[tokio::test]
    async fn fails_when_no_subscription_exists_at_all() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_active_by_customer()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let mut clock = MockClock::new();
        clock.expect_now().return_const(Utc::now());

        let generator = InvoiceGeneratorUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockPlanRepository::new()),
            Arc::new(MockInvoiceRepository::new()),
            Arc::new(clock),
        );

        let result = generator.generate_invoice(Uuid::new_v4()).await;
        assert!(matches!(result, Err(InvoiceError::NoActiveSubscription)));
    }

    #[tokio::test]
    async fn listing_invoices_is_idempotent() {
        let customer_id = Uuid::new_v4();
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        let history = vec![
            InvoiceEntity {
                id: 1,
                customer_id,
                total_amount: 2000,
                invoice_date: t0,
            },
            InvoiceEntity {
                id: 2,
                customer_id,
                total_amount: 2000,
                invoice_date: t0 + Duration::days(1),
            },
        ];

        let mut invoice_repo = MockInvoiceRepository::new();
        let stored = history.clone();
        invoice_repo
            .expect_list_by_customer()
            .times(2)
            .returning(move |_| {
                let stored = stored.clone();
                Box::pin(async move { Ok(stored) })
            });

        let mut clock = MockClock::new();
        clock.expect_now().return_const(t0);

        let generator = InvoiceGeneratorUseCase::new(
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(MockPlanRepository::new()),
            Arc::new(invoice_repo),
            Arc::new(clock),
        );

        let first = generator.list_invoices(customer_id).await.unwrap();
        let second = generator.list_invoices(customer_id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, history);
    }

    #[tokio::test]
    async fn listing_with_no_invoices_is_empty_not_an_error() {
        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_list_by_customer()
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let generator = InvoiceGeneratorUseCase::new(
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(MockPlanRepository::new()),
            Arc::new(invoice_repo),
            Arc::new(MockClock::new()),
        );

        assert!(generator.list_invoices(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
