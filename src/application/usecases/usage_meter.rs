use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    clock::Clock,
    entities::usage_records::InsertUsageRecordEntity,
    repositories::{customers::CustomerRepository, usage_records::UsageRepository},
    storage::is_foreign_key_violation,
};

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("invalid usage: {0}")]
    InvalidArgument(String),
    #[error("customer not found")]
    CustomerNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct UsageMeterUseCase<C, U, Clk>
where
    C: CustomerRepository + Send + Sync + 'static,
    U: UsageRepository + Send + Sync + 'static,
    Clk: Clock + 'static,
{
    customer_repo: Arc<C>,
    usage_repo: Arc<U>,
    clock: Arc<Clk>,
}

impl<C, U, Clk> UsageMeterUseCase<C, U, Clk>
where
    C: CustomerRepository + Send + Sync + 'static,
    U: UsageRepository + Send + Sync + 'static,
    Clk: Clock + 'static,
{
    pub fn new(customer_repo: Arc<C>, usage_repo: Arc<U>, clock: Arc<Clk>) -> Self {
        Self {
            customer_repo,
            usage_repo,
            clock,
        }
    }

    /// Attributes metered consumption to a customer. Usage is accepted
    /// whether or not a subscription window is live; the amount must be
    /// non-negative and the customer must exist (the foreign key backs the
    /// lookup).
    pub async fn log_usage(
        &self,
        customer_id: Uuid,
        data_used_mb: i64,
    ) -> Result<i64, UsageError> {
        if data_used_mb < 0 {
            warn!(%customer_id, data_used_mb, "usage: rejected negative usage");
            return Err(UsageError::InvalidArgument(
                "data usage must be non-negative".to_string(),
            ));
        }

        let known = self.customer_repo.exists(customer_id).await.map_err(|err| {
            error!(%customer_id, db_error = ?err, "usage: customer lookup failed");
            UsageError::Internal(err)
        })?;

        if !known {
            warn!(%customer_id, "usage: customer not found");
            return Err(UsageError::CustomerNotFound);
        }

        let logged_at = self.clock.now();

        let record_id = self
            .usage_repo
            .log_usage(InsertUsageRecordEntity {
                customer_id,
                data_used_mb,
                logged_at,
            })
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    warn!(%customer_id, "usage: customer vanished before insert");
                    UsageError::CustomerNotFound
                } else {
                    error!(%customer_id, db_error = ?err, "usage: failed to log usage");
                    UsageError::Internal(err)
                }
            })?;

        info!(%customer_id, record_id, data_used_mb, "usage: usage logged");
        Ok(record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        clock::MockClock,
        repositories::{customers::MockCustomerRepository, usage_records::MockUsageRepository},
    };
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn logs_usage_with_the_clock_instant() {
        let customer_id = Uuid::new_v4();
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        let mut customer_repo = MockCustomerRepository::new();
        customer_repo
            .expect_exists()
            .returning(|_| Box::pin(async { Ok(true) }));

        let mut clock = MockClock::new();
        clock.expect_now().return_const(t0);

        let mut usage_repo = MockUsageRepository::new();
        usage_repo
            .expect_log_usage()
            .withf(move |insert| {
                insert.customer_id == customer_id
                    && insert.data_used_mb == 512
                    && insert.logged_at == t0
            })
            .returning(|_| Box::pin(async { Ok(21) }));

        let meter = UsageMeterUseCase::new(
            Arc::new(customer_repo),
            Arc::new(usage_repo),
            Arc::new(clock),
        );

        assert_eq!(meter.log_usage(customer_id, 512).await.unwrap(), 21);
    }

    #[tokio::test]
    async fn unknown_customer_is_rejected() {
        let mut customer_repo = MockCustomerRepository::new();
        customer_repo
            .expect_exists()
            .returning(|_| Box::pin(async { Ok(false) }));

        let meter = UsageMeterUseCase::new(
            Arc::new(customer_repo),
            Arc::new(MockUsageRepository::new()),
            Arc::new(MockClock::new()),
        );

        let result = meter.log_usage(Uuid::new_v4(), 512).await;
        assert!(matches!(result, Err(UsageError::CustomerNotFound)));
    }

    #[tokio::test]
    async fn negative_usage_never_reaches_storage() {
        let meter = UsageMeterUseCase::new(
            Arc::new(MockCustomerRepository::new()),
            Arc::new(MockUsageRepository::new()),
            Arc::new(MockClock::new()),
        );

        let result = meter.log_usage(Uuid::new_v4(), -1).await;
        assert!(matches!(result, Err(UsageError::InvalidArgument(_))));
    }
}
