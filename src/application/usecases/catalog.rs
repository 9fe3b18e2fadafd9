use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    entities::plans::{InsertPlanEntity, PlanEntity},
    repositories::plans::PlanRepository,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid plan definition: {0}")]
    InvalidArgument(String),
    #[error("plan not found")]
    PlanNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct CatalogUseCase<P>
where
    P: PlanRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
}

impl<P> CatalogUseCase<P>
where
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>) -> Self {
        Self { plan_repo }
    }

    /// Defines a plan. Plan names are not unique; two plans may share a name
    /// and differ only by id.
    pub async fn define_plan(
        &self,
        name: &str,
        price: i64,
        duration_days: i32,
    ) -> Result<i64, CatalogError> {
        if price < 0 {
            warn!(name, price, "catalog: rejected negative plan price");
            return Err(CatalogError::InvalidArgument(
                "price must be non-negative".to_string(),
            ));
        }
        if duration_days < 1 {
            warn!(name, duration_days, "catalog: rejected plan duration");
            return Err(CatalogError::InvalidArgument(
                "duration must be at least one day".to_string(),
            ));
        }

        let plan_id = self
            .plan_repo
            .create_plan(InsertPlanEntity {
                name: name.to_string(),
                price,
                duration_days,
            })
            .await
            .map_err(|err| {
                error!(name, db_error = ?err, "catalog: failed to create plan");
                CatalogError::Internal(err)
            })?;

        info!(plan_id, name, price, duration_days, "catalog: plan defined");
        Ok(plan_id)
    }

    pub async fn get_plan(&self, plan_id: i64) -> Result<PlanEntity, CatalogError> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "catalog: plan lookup failed");
                CatalogError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(plan_id, "catalog: plan not found");
                CatalogError::PlanNotFound
            })?;

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::plans::MockPlanRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn defines_a_plan() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_create_plan()
            .withf(|insert| insert.name == "Daily" && insert.price == 2000 && insert.duration_days == 1)
            .returning(|_| Box::pin(async { Ok(1) }));

        let catalog = CatalogUseCase::new(Arc::new(plan_repo));
        assert_eq!(catalog.define_plan("Daily", 2000, 1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rejects_negative_price() {
        let catalog = CatalogUseCase::new(Arc::new(MockPlanRepository::new()));
        let result = catalog.define_plan("Daily", -1, 1).await;
        assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn rejects_zero_duration() {
        let catalog = CatalogUseCase::new(Arc::new(MockPlanRepository::new()));
        let result = catalog.define_plan("Daily", 2000, 0).await;
        assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn missing_plan_is_not_found() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let catalog = CatalogUseCase::new(Arc::new(plan_repo));
        let result = catalog.get_plan(42).await;
        assert!(matches!(result, Err(CatalogError::PlanNotFound)));
    }

    #[tokio::test]
    async fn returns_the_stored_plan() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo.expect_find_by_id().returning(|plan_id| {
            Box::pin(async move {
                Ok(Some(PlanEntity {
                    id: plan_id,
                    name: "Weekly".to_string(),
                    price: 10_000,
                    duration_days: 7,
                    created_at: Utc::now(),
                }))
            })
        });

        let catalog = CatalogUseCase::new(Arc::new(plan_repo));
        let plan = catalog.get_plan(3).await.unwrap();
        assert_eq!(plan.price, 10_000);
        assert_eq!(plan.duration_days, 7);
    }
}
