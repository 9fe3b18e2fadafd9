use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::customers::InsertCustomerEntity, repositories::customers::CustomerRepository,
    storage::is_unique_violation,
};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("customer email or phone already registered")]
    DuplicateKey,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct CustomerRegistryUseCase<C>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    customer_repo: Arc<C>,
}

impl<C> CustomerRegistryUseCase<C>
where
    C: CustomerRepository + Send + Sync + 'static,
{
    pub fn new(customer_repo: Arc<C>) -> Self {
        Self { customer_repo }
    }

    /// Registers a customer. Uniqueness of email and phone is decided by the
    /// database constraint at commit time, not by a pre-check, so concurrent
    /// registrations of the same email resolve to one winner.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Uuid, RegistryError> {
        info!(email, phone, "registry: registering customer");

        let customer_id = self
            .customer_repo
            .register(InsertCustomerEntity {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            })
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    warn!(email, phone, "registry: email or phone already registered");
                    RegistryError::DuplicateKey
                } else {
                    error!(db_error = ?err, "registry: failed to register customer");
                    RegistryError::Internal(err)
                }
            })?;

        info!(%customer_id, "registry: customer registered");
        Ok(customer_id)
    }

    pub async fn exists(&self, customer_id: Uuid) -> Result<bool, RegistryError> {
        let found = self.customer_repo.exists(customer_id).await.map_err(|err| {
            error!(%customer_id, db_error = ?err, "registry: customer lookup failed");
            RegistryError::Internal(err)
        })?;

        Ok(found)
    }
}
