use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    entities::payments::InsertPaymentEntity,
    repositories::payments::PaymentRepository,
    storage::is_foreign_key_violation,
    value_objects::{
        enums::payment_statuses::PaymentStatus,
        payments::{GatewayCharge, PaymentConfirmation},
    },
};

/// The external payment-confirmation interface. The engine calls it
/// synchronously and only interprets the boolean outcome; gateway protocol
/// details live behind the implementations.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait PaymentGateway: Send + Sync {
    async fn attempt_payment(
        &self,
        phone: &str,
        amount: i64,
        reference: &str,
    ) -> AnyResult<GatewayCharge>;
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("invalid payment: {0}")]
    InvalidArgument(String),
    #[error("invoice not found")]
    InvoiceNotFound,
    #[error("payment declined: {0}")]
    PaymentFailed(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct PaymentRecorderUseCase<Pay, G>
where
    Pay: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    payment_repo: Arc<Pay>,
    gateway: Arc<G>,
}

impl<Pay, G> PaymentRecorderUseCase<Pay, G>
where
    Pay: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    pub fn new(payment_repo: Arc<Pay>, gateway: Arc<G>) -> Self {
        Self {
            payment_repo,
            gateway,
        }
    }

    /// Charges the phone at the gateway and records the outcome against the
    /// invoice. The paid amount is not reconciled against the invoice total;
    /// the ledger stores whatever the gateway confirmed.
    pub async fn record_payment(
        &self,
        invoice_id: i64,
        amount: i64,
        phone: &str,
        reference: &str,
    ) -> Result<PaymentConfirmation, PaymentError> {
        if amount <= 0 {
            warn!(invoice_id, amount, "payments: rejected non-positive amount");
            return Err(PaymentError::InvalidArgument(
                "amount must be positive".to_string(),
            ));
        }

        info!(invoice_id, amount, phone, reference, "payments: attempting charge");

        let charge = self
            .gateway
            .attempt_payment(phone, amount, reference)
            .await
            .map_err(|err| {
                error!(invoice_id, gateway_error = ?err, "payments: gateway call failed");
                PaymentError::Internal(err)
            })?;

        let status = if charge.success {
            PaymentStatus::Confirmed
        } else {
            PaymentStatus::Declined
        };

        let payment_id = self
            .payment_repo
            .record_payment(InsertPaymentEntity {
                invoice_id,
                amount,
                phone: phone.to_string(),
                reference: reference.to_string(),
                status: status.to_string(),
            })
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    warn!(invoice_id, "payments: invoice not found");
                    PaymentError::InvoiceNotFound
                } else {
                    error!(invoice_id, db_error = ?err, "payments: failed to record payment");
                    PaymentError::Internal(err)
                }
            })?;

        if !charge.success {
            warn!(
                invoice_id,
                payment_id,
                message = %charge.message,
                "payments: gateway declined charge"
            );
            return Err(PaymentError::PaymentFailed(charge.message));
        }

        info!(invoice_id, payment_id, "payments: payment confirmed");

        Ok(PaymentConfirmation {
            payment_id,
            message: charge.message,
        })
    }
}
