use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::{
    application::usecases::payment_recorder::PaymentGateway,
    domain::value_objects::{currency::format_ugx, payments::GatewayCharge},
};

/// Deterministic stand-in for the mobile-money gateway: approves or declines
/// every charge according to how it was constructed. Useful for local runs
/// and tests where no real gateway is reachable.
pub struct SandboxGateway {
    approve: bool,
}

impl SandboxGateway {
    pub fn approving() -> Self {
        Self { approve: true }
    }

    pub fn declining() -> Self {
        Self { approve: false }
    }
}

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn attempt_payment(
        &self,
        phone: &str,
        amount: i64,
        reference: &str,
    ) -> Result<GatewayCharge> {
        info!(
            phone,
            amount = %format_ugx(amount),
            reference,
            "sandbox gateway charge"
        );

        if self.approve {
            Ok(GatewayCharge {
                success: true,
                message: "Payment successful!".to_string(),
            })
        } else {
            Ok(GatewayCharge {
                success: false,
                message: "Payment declined by sandbox gateway".to_string(),
            })
        }
    }
}
