use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    application::usecases::payment_recorder::PaymentGateway,
    config::config_model::PaymentGatewayConfig,
    domain::value_objects::payments::GatewayCharge,
};

/// Minimal mobile-money collection client built on reqwest.
pub struct MobileMoneyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct CollectionRequest<'a> {
    phone: &'a str,
    amount: i64,
    currency: &'a str,
    reference: &'a str,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

impl MobileMoneyClient {
    pub fn new(config: &PaymentGatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for MobileMoneyClient {
    async fn attempt_payment(
        &self,
        phone: &str,
        amount: i64,
        reference: &str,
    ) -> Result<GatewayCharge> {
        let url = format!("{}/collections", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&CollectionRequest {
                phone,
                amount,
                currency: "UGX",
                reference,
            })
            .send()
            .await
            .context("mobile money collection request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body, "mobile money gateway returned an error");
            bail!("mobile money gateway returned {status}");
        }

        let parsed = response
            .json::<CollectionResponse>()
            .await
            .context("invalid mobile money gateway response")?;

        Ok(GatewayCharge {
            success: parsed.success,
            message: parsed.message,
        })
    }
}
