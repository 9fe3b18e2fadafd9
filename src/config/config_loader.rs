use anyhow::Result;

use super::config_model::{AppConfig, Database, PaymentGatewayConfig};

pub fn load() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let payment_gateway = PaymentGatewayConfig {
        base_url: std::env::var("PAYMENT_GATEWAY_URL").expect("PAYMENT_GATEWAY_URL is invalid"),
        api_key: std::env::var("PAYMENT_GATEWAY_API_KEY")
            .expect("PAYMENT_GATEWAY_API_KEY is invalid"),
    };

    Ok(AppConfig {
        database,
        payment_gateway,
    })
}
