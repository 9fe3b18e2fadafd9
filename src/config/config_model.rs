#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: Database,
    pub payment_gateway: PaymentGatewayConfig,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct PaymentGatewayConfig {
    pub base_url: String,
    pub api_key: String,
}
