/// Outcome of a single charge attempt at the external gateway.
#[derive(Debug, Clone)]
pub struct GatewayCharge {
    pub success: bool,
    pub message: String,
}

/// Returned once a confirmed payment has been recorded against an invoice.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub payment_id: i64,
    pub message: String,
}
