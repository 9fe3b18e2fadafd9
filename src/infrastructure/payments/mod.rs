pub mod mobile_money;
pub mod sandbox;
