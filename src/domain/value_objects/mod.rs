pub mod currency;
pub mod enums;
pub mod payments;
