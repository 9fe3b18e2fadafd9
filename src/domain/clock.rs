use chrono::{DateTime, FixedOffset, Utc};
use mockall::automock;

/// East Africa Time (Kampala, UTC+3), the billing reference zone.
pub const EAT_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Source of the current instant. Injected everywhere so tests can pin time.
#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Renders a stored instant in the EAT reference zone as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(EAT_UTC_OFFSET_SECS).expect("EAT offset is in range");
    instant
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
