//! Classification of storage faults surfaced through `anyhow`, so use cases
//! can map commit-time constraint violations to typed domain errors instead
//! of racing check-then-act reads.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _
        ))
    )
}

/// True when an insert collided with an existing active window. The schema
/// enforces the invariant with an exclusion constraint over
/// `(customer_id, plan_id, tstzrange(starts_at, ends_at))`; Postgres reports
/// that with its own SQLSTATE, so match on the constraint message as well as
/// plain unique violations.
pub fn is_window_overlap(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => true,
        Some(DieselError::DatabaseError(_, info)) => {
            info.message().contains("exclusion constraint")
        }
        _ => false,
    }
}

pub fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            _
        ))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_error(kind: DatabaseErrorKind, message: &str) -> anyhow::Error {
        DieselError::DatabaseError(kind, Box::new(message.to_string())).into()
    }

    #[test]
    fn classifies_unique_violations() {
        let err = db_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"customers_email_key\"",
        );
        assert!(is_unique_violation(&err));
        assert!(is_window_overlap(&err));
        assert!(!is_foreign_key_violation(&err));
    }

    #[test]
    fn classifies_exclusion_violations_by_message() {
        let err = db_error(
            DatabaseErrorKind::Unknown,
            "conflicting key value violates exclusion constraint \"subscriptions_active_window_excl\"",
        );
        assert!(is_window_overlap(&err));
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn other_errors_are_not_violations() {
        let err = anyhow::anyhow!("connection reset");
        assert!(!is_unique_violation(&err));
        assert!(!is_window_overlap(&err));
        assert!(!is_foreign_key_violation(&err));
    }
}
