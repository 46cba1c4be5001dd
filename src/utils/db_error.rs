//! Classification of database errors by SQLSTATE and constraint name.

/// `serialization_failure`
const SERIALIZATION_FAILURE: &str = "40001";
/// `deadlock_detected`
const DEADLOCK_DETECTED: &str = "40P01";

/// Returns true if `e` is a unique violation on one of `constraints`.
pub fn is_unique_violation(e: &sqlx::Error, constraints: &[&str]) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err
        .constraint()
        .is_some_and(|name| constraints.contains(&name))
}

/// Returns true if the store aborted the statement because of a conflict
/// with a concurrent transaction, so running the whole transaction again
/// may succeed.
pub fn is_transient(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    matches!(
        db_err.code().as_deref(),
        Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)
    )
}
