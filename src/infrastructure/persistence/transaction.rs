//! Retryable atomic transactions.
//!
//! [`run_in_transaction`] runs a unit of work inside a single database
//! transaction: commit when the work returns `Ok`, roll back when it returns
//! `Err`. When the store aborts the transaction because of a conflict with a
//! concurrent one (serialization failure or deadlock), the whole unit of
//! work is run again from the start with exponential backoff.
//!
//! ```ignore
//! let ids = Arc::new(ids);
//! run_in_transaction(&pool, &policy, move |conn| {
//!     let ids = Arc::clone(&ids);
//!     Box::pin(async move { apply(conn, &ids).await })
//! })
//! .await?;
//! ```

use sqlx::{PgConnection, PgPool};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::utils::db_error::is_transient;

/// Future returned by a unit of work, borrowing the transaction's connection.
pub type UnitOfWork<'c, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>;

/// Errors that can tell whether they were caused by a transient store conflict.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for sqlx::Error {
    fn is_transient(&self) -> bool {
        is_transient(self)
    }
}

/// How often and how patiently a conflicting transaction is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Zero disables retrying.
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 10,
            max_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(max_retries: usize) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Delays between attempts: `base`, `base * 2`, `base * 4`, ... capped at
    /// `max_delay`, each randomized by jitter.
    fn delays(&self) -> impl Iterator<Item = Duration> + Send + use<> {
        ExponentialBackoff::from_millis(2)
            .factor((self.base_delay_ms / 2).max(1))
            .max_delay(self.max_delay)
            .map(jitter)
            .take(self.max_retries)
    }
}

/// Runs `work` in a transaction, retrying it on transient conflicts.
///
/// `work` may be called more than once, so it must not consume its inputs;
/// clone shared data into each attempt.
///
/// # Errors
///
/// Returns the error of the last attempt: the unit of work's own error, a
/// failure to begin or commit, or a transient conflict once `policy` is
/// exhausted.
pub async fn run_in_transaction<T, E, F>(
    pool: &PgPool,
    policy: &RetryPolicy,
    work: F,
) -> Result<T, E>
where
    F: for<'c> Fn(&'c mut PgConnection) -> UnitOfWork<'c, T, E> + Send + Sync,
    T: Send,
    E: From<sqlx::Error> + Transient + Send,
{
    let work = &work;
    let mut attempt_no = 0u32;

    RetryIf::spawn(
        policy.delays(),
        move || {
            attempt_no += 1;
            attempt(pool, work, attempt_no)
        },
        |e: &E| {
            let retry = e.is_transient();
            if retry {
                metrics::counter!("db_transaction_retries_total").increment(1);
                tracing::warn!("Transaction conflicted with a concurrent one, retrying");
            }
            retry
        },
    )
    .await
}

async fn attempt<T, E, F>(pool: &PgPool, work: &F, attempt_no: u32) -> Result<T, E>
where
    F: for<'c> Fn(&'c mut PgConnection) -> UnitOfWork<'c, T, E>,
    E: From<sqlx::Error>,
{
    let mut tx = pool.begin().await?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            if attempt_no > 1 {
                tracing::debug!(attempt = attempt_no, "Transaction committed after retry");
            }
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_bounded_by_policy() {
        let policy = RetryPolicy {
            max_retries: 5,
            base_delay_ms: 10,
            max_delay: Duration::from_millis(50),
        };
        let delays: Vec<_> = policy.delays().collect();
        assert_eq!(delays.len(), 5);
        assert!(delays.iter().all(|d| *d <= Duration::from_millis(50)));
    }

    #[test]
    fn test_zero_retries_yields_no_delays() {
        assert_eq!(RetryPolicy::with_max_retries(0).delays().count(), 0);
    }
}
