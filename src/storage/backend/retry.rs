//! Database error classification and retry.
//!
//! Every database error lands in one of three buckets: transient (retried
//! with capped exponential backoff plus jitter), unique-constraint violation
//! (surfaced so the link store can map it to `Collision`), or fatal
//! (surfaced immediately). One classifier decides, by driver error code
//! first and message matching as the fallback.

use rand::RngExt;
use sea_orm::DbErr;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How the storage layer should handle a database error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Deadlock, lock timeout, lost connection: worth retrying.
    Transient,
    /// A unique/primary-key constraint fired. Never retried here; the link
    /// store turns it into `Collision` and the create flow decides.
    UniqueViolation,
    /// Everything else surfaces immediately.
    Fatal,
}

pub fn classify_db_error(err: &DbErr) -> ErrorDisposition {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ErrorDisposition::Transient,
        DbErr::Exec(runtime) | DbErr::Query(runtime) => classify_runtime_error(runtime),
        _ => ErrorDisposition::Fatal,
    }
}

fn classify_runtime_error(err: &sea_orm::error::RuntimeErr) -> ErrorDisposition {
    use sea_orm::error::RuntimeErr;

    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            use std::ops::Deref;
            if let Some(db_err) = sqlx_err.deref().as_database_error() {
                if db_err.is_unique_violation() {
                    return ErrorDisposition::UniqueViolation;
                }
                if let Some(code) = db_err.code() {
                    return classify_driver_code(code.as_ref());
                }
            }
            classify_message(&sqlx_err.to_string().to_lowercase())
        }
        RuntimeErr::Internal(msg) => classify_message(&msg.to_lowercase()),
        #[allow(unreachable_patterns)]
        _ => ErrorDisposition::Fatal,
    }
}

fn classify_driver_code(code: &str) -> ErrorDisposition {
    match code {
        // MySQL deadlock / lock wait timeout, PostgreSQL serialization
        // failure / deadlock detected, SQLITE_BUSY / SQLITE_LOCKED
        "1213" | "1205" | "40001" | "40P01" | "5" | "6" => ErrorDisposition::Transient,
        // MySQL duplicate entry, PostgreSQL unique_violation,
        // SQLITE_CONSTRAINT_PRIMARYKEY / SQLITE_CONSTRAINT_UNIQUE
        "1062" | "23505" | "1555" | "2067" => ErrorDisposition::UniqueViolation,
        _ => ErrorDisposition::Fatal,
    }
}

fn classify_message(msg: &str) -> ErrorDisposition {
    if msg.contains("deadlock")
        || msg.contains("lock wait timeout")
        || msg.contains("database is locked")
        || msg.contains("serialization failure")
    {
        ErrorDisposition::Transient
    } else if msg.contains("unique constraint")
        || msg.contains("duplicate key")
        || msg.contains("duplicate entry")
    {
        ErrorDisposition::UniqueViolation
    } else {
        ErrorDisposition::Fatal
    }
}

/// Did this error come from a unique/primary-key constraint?
pub fn is_unique_violation(err: &DbErr) -> bool {
    classify_db_error(err) == ErrorDisposition::UniqueViolation
}

#[derive(Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Run `operation`, retrying transient errors with exponential backoff.
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "Operation '{}' succeeded after {} retries",
                        operation_name, attempt
                    );
                }
                return Ok(result);
            }
            Err(e) => e,
        };

        match classify_db_error(&err) {
            ErrorDisposition::Transient if attempt < config.max_retries => {
                attempt += 1;
                let delay = backoff_delay(attempt, config.base_delay_ms, config.max_delay_ms);
                warn!(
                    "Operation '{}' failed (attempt {}/{}): {}; retrying in {} ms",
                    operation_name,
                    attempt,
                    config.max_retries + 1,
                    err,
                    delay
                );
                sleep(Duration::from_millis(delay)).await;
            }
            disposition => {
                if disposition == ErrorDisposition::Fatal {
                    debug!(
                        "Operation '{}' failed with non-retryable error: {}",
                        operation_name, err
                    );
                }
                return Err(err);
            }
        }
    }
}

/// Exponential backoff with 0-25% jitter.
fn backoff_delay(attempt: u32, base_ms: u64, max_ms: u64) -> u64 {
    let exp_delay = base_ms.saturating_mul(2u64.saturating_pow(attempt - 1));
    let capped = exp_delay.min(max_ms);
    let jitter = rand::rng().random_range(0..=capped / 4);
    capped.saturating_add(jitter)
}
