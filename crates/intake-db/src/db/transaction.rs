//! Database transaction utilities

use futures::future::BoxFuture;
use intake_core::AppError;
use sqlx::{PgPool, Postgres, Transaction};

/// Execute a closure within a database transaction
///
/// Begins a transaction, runs the closure, and commits if it succeeds. When
/// the closure fails the transaction is rolled back and the closure's error is
/// returned unchanged. A failed commit surfaces as
/// [`AppError::MetadataStoreFailure`].
///
/// # Example
///
/// ```ignore
/// use intake_db::with_transaction;
///
/// async fn example(pool: &sqlx::PgPool) -> Result<(), intake_core::AppError> {
///     with_transaction(pool, |tx| {
///         Box::pin(async move {
///             sqlx::query("INSERT INTO ...").execute(&mut **tx).await?;
///             Ok(())
///         })
///     })
///     .await
/// }
/// ```
pub async fn with_transaction<F, R>(pool: &PgPool, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a mut Transaction<'_, Postgres>) -> BoxFuture<'a, Result<R, AppError>>,
{
    let mut tx = pool.begin().await?;

    match f(&mut tx).await {
        Ok(result) => {
            tx.commit().await?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(e)
        }
    }
}
