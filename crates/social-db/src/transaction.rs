//! Scoped transactions for multi-step workflows
//!
//! A unit of work receives the open transaction and returns a boxed future.
//! The transaction commits when the work returns `Ok` and rolls back on
//! `Err`. If the surrounding future is dropped (for example by a deadline),
//! sqlx rolls the transaction back when the connection is released.

use futures::future::BoxFuture;
use sqlx::postgres::{PgPool, PgTransaction};
use tracing::{debug, warn};

use social_common::IsolationLevel;
use social_core::RepoResult;

use crate::repositories::map_db_error;

/// Run `work` inside a single transaction
///
/// ```rust,ignore
/// let user = with_transaction(&pool, None, move |tx| {
///     Box::pin(async move {
///         let user = insert_user(&mut **tx, &new_user).await?;
///         insert_invitation(&mut **tx, &hash, user.id, expiry).await?;
///         Ok(user)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<T, F>(
    pool: &PgPool,
    isolation: Option<IsolationLevel>,
    work: F,
) -> RepoResult<T>
where
    T: Send,
    F: for<'t> FnOnce(&'t mut PgTransaction<'static>) -> BoxFuture<'t, RepoResult<T>> + Send,
{
    let mut tx = pool.begin().await.map_err(map_db_error)?;

    if let Some(level) = isolation {
        let statement = isolation_statement(level);
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
    }

    let outcome = work(&mut tx).await;
    match outcome {
        Ok(value) => {
            tx.commit().await.map_err(map_db_error)?;
            Ok(value)
        }
        Err(err) => {
            debug!(error = %err, "rolling back transaction");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}

fn isolation_statement(level: IsolationLevel) -> String {
    format!("SET TRANSACTION ISOLATION LEVEL {}", level.as_sql())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolation_statement() {
        assert_eq!(
            isolation_statement(IsolationLevel::Serializable),
            "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE"
        );
        assert_eq!(
            isolation_statement(IsolationLevel::ReadCommitted),
            "SET TRANSACTION ISOLATION LEVEL READ COMMITTED"
        );
    }
}
