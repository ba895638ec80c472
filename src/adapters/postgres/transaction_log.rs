//! PostgreSQL implementation of `TransactionLog`.
//!
//! Insert-only. A unique index on `(provider, transaction_id)` backs up
//! the application-level idempotency check; a duplicate append is a
//! hard database error rather than silent double-billing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{BillingProvider, PaymentTransaction, TransactionStatus};
use crate::ports::TransactionLog;

/// PostgreSQL implementation of the TransactionLog port.
pub struct PostgresTransactionLog {
    pool: PgPool,
}

impl PostgresTransactionLog {
    /// Creates a new log with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment transaction.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    user_id: String,
    provider: String,
    transaction_id: String,
    order_id: String,
    amount_minor: i64,
    currency: String,
    status: String,
    plan_name: String,
    signature: String,
    verified_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for PaymentTransaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(PaymentTransaction {
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            provider: BillingProvider::parse(&row.provider).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid provider value: {}", row.provider),
                )
            })?,
            transaction_id: row.transaction_id,
            order_id: row.order_id,
            amount_minor: row.amount_minor,
            currency: row.currency,
            status: TransactionStatus::parse(&row.status).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid status value: {}", row.status),
                )
            })?,
            plan_name: row.plan_name,
            signature: row.signature,
            verified_at: Timestamp::from_datetime(row.verified_at),
        })
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, e.to_string())
}

const SELECT_COLUMNS: &str = r#"
    SELECT user_id, provider, transaction_id, order_id, amount_minor,
           currency, status, plan_name, signature, verified_at
    FROM payment_transactions
"#;

#[async_trait]
impl TransactionLog for PostgresTransactionLog {
    async fn append(&self, transaction: &PaymentTransaction) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payment_transactions (
                user_id, provider, transaction_id, order_id, amount_minor,
                currency, status, plan_name, signature, verified_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(transaction.user_id.as_str())
        .bind(transaction.provider.as_str())
        .bind(&transaction.transaction_id)
        .bind(&transaction.order_id)
        .bind(transaction.amount_minor)
        .bind(&transaction.currency)
        .bind(transaction.status.as_str())
        .bind(&transaction.plan_name)
        .bind(&transaction.signature)
        .bind(*transaction.verified_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_transaction_id(
        &self,
        provider: BillingProvider,
        transaction_id: &str,
    ) -> Result<Option<PaymentTransaction>, DomainError> {
        let row: Option<TransactionRow> = sqlx::query_as(&format!(
            "{} WHERE provider = $1 AND transaction_id = $2",
            SELECT_COLUMNS
        ))
        .bind(provider.as_str())
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(PaymentTransaction::try_from).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PaymentTransaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY verified_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter()
            .map(PaymentTransaction::try_from)
            .collect()
    }
}
