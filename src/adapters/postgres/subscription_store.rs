//! PostgreSQL implementation of `SubscriptionStore`.
//!
//! Subscription state lives denormalized on the `users` table; a
//! replace updates every subscription column in one statement, which
//! gives the per-document semantics the store contract requires
//! (last-writer-wins, no partial-field corruption).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{
    BillingProvider, FeatureLimits, FeatureUsage, SubscriptionPlan, SubscriptionRecord,
    SubscriptionStatus,
};
use crate::ports::SubscriptionStore;

/// PostgreSQL implementation of the SubscriptionStore port.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of the subscription columns.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    plan: String,
    plan_name: String,
    status: String,
    current_period_end: Option<DateTime<Utc>>,
    provider: String,
    subscription_id: Option<String>,
    limit_video_sessions: i64,
    limit_voice_calls: i64,
    limit_chat_messages: i64,
    used_video_sessions: i64,
    used_voice_calls: i64,
    used_chat_messages: i64,
    usage_reset_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for SubscriptionRecord {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(SubscriptionRecord {
            plan: parse_plan(&row.plan)?,
            plan_name: row.plan_name,
            status: SubscriptionStatus::parse(&row.status).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid status value: {}", row.status),
                )
            })?,
            current_period_end: row.current_period_end.map(Timestamp::from_datetime),
            provider: BillingProvider::parse(&row.provider).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid provider value: {}", row.provider),
                )
            })?,
            subscription_id: row.subscription_id,
            limits: FeatureLimits {
                video_sessions: row.limit_video_sessions,
                voice_calls: row.limit_voice_calls,
                chat_messages: row.limit_chat_messages,
            },
            usage: FeatureUsage {
                video_sessions: row.used_video_sessions,
                voice_calls: row.used_voice_calls,
                chat_messages: row.used_chat_messages,
                last_reset_date: Timestamp::from_datetime(row.usage_reset_at),
            },
        })
    }
}

fn parse_plan(s: &str) -> Result<SubscriptionPlan, DomainError> {
    match s {
        "free" => Ok(SubscriptionPlan::Free),
        "pro" => Ok(SubscriptionPlan::Pro),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan value: {}", s),
        )),
    }
}

fn plan_to_string(plan: SubscriptionPlan) -> &'static str {
    match plan {
        SubscriptionPlan::Free => "free",
        SubscriptionPlan::Pro => "pro",
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, e.to_string())
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<SubscriptionRecord>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT plan, plan_name, status, current_period_end, provider,
                   subscription_id, limit_video_sessions, limit_voice_calls,
                   limit_chat_messages, used_video_sessions, used_voice_calls,
                   used_chat_messages, usage_reset_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(SubscriptionRecord::try_from).transpose()
    }

    async fn replace(
        &self,
        user_id: &UserId,
        record: &SubscriptionRecord,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                plan = $2,
                plan_name = $3,
                status = $4,
                current_period_end = $5,
                provider = $6,
                subscription_id = $7,
                limit_video_sessions = $8,
                limit_voice_calls = $9,
                limit_chat_messages = $10,
                used_video_sessions = $11,
                used_voice_calls = $12,
                used_chat_messages = $13,
                usage_reset_at = $14,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(plan_to_string(record.plan))
        .bind(&record.plan_name)
        .bind(record.status.as_str())
        .bind(record.current_period_end.map(|t| *t.as_datetime()))
        .bind(record.provider.as_str())
        .bind(record.subscription_id.as_deref())
        .bind(record.limits.video_sessions)
        .bind(record.limits.voice_calls)
        .bind(record.limits.chat_messages)
        .bind(record.usage.video_sessions)
        .bind(record.usage.voice_calls)
        .bind(record.usage.chat_messages)
        .bind(*record.usage.last_reset_date.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("No user document for {}", user_id),
            ));
        }

        Ok(())
    }
}
