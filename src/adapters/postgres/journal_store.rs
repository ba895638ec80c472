//! PostgreSQL implementation of `JournalStore`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, EntryId, ErrorCode, Timestamp, UserId};
use crate::domain::journal::JournalEntry;
use crate::ports::JournalStore;

/// PostgreSQL implementation of the JournalStore port.
pub struct PostgresJournalStore {
    pool: PgPool,
}

impl PostgresJournalStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a journal entry.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: Uuid,
    user_id: String,
    mood: Option<String>,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<EntryRow> for JournalEntry {
    type Error = DomainError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(JournalEntry {
            id: EntryId::from_uuid(row.id),
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            mood: row.mood,
            content: row.content,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, e.to_string())
}

#[async_trait]
impl JournalStore for PostgresJournalStore {
    async fn insert(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries (id, user_id, mood, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_str())
        .bind(entry.mood.as_deref())
        .bind(&entry.content)
        .bind(*entry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, DomainError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, mood, content, created_at
            FROM journal_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(JournalEntry::try_from).collect()
    }

    async fn delete(&self, user_id: &UserId, entry_id: &EntryId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM journal_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(entry_id.as_uuid())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
