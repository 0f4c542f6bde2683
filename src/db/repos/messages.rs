//! Message repository
//!
//! All message CRUD goes through here. Each operation is a single
//! autocommitted statement, so mutations are durable before returning
//! and concurrent writers resolve at the database (last commit wins).

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{MessageBody, Username};

/// Message record from database
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("message {id} not found")]
    NotFound { id: i64 },
}

/// Message repository
pub struct MessageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every message, oldest first.
    ///
    /// Ordered by created_at ascending with id as tie-break, so equal
    /// timestamps come back in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Message>, DbError> {
        let messages = sqlx::query_as(
            r#"
            SELECT id, body, username, created_at, updated_at
            FROM messages
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Fetch a single message by id.
    pub async fn get(&self, id: i64) -> Result<Message, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, body, username, created_at, updated_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound { id })
    }

    /// Insert a new message.
    ///
    /// The table defaults set created_at = updated_at = NOW() from the
    /// same statement clock, and the sequence assigns a fresh id.
    pub async fn create(
        &self,
        body: MessageBody,
        username: Username,
    ) -> Result<Message, DbError> {
        let message = sqlx::query_as(
            r#"
            INSERT INTO messages (body, username)
            VALUES ($1, $2)
            RETURNING id, body, username, created_at, updated_at
            "#,
        )
        .bind(body.as_str())
        .bind(username.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(message)
    }

    /// Replace a message's body, refreshing updated_at.
    ///
    /// Only body and updated_at change; id, username, and created_at
    /// are untouched.
    pub async fn update_body(&self, id: i64, body: MessageBody) -> Result<Message, DbError> {
        sqlx::query_as(
            r#"
            UPDATE messages
            SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, body, username, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(body.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound { id })
    }

    /// Delete a message permanently.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("bootstrap failed");
        pool
    }

    fn body(s: &str) -> MessageBody {
        MessageBody::new(s).unwrap()
    }

    fn user(s: &str) -> Username {
        Username::new(s).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get() {
        let pool = test_pool().await;
        let repo = MessageRepo::new(&pool);

        let created = repo.create(body("hi"), user("alice")).await.unwrap();
        assert_eq!(created.body, "hi");
        assert_eq!(created.username, "alice");
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.body, "hi");

        repo.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_ordered_oldest_first() {
        let pool = test_pool().await;
        let repo = MessageRepo::new(&pool);

        let first = repo.create(body("one"), user("alice")).await.unwrap();
        let second = repo.create(body("two"), user("bob")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let pos_first = all.iter().position(|m| m.id == first.id).unwrap();
        let pos_second = all.iter().position(|m| m.id == second.id).unwrap();
        assert!(pos_first < pos_second);

        repo.delete(first.id).await.unwrap();
        repo.delete(second.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_changes_only_body_and_updated_at() {
        let pool = test_pool().await;
        let repo = MessageRepo::new(&pool);

        let created = repo.create(body("before"), user("alice")).await.unwrap();
        let updated = repo.update_body(created.id, body("after")).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.body, "after");
        assert_eq!(updated.username, created.username);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        repo.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_id_is_not_found() {
        let pool = test_pool().await;
        let repo = MessageRepo::new(&pool);

        let err = repo.get(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.update_body(i64::MAX, body("x")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
