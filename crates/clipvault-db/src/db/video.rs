//! Repository for video records

use async_trait::async_trait;
use clipvault_core::models::{NewVideoRecord, VideoRecord};
use clipvault_core::AppError;
use sqlx::{PgPool, Postgres};
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

use crate::store::VideoStore;

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed video record store
///
/// Every operation checks out one pooled connection and returns it when the
/// operation future completes or is dropped, including on timeout.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
    operation_timeout: Duration,
}

impl VideoRepository {
    pub fn new(pool: PgPool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    async fn bounded<T, F>(
        &self,
        operation: F,
        into_error: fn(sqlx::Error) -> AppError,
        timeout_error: fn(String) -> AppError,
    ) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.operation_timeout, operation).await {
            Ok(result) => result.map_err(into_error),
            Err(_) => Err(timeout_error(format!(
                "operation timed out after {}s",
                self.operation_timeout.as_secs()
            ))),
        }
    }
}

fn write_error(err: sqlx::Error) -> AppError {
    let duplicate = err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);
    if duplicate {
        AppError::StoreWrite(format!("asset id already recorded: {}", err))
    } else {
        AppError::StoreWrite(err.to_string())
    }
}

fn read_error(err: sqlx::Error) -> AppError {
    AppError::StoreRead(err.to_string())
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self, record), fields(db.table = "videos", db.operation = "insert", owner_id = %record.owner_id))]
    async fn create(&self, record: NewVideoRecord) -> Result<VideoRecord, AppError> {
        let id = Uuid::new_v4();
        let pool = &self.pool;

        let insert = async move {
            let mut conn = pool.acquire().await?;
            sqlx::query_as::<Postgres, VideoRecord>(
                r#"
                INSERT INTO videos (id, title, description, public_id, original_size, compressed_size, duration, user_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, title, description, public_id, original_size, compressed_size, duration, user_id, created_at
                "#,
            )
            .bind(id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.asset_id)
            .bind(&record.original_size)
            .bind(&record.processed_size)
            .bind(record.duration)
            .bind(&record.owner_id)
            .fetch_one(&mut *conn)
            .await
        };

        let video = self
            .bounded(insert, write_error, AppError::StoreWrite)
            .await?;

        tracing::debug!(video_id = %video.id, asset_id = %video.asset_id, "Video record created");
        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<VideoRecord>, AppError> {
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Ok(Vec::new());
        }
        let pool = &self.pool;

        let select = async move {
            let mut conn = pool.acquire().await?;
            sqlx::query_as::<Postgres, VideoRecord>(
                r#"
                SELECT id, title, description, public_id, original_size, compressed_size, duration, user_id, created_at
                FROM videos
                WHERE user_id = $1
                ORDER BY created_at DESC, seq DESC
                "#,
            )
            .bind(owner_id)
            .fetch_all(&mut *conn)
            .await
        };

        self.bounded(select, read_error, AppError::StoreRead).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        let pool = &self.pool;
        let probe = async move {
            let mut conn = pool.acquire().await?;
            sqlx::query_scalar::<Postgres, i32>("SELECT 1")
                .fetch_one(&mut *conn)
                .await
                .map(|_| ())
        };
        self.bounded(probe, read_error, AppError::StoreRead).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_maps_to_store_write() {
        let err = write_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::StoreWrite(_)));
    }

    #[test]
    fn test_read_error_maps_to_store_read() {
        let err = read_error(sqlx::Error::PoolClosed);
        assert!(matches!(err, AppError::StoreRead(_)));
    }

    #[tokio::test]
    async fn test_blank_owner_lists_nothing_without_touching_the_pool() {
        // Lazy pool never connects; a query would fail with a connection error.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        let repository = VideoRepository::new(pool, Duration::from_secs(1));

        assert!(repository.list_by_owner("").await.unwrap().is_empty());
        assert!(repository.list_by_owner("   ").await.unwrap().is_empty());
    }
}
