//! Repository trait abstraction for the video record store
//!
//! Handlers and services depend on this trait rather than on the Postgres
//! repository, so they can be exercised without a database.

use async_trait::async_trait;
use clipvault_core::models::{NewVideoRecord, VideoRecord};
use clipvault_core::AppError;

#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Persist a new record, assigning `id` and `created_at`.
    ///
    /// Fails with `AppError::StoreWrite` on constraint violations (such as a
    /// duplicate asset id), connectivity loss or timeout.
    async fn create(&self, record: NewVideoRecord) -> Result<VideoRecord, AppError>;

    /// All records belonging to `owner_id`, newest first.
    ///
    /// A blank owner id yields an empty list, never an error.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<VideoRecord>, AppError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
