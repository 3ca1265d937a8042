use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted video upload.
///
/// Records are append-only: `asset_id` and `created_at` never change after
/// creation and every record belongs to exactly one owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Gateway identifier of the processed asset.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "public_id"))]
    pub asset_id: String,
    /// Byte count of the uploaded source, as supplied by the uploader.
    pub original_size: String,
    /// Byte count of the processed asset, as reported by the gateway.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "compressed_size"))]
    pub processed_size: String,
    /// Seconds; 0 when the gateway did not report a duration.
    pub duration: f64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "user_id"))]
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a record. The store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideoRecord {
    pub title: String,
    pub description: Option<String>,
    pub asset_id: String,
    pub original_size: String,
    pub processed_size: String,
    pub duration: f64,
    pub owner_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecordResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub public_id: String,
    pub original_size: String,
    pub compressed_size: String,
    pub duration: f64,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<VideoRecord> for VideoRecordResponse {
    fn from(record: VideoRecord) -> Self {
        VideoRecordResponse {
            id: record.id,
            title: record.title,
            description: record.description,
            public_id: record.asset_id,
            original_size: record.original_size,
            compressed_size: record.processed_size,
            duration: record.duration,
            user_id: record.owner_id,
            created_at: record.created_at,
        }
    }
}
