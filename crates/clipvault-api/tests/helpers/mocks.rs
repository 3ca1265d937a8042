//! In-memory fakes for the store and the media gateway.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use clipvault_core::models::{
    AssetDescriptor, NewVideoRecord, ResourceType, TransformDirective, VideoRecord,
};
use clipvault_core::AppError;
use clipvault_db::VideoStore;
use clipvault_gateway::{GatewayError, GatewayResult, MediaGateway};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Store that keeps records in insertion order and counts every call.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<VideoRecord>>,
    pub create_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
}

impl InMemoryStore {
    /// Insert a record directly, `age_secs` seconds in the past.
    pub fn seed(&self, owner_id: &str, asset_id: &str, title: &str, age_secs: i64) -> VideoRecord {
        self.seed_at(
            owner_id,
            asset_id,
            title,
            Utc::now() - Duration::seconds(age_secs),
        )
    }

    /// Insert a record with an explicit creation time.
    pub fn seed_at(
        &self,
        owner_id: &str,
        asset_id: &str,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> VideoRecord {
        let record = VideoRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            asset_id: asset_id.to_string(),
            original_size: "1000".to_string(),
            processed_size: "800".to_string(),
            duration: 0.0,
            owner_id: owner_id.to_string(),
            created_at,
        };
        self.records.lock().unwrap().push(record.clone());
        record
    }

    pub fn records(&self) -> Vec<VideoRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoStore for InMemoryStore {
    async fn create(&self, record: NewVideoRecord) -> Result<VideoRecord, AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::StoreWrite("connection refused".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.asset_id == record.asset_id) {
            return Err(AppError::StoreWrite(format!(
                "asset id already recorded: {}",
                record.asset_id
            )));
        }
        let video = VideoRecord {
            id: Uuid::new_v4(),
            title: record.title,
            description: record.description,
            asset_id: record.asset_id,
            original_size: record.original_size,
            processed_size: record.processed_size,
            duration: record.duration,
            owner_id: record.owner_id,
            created_at: Utc::now(),
        };
        records.push(video.clone());
        Ok(video)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<VideoRecord>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::StoreRead("connection refused".to_string()));
        }
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Ok(Vec::new());
        }

        // Newest insertion first, then a stable sort keeps that order for equal timestamps.
        let mut owned: Vec<VideoRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::StoreRead("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Gateway that answers with a fixed descriptor and records every submission.
pub struct FakeGateway {
    pub descriptor: Mutex<AssetDescriptor>,
    pub fail: AtomicBool,
    submissions: Mutex<Vec<(usize, TransformDirective)>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            descriptor: Mutex::new(AssetDescriptor {
                asset_id: "abc123".to_string(),
                processed_size: 800,
                duration: Some(12.0),
                width: Some(1920),
                height: Some(1080),
            }),
            fail: AtomicBool::new(false),
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn submissions(&self) -> Vec<(usize, TransformDirective)> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn submit_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaGateway for FakeGateway {
    async fn submit(
        &self,
        payload: Bytes,
        directive: &TransformDirective,
    ) -> GatewayResult<AssetDescriptor> {
        self.submissions
            .lock()
            .unwrap()
            .push((payload.len(), directive.clone()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::Timeout(120));
        }
        Ok(self.descriptor.lock().unwrap().clone())
    }

    fn delivery_url(
        &self,
        asset_id: &str,
        resource_type: ResourceType,
        transformation: Option<&str>,
        extension: Option<&str>,
    ) -> String {
        let mut url = format!("https://res.test/demo/{}/upload/", resource_type);
        if let Some(t) = transformation {
            url.push_str(t);
            url.push('/');
        }
        url.push_str(asset_id);
        if let Some(ext) = extension {
            url.push('.');
            url.push_str(ext);
        }
        url
    }
}
