//! Cloudinary-compatible media gateway.
//!
//! Uses the signed upload API: every request carries the API key, a Unix
//! timestamp and a SHA-256 signature over the remaining parameters.

use async_trait::async_trait;
use bytes::Bytes;
use clipvault_core::models::{AssetDescriptor, ResourceType, TransformDirective};
use clipvault_core::GatewayCredentials;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};
use crate::traits::MediaGateway;

const SIGNATURE_ALGORITHM: &str = "sha256";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone, Debug)]
pub struct CloudinaryGatewayConfig {
    pub credentials: GatewayCredentials,
    /// Upload API root, e.g. `https://api.cloudinary.com/v1_1`.
    pub api_base: String,
    /// Delivery root, e.g. `https://res.cloudinary.com`.
    pub delivery_base: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct CloudinaryGateway {
    config: CloudinaryGatewayConfig,
    client: reqwest::Client,
}

// Upload API response: either an error envelope or the asset description.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UploadOutcome {
    Failed { error: ErrorBody },
    Uploaded(UploadedAsset),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadedAsset {
    public_id: Option<String>,
    bytes: Option<u64>,
    duration: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
}

impl CloudinaryGateway {
    pub fn new(config: CloudinaryGatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn upload_url(&self, resource_type: ResourceType) -> String {
        format!(
            "{}/{}/{}/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.credentials.cloud_name,
            resource_type
        )
    }

    /// Parameters covered by the signature (everything except file, api_key and the signature itself).
    fn signed_params(directive: &TransformDirective, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("folder", directive.folder.clone()),
            ("timestamp", timestamp.to_string()),
        ];
        if let Some(transformation) = &directive.transformation {
            params.push(("transformation", transformation.clone()));
        }
        params
    }
}

/// `key=value` pairs sorted by key and joined with `&`.
fn string_to_sign(params: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    }
}

fn decode_upload_response(status: u16, body: &str) -> GatewayResult<AssetDescriptor> {
    let success = (200..300).contains(&status);

    let outcome = match serde_json::from_str::<UploadOutcome>(body) {
        Ok(outcome) => outcome,
        Err(e) if success => return Err(GatewayError::MalformedResponse(e.to_string())),
        Err(_) => {
            return Err(GatewayError::Rejected {
                status,
                message: truncate(body),
            })
        }
    };

    match outcome {
        UploadOutcome::Failed { error } => Err(GatewayError::Rejected {
            status,
            message: error.message,
        }),
        UploadOutcome::Uploaded(_) if !success => Err(GatewayError::Rejected {
            status,
            message: truncate(body),
        }),
        UploadOutcome::Uploaded(asset) => {
            let asset_id = asset
                .public_id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| GatewayError::MalformedResponse("missing public_id".to_string()))?;
            let processed_size = asset
                .bytes
                .ok_or_else(|| GatewayError::MalformedResponse("missing bytes".to_string()))?;
            Ok(AssetDescriptor {
                asset_id,
                processed_size,
                duration: asset.duration,
                width: asset.width,
                height: asset.height,
            })
        }
    }
}

#[async_trait]
impl MediaGateway for CloudinaryGateway {
    #[tracing::instrument(skip(self, payload), fields(resource_type = %directive.resource_type, payload_bytes = payload.len()))]
    async fn submit(
        &self,
        payload: Bytes,
        directive: &TransformDirective,
    ) -> GatewayResult<AssetDescriptor> {
        if payload.is_empty() {
            return Err(GatewayError::EmptyPayload);
        }

        let params = Self::signed_params(directive, chrono::Utc::now().timestamp());
        let signature = sign(&params, &self.config.credentials.api_secret);

        let mut form = Form::new()
            .part("file", Part::bytes(payload.to_vec()).file_name("upload"))
            .text("api_key", self.config.credentials.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", SIGNATURE_ALGORITHM);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.upload_url(directive.resource_type))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(self.config.timeout.as_secs())
                } else {
                    GatewayError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.config.timeout.as_secs())
            } else {
                GatewayError::Transport(format!("Failed to read response body: {}", e))
            }
        })?;

        let descriptor = decode_upload_response(status, &body)?;
        tracing::debug!(
            asset_id = %descriptor.asset_id,
            processed_size = descriptor.processed_size,
            "Gateway accepted upload"
        );
        Ok(descriptor)
    }

    fn delivery_url(
        &self,
        asset_id: &str,
        resource_type: ResourceType,
        transformation: Option<&str>,
        extension: Option<&str>,
    ) -> String {
        let mut url = format!(
            "{}/{}/{}/upload/",
            self.config.delivery_base.trim_end_matches('/'),
            self.config.credentials.cloud_name,
            resource_type
        );
        if let Some(transformation) = transformation {
            url.push_str(transformation);
            url.push('/');
        }
        url.push_str(asset_id);
        if let Some(extension) = extension {
            url.push('.');
            url.push_str(extension);
        }
        url
    }
}
