//! Media gateway abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use clipvault_core::models::{AssetDescriptor, ResourceType, TransformDirective};

use crate::error::GatewayResult;

/// External asset-processing capability.
///
/// `submit` makes exactly one attempt; retry policy belongs to the caller.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Upload `payload` and let the gateway process it according to `directive`.
    async fn submit(
        &self,
        payload: Bytes,
        directive: &TransformDirective,
    ) -> GatewayResult<AssetDescriptor>;

    /// Public URL serving `asset_id` with a delivery-time `transformation` applied.
    fn delivery_url(
        &self,
        asset_id: &str,
        resource_type: ResourceType,
        transformation: Option<&str>,
        extension: Option<&str>,
    ) -> String;
}
