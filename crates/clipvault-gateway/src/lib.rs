//! Clipvault Media Gateway
//!
//! Client for the external media-processing service. Callers hand over raw
//! bytes plus a `TransformDirective` and receive an `AssetDescriptor`; the
//! transcoding and cropping themselves happen entirely on the remote side.

pub mod cloudinary;
pub mod error;
pub mod traits;

pub use cloudinary::{CloudinaryGateway, CloudinaryGatewayConfig};
pub use error::{GatewayError, GatewayResult};
pub use traits::MediaGateway;
