//! Media gateway errors

use clipvault_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Payload is empty")]
    EmptyPayload,

    #[error("Gateway rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Gateway did not answer within {0}s")]
    Timeout(u64),

    #[error("Gateway transport error: {0}")]
    Transport(String),

    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::Gateway(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipvault_core::ErrorMetadata;

    #[test]
    fn test_gateway_error_converts_to_gateway_kind() {
        let app: AppError = GatewayError::Timeout(120).into();
        assert_eq!(app.error_kind(), "GatewayError");
        assert!(app.to_string().contains("120s"));
    }

    #[test]
    fn test_rejected_message_carries_status() {
        let err = GatewayError::Rejected {
            status: 400,
            message: "Invalid video file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Gateway rejected the upload (400): Invalid video file"
        );
    }
}
