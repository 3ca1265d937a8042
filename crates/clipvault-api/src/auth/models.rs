use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Session token claims issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Owner identifier
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Identity attached to the request extensions by the session middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Optional caller identity.
///
/// Never rejects: handlers receive `None` when the request carried no valid
/// session and pass it on explicitly, so the upload flow decides on 401.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Option<AuthenticatedUser>);

impl CallerIdentity {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.0.as_ref()
    }
}

// Read from request parts so handlers can still take Multipart as the body extractor.
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CallerIdentity(
            parts.extensions.get::<AuthenticatedUser>().cloned(),
        ))
    }
}
