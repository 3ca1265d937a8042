//! Session token verification
//!
//! Tokens are JWTs minted by the external identity provider. RS256 with a PEM
//! public key is preferred; HS256 with a shared secret is accepted for local
//! development and tests.

use clipvault_core::{AppError, AuthConfig};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::auth::models::{AuthenticatedUser, SessionClaims};

pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn from_config(auth: &AuthConfig) -> Result<Self, AppError> {
        let (key, algorithm) = if let Some(pem) = &auth.jwt_public_key {
            let key = DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                AppError::Configuration(format!("AUTH_JWT_PUBLIC_KEY is not a valid RSA PEM: {}", e))
            })?;
            (key, Algorithm::RS256)
        } else if let Some(secret) = &auth.jwt_secret {
            (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
        } else {
            return Err(AppError::Configuration(
                "no session verification key configured".to_string(),
            ));
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &auth.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(|e| AppError::Unauthenticated(format!("invalid session token: {}", e)))?;

        let user_id = data.claims.sub.trim();
        if user_id.is_empty() {
            return Err(AppError::Unauthenticated(
                "session token has an empty subject".to_string(),
            ));
        }

        Ok(AuthenticatedUser {
            user_id: user_id.to_string(),
        })
    }
}
