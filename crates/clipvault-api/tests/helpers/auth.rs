use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

/// Shared secret the test session verifier is configured with.
pub const TEST_JWT_SECRET: &str = "test-session-secret";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: i64,
    iat: i64,
}

/// Mint a session token for `user_id`, valid for one hour.
pub fn session_token(user_id: &str) -> String {
    sign(user_id, 3600, TEST_JWT_SECRET)
}

pub fn expired_session_token(user_id: &str) -> String {
    sign(user_id, -3600, TEST_JWT_SECRET)
}

pub fn foreign_session_token(user_id: &str) -> String {
    sign(user_id, 3600, "some-other-secret")
}

fn sign(user_id: &str, ttl_secs: i64, secret: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    encode(
        &Header::default(),
        &Claims {
            sub: user_id,
            exp: now + ttl_secs,
            iat: now,
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}
