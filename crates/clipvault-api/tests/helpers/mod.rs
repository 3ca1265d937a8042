//! Test helpers: build AppState over in-memory fakes and serve the real router.
//!
//! Run from workspace root: `cargo test -p clipvault-api`.

#![allow(dead_code)]

pub mod auth;
pub mod mocks;

use axum_test::TestServer;
use clipvault_api::auth::SessionVerifier;
use clipvault_api::constants;
use clipvault_api::setup::routes;
use clipvault_api::state::{AppState, UploadLimits};
use clipvault_core::AuthConfig;
use clipvault_db::VideoStore;
use clipvault_gateway::MediaGateway;
use std::sync::Arc;

use mocks::{FakeGateway, InMemoryStore};

/// Small ceilings so oversize paths are cheap to exercise.
pub const TEST_MAX_VIDEO_BYTES: usize = 64 * 1024;
pub const TEST_MAX_IMAGE_BYTES: usize = 16 * 1024;

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
    pub gateway: Arc<FakeGateway>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with a configured gateway.
pub fn setup_test_app() -> TestApp {
    build(true)
}

/// Setup test app whose gateway credentials are missing.
pub fn setup_test_app_without_gateway() -> TestApp {
    build(false)
}

fn build(with_gateway: bool) -> TestApp {
    let store = Arc::new(InMemoryStore::default());
    let gateway = Arc::new(FakeGateway::default());

    let sessions = SessionVerifier::from_config(&AuthConfig {
        jwt_public_key: None,
        jwt_secret: Some(auth::TEST_JWT_SECRET.to_string()),
        jwt_issuer: None,
    })
    .expect("Failed to build session verifier");

    let state = Arc::new(AppState {
        store: store.clone() as Arc<dyn VideoStore>,
        gateway: with_gateway.then(|| gateway.clone() as Arc<dyn MediaGateway>),
        sessions: Arc::new(sessions),
        limits: UploadLimits {
            max_video_bytes: TEST_MAX_VIDEO_BYTES,
            max_image_bytes: TEST_MAX_IMAGE_BYTES,
        },
    });

    let server =
        TestServer::new(routes::build_router(state)).expect("Failed to create test server");

    TestApp {
        server,
        store,
        gateway,
    }
}
