//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Cookie the identity provider stores the session token in.
pub const SESSION_COOKIE: &str = "__session";

/// Headroom above the largest file limit for multipart boundaries and text fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
