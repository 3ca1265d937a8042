pub mod middleware;
pub mod models;
pub mod session;

pub use models::{AuthenticatedUser, CallerIdentity};
pub use session::SessionVerifier;
