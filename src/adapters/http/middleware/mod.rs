pub mod request_id;
pub mod web_auth;

// Re-export middleware components for easier access
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use web_auth::{CurrentUser, WebAuthMiddleware, login_redirect};
