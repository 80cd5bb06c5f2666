pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

/// Name of the session cookie handed to browsers
pub const SESSION_COOKIE: &str = "kudos_session";

// Re-export commonly used types
pub use handlers::web_auth::CookiePolicy;
pub use middleware::{
  CurrentUser, RequestId, RequestIdExt, RequestIdMiddleware, WebAuthMiddleware,
};
pub use routes::{WebRouteDependencies, configure_web_routes};
pub use templates::TemplateEngine;
