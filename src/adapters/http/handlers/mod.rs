pub mod kudos_web;
pub mod pages;
pub mod web_auth;

use actix_web::{HttpMessage, HttpRequest};

use crate::adapters::http::middleware::CurrentUser;

/// Extract the authenticated user id from request extensions.
///
/// Only callable behind `WebAuthMiddleware`; a missing entry means the route
/// was wired outside the guard.
pub fn current_user(req: &HttpRequest) -> Result<CurrentUser, actix_web::Error> {
  let user = req.extensions().get::<CurrentUser>().copied();

  if user.is_none() {
    tracing::warn!(
      "current_user: no session in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or_else(|| actix_web::error::ErrorUnauthorized("Not authenticated"))
}
