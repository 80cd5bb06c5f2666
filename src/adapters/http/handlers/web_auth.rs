use actix_web::{
  HttpResponse,
  cookie::{Cookie, SameSite, time::Duration as CookieDuration},
  http::header,
  web,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::SESSION_COOKIE;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};
use crate::domain::auth::errors::AuthError;
use crate::infrastructure::security::SessionCodec;

/// Cookie attributes that vary by environment
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
  /// Whether Set-Cookie carries the Secure attribute (production)
  pub secure: bool,
}

/// Builds the session cookie handed to the client after register/login
pub(crate) fn session_cookie(
  value: String,
  max_age_seconds: i64,
  policy: CookiePolicy,
) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, value)
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(policy.secure)
    .max_age(CookieDuration::seconds(max_age_seconds))
    .finish()
}

/// Builds a blanked, immediately-expiring session cookie
pub(crate) fn expired_session_cookie(policy: CookiePolicy) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(policy.secure)
    .max_age(CookieDuration::seconds(0))
    .finish()
}

/// Only same-origin paths are accepted as post-login destinations
fn is_local_path(path: &str) -> bool {
  path.starts_with('/') && !path.starts_with("//")
}

/// Message shown back on the login page.
///
/// Credential failures surface their own wording; anything else becomes a
/// generic failure and the detail goes to the log only.
fn form_error_message(error: &AuthError) -> String {
  match error {
    AuthError::InvalidCredentials
    | AuthError::EmailAlreadyExists
    | AuthError::CreateFailed
    | AuthError::ValueObject(_) => error.to_string(),
    other => {
      tracing::error!("Authentication failed: {}", other);
      "Something went wrong, please try again".to_string()
    }
  }
}

fn render_login_page(
  templates: &TemplateEngine,
  context: tera::Context,
) -> Result<HttpResponse, actix_web::Error> {
  let html = templates
    .render("pages/login.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(
    HttpResponse::BadRequest()
      .content_type("text/html")
      .body(html),
  )
}

#[derive(Deserialize)]
pub struct LoginFormData {
  email: String,
  password: String,
  #[serde(rename = "redirectTo")]
  redirect_to: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterFormData {
  email: String,
  password: String,
  first_name: String,
  last_name: String,
}

/// Handle login form submission
pub async fn login_submit(
  form: web::Form<LoginFormData>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  codec: web::Data<Arc<SessionCodec>>,
  policy: web::Data<CookiePolicy>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let command = LoginUserCommand {
    email: form.email.clone(),
    password: form.password.clone(),
  };

  match use_case.execute(command).await {
    Ok(response) => {
      tracing::info!("Login successful for user_id={}", response.user_id);

      let value = codec
        .encode(response.user_id, Utc::now())
        .map_err(actix_web::error::ErrorInternalServerError)?;

      let target = form
        .redirect_to
        .as_deref()
        .filter(|p| is_local_path(p))
        .unwrap_or("/")
        .to_string();

      Ok(
        HttpResponse::Found()
          .cookie(session_cookie(value, codec.ttl_seconds(), **policy))
          .insert_header((header::LOCATION, target))
          .finish(),
      )
    }
    Err(e) => {
      let mut context = tera::Context::new();
      context.insert("error", &form_error_message(&e));
      context.insert("email", &form.email);
      context.insert("action", "login");
      render_login_page(&templates, context)
    }
  }
}

/// Handle registration form submission
pub async fn register_submit(
  form: web::Form<RegisterFormData>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
  codec: web::Data<Arc<SessionCodec>>,
  policy: web::Data<CookiePolicy>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let command = RegisterUserCommand {
    email: form.email.clone(),
    password: form.password.clone(),
    first_name: form.first_name.clone(),
    last_name: form.last_name.clone(),
  };

  match use_case.execute(command).await {
    Ok(response) => {
      tracing::info!("Registered new user_id={}", response.user_id);

      let value = codec
        .encode(response.user_id, Utc::now())
        .map_err(actix_web::error::ErrorInternalServerError)?;

      Ok(
        HttpResponse::Found()
          .cookie(session_cookie(value, codec.ttl_seconds(), **policy))
          .insert_header((header::LOCATION, "/"))
          .finish(),
      )
    }
    Err(e) => {
      let mut context = tera::Context::new();
      context.insert("error", &form_error_message(&e));
      context.insert("email", &form.email);
      context.insert("first_name", &form.first_name);
      context.insert("last_name", &form.last_name);
      context.insert("action", "signup");
      render_login_page(&templates, context)
    }
  }
}

/// Handle logout.
///
/// Unconditional: the cookie is blanked and expired whether or not a session
/// was present, and the client lands back on the login page.
pub async fn logout(policy: web::Data<CookiePolicy>) -> Result<HttpResponse, actix_web::Error> {
  Ok(
    HttpResponse::Found()
      .cookie(expired_session_cookie(**policy))
      .insert_header((header::LOCATION, "/login"))
      .finish(),
  )
}
