use actix_web::{HttpRequest, HttpResponse, http::header, web};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::SESSION_COOKIE;
use crate::adapters::http::handlers::current_user;
use crate::adapters::http::middleware::RequestIdExt;
use crate::adapters::http::handlers::web_auth::{CookiePolicy, expired_session_cookie};
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::GetCurrentUserUseCase;
use crate::application::kudo::ListKudosUseCase;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;
use crate::domain::kudo::entities::KudoWithAuthor;
use crate::infrastructure::security::SessionCodec;

#[derive(Deserialize)]
pub struct LoginPageQuery {
  #[serde(rename = "redirectTo")]
  redirect_to: Option<String>,
}

/// Render the login/registration page.
///
/// Anonymous access is allowed here; a request that already carries a valid
/// session is sent away to the landing route instead.
pub async fn login_page(
  req: HttpRequest,
  query: web::Query<LoginPageQuery>,
  codec: web::Data<Arc<SessionCodec>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let already_authenticated = req
    .cookie(SESSION_COOKIE)
    .and_then(|cookie| codec.decode(cookie.value(), Utc::now()).ok())
    .is_some();

  if already_authenticated {
    return Ok(
      HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish(),
    );
  }

  let mut context = tera::Context::new();
  context.insert("action", "login");
  if let Some(redirect_to) = &query.redirect_to {
    context.insert("redirect_to", redirect_to);
  }

  let html = templates
    .render("pages/login.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Landing route: authenticated users are forwarded to the home feed
pub async fn index() -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, "/home"))
    .finish()
}

fn feed_item(item: &KudoWithAuthor) -> serde_json::Value {
  serde_json::json!({
      "message": item.kudo.message,
      "emoji": item.kudo.style.emoji,
      "background_color": item.kudo.style.background_color,
      "text_color": item.kudo.style.text_color,
      "author_name": format!("{} {}", item.author_first_name, item.author_last_name),
  })
}

/// Render the home feed page (authenticated)
pub async fn home_page(
  req: HttpRequest,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  list_kudos_use_case: web::Data<Arc<ListKudosUseCase>>,
  user_repo: web::Data<Arc<dyn UserRepository>>,
  policy: web::Data<CookiePolicy>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let user_id = current_user(&req)?.0;

  let user = match get_user_use_case.execute(user_id).await {
    Ok(user) => user,
    // The session outlived the account; drop the cookie and start over
    Err(AuthError::UserNotFound) => {
      return Ok(
        HttpResponse::Found()
          .cookie(expired_session_cookie(**policy))
          .insert_header((header::LOCATION, "/login"))
          .finish(),
      );
    }
    Err(e) => {
      tracing::error!("Failed to load current user: {}", e);
      return Err(actix_web::error::ErrorInternalServerError(
        "Failed to load user",
      ));
    }
  };

  let feed = list_kudos_use_case
    .execute(user_id)
    .await
    .map_err(|e| {
      tracing::error!(request_id = ?req.request_id(), "Failed to load kudo feed: {}", e);
      actix_web::error::ErrorInternalServerError("Failed to load feed")
    })?;

  let recipients = user_repo.list_excluding(user_id).await.map_err(|e| {
    tracing::error!("Failed to list recipients: {}", e);
    actix_web::error::ErrorInternalServerError("Failed to load users")
  })?;

  let mut context = tera::Context::new();
  context.insert(
    "user",
    &serde_json::json!({
        "first_name": user.first_name,
        "last_name": user.last_name,
        "email": user.email,
    }),
  );
  context.insert(
    "kudos",
    &feed.received.iter().map(feed_item).collect::<Vec<_>>(),
  );
  context.insert(
    "recent_kudos",
    &feed.recent.iter().map(feed_item).collect::<Vec<_>>(),
  );
  context.insert(
    "recipients",
    &recipients
      .iter()
      .map(|u| {
        serde_json::json!({
            "id": u.id,
            "name": u.profile.full_name(),
        })
      })
      .collect::<Vec<_>>(),
  );

  let html = templates
    .render("pages/home.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
