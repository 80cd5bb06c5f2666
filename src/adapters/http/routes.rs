use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{GetCurrentUserUseCase, LoginUserUseCase, RegisterUserUseCase};
use crate::application::kudo::{ListKudosUseCase, SendKudoUseCase};
use crate::domain::auth::ports::UserRepository;
use crate::infrastructure::security::SessionCodec;

use super::handlers::web_auth::CookiePolicy;
use super::handlers::{kudos_web, pages, web_auth};
use super::middleware::WebAuthMiddleware;
use super::templates::TemplateEngine;

/// Dependencies for the web UI routes
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub session_codec: Arc<SessionCodec>,
  pub cookie_policy: CookiePolicy,
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub get_current_user_use_case: Arc<GetCurrentUserUseCase>,
  pub send_kudo_use_case: Arc<SendKudoUseCase>,
  pub list_kudos_use_case: Arc<ListKudosUseCase>,
  pub user_repo: Arc<dyn UserRepository>,
}

/// Configure web UI routes
///
/// # Routes
///
/// Anonymous:
/// - GET  /login - Login/registration page (redirects away when a valid
///   session is already present)
/// - POST /login - Authenticate and set the session cookie
/// - POST /register - Create an account and set the session cookie
/// - POST /logout - Clear the session cookie
///
/// Protected (behind `WebAuthMiddleware`):
/// - GET  / - Landing route, forwards to /home
/// - GET  /home - Kudo feed
/// - POST /home/kudos/{recipient_id} - Send a kudo
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.templates))
    .app_data(web::Data::new(deps.session_codec.clone()))
    .app_data(web::Data::new(deps.cookie_policy))
    .app_data(web::Data::new(deps.register_use_case))
    .app_data(web::Data::new(deps.login_use_case))
    .app_data(web::Data::new(deps.get_current_user_use_case))
    .app_data(web::Data::new(deps.send_kudo_use_case))
    .app_data(web::Data::new(deps.list_kudos_use_case))
    .app_data(web::Data::new(deps.user_repo))
    .service(
      web::resource("/login")
        .route(web::get().to(pages::login_page))
        .route(web::post().to(web_auth::login_submit)),
    )
    .route("/register", web::post().to(web_auth::register_submit))
    .route("/logout", web::post().to(web_auth::logout))
    .service(
      web::resource("/")
        .wrap(WebAuthMiddleware::new(deps.session_codec.clone()))
        .route(web::get().to(pages::index)),
    )
    .service(
      web::scope("/home")
        .wrap(WebAuthMiddleware::new(deps.session_codec))
        .route("", web::get().to(pages::home_page))
        .route(
          "/kudos/{recipient_id}",
          web::post().to(kudos_web::send_kudo_submit),
        ),
    );
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::cookie::Cookie;
  use actix_web::{App, test};
  use async_trait::async_trait;
  use std::collections::HashMap;
  use std::sync::Mutex;
  use uuid::Uuid;

  use crate::adapters::http::SESSION_COOKIE;
  use crate::domain::auth::entities::User;
  use crate::domain::auth::errors::{AuthError, RepositoryError};
  use crate::domain::auth::services::AuthService;
  use crate::domain::auth::value_objects::Email;
  use crate::domain::kudo::entities::{Kudo, KudoWithAuthor};
  use crate::domain::kudo::errors::KudoError;
  use crate::domain::kudo::ports::KudoRepository;
  use crate::infrastructure::security::Argon2PasswordHasher;

  #[derive(Default)]
  struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
  }

  #[async_trait]
  impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
      let mut users = self.users.lock().unwrap();
      if users.contains_key(&user.email) {
        return Err(AuthError::Repository(RepositoryError::DuplicateKey(
          user.email.clone(),
        )));
      }
      users.insert(user.email.clone(), user.clone());
      Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
      Ok(
        self
          .users
          .lock()
          .unwrap()
          .values()
          .find(|u| u.id == id)
          .cloned(),
      )
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
      Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn count_by_email(&self, email: &Email) -> Result<i64, AuthError> {
      Ok(self.users.lock().unwrap().contains_key(email.as_str()) as i64)
    }

    async fn list_excluding(&self, id: Uuid) -> Result<Vec<User>, AuthError> {
      Ok(
        self
          .users
          .lock()
          .unwrap()
          .values()
          .filter(|u| u.id != id)
          .cloned()
          .collect(),
      )
    }
  }

  #[derive(Default)]
  struct InMemoryKudoRepository {
    kudos: Mutex<Vec<Kudo>>,
  }

  #[async_trait]
  impl KudoRepository for InMemoryKudoRepository {
    async fn create(&self, kudo: Kudo) -> Result<Kudo, KudoError> {
      self.kudos.lock().unwrap().push(kudo.clone());
      Ok(kudo)
    }

    async fn list_for_recipient(
      &self,
      recipient_id: Uuid,
    ) -> Result<Vec<KudoWithAuthor>, KudoError> {
      Ok(
        self
          .kudos
          .lock()
          .unwrap()
          .iter()
          .filter(|k| k.recipient_id == recipient_id)
          .map(|k| KudoWithAuthor {
            kudo: k.clone(),
            author_first_name: "Test".to_string(),
            author_last_name: "Author".to_string(),
          })
          .collect(),
      )
    }

    async fn recent(&self, limit: i64) -> Result<Vec<KudoWithAuthor>, KudoError> {
      let kudos = self.kudos.lock().unwrap();
      Ok(
        kudos
          .iter()
          .rev()
          .take(limit as usize)
          .map(|k| KudoWithAuthor {
            kudo: k.clone(),
            author_first_name: "Test".to_string(),
            author_last_name: "Author".to_string(),
          })
          .collect(),
      )
    }
  }

  fn dependencies() -> WebRouteDependencies {
    let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
    let kudo_repo: Arc<dyn KudoRepository> = Arc::new(InMemoryKudoRepository::default());
    let auth_service = Arc::new(AuthService::new(
      user_repo.clone(),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
    ));

    WebRouteDependencies {
      templates: TemplateEngine::new().unwrap(),
      session_codec: Arc::new(SessionCodec::new("route-test-secret", 3600).unwrap()),
      cookie_policy: CookiePolicy { secure: false },
      register_use_case: Arc::new(RegisterUserUseCase::new(auth_service.clone())),
      login_use_case: Arc::new(LoginUserUseCase::new(auth_service)),
      get_current_user_use_case: Arc::new(GetCurrentUserUseCase::new(user_repo.clone())),
      send_kudo_use_case: Arc::new(SendKudoUseCase::new(kudo_repo.clone(), user_repo.clone())),
      list_kudos_use_case: Arc::new(ListKudosUseCase::new(kudo_repo)),
      user_repo,
    }
  }

  fn session_from<B>(res: &actix_web::dev::ServiceResponse<B>) -> Option<Cookie<'static>> {
    res
      .response()
      .cookies()
      .find(|c| c.name() == SESSION_COOKIE)
      .map(|c| c.into_owned())
  }

  #[actix_web::test]
  async fn test_full_authentication_flow() {
    let app = test::init_service(
      App::new().configure(|cfg| configure_web_routes(cfg, dependencies())),
    )
    .await;

    // Register succeeds, sets a session cookie and redirects to the landing
    // route
    let res = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/register")
        .set_form([
          ("email", "a@x.com"),
          ("password", "secret1"),
          ("first_name", "Ada"),
          ("last_name", "Lovelace"),
        ])
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
    assert_eq!(
      res.headers().get(actix_web::http::header::LOCATION).unwrap(),
      "/"
    );
    assert!(session_from(&res).is_some());

    // A second registration with the same email fails and sets no cookie
    let res = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/register")
        .set_form([
          ("email", "a@x.com"),
          ("password", "secret2"),
          ("first_name", "Eve"),
          ("last_name", "Intruder"),
        ])
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    assert!(session_from(&res).is_none());
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("already exists"));

    // Wrong password fails with the generic credential error
    let res = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "a@x.com"), ("password", "wrong")])
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("Invalid credentials"));

    // Correct credentials mint a fresh session
    let res = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "a@x.com"), ("password", "secret1")])
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
    let session = session_from(&res).unwrap();

    // The session resolves on a protected route
    let res = test::call_service(
      &app,
      test::TestRequest::get()
        .uri("/home")
        .cookie(session.clone())
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::OK);
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("Ada"));

    // Logout clears the cookie
    let res = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/logout")
        .cookie(session)
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
    assert_eq!(
      res.headers().get(actix_web::http::header::LOCATION).unwrap(),
      "/login"
    );
    let cleared = session_from(&res).unwrap();
    assert_eq!(cleared.value(), "");

    // Without a session the protected route bounces back to login
    let res = test::call_service(&app, test::TestRequest::get().uri("/home").to_request()).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
    assert_eq!(
      res.headers().get(actix_web::http::header::LOCATION).unwrap(),
      "/login?redirectTo=%2Fhome"
    );
  }

  #[actix_web::test]
  async fn test_login_page_redirects_away_when_authenticated() {
    let deps = dependencies();
    let codec = deps.session_codec.clone();
    let app =
      test::init_service(App::new().configure(|cfg| configure_web_routes(cfg, deps))).await;

    let value = codec.encode(Uuid::new_v4(), chrono::Utc::now()).unwrap();
    let res = test::call_service(
      &app,
      test::TestRequest::get()
        .uri("/login")
        .cookie(Cookie::new(SESSION_COOKIE, value))
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
    assert_eq!(
      res.headers().get(actix_web::http::header::LOCATION).unwrap(),
      "/"
    );
  }

  #[actix_web::test]
  async fn test_login_follows_redirect_to_param() {
    let app = test::init_service(
      App::new().configure(|cfg| configure_web_routes(cfg, dependencies())),
    )
    .await;

    test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/register")
        .set_form([
          ("email", "b@x.com"),
          ("password", "secret1"),
          ("first_name", "Grace"),
          ("last_name", "Hopper"),
        ])
        .to_request(),
    )
    .await;

    let res = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/login")
        .set_form([
          ("email", "b@x.com"),
          ("password", "secret1"),
          ("redirectTo", "/home"),
        ])
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
    assert_eq!(
      res.headers().get(actix_web::http::header::LOCATION).unwrap(),
      "/home"
    );
  }
}
