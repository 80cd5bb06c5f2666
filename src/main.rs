use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kudos::{
  adapters::http::{
    CookiePolicy, RequestIdMiddleware, TemplateEngine, WebRouteDependencies, configure_web_routes,
  },
  application::auth::{GetCurrentUserUseCase, LoginUserUseCase, RegisterUserUseCase},
  application::kudo::{ListKudosUseCase, SendKudoUseCase},
  domain::auth::ports::UserRepository,
  domain::auth::services::AuthService,
  infrastructure::{
    config::Config,
    persistence::postgres::{PostgresKudoRepository, PostgresUserRepository},
    security::{Argon2PasswordHasher, SessionCodec},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kudos=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Kudos application");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  // The signing secret is load-bearing: a process without one would hand out
  // forgeable sessions, so startup stops right here instead.
  let session_codec = Arc::new(
    SessionCodec::new(
      &config.security.session_secret,
      config.security.session_ttl_seconds as i64,
    )
    .context("Session signing secret must be configured (KUDOS_SECURITY__SESSION_SECRET)")?,
  );

  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .with_context(|| {
    format!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Failed to connect to database")?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;

  // Initialize repositories
  let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let kudo_repo = Arc::new(PostgresKudoRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().context("Failed to create password hasher")?);

  // Initialize domain service
  let auth_service = Arc::new(AuthService::new(user_repo.clone(), password_hasher));

  // Initialize use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let get_current_user_use_case = Arc::new(GetCurrentUserUseCase::new(user_repo.clone()));
  let send_kudo_use_case = Arc::new(SendKudoUseCase::new(kudo_repo.clone(), user_repo.clone()));
  let list_kudos_use_case = Arc::new(ListKudosUseCase::new(kudo_repo.clone()));

  // Initialize template engine
  let templates = TemplateEngine::new().context("Failed to initialize template engine")?;
  tracing::info!("Template engine initialized");

  let cookie_policy = CookiePolicy {
    secure: config.security.cookie_secure,
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Configure web UI routes
      .configure(|cfg| {
        configure_web_routes(
          cfg,
          WebRouteDependencies {
            templates: templates.clone(),
            session_codec: session_codec.clone(),
            cookie_policy,
            register_use_case: register_use_case.clone(),
            login_use_case: login_use_case.clone(),
            get_current_user_use_case: get_current_user_use_case.clone(),
            send_kudo_use_case: send_kudo_use_case.clone(),
            list_kudos_use_case: list_kudos_use_case.clone(),
            user_repo: user_repo.clone(),
          },
        )
      })
      // Static files
      .service(fs::Files::new("/static", "./static"))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
