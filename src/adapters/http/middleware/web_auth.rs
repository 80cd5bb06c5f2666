use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header,
};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};
use uuid::Uuid;

use crate::adapters::http::SESSION_COOKIE;
use crate::infrastructure::security::SessionCodec;

/// Identity resolved from a valid session cookie, stored in request
/// extensions by `WebAuthMiddleware`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

/// Builds the redirect that bounces an unauthenticated request to the login
/// page, carrying the original path so the user can be sent back afterwards.
pub fn login_redirect(return_to: &str) -> HttpResponse {
  let query = serde_urlencoded::to_string([("redirectTo", return_to)]).unwrap_or_default();
  HttpResponse::Found()
    .insert_header((header::LOCATION, format!("/login?{}", query)))
    .finish()
}

/// Web authentication middleware using signed cookie sessions.
///
/// Decoding happens entirely in-process; no store lookup is involved. On any
/// decode failure the middleware short-circuits with the login redirect and
/// the wrapped service is never called.
pub struct WebAuthMiddleware {
  codec: Arc<SessionCodec>,
}

impl WebAuthMiddleware {
  pub fn new(codec: Arc<SessionCodec>) -> Self {
    Self { codec }
  }
}

impl<S, B> Transform<S, ServiceRequest> for WebAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = WebAuthMiddlewareService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(WebAuthMiddlewareService {
      service: Rc::new(service),
      codec: self.codec.clone(),
    }))
  }
}

pub struct WebAuthMiddlewareService<S> {
  service: Rc<S>,
  codec: Arc<SessionCodec>,
}

impl<S, B> Service<ServiceRequest> for WebAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    // Absent, malformed, tampered and expired cookies all collapse to the
    // same outcome: no session.
    let session = req
      .cookie(SESSION_COOKIE)
      .and_then(|cookie| self.codec.decode(cookie.value(), Utc::now()).ok());

    let service = Rc::clone(&self.service);

    Box::pin(async move {
      match session {
        Some(claims) => {
          req.extensions_mut().insert(CurrentUser(claims.user_id));
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        None => {
          let return_to = req.path().to_string();
          let res = req.into_response(login_redirect(&return_to));
          Ok(res.map_into_right_body())
        }
      }
    })
  }
}
