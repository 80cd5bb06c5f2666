use actix_web::{HttpRequest, HttpResponse, http::header, web};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::handlers::current_user;
use crate::application::kudo::{SendKudoCommand, SendKudoUseCase};
use crate::domain::kudo::errors::KudoError;

#[derive(Deserialize)]
pub struct KudoFormData {
  message: String,
  emoji: Option<String>,
  background_color: Option<String>,
  text_color: Option<String>,
}

/// Handle the kudo send form (authenticated)
pub async fn send_kudo_submit(
  req: HttpRequest,
  recipient_id: web::Path<Uuid>,
  form: web::Form<KudoFormData>,
  use_case: web::Data<Arc<SendKudoUseCase>>,
) -> Result<HttpResponse, actix_web::Error> {
  let author = current_user(&req)?;

  let command = SendKudoCommand {
    author_id: author.0,
    recipient_id: recipient_id.into_inner(),
    message: form.message.clone(),
    emoji: form.emoji.clone(),
    background_color: form.background_color.clone(),
    text_color: form.text_color.clone(),
  };

  match use_case.execute(command).await {
    Ok(kudo) => {
      tracing::debug!("Kudo {} sent to {}", kudo.id, kudo.recipient_id);
    }
    // User-correctable rejects land back on the feed; the form validates
    // these client-side as well
    Err(e @ (KudoError::EmptyMessage | KudoError::RecipientNotFound)) => {
      tracing::warn!("Kudo rejected: {}", e);
    }
    Err(e) => {
      tracing::error!("Failed to store kudo: {}", e);
      return Err(actix_web::error::ErrorInternalServerError(
        "Failed to store kudo",
      ));
    }
  }

  Ok(
    HttpResponse::Found()
      .insert_header((header::LOCATION, "/home"))
      .finish(),
  )
}
