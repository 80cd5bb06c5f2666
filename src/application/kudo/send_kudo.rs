use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::UserRepository;
use crate::domain::kudo::entities::{Kudo, KudoStyle};
use crate::domain::kudo::errors::KudoError;
use crate::domain::kudo::ports::KudoRepository;

/// Command for sending a kudo to another user
#[derive(Debug, Clone)]
pub struct SendKudoCommand {
  pub author_id: Uuid,
  pub recipient_id: Uuid,
  pub message: String,
  pub emoji: Option<String>,
  pub background_color: Option<String>,
  pub text_color: Option<String>,
}

/// Use case for sending a kudo
pub struct SendKudoUseCase {
  kudo_repo: Arc<dyn KudoRepository>,
  user_repo: Arc<dyn UserRepository>,
}

impl SendKudoUseCase {
  pub fn new(kudo_repo: Arc<dyn KudoRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
    Self {
      kudo_repo,
      user_repo,
    }
  }

  /// # Errors
  /// Returns `KudoError::EmptyMessage` for a blank message and
  /// `KudoError::RecipientNotFound` for an unknown recipient
  pub async fn execute(&self, command: SendKudoCommand) -> Result<Kudo, KudoError> {
    let message = command.message.trim().to_string();
    if message.is_empty() {
      return Err(KudoError::EmptyMessage);
    }

    let recipient = match self.user_repo.find_by_id(command.recipient_id).await {
      Ok(user) => user,
      Err(AuthError::Repository(e)) => return Err(KudoError::Repository(e)),
      Err(e) => {
        return Err(KudoError::Repository(RepositoryError::QueryFailed(
          e.to_string(),
        )));
      }
    };
    if recipient.is_none() {
      return Err(KudoError::RecipientNotFound);
    }

    let defaults = KudoStyle::default();
    let style = KudoStyle {
      emoji: command.emoji.unwrap_or(defaults.emoji),
      background_color: command.background_color.unwrap_or(defaults.background_color),
      text_color: command.text_color.unwrap_or(defaults.text_color),
    };

    let kudo = Kudo::new(message, command.author_id, command.recipient_id, style);
    self.kudo_repo.create(kudo).await
  }
}
