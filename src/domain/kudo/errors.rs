use thiserror::Error;

use crate::domain::auth::errors::RepositoryError;

/// Errors for the kudo feed collaborator
#[derive(Debug, Error)]
pub enum KudoError {
  #[error("Kudo message cannot be empty")]
  EmptyMessage,

  #[error("Recipient not found")]
  RecipientNotFound,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for KudoError {
  fn from(error: sqlx::Error) -> Self {
    KudoError::Repository(RepositoryError::from(error))
  }
}
