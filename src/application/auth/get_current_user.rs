use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;

/// Response containing current user information
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,
  /// User's email address
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  /// Timestamp when the user account was created
  pub created_at: DateTime<Utc>,
}

/// Use case for resolving the authenticated user's record.
///
/// Session validity is already established by the guard; this only turns a
/// trusted user id into display data.
pub struct GetCurrentUserUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl GetCurrentUserUseCase {
  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  /// # Errors
  /// Returns `AuthError::UserNotFound` if the id no longer resolves to a
  /// record (e.g. the account was deleted after the session was issued)
  pub async fn execute(&self, user_id: Uuid) -> Result<GetCurrentUserResponse, AuthError> {
    let user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    Ok(GetCurrentUserResponse {
      user_id: user.id,
      email: user.email,
      first_name: user.profile.first_name,
      last_name: user.profile.last_name,
      created_at: user.created_at,
    })
  }
}
