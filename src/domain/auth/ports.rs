use async_trait::async_trait;
use uuid::Uuid;

use super::entities::User;
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash};

/// Repository trait for user persistence operations.
///
/// This is the credential-store boundary; persistence mechanics (schema,
/// transactions, storage engine) live behind it.
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Counts users with the given email (existence check)
  async fn count_by_email(&self, email: &Email) -> Result<i64, AuthError>;

  /// Lists every user except the given one (kudo recipients panel)
  async fn list_excluding(&self, id: Uuid) -> Result<Vec<User>, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}
