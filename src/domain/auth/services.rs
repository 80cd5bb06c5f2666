use std::sync::Arc;

use super::entities::{Profile, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, UserRepository};
use super::value_objects::{Email, Password};

/// Authentication service implementing core business logic.
///
/// Stateless across requests: every call owns its entire flow and either
/// completes or fails outright. Session minting happens in the HTTP adapter
/// once a call here has fully succeeded.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(user_repo: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
    Self {
      user_repo,
      password_hasher,
    }
  }

  /// Registers a new user with email, password and profile fields.
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if the email is already taken,
  /// `AuthError::CreateFailed` if the store could not persist the record.
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    profile: Profile,
  ) -> Result<User, AuthError> {
    if self.user_repo.count_by_email(&email).await? > 0 {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(email.into_inner(), password_hash.into_inner(), profile);

    match self.user_repo.create(user).await {
      Ok(user) => Ok(user),
      // A concurrent registration can slip between the count and the insert;
      // the unique index reports it as a duplicate key.
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::EmailAlreadyExists)
      }
      Err(AuthError::Repository(e)) => {
        tracing::error!("User creation failed: {}", e);
        Err(AuthError::CreateFailed)
      }
      Err(e) => Err(e),
    }
  }

  /// Authenticates a user by email and password.
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` when the email is unknown or
  /// the password does not match; the two cases are not distinguishable.
  pub async fn login(&self, email: Email, password: Password) -> Result<User, AuthError> {
    let user = match self.user_repo.find_by_email(&email).await? {
      Some(user) => user,
      None => return Err(AuthError::InvalidCredentials),
    };

    let password_hash = super::value_objects::PasswordHash::from_hash(&user.password_hash)?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use std::collections::HashMap;
  use std::sync::Mutex;
  use uuid::Uuid;

  use crate::domain::auth::value_objects::PasswordHash;

  /// In-memory credential store keyed by email
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
      let users = self.users.lock().unwrap();
      Ok(users.values().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
      let users = self.users.lock().unwrap();
      Ok(users.get(email.as_str()).cloned())
    }

    async fn count_by_email(&self, email: &Email) -> Result<i64, AuthError> {
      let users = self.users.lock().unwrap();
      Ok(users.contains_key(email.as_str()) as i64)
    }

    async fn list_excluding(&self, id: Uuid) -> Result<Vec<User>, AuthError> {
      let users = self.users.lock().unwrap();
      Ok(users.values().filter(|u| u.id != id).cloned().collect())
    }
  }

  /// Hasher backed by the value-object Argon2 path; the production port
  /// implementation has its own tests in the infrastructure layer.
  struct TestPasswordHasher;

  #[async_trait]
  impl PasswordHasher for TestPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
      // Real Argon2id, but only here so verify() below has a valid PHC string
      Ok(password.hash().map_err(AuthError::ValueObject)?)
    }

    async fn verify(
      &self,
      password: &Password,
      hashed_password: &PasswordHash,
    ) -> Result<bool, AuthError> {
      Ok(hashed_password.verify(password).map_err(AuthError::ValueObject)?)
    }
  }

  fn service() -> (AuthService, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::default());
    let service = AuthService::new(repo.clone(), Arc::new(TestPasswordHasher));
    (service, repo)
  }

  #[tokio::test]
  async fn test_register_then_duplicate_fails() {
    let (service, repo) = service();

    let user = service
      .register(
        Email::new("a@x.com").unwrap(),
        Password::new("secret1").unwrap(),
        Profile::new("Ada", "Lovelace"),
      )
      .await
      .unwrap();

    assert_eq!(user.email, "a@x.com");
    // Stored value is a hash, never the plaintext
    assert_ne!(user.password_hash, "secret1");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let err = service
      .register(
        Email::new("a@x.com").unwrap(),
        Password::new("other-password").unwrap(),
        Profile::new("Eve", "Intruder"),
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::EmailAlreadyExists));
    assert_eq!(repo.users.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_login_unknown_email_and_wrong_password_look_identical() {
    let (service, _repo) = service();

    service
      .register(
        Email::new("a@x.com").unwrap(),
        Password::new("secret1").unwrap(),
        Profile::new("Ada", "Lovelace"),
      )
      .await
      .unwrap();

    let unknown = service
      .login(
        Email::new("nobody@x.com").unwrap(),
        Password::new("secret1").unwrap(),
      )
      .await
      .unwrap_err();

    let wrong = service
      .login(
        Email::new("a@x.com").unwrap(),
        Password::new("wrong-password").unwrap(),
      )
      .await
      .unwrap_err();

    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());
  }

  #[tokio::test]
  async fn test_login_success_returns_registered_user() {
    let (service, _repo) = service();

    let registered = service
      .register(
        Email::new("a@x.com").unwrap(),
        Password::new("secret1").unwrap(),
        Profile::new("Ada", "Lovelace"),
      )
      .await
      .unwrap();

    let logged_in = service
      .login(
        Email::new("A@X.com").unwrap(),
        Password::new("secret1").unwrap(),
      )
      .await
      .unwrap();

    assert_eq!(logged_in.id, registered.id);
  }
}
