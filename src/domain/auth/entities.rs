use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile fields carried on a user record.
///
/// Owned by the profile collaborator; this core only passes them through at
/// registration time and reads them for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
  pub first_name: String,
  pub last_name: String,
}

impl Profile {
  pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
    }
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// User entity representing an account in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's email address (unique, lowercase)
  pub email: String,
  /// Hashed password using Argon2 (never the plaintext)
  pub password_hash: String,
  /// Display profile owned by the profile collaborator
  pub profile: Profile,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given details
  pub fn new(email: String, password_hash: String, profile: Profile) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      email,
      password_hash,
      profile,
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    email: String,
    password_hash: String,
    profile: Profile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password_hash,
      profile,
      created_at,
      updated_at,
    }
  }
}

/// A client-held, server-verifiable claim of identity.
///
/// Claims are fully encoded into the session cookie; the server keeps no
/// session table. A decoded claim is either intact and unexpired, in which
/// case `user_id` is trusted, or it is discarded entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
  /// Weak reference to the user this session belongs to
  pub user_id: Uuid,
  /// Timestamp when the session was issued
  #[serde(with = "chrono::serde::ts_seconds")]
  pub issued_at: DateTime<Utc>,
  /// Absolute expiry; the claim is worthless from this instant on
  #[serde(with = "chrono::serde::ts_seconds")]
  pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
  /// Creates claims for a user, valid from `now` for `ttl`.
  pub fn new(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
    Self {
      user_id,
      issued_at: now,
      expires_at: now + ttl,
    }
  }

  /// Checks whether the claims have expired as of `now`
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }
}
