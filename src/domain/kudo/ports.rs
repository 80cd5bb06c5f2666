use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Kudo, KudoWithAuthor};
use super::errors::KudoError;

/// Repository trait for kudo persistence.
///
/// The feed order is fixed (newest first); sort and filter shapes are owned
/// by the storage side and are not part of this boundary.
#[async_trait]
pub trait KudoRepository: Send + Sync {
  /// Persists a new kudo
  async fn create(&self, kudo: Kudo) -> Result<Kudo, KudoError>;

  /// Lists kudos received by a user, newest first
  async fn list_for_recipient(&self, recipient_id: Uuid) -> Result<Vec<KudoWithAuthor>, KudoError>;

  /// Lists the most recent kudos across all users
  async fn recent(&self, limit: i64) -> Result<Vec<KudoWithAuthor>, KudoError>;
}
