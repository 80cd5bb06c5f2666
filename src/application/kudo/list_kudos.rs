use std::sync::Arc;
use uuid::Uuid;

use crate::domain::kudo::entities::KudoWithAuthor;
use crate::domain::kudo::errors::KudoError;
use crate::domain::kudo::ports::KudoRepository;

const RECENT_LIMIT: i64 = 3;

/// Feed data for the home page
#[derive(Debug, Clone)]
pub struct KudoFeed {
  /// Kudos received by the current user, newest first
  pub received: Vec<KudoWithAuthor>,
  /// Most recent kudos across all users
  pub recent: Vec<KudoWithAuthor>,
}

/// Use case for listing kudos on the home page
pub struct ListKudosUseCase {
  kudo_repo: Arc<dyn KudoRepository>,
}

impl ListKudosUseCase {
  pub fn new(kudo_repo: Arc<dyn KudoRepository>) -> Self {
    Self { kudo_repo }
  }

  pub async fn execute(&self, recipient_id: Uuid) -> Result<KudoFeed, KudoError> {
    let received = self.kudo_repo.list_for_recipient(recipient_id).await?;
    let recent = self.kudo_repo.recent(RECENT_LIMIT).await?;

    Ok(KudoFeed { received, recent })
  }
}
