use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual style picked by the sender for a kudo card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KudoStyle {
  pub emoji: String,
  pub background_color: String,
  pub text_color: String,
}

impl Default for KudoStyle {
  fn default() -> Self {
    Self {
      emoji: "👏".to_string(),
      background_color: "red".to_string(),
      text_color: "white".to_string(),
    }
  }
}

/// A short praise message from one user to another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kudo {
  pub id: Uuid,
  pub message: String,
  pub author_id: Uuid,
  pub recipient_id: Uuid,
  pub style: KudoStyle,
  pub created_at: DateTime<Utc>,
}

impl Kudo {
  pub fn new(message: String, author_id: Uuid, recipient_id: Uuid, style: KudoStyle) -> Self {
    Self {
      id: Uuid::new_v4(),
      message,
      author_id,
      recipient_id,
      style,
      created_at: Utc::now(),
    }
  }

  /// Creates a kudo from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    message: String,
    author_id: Uuid,
    recipient_id: Uuid,
    style: KudoStyle,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      message,
      author_id,
      recipient_id,
      style,
      created_at,
    }
  }
}

/// A kudo joined with its author's display name for feed rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KudoWithAuthor {
  pub kudo: Kudo,
  pub author_first_name: String,
  pub author_last_name: String,
}
