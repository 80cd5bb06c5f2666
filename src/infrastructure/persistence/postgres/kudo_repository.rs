use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::kudo::{
  entities::{Kudo, KudoStyle, KudoWithAuthor},
  errors::KudoError,
  ports::KudoRepository,
};

/// PostgreSQL implementation of the KudoRepository trait
pub struct PostgresKudoRepository {
  pool: PgPool,
}

impl PostgresKudoRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row for a kudo joined with its author profile
#[derive(Debug, sqlx::FromRow)]
struct KudoRow {
  id: Uuid,
  message: String,
  author_id: Uuid,
  recipient_id: Uuid,
  emoji: String,
  background_color: String,
  text_color: String,
  created_at: DateTime<Utc>,
  author_first_name: String,
  author_last_name: String,
}

impl From<KudoRow> for KudoWithAuthor {
  fn from(row: KudoRow) -> Self {
    KudoWithAuthor {
      kudo: Kudo::from_db(
        row.id,
        row.message,
        row.author_id,
        row.recipient_id,
        KudoStyle {
          emoji: row.emoji,
          background_color: row.background_color,
          text_color: row.text_color,
        },
        row.created_at,
      ),
      author_first_name: row.author_first_name,
      author_last_name: row.author_last_name,
    }
  }
}

const FEED_SELECT: &str = r#"
    SELECT
        k.id,
        k.message,
        k.author_id,
        k.recipient_id,
        k.emoji,
        k.background_color,
        k.text_color,
        k.created_at,
        u.first_name AS author_first_name,
        u.last_name AS author_last_name
    FROM kudos k
    JOIN users u ON u.id = k.author_id
"#;

#[async_trait]
impl KudoRepository for PostgresKudoRepository {
  async fn create(&self, kudo: Kudo) -> Result<Kudo, KudoError> {
    sqlx::query(
      r#"
            INSERT INTO kudos (
                id, message, author_id, recipient_id,
                emoji, background_color, text_color, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
    )
    .bind(kudo.id)
    .bind(&kudo.message)
    .bind(kudo.author_id)
    .bind(kudo.recipient_id)
    .bind(&kudo.style.emoji)
    .bind(&kudo.style.background_color)
    .bind(&kudo.style.text_color)
    .bind(kudo.created_at)
    .execute(&self.pool)
    .await?;

    Ok(kudo)
  }

  async fn list_for_recipient(&self, recipient_id: Uuid) -> Result<Vec<KudoWithAuthor>, KudoError> {
    let rows = sqlx::query_as::<_, KudoRow>(&format!(
      "{} WHERE k.recipient_id = $1 ORDER BY k.created_at DESC",
      FEED_SELECT
    ))
    .bind(recipient_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn recent(&self, limit: i64) -> Result<Vec<KudoWithAuthor>, KudoError> {
    let rows = sqlx::query_as::<_, KudoRow>(&format!(
      "{} ORDER BY k.created_at DESC LIMIT $1",
      FEED_SELECT
    ))
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }
}
