use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Question row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub questionid: Uuid,
    pub userid: Uuid,
    pub title: String,
    pub tag: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

/// Question joined with its author's username for read endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuestionWithAuthor {
    pub questionid: Uuid,
    pub userid: Uuid,
    pub title: String,
    pub tag: String,
    pub description: String,
    pub username: String,
    pub created_at: OffsetDateTime,
}
