use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Answer row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Answer {
    pub answerid: Uuid,
    pub questionid: Uuid,
    pub userid: Uuid,
    pub answer: String,
    pub created_at: OffsetDateTime,
}

/// Answer joined with its author's username for read endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnswerWithAuthor {
    pub answerid: Uuid,
    pub userid: Uuid,
    pub answer: String,
    pub username: String,
    pub created_at: OffsetDateTime,
}
