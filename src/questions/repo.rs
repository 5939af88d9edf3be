use sqlx::PgPool;
use uuid::Uuid;

use crate::questions::repo_types::{Question, QuestionWithAuthor};

impl Question {
    /// All non-deleted questions with author usernames, oldest first.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<QuestionWithAuthor>> {
        let rows = sqlx::query_as::<_, QuestionWithAuthor>(
            r#"
            SELECT questions.questionid, questions.userid, questions.title, questions.tag,
                   questions.description, users.username, questions.created_at
            FROM questions
            INNER JOIN users ON questions.userid = users.userid
            WHERE questions.is_deleted = FALSE
            ORDER BY questions.created_at ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_with_author(
        db: &PgPool,
        questionid: Uuid,
    ) -> anyhow::Result<Option<QuestionWithAuthor>> {
        let row = sqlx::query_as::<_, QuestionWithAuthor>(
            r#"
            SELECT questions.questionid, questions.userid, questions.title, questions.tag,
                   questions.description, users.username, questions.created_at
            FROM questions
            INNER JOIN users ON questions.userid = users.userid
            WHERE questions.questionid = $1 AND questions.is_deleted = FALSE
            "#,
        )
        .bind(questionid)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Non-deleted question by id, without the author join. Used for
    /// ownership checks before mutation.
    pub async fn find_by_id(db: &PgPool, questionid: Uuid) -> anyhow::Result<Option<Question>> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            SELECT questionid, userid, title, tag, description, created_at
            FROM questions
            WHERE questionid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(questionid)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Existence check regardless of soft deletion, used before posting an
    /// answer.
    pub async fn exists(db: &PgPool, questionid: Uuid) -> anyhow::Result<bool> {
        let found: Option<(Uuid,)> =
            sqlx::query_as("SELECT questionid FROM questions WHERE questionid = $1")
                .bind(questionid)
                .fetch_optional(db)
                .await?;
        Ok(found.is_some())
    }

    pub async fn create(
        db: &PgPool,
        questionid: Uuid,
        userid: Uuid,
        title: &str,
        tag: &str,
        description: &str,
    ) -> anyhow::Result<Question> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (questionid, userid, title, tag, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING questionid, userid, title, tag, description, created_at
            "#,
        )
        .bind(questionid)
        .bind(userid)
        .bind(title)
        .bind(tag)
        .bind(description)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        questionid: Uuid,
        title: &str,
        description: &str,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE questions SET title = $1, description = $2 WHERE questionid = $3")
            .bind(title)
            .bind(description)
            .bind(questionid)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn soft_delete(db: &PgPool, questionid: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE questions SET is_deleted = TRUE WHERE questionid = $1")
            .bind(questionid)
            .execute(db)
            .await?;
        Ok(())
    }
}
