use sqlx::PgPool;
use uuid::Uuid;

use crate::answers::repo_types::{Answer, AnswerWithAuthor};

impl Answer {
    /// Non-deleted answers for a question with author usernames, newest
    /// first.
    pub async fn list_by_question(
        db: &PgPool,
        questionid: Uuid,
    ) -> anyhow::Result<Vec<AnswerWithAuthor>> {
        let rows = sqlx::query_as::<_, AnswerWithAuthor>(
            r#"
            SELECT answers.answerid, answers.userid, answers.answer,
                   users.username, answers.created_at
            FROM answers
            INNER JOIN users ON answers.userid = users.userid
            WHERE answers.questionid = $1 AND answers.is_deleted = FALSE
            ORDER BY answers.created_at DESC
            "#,
        )
        .bind(questionid)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, answerid: Uuid) -> anyhow::Result<Option<Answer>> {
        let row = sqlx::query_as::<_, Answer>(
            r#"
            SELECT answerid, questionid, userid, answer, created_at
            FROM answers
            WHERE answerid = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(answerid)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(
        db: &PgPool,
        userid: Uuid,
        questionid: Uuid,
        answer: &str,
    ) -> anyhow::Result<Answer> {
        let row = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (userid, questionid, answer)
            VALUES ($1, $2, $3)
            RETURNING answerid, questionid, userid, answer, created_at
            "#,
        )
        .bind(userid)
        .bind(questionid)
        .bind(answer)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(db: &PgPool, answerid: Uuid, answer: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE answers SET answer = $1 WHERE answerid = $2")
            .bind(answer)
            .bind(answerid)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn soft_delete(db: &PgPool, answerid: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE answers SET is_deleted = TRUE WHERE answerid = $1")
            .bind(answerid)
            .execute(db)
            .await?;
        Ok(())
    }
}
