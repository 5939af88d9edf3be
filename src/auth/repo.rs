use sqlx::PgPool;
use time::OffsetDateTime;

use crate::auth::repo_types::User;

const USER_COLUMNS: &str = "userid, username, firstname, lastname, email, user_password, \
                            reset_otp, otp_expiration, created_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with an already-hashed password.
    pub async fn create(
        db: &PgPool,
        username: &str,
        firstname: &str,
        lastname: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, firstname, lastname, email, user_password) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Store a new reset challenge, overwriting any prior one. At most one
    /// challenge is live per user.
    pub async fn set_reset_challenge(
        db: &PgPool,
        email: &str,
        otp_hash: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET reset_otp = $1, otp_expiration = $2 WHERE email = $3")
            .bind(otp_hash)
            .bind(expires_at)
            .bind(email)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Replace the password and consume the reset challenge. A single UPDATE
    /// so the challenge can never survive a successful password change.
    pub async fn reset_password(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE users SET user_password = $1, reset_otp = NULL, otp_expiration = NULL \
             WHERE email = $2",
        )
        .bind(password_hash)
        .bind(email)
        .execute(db)
        .await?;
        Ok(())
    }
}
